use crate::workspace::error::{Result, WorkspaceError};
use serde::{Deserialize, Serialize};

/// Percentage of the total charged on top as a processing fee.
pub const PROCESSING_FEE_PERCENT: u64 = 3;

/// Fee on `amount` cents, rounded down to the cent. Amounts too large to
/// price are `InvalidAmount`.
pub fn processing_fee(amount: u64) -> Result<u64> {
    amount
        .checked_mul(PROCESSING_FEE_PERCENT)
        .map(|scaled| scaled / 100)
        .ok_or(WorkspaceError::InvalidAmount)
}

/// Formats cents as dollars with thousands separators, e.g. `$1,802.50`.
pub fn format_cents(cents: u64) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${}.{:02}", grouped, cents % 100)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceItem {
    pub description: String,
    pub quantity: u32,
    /// Cents per unit.
    pub rate: u64,
}

impl PriceItem {
    pub fn new(description: impl Into<String>, quantity: u32, rate: u64) -> Self {
        Self {
            description: description.into(),
            quantity,
            rate,
        }
    }

    pub fn amount(&self) -> Result<u64> {
        u64::from(self.quantity)
            .checked_mul(self.rate)
            .ok_or(WorkspaceError::InvalidAmount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub items: Vec<PriceItem>,
}

impl PriceBreakdown {
    pub fn new(items: Vec<PriceItem>) -> Self {
        Self { items }
    }

    pub fn total(&self) -> Result<u64> {
        self.items.iter().try_fold(0u64, |total, item| {
            total
                .checked_add(item.amount()?)
                .ok_or(WorkspaceError::InvalidAmount)
        })
    }

    pub fn processing_fee(&self) -> Result<u64> {
        processing_fee(self.total()?)
    }

    pub fn total_due(&self) -> Result<u64> {
        self.total()?
            .checked_add(self.processing_fee()?)
            .ok_or(WorkspaceError::InvalidAmount)
    }
}

impl Default for PriceBreakdown {
    fn default() -> Self {
        Self::new(vec![
            PriceItem::new("Initial Design", 1, 50_000),
            PriceItem::new("Revisions", 2, 25_000),
            PriceItem::new("Final Delivery", 1, 75_000),
        ])
    }
}
