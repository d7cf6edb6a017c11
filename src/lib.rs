mod app;
mod app_state;
mod canvas;
pub mod config;
pub mod drawing;
mod event_handler;
pub mod export;
pub mod mesh;
mod renderer;
pub mod session;
mod state;
pub mod surface;
mod ui;
mod update_logic;
mod vertex;
#[cfg(target_arch = "wasm32")]
mod web;
pub mod workspace;

// Re-export the main public interface
pub use app::run;
pub use config::BoardConfig;
pub use drawing::{Color, LineCap, Point, Stroke, Tool};
pub use session::DrawingSession;
pub use surface::{RecordingSurface, RenderSurface};
pub use vertex::Vertex;

// Re-export for WASM compatibility
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub async fn start() {
    run().await;
}
