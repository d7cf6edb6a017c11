//! Browser embedding: mounts the board canvas inside its container element
//! and keeps it sized to that container.

use std::sync::Arc;
use wasm_bindgen::{JsCast, prelude::*};
use winit::dpi::LogicalSize;
use winit::platform::web::WindowExtWebSys;
use winit::window::Window;

pub const CONTAINER_ID: &str = "crewboard";

/// Owns the window `resize` listener; dropping it removes the listener so
/// a detached canvas is never touched.
pub struct ContainerResize {
    callback: Closure<dyn FnMut()>,
}

impl ContainerResize {
    pub fn mount(window: Arc<Window>) -> Option<Self> {
        let canvas = window.canvas()?;
        let document = web_sys::window()?.document()?;
        let container = document.get_element_by_id(CONTAINER_ID)?;
        container.append_child(&canvas).ok()?;

        fit_to_container(&window);

        let target = window.clone();
        let callback = Closure::wrap(Box::new(move || fit_to_container(&target)) as Box<dyn FnMut()>);
        web_sys::window()?
            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            .ok()?;

        Some(Self { callback })
    }
}

impl Drop for ContainerResize {
    fn drop(&mut self) {
        let Some(web_window) = web_sys::window() else {
            log::warn!("No browser window left to remove the resize listener from");
            return;
        };
        if let Err(err) = web_window
            .remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove resize listener: {:?}", err);
        }
    }
}

fn fit_to_container(window: &Window) {
    let Some(container) = window.canvas().and_then(|canvas| canvas.parent_element()) else {
        return;
    };
    let width = container.client_width().max(0) as u32;
    let height = container.client_height().max(0) as u32;
    log::info!("Container resized to {}x{}", width, height);
    // `None` means the resize is applied asynchronously and reported
    // through `WindowEvent::Resized`.
    if let Some(applied) = window.request_inner_size(LogicalSize::new(width, height)) {
        log::debug!("Canvas resized immediately to {}x{}", applied.width, applied.height);
    }
}
