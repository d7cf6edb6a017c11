use crate::app_state::State;
use crate::config::BoardConfig;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

#[cfg(target_arch = "wasm32")]
use winit::event_loop::EventLoopProxy;

#[cfg(target_os = "macos")]
use winit::platform::macos::WindowAttributesExtMacOS;

struct App {
    config: BoardConfig,
    state: Option<State>,
    #[cfg(target_arch = "wasm32")]
    proxy: Option<EventLoopProxy<State>>,
    #[cfg(target_arch = "wasm32")]
    container_resize: Option<crate::web::ContainerResize>,
}

impl App {
    #[cfg(not(target_arch = "wasm32"))]
    fn start(&mut self, event_loop: &ActiveEventLoop, window: Arc<Window>) {
        match pollster::block_on(State::new(window, &self.config)) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("Failed to start board: {:#}", err);
                event_loop.exit();
            }
        }
    }

    /// The GPU can't be awaited on the browser's main thread, so the state
    /// is built in a task and handed back through the event loop.
    #[cfg(target_arch = "wasm32")]
    fn start(&mut self, _event_loop: &ActiveEventLoop, window: Arc<Window>) {
        self.container_resize = crate::web::ContainerResize::mount(window.clone());
        if self.container_resize.is_none() {
            log::error!("Couldn't mount the board into #{}", crate::web::CONTAINER_ID);
        }

        let Some(proxy) = self.proxy.take() else {
            return;
        };
        let config = self.config.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match State::new(window, &config).await {
                Ok(state) => {
                    if proxy.send_event(state).is_err() {
                        log::error!("Event loop closed before the board was ready");
                    }
                }
                Err(err) => log::error!("Failed to start board: {:#}", err),
            }
        });
    }
}

impl ApplicationHandler<State> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        // The proxy is consumed once the state is being built.
        #[cfg(target_arch = "wasm32")]
        {
            if self.proxy.is_none() {
                return;
            }
        }

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("crewboard");

        #[cfg(target_os = "macos")]
        {
            window_attributes = window_attributes
                .with_titlebar_transparent(true)
                .with_title_hidden(false)
                .with_fullsize_content_view(true);
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {}", err);
                event_loop.exit();
                return;
            }
        };

        self.start(event_loop, window);
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, mut state: State) {
        let size = state.window().inner_size();
        state.resize(size);
        state.window().request_redraw();
        self.state = Some(state);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };
        if window_id != state.window().id() || state.input(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                log::info!("WindowEvent::Resized: {}x{}", physical_size.width, physical_size.height);
                state.resize(physical_size);
            }
            WindowEvent::RedrawRequested => {
                state.update();
                match state.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        state.resize(state.size)
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window().request_redraw();
        }
    }
}

fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            if let Err(err) = console_log::init_with_level(log::Level::Info) {
                web_sys::console::error_1(&format!("Couldn't initialize logger: {err}").into());
            }
        } else {
            env_logger::init();
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> BoardConfig {
    BoardConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> BoardConfig {
    BoardConfig::load().unwrap_or_else(|err| {
        log::error!("Invalid config, falling back to defaults: {:#}", err);
        BoardConfig::default()
    })
}

pub async fn run() {
    init_logging();
    let config = load_config();

    let event_loop = match EventLoop::<State>::with_user_event().build() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {}", err);
            return;
        }
    };

    let mut app = App {
        #[cfg(target_arch = "wasm32")]
        proxy: Some(event_loop.create_proxy()),
        #[cfg(target_arch = "wasm32")]
        container_resize: None,
        config,
        state: None,
    };

    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop terminated with an error: {}", err);
    }
}
