use crate::config::BoardConfig;
use crate::mesh::StrokeMesh;
use crate::session::DrawingSession;
use crate::state::{Canvas, GeometryBuffers, GpuContext, InputState, UiBuffers, create_board_pipeline};
use crate::ui::Toolbar;
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Browser canvases report a zero size until they are laid out.
#[cfg(target_arch = "wasm32")]
const FALLBACK_SIZE: PhysicalSize<u32> = PhysicalSize::new(1280, 720);

pub struct State {
    pub window: Arc<Window>,
    pub size: PhysicalSize<u32>,

    pub gpu: GpuContext,
    pub render_pipeline: wgpu::RenderPipeline,
    pub canvas: Canvas,
    pub geometry: GeometryBuffers,
    pub ui_geo: UiBuffers,
    pub input: InputState,

    pub session: DrawingSession<StrokeMesh>,
    pub toolbar: Toolbar,
}

impl State {
    pub async fn new(window: Arc<Window>, config: &BoardConfig) -> anyhow::Result<State> {
        #[allow(unused_mut)]
        let mut size = window.inner_size();
        #[cfg(target_arch = "wasm32")]
        {
            if size.width == 0 || size.height == 0 {
                size = FALLBACK_SIZE;
            }
        }
        let size = PhysicalSize::new(size.width.max(1), size.height.max(1));

        let gpu = GpuContext::new(window.clone(), size).await?;
        let canvas = Canvas::new(&gpu.device, size);
        let render_pipeline =
            create_board_pipeline(&gpu.device, gpu.config.format, &canvas.bind_group_layout);

        let mut session = DrawingSession::new(StrokeMesh::default(), config);
        session.resize(size.width, size.height);

        log::info!(
            "Board ready at {}x{} ({:?})",
            size.width,
            size.height,
            gpu.config.format
        );

        Ok(Self {
            window,
            size,
            gpu,
            render_pipeline,
            canvas,
            geometry: GeometryBuffers::empty(),
            ui_geo: UiBuffers::default(),
            input: InputState::default(),
            session,
            toolbar: Toolbar::new(&config.palette),
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }
}
