use crate::app_state::State;

/// Draws one indexed batch if it has been uploaded.
fn draw_batch(pass: &mut wgpu::RenderPass<'_>, vertex: Option<&wgpu::Buffer>, index: Option<&wgpu::Buffer>, count: u32) {
    let (Some(vertex), Some(index)) = (vertex, index) else {
        return;
    };
    if count == 0 {
        return;
    }
    pass.set_vertex_buffer(0, vertex.slice(..));
    pass.set_index_buffer(index.slice(..), wgpu::IndexFormat::Uint32);
    pass.draw_indexed(0..count, 0, 0..1);
}

impl State {
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.gpu.surface.get_current_texture()?;
        let view = frame.texture.create_view(&Default::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Board Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Board Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            pass.set_pipeline(&self.render_pipeline);
            pass.set_bind_group(0, &self.canvas.uniform_bind_group, &[]);

            // Toolbar last so it sits above the strokes.
            draw_batch(
                &mut pass,
                self.geometry.vertex.as_ref(),
                self.geometry.index.as_ref(),
                self.geometry.count,
            );
            draw_batch(
                &mut pass,
                self.ui_geo.vertex.as_ref(),
                self.ui_geo.index.as_ref(),
                self.ui_geo.count,
            );
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
