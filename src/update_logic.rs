use crate::app_state::State;
use crate::vertex::Vertex;
use wgpu::util::DeviceExt;

const MIN_VERTEX_CAPACITY: usize = 4096;
const MIN_INDEX_CAPACITY: usize = 8192;

impl State {
    pub fn update(&mut self) {
        self.sync_stroke_buffers();
        self.sync_toolbar_buffers();
    }

    fn sync_stroke_buffers(&mut self) {
        let mesh = self.session.surface();
        let geometry = mesh.geometry();
        let buffers = &mut self.geometry;

        if buffers.generation != mesh.generation() {
            buffers.uploaded_vertices = 0;
            buffers.uploaded_indices = 0;
            buffers.generation = mesh.generation();
        }

        let vertex_count = geometry.vertices.len();
        let index_count = geometry.indices.len();

        if vertex_count > buffers.vertex_capacity || buffers.vertex.is_none() {
            let capacity = vertex_count.next_power_of_two().max(MIN_VERTEX_CAPACITY);
            log::debug!("Growing stroke vertex buffer to {} vertices", capacity);
            buffers.vertex = Some(self.gpu.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Stroke Vertex Buffer"),
                size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            buffers.vertex_capacity = capacity;
            buffers.uploaded_vertices = 0;
        }

        if index_count > buffers.index_capacity || buffers.index.is_none() {
            let capacity = index_count.next_power_of_two().max(MIN_INDEX_CAPACITY);
            log::debug!("Growing stroke index buffer to {} indices", capacity);
            buffers.index = Some(self.gpu.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Stroke Index Buffer"),
                size: (capacity * std::mem::size_of::<u32>()) as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            buffers.index_capacity = capacity;
            buffers.uploaded_indices = 0;
        }

        if let Some(vertex_buffer) = &buffers.vertex {
            if buffers.uploaded_vertices < vertex_count {
                let offset = buffers.uploaded_vertices * std::mem::size_of::<Vertex>();
                self.gpu.queue.write_buffer(
                    vertex_buffer,
                    offset as wgpu::BufferAddress,
                    bytemuck::cast_slice(&geometry.vertices[buffers.uploaded_vertices..]),
                );
                buffers.uploaded_vertices = vertex_count;
            }
        }

        if let Some(index_buffer) = &buffers.index {
            if buffers.uploaded_indices < index_count {
                let offset = buffers.uploaded_indices * std::mem::size_of::<u32>();
                self.gpu.queue.write_buffer(
                    index_buffer,
                    offset as wgpu::BufferAddress,
                    bytemuck::cast_slice(&geometry.indices[buffers.uploaded_indices..]),
                );
                buffers.uploaded_indices = index_count;
            }
        }

        buffers.count = index_count as u32;
    }

    fn sync_toolbar_buffers(&mut self) {
        let key = (
            self.session.tool(),
            self.session.color(),
            self.session.can_undo(),
            self.session.can_redo(),
        );
        if self.ui_geo.key == Some(key) {
            return;
        }

        let (tool, color, can_undo, can_redo) = key;
        let geometry = self.toolbar.geometry(tool, color, can_undo, can_redo);

        self.ui_geo.vertex = Some(self.gpu.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("UI Vertex Buffer"),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));

        self.ui_geo.index = Some(self.gpu.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("UI Index Buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));

        self.ui_geo.count = geometry.indices.len() as u32;
        self.ui_geo.key = Some(key);
    }
}
