use crate::compile_shader::compile_shader;
use crate::create_pipeline_state::create_pipeline_state;
use crate::create_root_signature::create_root_signature;
use crate::geometry::vertex_stride;
use crate::geometry::INDEX_COUNT;
use crate::geometry::QUAD_INDICES;
use crate::geometry::QUAD_VERTICES;
use crate::shader_path::resolve_shader_path;
use crate::shader_path::shader_search_dirs;
use crate::upload_buffer::create_upload_buffer;
use crate::upload_buffer::index_buffer_view;
use crate::upload_buffer::vertex_buffer_view;
use crate::CLEAR_COLOR;
use sample_host::d3d12::GraphicsCore;
use sample_host::input::Size2D;
use sample_host::AppHost;
use sample_host::SampleApp;
use tracing::info;
use windows::core::s;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;

/// Draws one indexed quad over the cleared back buffer.
pub struct PolygonSample {
    graphics: GraphicsCore,
    root_signature: ID3D12RootSignature,
    pipeline_state: ID3D12PipelineState,
    // Views point into these; they must outlive every frame.
    _vertex_buffer: ID3D12Resource,
    _index_buffer: ID3D12Resource,
    vertex_buffer_view: D3D12_VERTEX_BUFFER_VIEW,
    index_buffer_view: D3D12_INDEX_BUFFER_VIEW,
}

impl SampleApp for PolygonSample {
    const TITLE: &'static str = "02 Polygon";

    fn init(host: &dyn AppHost) -> eyre::Result<Self> {
        let graphics = GraphicsCore::new(host, CLEAR_COLOR)?;
        let device = graphics.device();

        let vertex_buffer = create_upload_buffer(device, &QUAD_VERTICES)?;
        let vertex_buffer_view = vertex_buffer_view(
            &vertex_buffer,
            vertex_stride(),
            std::mem::size_of_val(&QUAD_VERTICES),
        );
        let index_buffer = create_upload_buffer(device, &QUAD_INDICES)?;
        let index_buffer_view =
            index_buffer_view(&index_buffer, std::mem::size_of_val(&QUAD_INDICES));

        let search_dirs = shader_search_dirs();
        let vs_path = resolve_shader_path("basic_vs.hlsl", &search_dirs);
        let ps_path = resolve_shader_path("basic_ps.hlsl", &search_dirs);
        let vertex_shader = compile_shader(&vs_path, s!("main"), s!("vs_5_0"))?;
        let pixel_shader = compile_shader(&ps_path, s!("main"), s!("ps_5_0"))?;

        let root_signature = create_root_signature(device)?;
        let pipeline_state =
            create_pipeline_state(device, &root_signature, &vertex_shader, &pixel_shader)?;

        info!(
            feature_level = %graphics.feature_level(),
            vs = %vs_path.display(),
            ps = %ps_path.display(),
            "Polygon initialized"
        );

        Ok(Self {
            graphics,
            root_signature,
            pipeline_state,
            _vertex_buffer: vertex_buffer,
            _index_buffer: index_buffer,
            vertex_buffer_view,
            index_buffer_view,
        })
    }

    fn render(&mut self) -> eyre::Result<()> {
        let viewport = *self.graphics.viewport();
        let scissor_rect = *self.graphics.scissor_rect();

        let command_list = self.graphics.begin_frame(Some(&self.pipeline_state))?;
        unsafe {
            command_list.SetGraphicsRootSignature(&self.root_signature);
            command_list.RSSetViewports(&[viewport]);
            command_list.RSSetScissorRects(&[scissor_rect]);
            command_list.IASetPrimitiveTopology(D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST);
            command_list.IASetVertexBuffers(0, Some(&[self.vertex_buffer_view]));
            command_list.IASetIndexBuffer(Some(&self.index_buffer_view));
            command_list.DrawIndexedInstanced(INDEX_COUNT, 1, 0, 0, 0);
        }
        self.graphics.end_frame()?;
        Ok(())
    }

    fn on_resize(&mut self, new_size: Size2D) -> eyre::Result<()> {
        self.graphics.resize(new_size)?;
        Ok(())
    }
}
