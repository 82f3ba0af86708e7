use crate::d3d12::create_device::create_device;
use crate::d3d12::queue_fence::QueueFence;
use crate::d3d12::render_targets::RenderTargets;
use crate::d3d12::render_targets::BUFFER_COUNT;
use crate::d3d12::render_targets::BUFFER_FORMAT;
use crate::d3d12::transition_barrier::transition_barrier;
use crate::feature_level::FeatureLevel;
use crate::frame_cycle::should_rebuild_back_buffers;
use crate::frame_cycle::FrameCycle;
use crate::frame_cycle::FrameTarget;
use crate::input::Size2D;
use crate::sample_app::AppHost;
use crate::sample_error::CallContext;
use crate::sample_error::GraphicsError;
use std::ffi::c_void;
use tracing::debug;
use tracing::info;
use tracing::warn;
use windows::core::Interface;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

const SWAP_CHAIN_FLAGS: DXGI_SWAP_CHAIN_FLAG = DXGI_SWAP_CHAIN_FLAG_ALLOW_MODE_SWITCH;

/// Everything both samples set up before their first frame: device, direct
/// queue, one allocator + command list, a flip-model swap chain with its
/// render target views, and the frame fence.
///
/// A frame is `begin_frame` (reset, barrier to render target, clear),
/// whatever the sample records, then `end_frame` (barrier to present, execute,
/// signal, present, wait). The ordering and failure handling live in
/// [`FrameCycle`].
pub struct GraphicsCore {
    device: ID3D12Device,
    feature_level: FeatureLevel,
    frame: FrameResources,
    fence: QueueFence,
    cycle: FrameCycle,
    size: Size2D,
    viewport: D3D12_VIEWPORT,
    scissor_rect: RECT,
}

/// The objects a single frame records into and presents from.
struct FrameResources {
    command_allocator: ID3D12CommandAllocator,
    command_list: ID3D12GraphicsCommandList,
    command_queue: ID3D12CommandQueue,
    swap_chain: IDXGISwapChain3,
    render_targets: RenderTargets,
    clear_color: [f32; 4],
    back_buffer_index: u32,
    pipeline_state: Option<ID3D12PipelineState>,
}

impl GraphicsCore {
    pub fn new(host: &dyn AppHost, clear_color: [f32; 4]) -> Result<Self, GraphicsError> {
        let hwnd = HWND(host.window_handle() as *mut c_void);
        let size = host.client_size();

        let device_context = create_device(host.command_line())?;
        let device = device_context.device;

        let command_allocator: ID3D12CommandAllocator =
            unsafe { device.CreateCommandAllocator(D3D12_COMMAND_LIST_TYPE_DIRECT) }
                .for_call("ID3D12Device::CreateCommandAllocator")?;

        let command_list: ID3D12GraphicsCommandList = unsafe {
            device.CreateCommandList(0, D3D12_COMMAND_LIST_TYPE_DIRECT, &command_allocator, None)
        }
        .for_call("ID3D12Device::CreateCommandList")?;
        // Created in the recording state; every frame resets it before recording.
        unsafe { command_list.Close() }.for_call("ID3D12GraphicsCommandList::Close")?;

        let command_queue: ID3D12CommandQueue = unsafe {
            device.CreateCommandQueue(&D3D12_COMMAND_QUEUE_DESC {
                Type: D3D12_COMMAND_LIST_TYPE_DIRECT,
                Priority: D3D12_COMMAND_QUEUE_PRIORITY_NORMAL.0,
                Flags: D3D12_COMMAND_QUEUE_FLAG_NONE,
                NodeMask: 0,
            })
        }
        .for_call("ID3D12Device::CreateCommandQueue")?;

        let swap_chain_desc = DXGI_SWAP_CHAIN_DESC1 {
            Width: size.width,
            Height: size.height,
            Format: BUFFER_FORMAT,
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: 1,
                Quality: 0,
            },
            BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
            BufferCount: BUFFER_COUNT,
            Scaling: DXGI_SCALING_STRETCH,
            SwapEffect: DXGI_SWAP_EFFECT_FLIP_DISCARD,
            AlphaMode: DXGI_ALPHA_MODE_UNSPECIFIED,
            Flags: SWAP_CHAIN_FLAGS.0 as u32,
            ..Default::default()
        };
        let swap_chain: IDXGISwapChain1 = unsafe {
            device_context.factory.CreateSwapChainForHwnd(
                &command_queue,
                hwnd,
                &swap_chain_desc,
                None,
                None,
            )
        }
        .for_call("IDXGIFactory4::CreateSwapChainForHwnd")?;
        let swap_chain: IDXGISwapChain3 = swap_chain
            .cast()
            .for_call("IDXGISwapChain1::QueryInterface<IDXGISwapChain3>")?;

        let mut render_targets = RenderTargets::new(&device)?;
        render_targets.attach(&device, &swap_chain)?;

        let fence = QueueFence::new(&device, &command_queue, 0)?;
        let back_buffer_index = unsafe { swap_chain.GetCurrentBackBufferIndex() };

        info!(
            feature_level = %device_context.feature_level,
            width = size.width,
            height = size.height,
            "Graphics core ready"
        );

        Ok(Self {
            device,
            feature_level: device_context.feature_level,
            frame: FrameResources {
                command_allocator,
                command_list,
                command_queue,
                swap_chain,
                render_targets,
                clear_color,
                back_buffer_index,
                pipeline_state: None,
            },
            fence,
            cycle: FrameCycle::new(0),
            size,
            viewport: viewport_for(size),
            scissor_rect: scissor_rect_for(size),
        })
    }

    pub fn device(&self) -> &ID3D12Device {
        &self.device
    }

    pub fn feature_level(&self) -> FeatureLevel {
        self.feature_level
    }

    pub fn viewport(&self) -> &D3D12_VIEWPORT {
        &self.viewport
    }

    pub fn scissor_rect(&self) -> &RECT {
        &self.scissor_rect
    }

    /// Resets the command list, transitions the current back buffer to a
    /// render target, binds and clears it.
    pub fn begin_frame(
        &mut self,
        pipeline_state: Option<&ID3D12PipelineState>,
    ) -> Result<&ID3D12GraphicsCommandList, GraphicsError> {
        self.frame.pipeline_state = pipeline_state.cloned();
        self.cycle.begin(&mut self.frame, &self.fence)?;
        Ok(&self.frame.command_list)
    }

    /// Transitions the back buffer back to present, submits, presents and
    /// waits for the GPU to finish the frame.
    pub fn end_frame(&mut self) -> Result<(), GraphicsError> {
        let sync = self.cycle.end(&mut self.frame, &self.fence)?;
        debug!(signaled = sync.signaled, wait = ?sync.wait, "Frame complete");
        Ok(())
    }

    /// Recreates the back buffers at `new_size`. Zero-area sizes (minimized
    /// window) are ignored, as are unchanged sizes while the buffers exist.
    pub fn resize(&mut self, new_size: Size2D) -> Result<(), GraphicsError> {
        let attached = self.frame.render_targets.is_attached();
        if !should_rebuild_back_buffers(self.size, new_size, attached) {
            return Ok(());
        }

        self.cycle.flush(&self.fence)?;
        self.frame.render_targets.detach();

        unsafe {
            self.frame.swap_chain.ResizeBuffers(
                BUFFER_COUNT,
                new_size.width,
                new_size.height,
                DXGI_FORMAT_UNKNOWN,
                SWAP_CHAIN_FLAGS,
            )
        }
        .for_call("IDXGISwapChain3::ResizeBuffers")?;
        self.frame
            .render_targets
            .attach(&self.device, &self.frame.swap_chain)?;

        self.size = new_size;
        self.viewport = viewport_for(new_size);
        self.scissor_rect = scissor_rect_for(new_size);
        info!(width = new_size.width, height = new_size.height, "Swap chain resized");
        Ok(())
    }

    /// Blocks until the GPU has finished everything submitted so far.
    pub fn wait_for_gpu_idle(&mut self) -> Result<(), GraphicsError> {
        self.cycle.flush(&self.fence)?;
        Ok(())
    }
}

impl Drop for GraphicsCore {
    fn drop(&mut self) {
        if let Err(e) = self.wait_for_gpu_idle() {
            warn!("Error waiting for GPU idle on destroy: {e}");
        }
    }
}

impl FrameResources {
    fn back_buffer(&self) -> Result<&ID3D12Resource, GraphicsError> {
        self.render_targets.buffer(self.back_buffer_index)
    }
}

impl FrameTarget for FrameResources {
    type Error = GraphicsError;

    fn prepare_back_buffer(&mut self) -> Result<(), GraphicsError> {
        self.back_buffer_index = unsafe { self.swap_chain.GetCurrentBackBufferIndex() };
        self.back_buffer().map(|_| ())
    }

    fn reset_recording(&mut self) -> Result<(), GraphicsError> {
        unsafe { self.command_allocator.Reset() }.for_call("ID3D12CommandAllocator::Reset")?;
        unsafe {
            self.command_list
                .Reset(&self.command_allocator, self.pipeline_state.as_ref())
        }
        .for_call("ID3D12GraphicsCommandList::Reset")
    }

    fn begin_recording(&mut self) -> Result<(), GraphicsError> {
        let back_buffer = self.back_buffer()?;
        let rtv_handle = self.render_targets.handle(self.back_buffer_index);
        unsafe {
            self.command_list.ResourceBarrier(&[transition_barrier(
                back_buffer,
                D3D12_RESOURCE_STATE_PRESENT,
                D3D12_RESOURCE_STATE_RENDER_TARGET,
            )]);
            self.command_list
                .OMSetRenderTargets(1, Some(&rtv_handle), true, None);
            self.command_list
                .ClearRenderTargetView(rtv_handle, &self.clear_color, None);
        }
        Ok(())
    }

    fn abandon_recording(&mut self) -> Result<(), GraphicsError> {
        unsafe { self.command_list.Close() }.for_call("ID3D12GraphicsCommandList::Close")
    }

    fn close_recording(&mut self) -> Result<(), GraphicsError> {
        let back_buffer = self.back_buffer()?;
        unsafe {
            self.command_list.ResourceBarrier(&[transition_barrier(
                back_buffer,
                D3D12_RESOURCE_STATE_RENDER_TARGET,
                D3D12_RESOURCE_STATE_PRESENT,
            )]);
        }
        unsafe { self.command_list.Close() }.for_call("ID3D12GraphicsCommandList::Close")
    }

    fn execute(&mut self) -> Result<(), GraphicsError> {
        let command_lists = [Some(
            self.command_list
                .cast::<ID3D12CommandList>()
                .for_call("ID3D12GraphicsCommandList::QueryInterface<ID3D12CommandList>")?,
        )];
        unsafe { self.command_queue.ExecuteCommandLists(&command_lists) };
        Ok(())
    }

    fn present(&mut self) -> Result<(), GraphicsError> {
        unsafe { self.swap_chain.Present(1, DXGI_PRESENT(0)) }
            .ok()
            .for_call("IDXGISwapChain3::Present")
    }
}

fn viewport_for(size: Size2D) -> D3D12_VIEWPORT {
    D3D12_VIEWPORT {
        TopLeftX: 0.0,
        TopLeftY: 0.0,
        Width: size.width as f32,
        Height: size.height as f32,
        MinDepth: D3D12_MIN_DEPTH,
        MaxDepth: D3D12_MAX_DEPTH,
    }
}

fn scissor_rect_for(size: Size2D) -> RECT {
    RECT {
        left: 0,
        top: 0,
        right: size.width as i32,
        bottom: size.height as i32,
    }
}
