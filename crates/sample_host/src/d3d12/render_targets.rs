use crate::sample_error::CallContext;
use crate::sample_error::GraphicsError;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

pub const BUFFER_COUNT: u32 = 2;
pub const BUFFER_FORMAT: DXGI_FORMAT = DXGI_FORMAT_R8G8B8A8_UNORM;

/// The swap chain's back buffers and the RTV heap describing them.
///
/// Buffers are detached before `ResizeBuffers`, which fails while any
/// reference to them is alive.
pub struct RenderTargets {
    heap: ID3D12DescriptorHeap,
    descriptor_size: u32,
    buffers: Option<[ID3D12Resource; BUFFER_COUNT as usize]>,
}

impl RenderTargets {
    pub fn new(device: &ID3D12Device) -> Result<Self, GraphicsError> {
        let heap: ID3D12DescriptorHeap = unsafe {
            device.CreateDescriptorHeap(&D3D12_DESCRIPTOR_HEAP_DESC {
                Type: D3D12_DESCRIPTOR_HEAP_TYPE_RTV,
                NumDescriptors: BUFFER_COUNT,
                Flags: D3D12_DESCRIPTOR_HEAP_FLAG_NONE,
                NodeMask: 0,
            })
        }
        .for_call("ID3D12Device::CreateDescriptorHeap")?;

        let descriptor_size =
            unsafe { device.GetDescriptorHandleIncrementSize(D3D12_DESCRIPTOR_HEAP_TYPE_RTV) };

        Ok(Self {
            heap,
            descriptor_size,
            buffers: None,
        })
    }

    /// Fetches every back buffer and writes its render target view.
    pub fn attach(
        &mut self,
        device: &ID3D12Device,
        swap_chain: &IDXGISwapChain3,
    ) -> Result<(), GraphicsError> {
        let heap_start = unsafe { self.heap.GetCPUDescriptorHandleForHeapStart() };
        let descriptor_size = self.descriptor_size;

        let buffers = array_init::try_array_init(|i| -> Result<ID3D12Resource, GraphicsError> {
            let resource: ID3D12Resource =
                unsafe { swap_chain.GetBuffer(i as u32) }.for_call("IDXGISwapChain3::GetBuffer")?;
            unsafe {
                device.CreateRenderTargetView(
                    &resource,
                    None,
                    D3D12_CPU_DESCRIPTOR_HANDLE {
                        ptr: heap_start.ptr + i * descriptor_size as usize,
                    },
                );
            }
            Ok(resource)
        })?;

        self.buffers = Some(buffers);
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.buffers.is_some()
    }

    pub fn detach(&mut self) {
        self.buffers = None;
    }

    pub fn buffer(&self, index: u32) -> Result<&ID3D12Resource, GraphicsError> {
        self.buffers
            .as_ref()
            .and_then(|buffers| buffers.get(index as usize))
            .ok_or(GraphicsError::Unavailable("back buffer"))
    }

    pub fn handle(&self, index: u32) -> D3D12_CPU_DESCRIPTOR_HANDLE {
        let heap_start = unsafe { self.heap.GetCPUDescriptorHandleForHeapStart() };
        D3D12_CPU_DESCRIPTOR_HANDLE {
            ptr: heap_start.ptr + (index * self.descriptor_size) as usize,
        }
    }
}
