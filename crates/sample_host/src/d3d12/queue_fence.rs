use crate::frame_fence::FenceTimeline;
use crate::sample_error::last_os_error;
use crate::sample_error::CallContext;
use crate::sample_error::GraphicsError;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::System::Threading::*;

/// Auto-reset Win32 event, closed on drop.
pub struct FenceEvent(HANDLE);

impl FenceEvent {
    pub fn new() -> Result<Self, GraphicsError> {
        let event = unsafe { CreateEventW(None, false, false, None) }.for_call("CreateEventW")?;
        Ok(Self(event))
    }
}

impl Drop for FenceEvent {
    fn drop(&mut self) {
        if !self.0.is_invalid() {
            unsafe { _ = CloseHandle(self.0) };
        }
    }
}

/// A direct command queue paired with the fence it signals.
pub struct QueueFence {
    queue: ID3D12CommandQueue,
    fence: ID3D12Fence,
    event: FenceEvent,
}

impl QueueFence {
    pub fn new(
        device: &ID3D12Device,
        queue: &ID3D12CommandQueue,
        initial_value: u64,
    ) -> Result<Self, GraphicsError> {
        let fence: ID3D12Fence = unsafe { device.CreateFence(initial_value, D3D12_FENCE_FLAG_NONE) }
            .for_call("ID3D12Device::CreateFence")?;
        Ok(Self {
            queue: queue.clone(),
            fence,
            event: FenceEvent::new()?,
        })
    }
}

impl FenceTimeline for QueueFence {
    type Error = GraphicsError;

    fn signal(&self, value: u64) -> Result<(), GraphicsError> {
        unsafe { self.queue.Signal(&self.fence, value) }.for_call("ID3D12CommandQueue::Signal")
    }

    fn completed_value(&self) -> u64 {
        unsafe { self.fence.GetCompletedValue() }
    }

    fn block_until(&self, value: u64) -> Result<(), GraphicsError> {
        unsafe { self.fence.SetEventOnCompletion(value, self.event.0) }
            .for_call("ID3D12Fence::SetEventOnCompletion")?;
        if unsafe { WaitForSingleObject(self.event.0, INFINITE) } == WAIT_FAILED {
            return Err(last_os_error("WaitForSingleObject"));
        }
        Ok(())
    }
}
