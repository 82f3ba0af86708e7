pub mod blob_text;
pub mod create_device;
pub mod graphics_core;
pub mod queue_fence;
pub mod render_targets;
pub mod transition_barrier;

pub use graphics_core::GraphicsCore;
