pub mod create_window;
pub mod sample_runner;
pub mod window_class;
pub mod window_state;

pub use sample_runner::run_sample;
