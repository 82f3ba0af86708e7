#[cfg(windows)]
mod compile_shader;
#[cfg(windows)]
mod create_pipeline_state;
#[cfg(windows)]
mod create_root_signature;
#[cfg_attr(not(windows), allow(dead_code))]
mod geometry;
#[cfg(windows)]
mod polygon_sample;
#[cfg_attr(not(windows), allow(dead_code))]
mod shader_path;
#[cfg(windows)]
mod upload_buffer;

use sample_host::SampleCommandLine;

#[cfg_attr(not(windows), allow(dead_code))]
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.125, 0.3, 1.0];

fn main() -> eyre::Result<()> {
    let command_line = sample_host::bootstrap()?;
    run(command_line)
}

#[cfg(windows)]
fn run(command_line: SampleCommandLine) -> eyre::Result<()> {
    sample_host::win32::run_sample::<polygon_sample::PolygonSample>(command_line)
}

#[cfg(not(windows))]
fn run(_command_line: SampleCommandLine) -> eyre::Result<()> {
    eyre::bail!("this sample drives Direct3D 12 and only runs on Windows")
}
