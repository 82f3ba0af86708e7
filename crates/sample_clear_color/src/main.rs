#[cfg(windows)]
mod clear_color_sample;

use sample_host::SampleCommandLine;

/// Red, green, blue, alpha.
#[cfg_attr(not(windows), allow(dead_code))]
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.125, 0.3, 1.0];

fn main() -> eyre::Result<()> {
    let command_line = sample_host::bootstrap()?;
    run(command_line)
}

#[cfg(windows)]
fn run(command_line: SampleCommandLine) -> eyre::Result<()> {
    sample_host::win32::run_sample::<clear_color_sample::ClearColorSample>(command_line)
}

#[cfg(not(windows))]
fn run(_command_line: SampleCommandLine) -> eyre::Result<()> {
    eyre::bail!("this sample drives Direct3D 12 and only runs on Windows")
}
