pub mod adapter_selection;
pub mod feature_level;
pub mod frame_cycle;
pub mod frame_fence;
pub mod input;
pub mod logging;
pub mod sample_app;
pub mod sample_command_line;
pub mod sample_error;

#[cfg(windows)]
pub mod d3d12;
#[cfg(windows)]
pub mod win32;

pub use sample_app::AppHost;
pub use sample_app::SampleApp;
pub use sample_command_line::SampleCommandLine;
pub use sample_error::GraphicsError;

/// Installs the error reporter, parses the command line and starts logging.
///
/// Every sample binary calls this first. Command line errors (and `--help`)
/// exit the process the way clap normally does.
pub fn bootstrap() -> eyre::Result<SampleCommandLine> {
    color_eyre::install()?;
    let command_line = SampleCommandLine::from_env().unwrap_or_else(|e| e.exit());
    logging::init_logging(command_line.log_level);
    tracing::info!(?command_line, "Ahoy, world!");
    Ok(command_line)
}
