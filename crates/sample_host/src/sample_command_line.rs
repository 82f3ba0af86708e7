use clap::Parser;
use tracing::Level;

/// Command line arguments shared by every sample.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Minimal Direct3D 12 sample")]
pub struct SampleCommandLine {
    /// Render with the WARP software adapter instead of a hardware adapter
    #[arg(long)]
    pub warp: bool,

    /// Client area width in pixels
    #[arg(long, default_value_t = 1280, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Client area height in pixels
    #[arg(long, default_value_t = 720, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Enable the D3D12 debug layer (always on in debug builds)
    #[arg(long)]
    pub debug_layer: bool,

    /// Maximum log level
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Default for SampleCommandLine {
    fn default() -> Self {
        Self {
            warp: false,
            width: 1280,
            height: 720,
            debug_layer: false,
            log_level: Level::INFO,
        }
    }
}

impl SampleCommandLine {
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::try_parse_from(normalize_legacy_args(std::env::args()))
    }

    pub fn debug_layer_enabled(&self) -> bool {
        self.debug_layer || cfg!(debug_assertions)
    }
}

/// Rewrites the `-warp` and `/warp` spellings used by the classic D3D12
/// samples into `--warp`.
pub fn normalize_legacy_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i > 0 && (arg.eq_ignore_ascii_case("-warp") || arg.eq_ignore_ascii_case("/warp")) {
                "--warp".to_owned()
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<SampleCommandLine, clap::Error> {
        let args = args.iter().map(|s| s.to_string());
        SampleCommandLine::try_parse_from(normalize_legacy_args(args))
    }

    #[test]
    fn defaults_match_default_impl() {
        let parsed = parse(&["sample"]).unwrap();
        let default = SampleCommandLine::default();
        assert_eq!(parsed.warp, default.warp);
        assert_eq!(parsed.width, default.width);
        assert_eq!(parsed.height, default.height);
        assert_eq!(parsed.debug_layer, default.debug_layer);
        assert_eq!(parsed.log_level, default.log_level);
    }

    #[test]
    fn legacy_warp_spellings_are_accepted() {
        assert!(parse(&["sample", "-warp"]).unwrap().warp);
        assert!(parse(&["sample", "/WARP"]).unwrap().warp);
        assert!(parse(&["sample", "--warp"]).unwrap().warp);
    }

    #[test]
    fn program_name_is_never_rewritten() {
        let args = normalize_legacy_args(["/warp".to_owned()]);
        assert_eq!(args, vec!["/warp".to_owned()]);
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        assert!(parse(&["sample", "--width", "0"]).is_err());
        assert!(parse(&["sample", "--height", "0"]).is_err());
    }

    #[test]
    fn size_and_log_level_are_parsed() {
        let parsed = parse(&["sample", "--width", "800", "--height", "600", "--log-level", "debug"])
            .unwrap();
        assert_eq!((parsed.width, parsed.height), (800, 600));
        assert_eq!(parsed.log_level, Level::DEBUG);
    }

    #[test]
    fn debug_layer_flag_forces_layer_on() {
        let parsed = parse(&["sample", "--debug-layer"]).unwrap();
        assert!(parsed.debug_layer_enabled());
    }
}
