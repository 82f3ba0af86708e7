use tracing::debug;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureLevel {
    Level12_1,
    Level12_0,
    Level11_1,
    Level11_0,
}

impl FeatureLevel {
    /// Highest first; device creation tries them in this order.
    pub const DESCENDING: [FeatureLevel; 4] = [
        FeatureLevel::Level12_1,
        FeatureLevel::Level12_0,
        FeatureLevel::Level11_1,
        FeatureLevel::Level11_0,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FeatureLevel::Level12_1 => "12.1",
            FeatureLevel::Level12_0 => "12.0",
            FeatureLevel::Level11_1 => "11.1",
            FeatureLevel::Level11_0 => "11.0",
        }
    }
}

impl std::fmt::Display for FeatureLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Calls `try_create` for each feature level, highest first, and returns the
/// first success. On total failure the error of the last attempt is returned,
/// or `None` if nothing was attempted.
pub fn create_with_highest_level<T, E, F>(mut try_create: F) -> Result<(FeatureLevel, T), Option<E>>
where
    F: FnMut(FeatureLevel) -> Result<T, E>,
{
    let mut last_error = None;
    for level in FeatureLevel::DESCENDING {
        match try_create(level) {
            Ok(created) => {
                info!("FeatureLevel[{}] is selected.", level);
                return Ok((level, created));
            }
            Err(e) => {
                debug!("FeatureLevel[{}] is not supported", level);
                last_error = Some(e);
            }
        }
    }
    Err(last_error)
}
