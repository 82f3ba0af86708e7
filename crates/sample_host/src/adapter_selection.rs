/// What the host knows about an enumerated DXGI adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterCandidate {
    /// Index passed to `EnumAdapters1`.
    pub index: u32,
    pub description: String,
    pub dedicated_video_memory: usize,
    pub is_software: bool,
}

/// Picks the hardware adapter with the most dedicated video memory.
///
/// Ties keep the adapter enumerated first. If only software adapters exist the
/// first candidate is returned so a device can still be created.
pub fn select_adapter(candidates: &[AdapterCandidate]) -> Option<&AdapterCandidate> {
    let best_hardware = candidates
        .iter()
        .filter(|c| !c.is_software)
        .fold(None, |best: Option<&AdapterCandidate>, candidate| match best {
            Some(b) if b.dedicated_video_memory >= candidate.dedicated_video_memory => Some(b),
            _ => Some(candidate),
        });
    best_hardware.or_else(|| candidates.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter(index: u32, memory_mib: usize, is_software: bool) -> AdapterCandidate {
        AdapterCandidate {
            index,
            description: format!("Adapter {index}"),
            dedicated_video_memory: memory_mib * 1024 * 1024,
            is_software,
        }
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert_eq!(select_adapter(&[]), None);
    }

    #[test]
    fn largest_dedicated_memory_wins() {
        let adapters = [adapter(0, 128, false), adapter(1, 8192, false), adapter(2, 4096, false)];
        assert_eq!(select_adapter(&adapters).map(|a| a.index), Some(1));
    }

    #[test]
    fn software_adapter_is_skipped_even_when_larger() {
        let adapters = [adapter(0, 64, false), adapter(1, 0, true)];
        let mut big_software = adapters.clone();
        big_software[1].dedicated_video_memory = usize::MAX;
        assert_eq!(select_adapter(&big_software).map(|a| a.index), Some(0));
    }

    #[test]
    fn tie_keeps_first_enumerated() {
        let adapters = [adapter(0, 2048, false), adapter(1, 2048, false)];
        assert_eq!(select_adapter(&adapters).map(|a| a.index), Some(0));
    }

    #[test]
    fn software_only_falls_back_to_first() {
        let adapters = [adapter(3, 0, true), adapter(4, 0, true)];
        assert_eq!(select_adapter(&adapters).map(|a| a.index), Some(3));
    }

    #[test]
    fn integrated_gpu_with_no_dedicated_memory_is_still_hardware() {
        let adapters = [adapter(0, 0, false), adapter(1, 0, true)];
        assert_eq!(select_adapter(&adapters).map(|a| a.index), Some(0));
    }
}
