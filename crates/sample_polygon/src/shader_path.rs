use std::path::Path;
use std::path::PathBuf;

/// Where shader sources are looked up: next to the executable first, then
/// the crate's `shaders/` directory for `cargo run` from a checkout.
pub fn shader_search_dirs() -> Vec<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    exe_dir
        .into_iter()
        .chain([Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders")])
        .collect()
}

/// Returns the first existing `dir/file_name`. When none exists the first
/// candidate is returned so the caller reports a useful path.
pub fn resolve_shader_path(file_name: &str, search_dirs: &[PathBuf]) -> PathBuf {
    search_dirs
        .iter()
        .map(|dir| dir.join(file_name))
        .find(|path| path.is_file())
        .or_else(|| search_dirs.first().map(|dir| dir.join(file_name)))
        .unwrap_or_else(|| PathBuf::from(file_name))
}
