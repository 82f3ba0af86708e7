use sample_host::d3d12::blob_text::blob_text;
use sample_host::sample_error::CallContext;
use sample_host::GraphicsError;
use std::path::Path;
use tracing::debug;
use windows::core::HSTRING;
use windows::core::PCSTR;
use windows::Win32::Graphics::Direct3D::Fxc::*;
use windows::Win32::Graphics::Direct3D::*;

const CALL: &str = "D3DCompileFromFile";

/// Compiles one entry point of an HLSL file.
///
/// A missing file becomes [`GraphicsError::FileNotFound`]; compiler output
/// becomes [`GraphicsError::Diagnostics`].
pub fn compile_shader(
    hlsl_path: &Path,
    entry_point: PCSTR,
    target: PCSTR,
) -> Result<ID3DBlob, GraphicsError> {
    if !hlsl_path.is_file() {
        return Err(GraphicsError::FileNotFound {
            call: CALL,
            path: hlsl_path.to_path_buf(),
        });
    }

    let flags = if cfg!(debug_assertions) {
        D3DCOMPILE_DEBUG | D3DCOMPILE_SKIP_OPTIMIZATION
    } else {
        0
    };
    let file_name = HSTRING::from(hlsl_path.as_os_str());

    let mut shader_blob = None;
    let mut error_blob = None;
    let result = unsafe {
        D3DCompileFromFile(
            &file_name,
            None,
            None,
            entry_point,
            target,
            flags,
            0,
            &mut shader_blob,
            Some(&mut error_blob),
        )
    };

    if let Err(e) = result {
        return Err(match error_blob {
            Some(error) => GraphicsError::diagnostics(
                CALL,
                e.code().0,
                e.message().to_string(),
                blob_text(&error),
            ),
            None => GraphicsError::call(CALL, e.code().0, e.message().to_string()),
        });
    }

    debug!(path = %hlsl_path.display(), "Shader compiled");
    shader_blob.ok_or(GraphicsError::Unavailable("shader bytecode"))
}
