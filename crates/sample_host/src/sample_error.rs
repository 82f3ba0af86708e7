use std::path::PathBuf;

/// Failures raised while driving the graphics API.
///
/// The `Call` variant renders the same way the samples show errors to the
/// user: the system text for the result code, a blank line, then the call
/// that produced it.
#[derive(Debug, thiserror::Error)]
pub enum GraphicsError {
    #[error("{message} (0x{hresult:08X})\n\n{call}")]
    Call {
        call: &'static str,
        hresult: u32,
        message: String,
    },

    #[error("{call}\nfile not found: {}", path.display())]
    FileNotFound { call: &'static str, path: PathBuf },

    /// A failed call that also produced compiler or serializer output.
    #[error("{message} (0x{hresult:08X})\n\n{call}\n{diagnostics}")]
    Diagnostics {
        call: &'static str,
        hresult: u32,
        message: String,
        diagnostics: String,
    },

    #[error("D3D12CreateDevice failed for every feature level")]
    NoFeatureLevel {
        #[source]
        last_error: Option<Box<GraphicsError>>,
    },

    #[error("no DXGI adapter was found")]
    NoAdapter,

    #[error("{0} is not available")]
    Unavailable(&'static str),
}

impl GraphicsError {
    /// Builds a `Call` error from a raw HRESULT value.
    pub fn call(call: &'static str, hresult: i32, message: impl Into<String>) -> Self {
        Self::Call {
            call,
            hresult: hresult as u32,
            message: message.into(),
        }
    }

    /// Builds a `Diagnostics` error from a raw HRESULT and the text the API
    /// wrote to its error blob.
    pub fn diagnostics(
        call: &'static str,
        hresult: i32,
        message: impl Into<String>,
        diagnostics: impl Into<String>,
    ) -> Self {
        Self::Diagnostics {
            call,
            hresult: hresult as u32,
            message: message.into(),
            diagnostics: diagnostics.into(),
        }
    }
}

/// Attaches the name of the failing API call to a `windows` result.
#[cfg(windows)]
pub trait CallContext<T> {
    fn for_call(self, call: &'static str) -> Result<T, GraphicsError>;
}

#[cfg(windows)]
impl<T> CallContext<T> for windows::core::Result<T> {
    fn for_call(self, call: &'static str) -> Result<T, GraphicsError> {
        self.map_err(|e| GraphicsError::call(call, e.code().0, e.message().to_string()))
    }
}

/// `HRESULT_FROM_WIN32`.
pub fn hresult_from_win32(code: u32) -> i32 {
    if code as i32 <= 0 {
        code as i32
    } else {
        ((code & 0xFFFF) | 0x8007_0000) as i32
    }
}

/// Wraps the calling thread's last OS error for APIs that report failure
/// through `GetLastError` instead of a result code.
pub fn last_os_error(call: &'static str) -> GraphicsError {
    let error = std::io::Error::last_os_error();
    let code = error.raw_os_error().unwrap_or_default() as u32;
    GraphicsError::call(call, hresult_from_win32(code), error.to_string())
}
