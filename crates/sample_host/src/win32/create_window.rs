use crate::sample_error::CallContext;
use crate::sample_error::GraphicsError;
use crate::win32::window_class::WINDOW_CLASS_ID;
use std::ffi::c_void;
use widestring::U16CString;
use windows::core::PCWSTR;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;

pub fn create_window(
    our_module: HMODULE,
    window_rect: RECT,
    title: &str,
    create_param: *const c_void,
) -> Result<HWND, GraphicsError> {
    let title = U16CString::from_str_truncate(title);
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            WINDOW_CLASS_ID,
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            window_rect.right - window_rect.left,
            window_rect.bottom - window_rect.top,
            None, // no parent window
            None, // no menus
            Some(our_module.into()),
            Some(create_param),
        )
    }
    .for_call("CreateWindowExW")?;
    Ok(hwnd)
}

/// Outer window rectangle whose client area is `width` x `height`.
pub fn window_rect_for_client(width: u32, height: u32) -> Result<RECT, GraphicsError> {
    let mut window_rect = RECT {
        left: 0,
        top: 0,
        right: width as i32,
        bottom: height as i32,
    };
    unsafe { AdjustWindowRect(&mut window_rect, WS_OVERLAPPEDWINDOW, false) }
        .for_call("AdjustWindowRect")?;
    Ok(window_rect)
}
