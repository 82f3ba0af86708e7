use crate::sample_app::SampleApp;
use crate::sample_error::last_os_error;
use crate::sample_error::CallContext;
use crate::sample_error::GraphicsError;
use crate::win32::window_state::WindowState;
use windows::core::w;
use windows::core::PCWSTR;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;

pub const WINDOW_CLASS_ID: PCWSTR = w!("D3D12SampleWindowClass");

pub fn create_window_class_struct<S: SampleApp>(
    instance: HMODULE,
) -> Result<WNDCLASSEXW, GraphicsError> {
    // WNDCLASSEXW - https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-wndclassexw
    let wc = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc::<S>),
        hInstance: instance.into(),
        hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.for_call("LoadCursorW")?,
        lpszClassName: WINDOW_CLASS_ID,
        ..Default::default()
    };
    Ok(wc)
}

pub fn register_window_class(class: &WNDCLASSEXW) -> Result<u16, GraphicsError> {
    let atom = unsafe { RegisterClassExW(class) };
    if atom == 0 {
        return Err(last_os_error("RegisterClassExW"));
    }
    Ok(atom)
}

extern "system" fn wndproc<S: SampleApp>(
    window: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if message == WM_CREATE {
        unsafe {
            let create_struct: &CREATESTRUCTW = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(window, GWLP_USERDATA, create_struct.lpCreateParams as _);
        }
        return LRESULT(0);
    }

    let user_data = unsafe { GetWindowLongPtrW(window, GWLP_USERDATA) };
    if user_data == 0 {
        // We can get messages before WM_CREATE or after WM_DESTROY.
        return unsafe { DefWindowProcW(window, message, wparam, lparam) };
    }

    if message == WM_DESTROY {
        unsafe {
            SetWindowLongPtrW(window, GWLP_USERDATA, 0);
            PostQuitMessage(0);
        }
        return LRESULT(0);
    }

    // Safety: user_data is the WindowState boxed by run_sample, which outlives the window.
    let state = unsafe { &*(user_data as *const WindowState<S>) };

    if state.handle_message(window, message, wparam.0, lparam.0) {
        LRESULT(0)
    } else {
        unsafe { DefWindowProcW(window, message, wparam, lparam) }
    }
}
