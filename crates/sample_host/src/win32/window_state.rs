use crate::input::wheel_delta_from_wparam;
use crate::input::KeyCode;
use crate::input::MouseButton;
use crate::input::Position2D;
use crate::input::Size2D;
use crate::sample_app::AppHost;
use crate::sample_app::SampleApp;
use crate::sample_command_line::SampleCommandLine;
use std::cell::Cell;
use std::cell::RefCell;
use tracing::debug;
use tracing::error;
use tracing::warn;
use widestring::U16CString;
use windows::core::PCWSTR;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::ScreenToClient;
use windows::Win32::UI::WindowsAndMessaging::*;

pub struct Win32Host {
    hwnd: Cell<HWND>,
    client_size: Cell<Size2D>,
    command_line: SampleCommandLine,
}

impl AppHost for Win32Host {
    fn window_handle(&self) -> isize {
        self.hwnd.get().0 as isize
    }

    fn client_size(&self) -> Size2D {
        self.client_size.get()
    }

    fn command_line(&self) -> &SampleCommandLine {
        &self.command_line
    }

    fn post_quit(&self) {
        if let Err(e) = unsafe { DestroyWindow(self.hwnd.get()) } {
            warn!("DestroyWindow failed: {e}");
        }
    }

    fn show_message_box(&self, text: &str, caption: &str) {
        let text = U16CString::from_str_truncate(text);
        let caption = U16CString::from_str_truncate(caption);
        let owner = Some(self.hwnd.get()).filter(|hwnd| !hwnd.is_invalid());
        _ = unsafe {
            MessageBoxW(
                owner,
                PCWSTR(text.as_ptr()),
                PCWSTR(caption.as_ptr()),
                MB_OK | MB_ICONERROR,
            )
        };
    }
}

/// Everything the window procedure reaches through `GWLP_USERDATA`.
///
/// The sample sits in a `RefCell` because messages can be dispatched while
/// the message loop is rendering; those re-entrant messages fall through to
/// `DefWindowProcW`.
pub struct WindowState<S> {
    pub host: Win32Host,
    pub sample: RefCell<Option<S>>,
}

impl<S: SampleApp> WindowState<S> {
    pub fn new(command_line: SampleCommandLine) -> Self {
        let client_size = Size2D::new(command_line.width, command_line.height);
        Self {
            host: Win32Host {
                hwnd: Cell::new(HWND::default()),
                client_size: Cell::new(client_size),
                command_line,
            },
            sample: RefCell::new(None),
        }
    }

    pub fn attach_window(&self, hwnd: HWND) {
        self.host.hwnd.set(hwnd);
    }

    /// Returns true when the message was consumed.
    pub fn handle_message(&self, window: HWND, message: u32, wparam: usize, lparam: isize) -> bool {
        if message == WM_SIZE {
            self.host.client_size.set(Size2D::from_lparam(lparam));
        }

        let Ok(mut slot) = self.sample.try_borrow_mut() else {
            debug!(message, "Sample busy, deferring to DefWindowProc");
            return false;
        };
        let Some(sample) = slot.as_mut() else {
            return false;
        };

        match message {
            WM_SIZE => {
                if let Err(e) = sample.on_resize(Size2D::from_lparam(lparam)) {
                    error!("Resize error: {e:?}");
                }
                true
            }
            WM_KEYDOWN | WM_KEYUP => {
                let key = KeyCode::from_virtual_key(wparam as u16);
                sample.on_key(&self.host, key, message == WM_KEYDOWN);
                true
            }
            WM_LBUTTONDOWN | WM_LBUTTONUP => {
                let position = Position2D::from_lparam(lparam);
                sample.on_mouse(position, MouseButton::Left, message == WM_LBUTTONDOWN);
                true
            }
            WM_RBUTTONDOWN | WM_RBUTTONUP => {
                let position = Position2D::from_lparam(lparam);
                sample.on_mouse(position, MouseButton::Right, message == WM_RBUTTONDOWN);
                true
            }
            WM_MBUTTONDOWN | WM_MBUTTONUP => {
                let position = Position2D::from_lparam(lparam);
                sample.on_mouse(position, MouseButton::Middle, message == WM_MBUTTONDOWN);
                true
            }
            WM_MOUSEWHEEL => {
                // Wheel messages carry screen coordinates.
                let screen = Position2D::from_lparam(lparam);
                let mut point = POINT {
                    x: screen.x,
                    y: screen.y,
                };
                _ = unsafe { ScreenToClient(window, &mut point) };
                sample.on_mouse_wheel(
                    Position2D::new(point.x, point.y),
                    wheel_delta_from_wparam(wparam),
                );
                true
            }
            // Painting happens in the idle loop; DefWindowProc validates the region.
            WM_PAINT => false,
            _ => false,
        }
    }
}
