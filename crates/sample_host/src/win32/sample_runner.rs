use crate::sample_app::window_title;
use crate::sample_app::AppHost;
use crate::sample_app::SampleApp;
use crate::sample_command_line::SampleCommandLine;
use crate::sample_error::CallContext;
use crate::sample_error::GraphicsError;
use crate::win32::create_window::create_window;
use crate::win32::create_window::window_rect_for_client;
use crate::win32::window_class::create_window_class_struct;
use crate::win32::window_class::register_window_class;
use crate::win32::window_state::WindowState;
use std::ffi::c_void;
use tracing::error;
use tracing::info;
use windows::Win32::Foundation::*;
use windows::Win32::System::LibraryLoader::*;
use windows::Win32::UI::WindowsAndMessaging::*;

/// Creates the window, initializes `S` against it and runs the message loop
/// until the window is closed.
pub fn run_sample<S: SampleApp>(command_line: SampleCommandLine) -> eyre::Result<()> {
    let our_module = get_handle_to_file_used_to_create_the_calling_process()?;

    let window_class = create_window_class_struct::<S>(our_module)?;
    register_window_class(&window_class)?;

    let window_rect = window_rect_for_client(command_line.width, command_line.height)?;
    let title = window_title(S::TITLE, command_line.warp);

    // Boxed so the address handed to the window procedure stays put.
    let state = Box::new(WindowState::<S>::new(command_line));
    let state_ptr = &*state as *const WindowState<S> as *const c_void;
    let hwnd = create_window(our_module, window_rect, &title, state_ptr)?;
    state.attach_window(hwnd);

    let sample = match S::init(&state.host) {
        Ok(sample) => sample,
        Err(report) => {
            error!("Initialization failed: {report:?}");
            state.host.show_message_box(&format!("{report:#}"), "Error");
            unsafe { _ = DestroyWindow(hwnd) };
            return Err(report);
        }
    };
    *state.sample.borrow_mut() = Some(sample);
    info!(%title, "Sample initialized");

    unsafe { _ = ShowWindow(hwnd, SW_SHOW) };

    let mut message = MSG::default();
    loop {
        if unsafe { PeekMessageW(&mut message, None, 0, 0, PM_REMOVE) }.as_bool() {
            if message.message == WM_QUIT {
                break;
            }
            unsafe {
                _ = TranslateMessage(&message);
                DispatchMessageW(&message);
            }
        } else if let Ok(mut slot) = state.sample.try_borrow_mut() {
            if let Some(sample) = slot.as_mut() {
                sample.update();
                // A failed frame is abandoned; the next idle iteration starts a fresh one.
                if let Err(e) = sample.render() {
                    error!("Render error: {e:?}");
                }
            }
        }
    }

    if let Some(mut sample) = state.sample.borrow_mut().take() {
        sample.term();
    }
    info!(client_size = ?state.host.client_size(), "Sample destroyed.");
    Ok(())
}

fn get_handle_to_file_used_to_create_the_calling_process() -> Result<HMODULE, GraphicsError> {
    let mut out = Default::default();
    unsafe { GetModuleHandleExW(Default::default(), None, &mut out) }
        .for_call("GetModuleHandleExW")?;
    Ok(out)
}
