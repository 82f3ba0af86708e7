use crate::input::KeyCode;
use crate::input::MouseButton;
use crate::input::Position2D;
use crate::input::Size2D;
use crate::sample_command_line::SampleCommandLine;
use tracing::trace;

/// Services the host window offers to a sample.
pub trait AppHost {
    /// Raw native window handle (an `HWND` on Windows).
    fn window_handle(&self) -> isize;
    fn client_size(&self) -> Size2D;
    fn command_line(&self) -> &SampleCommandLine;
    /// Asks the host to close the window and leave the message loop.
    fn post_quit(&self);
    fn show_message_box(&self, text: &str, caption: &str);
}

/// The one-shot surface a host drives: initialize once, then update and
/// render every idle iteration, forwarding resize and input as they arrive.
pub trait SampleApp: Sized {
    const TITLE: &'static str;

    fn init(host: &dyn AppHost) -> eyre::Result<Self>;

    fn term(&mut self) {}

    fn update(&mut self) {}

    fn render(&mut self) -> eyre::Result<()>;

    fn on_resize(&mut self, new_size: Size2D) -> eyre::Result<()>;

    fn on_key(&mut self, host: &dyn AppHost, key: KeyCode, is_down: bool) {
        trace!(?key, is_down, "key");
        if key == KeyCode::Escape && is_down {
            host.post_quit();
        }
    }

    fn on_mouse(&mut self, position: Position2D, button: MouseButton, is_down: bool) {
        trace!(?position, ?button, is_down, "mouse");
    }

    fn on_mouse_wheel(&mut self, position: Position2D, wheel_delta: i32) {
        trace!(?position, wheel_delta, "mouse wheel");
    }
}

pub fn window_title(title: &str, use_warp_device: bool) -> String {
    if use_warp_device {
        format!("{title} (WARP)")
    } else {
        title.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct RecordingHost {
        command_line: SampleCommandLine,
        quit_requests: Cell<u32>,
    }

    impl AppHost for RecordingHost {
        fn window_handle(&self) -> isize {
            0
        }
        fn client_size(&self) -> Size2D {
            Size2D::new(self.command_line.width, self.command_line.height)
        }
        fn command_line(&self) -> &SampleCommandLine {
            &self.command_line
        }
        fn post_quit(&self) {
            self.quit_requests.set(self.quit_requests.get() + 1);
        }
        fn show_message_box(&self, _text: &str, _caption: &str) {}
    }

    struct Idle;

    impl SampleApp for Idle {
        const TITLE: &'static str = "Idle";

        fn init(_host: &dyn AppHost) -> eyre::Result<Self> {
            Ok(Idle)
        }
        fn render(&mut self) -> eyre::Result<()> {
            Ok(())
        }
        fn on_resize(&mut self, _new_size: Size2D) -> eyre::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn escape_press_requests_quit() {
        let host = RecordingHost::default();
        let mut sample = Idle::init(&host).unwrap();
        sample.on_key(&host, KeyCode::Escape, true);
        assert_eq!(host.quit_requests.get(), 1);
    }

    #[test]
    fn escape_release_and_other_keys_are_ignored() {
        let host = RecordingHost::default();
        let mut sample = Idle::init(&host).unwrap();
        sample.on_key(&host, KeyCode::Escape, false);
        sample.on_key(&host, KeyCode::Space, true);
        sample.on_key(&host, KeyCode::Letter('Q'), true);
        assert_eq!(host.quit_requests.get(), 0);
    }

    #[test]
    fn warp_suffix_is_appended() {
        assert_eq!(window_title("Polygon", true), "Polygon (WARP)");
        assert_eq!(window_title("Polygon", false), "Polygon");
    }

    #[test]
    fn host_reports_requested_client_size() {
        let host = RecordingHost::default();
        assert_eq!(host.client_size(), Size2D::new(1280, 720));
    }
}
