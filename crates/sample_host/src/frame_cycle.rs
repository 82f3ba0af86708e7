//! The order of one frame around the fence, and what a failed frame leaves
//! behind for the next one.
//!
//! A frame is `begin` (check the back buffer, reset, start recording), the
//! sample's own commands, then `end` (close, execute, signal, present, wait).
//! Any step can fail. The cycle remembers two things across a failure: a
//! command list that was reset but never closed, and a submission that was
//! executed but never fenced. Both are cleaned up at the start of the next
//! frame so one bad frame does not poison the ones after it.

use crate::frame_fence::FenceTimeline;
use crate::frame_fence::FenceWait;
use crate::frame_fence::FrameFence;
use crate::input::Size2D;
use tracing::warn;

/// The command recording and presentation half of a frame.
pub trait FrameTarget {
    type Error;

    /// Picks the current back buffer and fails if it cannot be rendered to.
    /// Runs before anything is reset.
    fn prepare_back_buffer(&mut self) -> Result<(), Self::Error>;

    /// Resets the command allocator and list; the list is recording afterwards.
    fn reset_recording(&mut self) -> Result<(), Self::Error>;

    /// Transitions the back buffer to a render target, binds and clears it.
    fn begin_recording(&mut self) -> Result<(), Self::Error>;

    /// Closes a list that will never be submitted.
    fn abandon_recording(&mut self) -> Result<(), Self::Error>;

    /// Transitions the back buffer back to present and closes the list.
    fn close_recording(&mut self) -> Result<(), Self::Error>;

    fn execute(&mut self) -> Result<(), Self::Error>;

    fn present(&mut self) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSync {
    pub signaled: u64,
    pub wait: FenceWait,
}

#[derive(Debug, Default)]
pub struct FrameCycle {
    fence: FrameFence,
    recording: bool,
    unfenced_submission: bool,
}

impl FrameCycle {
    pub fn new(initial_fence_value: u64) -> Self {
        Self {
            fence: FrameFence::new(initial_fence_value),
            recording: false,
            unfenced_submission: false,
        }
    }

    pub fn last_signaled(&self) -> u64 {
        self.fence.last_signaled()
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// True when work was executed but the GPU was never confirmed done with it.
    pub fn has_unfenced_submission(&self) -> bool {
        self.unfenced_submission
    }

    pub fn begin<T, F>(&mut self, target: &mut T, timeline: &F) -> Result<(), T::Error>
    where
        T: FrameTarget,
        F: FenceTimeline<Error = T::Error>,
    {
        if self.unfenced_submission {
            warn!("Last submission was never fenced, flushing before reuse");
            self.flush(timeline)?;
        }
        if self.recording {
            warn!("Closing a command list left open by an abandoned frame");
            self.recording = false;
            target.abandon_recording()?;
        }

        target.prepare_back_buffer()?;
        target.reset_recording()?;
        self.recording = true;
        target.begin_recording()
    }

    /// Submits and presents the recorded frame, then waits for it. The wait
    /// runs even when present fails.
    pub fn end<T, F>(&mut self, target: &mut T, timeline: &F) -> Result<FrameSync, T::Error>
    where
        T: FrameTarget,
        F: FenceTimeline<Error = T::Error>,
    {
        self.recording = false;
        target.close_recording()?;
        target.execute()?;
        self.unfenced_submission = true;

        let signaled = self.fence.signal_next(timeline)?;
        let presented = target.present();
        let wait = self.fence.wait_for_last(timeline)?;
        self.unfenced_submission = false;

        presented.map(|()| FrameSync { signaled, wait })
    }

    /// Signals and waits, leaving the GPU idle.
    pub fn flush<F: FenceTimeline>(&mut self, timeline: &F) -> Result<FenceWait, F::Error> {
        let wait = self.fence.flush(timeline)?;
        self.unfenced_submission = false;
        Ok(wait)
    }
}

/// Whether a resize to `requested` has to recreate the back buffers.
///
/// Zero-area sizes (minimized window) never do. An unchanged size only does
/// when the buffers are currently detached, which happens after a failed
/// resize.
pub fn should_rebuild_back_buffers(current: Size2D, requested: Size2D, attached: bool) -> bool {
    !requested.is_empty() && (requested != current || !attached)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    #[derive(Debug, PartialEq, Eq)]
    struct Failed(&'static str);

    /// A GPU that only catches up when waited on.
    struct LoggedFence {
        log: Log,
        completed: Cell<u64>,
        refuse_signal: Cell<bool>,
        refuse_wait: Cell<bool>,
    }

    impl FenceTimeline for LoggedFence {
        type Error = Failed;

        fn signal(&self, _value: u64) -> Result<(), Failed> {
            if self.refuse_signal.get() {
                return Err(Failed("signal"));
            }
            self.log.borrow_mut().push("signal");
            Ok(())
        }

        fn completed_value(&self) -> u64 {
            self.completed.get()
        }

        fn block_until(&self, value: u64) -> Result<(), Failed> {
            if self.refuse_wait.get() {
                return Err(Failed("wait"));
            }
            self.log.borrow_mut().push("wait");
            self.completed.set(value);
            Ok(())
        }
    }

    /// Models the D3D12 rule that resetting fails while the list is open.
    struct ScriptedTarget {
        log: Log,
        list_open: bool,
        back_buffer_missing: bool,
        fail_present: bool,
    }

    impl FrameTarget for ScriptedTarget {
        type Error = Failed;

        fn prepare_back_buffer(&mut self) -> Result<(), Failed> {
            self.log.borrow_mut().push("prepare");
            if self.back_buffer_missing {
                return Err(Failed("back buffer"));
            }
            Ok(())
        }

        fn reset_recording(&mut self) -> Result<(), Failed> {
            if self.list_open {
                return Err(Failed("reset while recording"));
            }
            self.log.borrow_mut().push("reset");
            self.list_open = true;
            Ok(())
        }

        fn begin_recording(&mut self) -> Result<(), Failed> {
            self.log.borrow_mut().push("clear");
            Ok(())
        }

        fn abandon_recording(&mut self) -> Result<(), Failed> {
            self.log.borrow_mut().push("abandon");
            self.list_open = false;
            Ok(())
        }

        fn close_recording(&mut self) -> Result<(), Failed> {
            self.log.borrow_mut().push("close");
            self.list_open = false;
            Ok(())
        }

        fn execute(&mut self) -> Result<(), Failed> {
            self.log.borrow_mut().push("execute");
            Ok(())
        }

        fn present(&mut self) -> Result<(), Failed> {
            self.log.borrow_mut().push("present");
            if self.fail_present {
                return Err(Failed("present"));
            }
            Ok(())
        }
    }

    fn setup() -> (FrameCycle, ScriptedTarget, LoggedFence, Log) {
        let log = Log::default();
        let target = ScriptedTarget {
            log: log.clone(),
            list_open: false,
            back_buffer_missing: false,
            fail_present: false,
        };
        let fence = LoggedFence {
            log: log.clone(),
            completed: Cell::new(0),
            refuse_signal: Cell::new(false),
            refuse_wait: Cell::new(false),
        };
        (FrameCycle::new(0), target, fence, log)
    }

    fn run_frame(
        cycle: &mut FrameCycle,
        target: &mut ScriptedTarget,
        fence: &LoggedFence,
    ) -> Result<FrameSync, Failed> {
        cycle.begin(target, fence)?;
        cycle.end(target, fence)
    }

    #[test]
    fn frame_signals_before_present_and_waits_after() {
        let (mut cycle, mut target, fence, log) = setup();
        let sync = run_frame(&mut cycle, &mut target, &fence).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["prepare", "reset", "clear", "close", "execute", "signal", "present", "wait"]
        );
        assert_eq!(
            sync,
            FrameSync {
                signaled: 1,
                wait: FenceWait::Blocked
            }
        );
    }

    #[test]
    fn failed_present_still_waits_for_the_frame() {
        let (mut cycle, mut target, fence, log) = setup();
        target.fail_present = true;

        assert_eq!(run_frame(&mut cycle, &mut target, &fence), Err(Failed("present")));
        assert_eq!(log.borrow().last(), Some(&"wait"));
        assert_eq!(fence.completed_value(), 1);
        assert!(!cycle.has_unfenced_submission());

        target.fail_present = false;
        assert_eq!(run_frame(&mut cycle, &mut target, &fence).map(|s| s.signaled), Ok(2));
    }

    #[test]
    fn missing_back_buffer_fails_before_anything_is_reset() {
        let (mut cycle, mut target, fence, log) = setup();
        target.back_buffer_missing = true;

        for _ in 0..3 {
            assert_eq!(cycle.begin(&mut target, &fence), Err(Failed("back buffer")));
        }
        assert!(!log.borrow().contains(&"reset"));
        assert!(!target.list_open);
        assert!(!cycle.is_recording());

        // Buffers come back after a successful resize.
        target.back_buffer_missing = false;
        assert!(run_frame(&mut cycle, &mut target, &fence).is_ok());
    }

    #[test]
    fn frame_abandoned_mid_recording_does_not_block_the_next() {
        let (mut cycle, mut target, fence, log) = setup();
        cycle.begin(&mut target, &fence).unwrap();
        assert!(cycle.is_recording());

        // The sample bailed before ending the frame.
        log.borrow_mut().clear();
        assert!(run_frame(&mut cycle, &mut target, &fence).is_ok());
        assert_eq!(&log.borrow()[..3], &["abandon", "prepare", "reset"]);
    }

    #[test]
    fn refused_signal_after_execute_is_flushed_next_frame() {
        let (mut cycle, mut target, fence, log) = setup();
        fence.refuse_signal.set(true);
        assert_eq!(run_frame(&mut cycle, &mut target, &fence), Err(Failed("signal")));
        assert!(cycle.has_unfenced_submission());
        assert_eq!(cycle.last_signaled(), 0);

        fence.refuse_signal.set(false);
        log.borrow_mut().clear();
        cycle.begin(&mut target, &fence).unwrap();
        assert_eq!(&log.borrow()[..3], &["signal", "wait", "prepare"]);
        assert!(!cycle.has_unfenced_submission());
        assert_eq!(fence.completed_value(), 1);
    }

    #[test]
    fn refused_wait_is_flushed_next_frame() {
        let (mut cycle, mut target, fence, log) = setup();
        fence.refuse_wait.set(true);
        assert_eq!(run_frame(&mut cycle, &mut target, &fence), Err(Failed("wait")));
        assert!(cycle.has_unfenced_submission());

        fence.refuse_wait.set(false);
        log.borrow_mut().clear();
        cycle.begin(&mut target, &fence).unwrap();
        assert_eq!(&log.borrow()[..2], &["signal", "wait"]);
        assert_eq!(fence.completed_value(), 2);
    }

    #[test]
    fn flush_clears_an_unfenced_submission() {
        let (mut cycle, mut target, fence, _log) = setup();
        fence.refuse_signal.set(true);
        let _ = run_frame(&mut cycle, &mut target, &fence);
        fence.refuse_signal.set(false);

        assert_eq!(cycle.flush(&fence), Ok(FenceWait::Blocked));
        assert!(!cycle.has_unfenced_submission());
    }

    #[test]
    fn zero_area_sizes_never_rebuild() {
        let current = Size2D::new(1280, 720);
        assert!(!should_rebuild_back_buffers(current, Size2D::new(0, 0), true));
        assert!(!should_rebuild_back_buffers(current, Size2D::new(0, 720), false));
        assert!(!should_rebuild_back_buffers(current, Size2D::new(1280, 0), false));
    }

    #[test]
    fn unchanged_size_rebuilds_only_when_detached() {
        let current = Size2D::new(1280, 720);
        assert!(!should_rebuild_back_buffers(current, current, true));
        assert!(should_rebuild_back_buffers(current, current, false));
        assert!(should_rebuild_back_buffers(current, Size2D::new(800, 600), true));
    }
}
