//! CPU/GPU frame synchronization.
//!
//! The CPU keeps a counter of the last value it asked the GPU to signal. After
//! submitting a frame it signals the next value, and before touching the
//! command allocator again it waits until the GPU has reached that value.

/// The GPU half of a fence: something that can be told to signal a value once
/// prior work finishes, queried for progress, and blocked on.
pub trait FenceTimeline {
    type Error;

    /// Enqueues a signal of `value` behind all previously submitted work.
    fn signal(&self, value: u64) -> Result<(), Self::Error>;

    /// The most recent value the GPU has reached.
    fn completed_value(&self) -> u64;

    /// Blocks the calling thread until `completed_value() >= value`.
    fn block_until(&self, value: u64) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceWait {
    AlreadyComplete,
    Blocked,
}

/// CPU-side fence counter.
#[derive(Debug, Default, Clone)]
pub struct FrameFence {
    last_signaled: u64,
}

impl FrameFence {
    /// `initial_value` must match the value the GPU fence was created with.
    pub fn new(initial_value: u64) -> Self {
        Self {
            last_signaled: initial_value,
        }
    }

    pub fn last_signaled(&self) -> u64 {
        self.last_signaled
    }

    /// Signals the next fence value. The counter only advances when the
    /// signal was accepted.
    pub fn signal_next<T: FenceTimeline>(&mut self, timeline: &T) -> Result<u64, T::Error> {
        let next = self.last_signaled + 1;
        timeline.signal(next)?;
        self.last_signaled = next;
        Ok(next)
    }

    /// Waits for the most recently signaled value.
    pub fn wait_for_last<T: FenceTimeline>(&self, timeline: &T) -> Result<FenceWait, T::Error> {
        if timeline.completed_value() >= self.last_signaled {
            return Ok(FenceWait::AlreadyComplete);
        }
        tracing::trace!(value = self.last_signaled, "Waiting for GPU");
        timeline.block_until(self.last_signaled)?;
        Ok(FenceWait::Blocked)
    }

    /// Signals and waits, leaving the GPU idle with respect to everything
    /// submitted before the call.
    pub fn flush<T: FenceTimeline>(&mut self, timeline: &T) -> Result<FenceWait, T::Error> {
        self.signal_next(timeline)?;
        self.wait_for_last(timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq, Eq)]
    struct Refused;

    /// A fence whose GPU side is driven by the test.
    #[derive(Default)]
    struct ScriptedFence {
        completed: Cell<u64>,
        signaled: RefCell<Vec<u64>>,
        blocked_on: RefCell<Vec<u64>>,
        refuse_signal: Cell<bool>,
        refuse_wait: Cell<bool>,
        /// When true the GPU catches up to every signal immediately.
        instant_gpu: Cell<bool>,
    }

    impl FenceTimeline for ScriptedFence {
        type Error = Refused;

        fn signal(&self, value: u64) -> Result<(), Refused> {
            if self.refuse_signal.get() {
                return Err(Refused);
            }
            self.signaled.borrow_mut().push(value);
            if self.instant_gpu.get() {
                self.completed.set(value);
            }
            Ok(())
        }

        fn completed_value(&self) -> u64 {
            self.completed.get()
        }

        fn block_until(&self, value: u64) -> Result<(), Refused> {
            if self.refuse_wait.get() {
                return Err(Refused);
            }
            self.blocked_on.borrow_mut().push(value);
            self.completed.set(value);
            Ok(())
        }
    }

    #[test]
    fn signals_increase_by_one_from_initial_value() {
        let fence = ScriptedFence::default();
        let mut frame_fence = FrameFence::new(0);
        for _ in 0..3 {
            frame_fence.signal_next(&fence).unwrap();
        }
        assert_eq!(*fence.signaled.borrow(), vec![1, 2, 3]);
        assert_eq!(frame_fence.last_signaled(), 3);
    }

    #[test]
    fn wait_blocks_when_gpu_is_behind() {
        let fence = ScriptedFence::default();
        let mut frame_fence = FrameFence::default();
        frame_fence.signal_next(&fence).unwrap();

        assert_eq!(frame_fence.wait_for_last(&fence), Ok(FenceWait::Blocked));
        assert_eq!(*fence.blocked_on.borrow(), vec![1]);
        assert_eq!(fence.completed_value(), 1);
    }

    #[test]
    fn wait_skips_blocking_when_gpu_already_finished() {
        let fence = ScriptedFence::default();
        fence.instant_gpu.set(true);
        let mut frame_fence = FrameFence::default();
        frame_fence.signal_next(&fence).unwrap();

        assert_eq!(frame_fence.wait_for_last(&fence), Ok(FenceWait::AlreadyComplete));
        assert!(fence.blocked_on.borrow().is_empty());
    }

    #[test]
    fn gpu_past_target_does_not_block() {
        let fence = ScriptedFence::default();
        fence.completed.set(10);
        let frame_fence = FrameFence::new(4);
        assert_eq!(frame_fence.wait_for_last(&fence), Ok(FenceWait::AlreadyComplete));
        assert!(fence.blocked_on.borrow().is_empty());
    }

    #[test]
    fn wait_before_any_signal_is_complete() {
        let fence = ScriptedFence::default();
        let frame_fence = FrameFence::default();
        assert_eq!(frame_fence.wait_for_last(&fence), Ok(FenceWait::AlreadyComplete));
    }

    #[test]
    fn refused_signal_leaves_counter_unchanged() {
        let fence = ScriptedFence::default();
        let mut frame_fence = FrameFence::new(7);
        fence.refuse_signal.set(true);

        assert_eq!(frame_fence.signal_next(&fence), Err(Refused));
        assert_eq!(frame_fence.last_signaled(), 7);

        fence.refuse_signal.set(false);
        assert_eq!(frame_fence.signal_next(&fence), Ok(8));
    }

    #[test]
    fn failed_wait_is_reported() {
        let fence = ScriptedFence::default();
        let mut frame_fence = FrameFence::default();
        frame_fence.signal_next(&fence).unwrap();
        fence.refuse_wait.set(true);

        assert_eq!(frame_fence.wait_for_last(&fence), Err(Refused));
        assert_eq!(frame_fence.last_signaled(), 1);
    }

    #[test]
    fn flush_waits_on_the_value_it_signaled() {
        let fence = ScriptedFence::default();
        let mut frame_fence = FrameFence::default();
        frame_fence.signal_next(&fence).unwrap();
        frame_fence.wait_for_last(&fence).unwrap();

        assert_eq!(frame_fence.flush(&fence), Ok(FenceWait::Blocked));
        assert_eq!(*fence.signaled.borrow(), vec![1, 2]);
        assert_eq!(*fence.blocked_on.borrow(), vec![1, 2]);
    }

    #[test]
    fn frame_loop_never_waits_on_a_stale_value() {
        let fence = ScriptedFence::default();
        let mut frame_fence = FrameFence::default();
        for frame in 1..=5 {
            let signaled = frame_fence.signal_next(&fence).unwrap();
            assert_eq!(signaled, frame);
            frame_fence.wait_for_last(&fence).unwrap();
            assert!(fence.completed_value() >= signaled);
        }
        assert_eq!(*fence.blocked_on.borrow(), vec![1, 2, 3, 4, 5]);
    }
}
