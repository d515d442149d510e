//! Timers and paint-frame callbacks behind one seam, so the lifecycle can run
//! against the browser event loop or a virtual clock.

use std::{
    cell::RefCell,
    collections::{BTreeMap, VecDeque},
    fmt,
    rc::{Rc, Weak},
};

pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    /// Runs `task` once after `delay_ms`. Dropping the returned guard cancels it.
    fn after(&self, delay_ms: u32, task: Task) -> TimerGuard;

    /// Runs `task` before the next repaint.
    fn next_frame(&self, task: Task);
}

/// Cancellation token for a scheduled timer.
///
/// Cancelling a timer that already fired is a no-op.
#[must_use = "dropping a TimerGuard cancels its timer"]
pub struct TimerGuard {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerGuard {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(self) {
        drop(self);
    }

    /// Lets the timer run to completion regardless of what happens to the guard.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TimerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerGuard")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Owns a host callback until its timer fires or is cancelled, whichever
/// happens first. Both paths release through [`CallbackSlot::release`], and only
/// the first one gets the callback back.
pub struct CallbackSlot<C> {
    callback: Rc<RefCell<Option<C>>>,
}

impl<C> CallbackSlot<C> {
    pub fn empty() -> Self {
        Self {
            callback: Rc::new(RefCell::new(None)),
        }
    }

    pub fn fill(&self, callback: C) {
        *self.callback.borrow_mut() = Some(callback);
    }

    pub fn release(&self) -> Option<C> {
        self.callback.borrow_mut().take()
    }

    pub fn is_empty(&self) -> bool {
        self.callback.borrow().is_none()
    }
}

impl<C> Clone for CallbackSlot<C> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

#[derive(Default)]
struct ManualState {
    now: u64,
    next_id: u64,
    timers: BTreeMap<u64, (u64, Task)>,
    frames: VecDeque<Task>,
}

impl ManualState {
    fn take_due(&mut self, until: u64) -> Option<(u64, Task)> {
        let id = self
            .timers
            .iter()
            .filter(|(_, (deadline, _))| *deadline <= until)
            .min_by_key(|(id, (deadline, _))| (*deadline, **id))
            .map(|(id, _)| *id)?;
        self.timers.remove(&id)
    }
}

/// Deterministic scheduler driven by hand: time only moves on [`advance`] and
/// frames only run on [`run_frames`].
///
/// [`advance`]: ManualScheduler::advance
/// [`run_frames`]: ManualScheduler::run_frames
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual milliseconds elapsed so far.
    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    /// Moves the clock forward, firing due timers in deadline order. Timers
    /// scheduled by a firing task run in the same call if they fall due.
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        loop {
            let due = self.state.borrow_mut().take_due(target);
            let Some((deadline, task)) = due else {
                break;
            };
            self.state.borrow_mut().now = deadline;
            task();
        }
        self.state.borrow_mut().now = target;
    }

    /// Runs the frame callbacks queued so far. Callbacks queued while running
    /// wait for the next call. Returns how many ran.
    pub fn run_frames(&self) -> usize {
        let batch = std::mem::take(&mut self.state.borrow_mut().frames);
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    fn after(&self, delay_ms: u32, task: Task) -> TimerGuard {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            let deadline = state.now + u64::from(delay_ms);
            state.timers.insert(id, (deadline, task));
            id
        };

        let state: Weak<RefCell<ManualState>> = Rc::downgrade(&self.state);
        TimerGuard::new(move || {
            if let Some(state) = state.upgrade() {
                let cancelled = state.borrow_mut().timers.remove(&id);
                drop(cancelled);
            }
        })
    }

    fn next_frame(&self, task: Task) {
        self.state.borrow_mut().frames.push_back(task);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("timers", &state.timers.len())
            .field("frames", &state.frames.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counted(Rc<Cell<usize>>);

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn callback_slot_releases_once() {
        let drops = Rc::new(Cell::new(0));
        let slot = CallbackSlot::empty();
        let fired = slot.clone();
        slot.fill(Counted(Rc::clone(&drops)));

        // The timer fires first, then the guard is dropped.
        assert!(fired.release().is_some());
        assert!(slot.release().is_none());
        assert!(slot.is_empty());
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn callback_slot_breaks_cycle_on_cancel() {
        let drops = Rc::new(Cell::new(0));
        let slot: CallbackSlot<Task> = CallbackSlot::empty();
        let fired = slot.clone();
        let counted = Counted(Rc::clone(&drops));
        // Like a host timer callback, the task keeps its own slot alive.
        slot.fill(Box::new(move || {
            let _ = (&fired, &counted);
        }));
        assert_eq!(drops.get(), 0);

        drop(slot.release());
        assert_eq!(drops.get(), 1);
        assert!(slot.is_empty());
    }

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |name: &'static str| -> Task {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        let late = scheduler.after(300, task("late"));
        let early = scheduler.after(100, task("early"));
        let tied = scheduler.after(100, task("tied"));

        scheduler.advance(99);
        assert!(log.borrow().is_empty());

        scheduler.advance(201);
        assert_eq!(*log.borrow(), vec!["early", "tied", "late"]);
        assert_eq!(scheduler.now(), 300);
        assert_eq!(scheduler.pending_timers(), 0);

        drop((late, early, tied));
    }

    #[test]
    fn dropping_guard_cancels_timer() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);

        let guard = scheduler.after(50, Box::new(move || flag.set(true)));
        assert_eq!(scheduler.pending_timers(), 1);
        guard.cancel();

        scheduler.advance(100);
        assert!(!fired.get());
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn detached_timer_survives_guard() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        scheduler.after(10, task("detached")).detach();
        scheduler.advance(10);

        assert_eq!(*log.borrow(), vec!["detached"]);
    }

    #[test]
    fn timers_scheduled_by_tasks_fire_when_due() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        let inner = scheduler.clone();
        let second = task("second");

        scheduler
            .after(
                100,
                Box::new(move || inner.after(50, second).detach()),
            )
            .detach();

        scheduler.advance(140);
        assert!(log.borrow().is_empty());
        scheduler.advance(10);
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn frames_run_one_batch_at_a_time() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        let inner = scheduler.clone();
        let nested = task("nested");

        scheduler.next_frame(task("first"));
        scheduler.next_frame(Box::new(move || inner.next_frame(nested)));

        assert_eq!(scheduler.run_frames(), 2);
        assert_eq!(*log.borrow(), vec!["first"]);
        assert_eq!(scheduler.pending_frames(), 1);

        assert_eq!(scheduler.run_frames(), 1);
        assert_eq!(*log.borrow(), vec!["first", "nested"]);
    }
}
