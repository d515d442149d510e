use super::{
    DEFAULT_FLASH_SELECTOR, NotifyOptions,
    lifecycle::{ENTER_OFFSET, FADE_IN_MS, FADE_OUT_MS, Phase, SETTLED_OFFSET},
    scheduler::{Scheduler, TimerGuard},
};
use crate::dom::{Document, Element};
use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};
use tracing::debug;

struct Notification<E, S> {
    element: E,
    scheduler: S,
    phase: Cell<Phase>,
    auto_dismiss: RefCell<Option<TimerGuard>>,
}

impl<E, S> Notification<E, S>
where
    E: Element + 'static,
    S: Scheduler + Clone + 'static,
{
    fn transition(&self, next: Phase) -> bool {
        let mut phase = self.phase.get();
        let changed = phase.advance(next);
        self.phase.set(phase);
        changed
    }

    fn settle(&self) {
        if self.transition(Phase::Visible) {
            self.element.set_style("opacity", "1");
            self.element.set_style("transform", SETTLED_OFFSET);
        }
    }

    fn begin_dismiss(self: Rc<Self>) {
        if !self.phase.get().is_active() || !self.transition(Phase::Dismissing) {
            return;
        }

        let pending = self.auto_dismiss.borrow_mut().take();
        drop(pending);

        self.element
            .set_style("transition", &format!("opacity {FADE_OUT_MS}ms ease"));
        self.element.set_style("opacity", "0");
        self.element.set_style("pointer-events", "none");

        let this = Rc::clone(&self);
        self.scheduler
            .after(FADE_OUT_MS, Box::new(move || this.finish()))
            .detach();
    }

    fn finish(&self) {
        if self.transition(Phase::Removed) {
            self.element.remove();
            debug!("notification removed");
        }
    }
}

trait Dismissable {
    fn dismiss(self: Rc<Self>);
    fn phase(&self) -> Phase;
}

impl<E, S> Dismissable for Notification<E, S>
where
    E: Element + 'static,
    S: Scheduler + Clone + 'static,
{
    fn dismiss(self: Rc<Self>) {
        self.begin_dismiss();
    }

    fn phase(&self) -> Phase {
        self.phase.get()
    }
}

/// Dismisses one notification on demand.
///
/// A handle for a target that was never found does nothing. Dismissing more than
/// once, or after the auto-dismiss already ran, is a no-op.
#[derive(Clone, Default)]
pub struct DismissHandle {
    target: Option<Rc<dyn Dismissable>>,
}

impl DismissHandle {
    pub fn noop() -> Self {
        Self::default()
    }

    pub fn dismiss(&self) {
        match &self.target {
            Some(target) if target.phase().is_active() => Rc::clone(target).dismiss(),
            Some(_) => debug!("notification already dismissed"),
            None => {}
        }
    }

    pub fn is_noop(&self) -> bool {
        self.target.is_none()
    }

    pub fn phase(&self) -> Option<Phase> {
        self.target.as_ref().map(|target| target.phase())
    }
}

impl fmt::Debug for DismissHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissHandle")
            .field("phase", &self.phase())
            .finish()
    }
}

/// Runs the flash-message lifecycle on top of a [`Scheduler`].
#[derive(Clone, Debug)]
pub struct Notifier<S> {
    scheduler: S,
}

impl<S> Notifier<S>
where
    S: Scheduler + Clone + 'static,
{
    pub fn new(scheduler: S) -> Self {
        Self { scheduler }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Shows the first element matching `selector`.
    pub fn show<D>(&self, document: &D, selector: &str, options: &NotifyOptions) -> DismissHandle
    where
        D: Document,
        D::Element: 'static,
    {
        let selector = selector.trim();
        if selector.is_empty() {
            return DismissHandle::noop();
        }
        match document.query_selector(selector) {
            Some(element) => self.show_element(element, options),
            None => {
                debug!(selector, "no notification target");
                DismissHandle::noop()
            }
        }
    }

    /// Shows every element currently matching `selector` (default
    /// `.flash-message`). Elements inserted later are not picked up.
    pub fn show_all<D>(
        &self,
        document: &D,
        selector: Option<&str>,
        options: &NotifyOptions,
    ) -> Vec<DismissHandle>
    where
        D: Document,
        D::Element: 'static,
    {
        let selector = selector
            .map(str::trim)
            .filter(|selector| !selector.is_empty())
            .unwrap_or(DEFAULT_FLASH_SELECTOR);
        document
            .query_selector_all(selector)
            .into_iter()
            .map(|element| self.show_element(element, options))
            .collect()
    }

    pub fn show_element<E>(&self, element: E, options: &NotifyOptions) -> DismissHandle
    where
        E: Element + 'static,
    {
        element.set_style("opacity", "0");
        element.set_style("transform", ENTER_OFFSET);
        element.set_style(
            "transition",
            &format!("opacity {FADE_IN_MS}ms ease, transform {FADE_IN_MS}ms ease"),
        );

        let notification = Rc::new(Notification {
            element,
            scheduler: self.scheduler.clone(),
            phase: Cell::new(Phase::Entering),
            auto_dismiss: RefCell::new(None),
        });

        // Two frames: the first commits the initial state, the second animates.
        let settle = Rc::clone(&notification);
        let scheduler = self.scheduler.clone();
        self.scheduler.next_frame(Box::new(move || {
            scheduler.next_frame(Box::new(move || settle.settle()));
        }));

        if options.auto && options.delay > 0 {
            let this = Rc::clone(&notification);
            let guard = self
                .scheduler
                .after(options.delay, Box::new(move || this.begin_dismiss()));
            *notification.auto_dismiss.borrow_mut() = Some(guard);
        }

        DismissHandle {
            target: Some(notification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dom::memory::{MemoryDocument, MemoryElement},
        notify::scheduler::ManualScheduler,
    };

    fn flash(document: &MemoryDocument, id: &str) -> MemoryElement {
        document.insert(MemoryElement::new().with_id(id).with_class("flash-message"))
    }

    fn options(delay: u32) -> NotifyOptions {
        NotifyOptions { delay, auto: true }
    }

    #[test]
    fn fades_in_after_two_frames() {
        let scheduler = ManualScheduler::new();
        let notifier = Notifier::new(scheduler.clone());
        let document = MemoryDocument::new();
        let element = flash(&document, "saved");

        let handle = notifier.show(&document, "#saved", &options(0));

        assert_eq!(element.style("opacity").as_deref(), Some("0"));
        assert_eq!(element.style("transform").as_deref(), Some(ENTER_OFFSET));
        assert_eq!(handle.phase(), Some(Phase::Entering));

        scheduler.run_frames();
        assert_eq!(element.style("opacity").as_deref(), Some("0"));

        scheduler.run_frames();
        assert_eq!(element.style("opacity").as_deref(), Some("1"));
        assert_eq!(element.style("transform").as_deref(), Some(SETTLED_OFFSET));
        assert_eq!(handle.phase(), Some(Phase::Visible));
    }

    #[test]
    fn zero_delay_never_auto_dismisses() {
        let scheduler = ManualScheduler::new();
        let notifier = Notifier::new(scheduler.clone());
        let document = MemoryDocument::new();
        let element = flash(&document, "note");

        let handle = notifier.show(&document, "#note", &options(0));
        scheduler.run_frames();
        scheduler.run_frames();
        scheduler.advance(60_000);

        assert_eq!(scheduler.pending_timers(), 0);
        assert!(element.is_connected());
        assert_eq!(handle.phase(), Some(Phase::Visible));
    }

    #[test]
    fn disabled_auto_ignores_delay() {
        let scheduler = ManualScheduler::new();
        let notifier = Notifier::new(scheduler.clone());
        let document = MemoryDocument::new();
        let element = flash(&document, "sticky");

        notifier.show(&document, "#sticky", &NotifyOptions { delay: 1000, auto: false });
        scheduler.advance(10_000);

        assert!(element.is_connected());
    }

    #[test]
    fn auto_dismiss_removes_after_delay_and_fade() {
        let scheduler = ManualScheduler::new();
        let notifier = Notifier::new(scheduler.clone());
        let document = MemoryDocument::new();
        let element = flash(&document, "saved");

        let handle = notifier.show(&document, "#saved", &options(1000));
        scheduler.run_frames();
        scheduler.run_frames();

        scheduler.advance(999);
        assert!(element.is_connected());

        scheduler.advance(1);
        assert_eq!(handle.phase(), Some(Phase::Dismissing));
        assert_eq!(element.style("opacity").as_deref(), Some("0"));
        assert_eq!(element.style("pointer-events").as_deref(), Some("none"));
        assert!(element.is_connected());

        scheduler.advance(u64::from(FADE_OUT_MS));
        assert!(!element.is_connected());
        assert_eq!(element.removals(), 1);
        assert_eq!(handle.phase(), Some(Phase::Removed));
        assert!(document.query_selector("#saved").is_none());
    }

    #[test]
    fn manual_dismiss_cancels_pending_timer() {
        let scheduler = ManualScheduler::new();
        let notifier = Notifier::new(scheduler.clone());
        let document = MemoryDocument::new();
        let element = flash(&document, "saved");

        let handle = notifier.show(&document, "#saved", &options(1000));
        scheduler.advance(200);
        handle.dismiss();
        handle.dismiss();

        scheduler.advance(u64::from(FADE_OUT_MS));
        assert!(!element.is_connected());

        scheduler.advance(5_000);
        assert_eq!(element.removals(), 1);
        assert_eq!(scheduler.pending_timers(), 0);
        assert_eq!(handle.phase(), Some(Phase::Removed));
    }

    #[test]
    fn dismiss_after_removal_schedules_nothing() {
        let scheduler = ManualScheduler::new();
        let notifier = Notifier::new(scheduler.clone());
        let document = MemoryDocument::new();
        let element = flash(&document, "saved");

        let handle = notifier.show(&document, "#saved", &options(1000));
        scheduler.advance(1000 + u64::from(FADE_OUT_MS));
        assert_eq!(handle.phase(), Some(Phase::Removed));

        element.set_style("pointer-events", "auto");
        handle.dismiss();

        assert_eq!(scheduler.pending_timers(), 0);
        assert_eq!(element.style("pointer-events").as_deref(), Some("auto"));
        assert_eq!(element.removals(), 1);
    }

    #[test]
    fn dismiss_before_first_paint_skips_fade_in() {
        let scheduler = ManualScheduler::new();
        let notifier = Notifier::new(scheduler.clone());
        let document = MemoryDocument::new();
        let element = flash(&document, "quick");

        let handle = notifier.show(&document, "#quick", &options(0));
        handle.dismiss();
        scheduler.run_frames();
        scheduler.run_frames();

        assert_eq!(element.style("opacity").as_deref(), Some("0"));
        assert_eq!(handle.phase(), Some(Phase::Dismissing));
    }

    #[test]
    fn injected_element_is_shown_without_lookup() {
        let scheduler = ManualScheduler::new();
        let notifier = Notifier::new(scheduler.clone());
        let document = MemoryDocument::new();
        let injected = document.insert(MemoryElement::new().with_class("alert"));

        let handle = notifier.show_element(injected.clone(), &options(1500));
        assert!(!handle.is_noop());
        scheduler.run_frames();
        scheduler.run_frames();
        assert_eq!(injected.style("opacity").as_deref(), Some("1"));

        scheduler.advance(1500 + u64::from(FADE_OUT_MS));
        assert!(!injected.is_connected());
        assert_eq!(injected.removals(), 1);
    }

    #[test]
    fn missing_target_yields_noop_handle() {
        let scheduler = ManualScheduler::new();
        let notifier = Notifier::new(scheduler.clone());
        let document = MemoryDocument::new();

        let handle = notifier.show(&document, "#absent", &options(1000));
        assert!(handle.is_noop());
        assert_eq!(handle.phase(), None);
        handle.dismiss();

        assert!(notifier.show(&document, "  ", &options(1000)).is_noop());
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn show_all_only_touches_current_matches() {
        let scheduler = ManualScheduler::new();
        let notifier = Notifier::new(scheduler.clone());
        let document = MemoryDocument::new();
        let first = flash(&document, "one");
        let second = flash(&document, "two");

        let handles = notifier.show_all(&document, None, &options(1000));
        let late = flash(&document, "three");
        assert_eq!(handles.len(), 2);

        handles[0].dismiss();
        scheduler.advance(1000 + u64::from(FADE_OUT_MS));

        assert!(!first.is_connected());
        assert!(!second.is_connected());
        assert_eq!(first.removals(), 1);
        assert!(late.is_connected());
        assert_eq!(late.style("opacity"), None);
    }
}
