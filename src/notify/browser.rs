//! Browser event loop: `setTimeout` and `requestAnimationFrame`.

use super::scheduler::{CallbackSlot, Scheduler, Task, TimerGuard};
use gloo_timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::{JsCast, closure::Closure};
use wasm_bindgen_futures::spawn_local;

type TimerCallback = Closure<dyn FnMut()>;

/// Frees the callback once the current JS task unwinds. The guard may be
/// dropped from inside the callback it owns.
fn release(slot: &CallbackSlot<TimerCallback>) {
    if let Some(callback) = slot.release() {
        spawn_local(async move { drop(callback) });
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn after(&self, delay_ms: u32, task: Task) -> TimerGuard {
        let Some(window) = web_sys::window() else {
            Timeout::new(delay_ms, task).forget();
            return TimerGuard::new(|| {});
        };

        let slot = CallbackSlot::empty();
        let fired = slot.clone();
        let mut task = Some(task);
        let callback = TimerCallback::wrap(Box::new(move || {
            release(&fired);
            if let Some(task) = task.take() {
                task();
            }
        }));

        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let Ok(id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout,
        ) else {
            warn!("setTimeout rejected a timer callback");
            return TimerGuard::new(|| {});
        };
        slot.fill(callback);

        TimerGuard::new(move || {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(id);
            }
            release(&slot);
        })
    }

    fn next_frame(&self, task: Task) {
        let Some(window) = web_sys::window() else {
            Timeout::new(0, task).forget();
            return;
        };
        let callback = Closure::once_into_js(move |_timestamp: f64| task());
        if window
            .request_animation_frame(callback.unchecked_ref())
            .is_err()
        {
            warn!("requestAnimationFrame rejected a frame callback");
        }
    }
}
