//! `TimerHost` over the browser's `setTimeout`.

use fieldsync_core::TimerHost;
use gloo_timers::callback::Timeout;

/// Timers on the page's event loop. Dropping a handle clears its timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl TimerHost for BrowserTimers {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, callback)
    }
}
