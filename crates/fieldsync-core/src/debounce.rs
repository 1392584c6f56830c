//! Trailing-edge debouncing.
//!
//! `DebounceScheduler` coalesces a burst of `schedule` calls into one
//! delivery, `window_ms` after the last call, carrying only the last call's
//! arguments. There is never more than one pending timer per scheduler.
//!
//! Timer callbacks can already be queued on the event loop when the
//! scheduler is cancelled or replaced, so each callback carries the
//! generation it was scheduled under and checks it (and liveness) before
//! delivering anything.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::platform::TimerHost;

struct State<A, T> {
    pending: Option<T>,
    last_args: Option<A>,
    generation: u64,
    closed: bool,
}

/// Trailing-edge debouncer over a `TimerHost`.
pub struct DebounceScheduler<A: 'static, H: TimerHost> {
    host: H,
    window_ms: u32,
    state: Rc<RefCell<State<A, H::Handle>>>,
    deliver: Rc<dyn Fn(A)>,
}

impl<A: 'static, H: TimerHost> DebounceScheduler<A, H>
where
    H::Handle: 'static,
{
    pub fn new(host: H, window_ms: u32, deliver: impl Fn(A) + 'static) -> Self {
        Self {
            host,
            window_ms,
            state: Rc::new(RefCell::new(State {
                pending: None,
                last_args: None,
                generation: 0,
                closed: false,
            })),
            deliver: Rc::new(deliver),
        }
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Record `args` as the latest call and restart the quiet period.
    pub fn schedule(&self, args: A) {
        let (generation, previous) = {
            let mut state = self.state.borrow_mut();
            if state.closed {
                return;
            }
            state.generation += 1;
            state.last_args = Some(args);
            (state.generation, state.pending.take())
        };
        // Cancel outside the borrow; dropping a handle may run host code.
        drop(previous);

        let weak = Rc::downgrade(&self.state);
        let deliver = Rc::clone(&self.deliver);
        let handle = self.host.schedule(
            self.window_ms,
            Box::new(move || fire(&weak, generation, &*deliver)),
        );

        let mut state = self.state.borrow_mut();
        if state.generation == generation && !state.closed {
            state.pending = Some(handle);
        }
    }

    /// Discard the pending delivery, if any, without delivering it.
    pub fn cancel(&self) {
        let previous = {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.last_args = None;
            state.pending.take()
        };
        drop(previous);
    }

    /// Deliver the pending arguments now instead of waiting for the timer.
    ///
    /// Returns false when nothing was pending.
    pub fn flush(&self) -> bool {
        let (args, previous) = {
            let mut state = self.state.borrow_mut();
            if state.closed {
                return false;
            }
            state.generation += 1;
            (state.last_args.take(), state.pending.take())
        };
        drop(previous);
        match args {
            Some(args) => {
                (self.deliver)(args);
                true
            }
            None => false,
        }
    }

    /// Cancel and refuse every later `schedule`.
    pub fn close(&self) {
        self.cancel();
        self.state.borrow_mut().closed = true;
    }

    /// Whether a delivery is waiting on the timer.
    pub fn is_pending(&self) -> bool {
        self.state.borrow().last_args.is_some()
    }
}

fn fire<A, T>(state: &Weak<RefCell<State<A, T>>>, generation: u64, deliver: &dyn Fn(A)) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let args = {
        let mut state = state.borrow_mut();
        if state.closed || state.generation != generation {
            return;
        }
        // The handle stays in `pending` until the next schedule/cancel;
        // dropping it from inside its own callback is not allowed on every host.
        state.last_args.take()
    };
    if let Some(args) = args {
        deliver(args);
    }
}

impl<A: 'static, H: TimerHost> Drop for DebounceScheduler<A, H> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.closed = true;
            state.last_args = None;
            state.pending = None;
        }
    }
}
