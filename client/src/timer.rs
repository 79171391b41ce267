//! Cancellable one-shot deferred callback. Dropping the handle before the
//! delay elapses guarantees the callback never runs; the wasm build defers
//! to `gloo_timers`, while the native build keeps a pending queue that tests
//! drain deterministically.

#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

#[cfg(target_arch = "wasm32")]
pub use wasm::OneShot;

#[cfg(not(target_arch = "wasm32"))]
pub use native::OneShot;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use gloo_timers::callback::Timeout;

    pub struct OneShot {
        // Held for its Drop: dropping a pending Timeout cancels it.
        _timeout: Timeout,
    }

    impl OneShot {
        pub fn schedule(delay_ms: u32, callback: impl FnOnce() + 'static) -> Self {
            Self {
                _timeout: Timeout::new(delay_ms, callback),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::RefCell;

    thread_local! {
        static PENDING: RefCell<Vec<(u64, Box<dyn FnOnce()>)>> = const { RefCell::new(Vec::new()) };
        static NEXT_ID: RefCell<u64> = const { RefCell::new(0) };
    }

    pub struct OneShot {
        id: u64,
    }

    impl OneShot {
        pub fn schedule(_delay_ms: u32, callback: impl FnOnce() + 'static) -> Self {
            let id = NEXT_ID.with(|next| {
                let mut next = next.borrow_mut();
                *next += 1;
                *next
            });
            PENDING.with(|pending| pending.borrow_mut().push((id, Box::new(callback))));
            Self { id }
        }
    }

    impl Drop for OneShot {
        fn drop(&mut self) {
            PENDING.with(|pending| pending.borrow_mut().retain(|(id, _)| *id != self.id));
        }
    }

    /// Run every pending callback, as if all scheduled delays elapsed.
    /// Callbacks scheduled while firing stay pending for the next call.
    pub fn fire_all() {
        let due = PENDING.with(|pending| std::mem::take(&mut *pending.borrow_mut()));
        for (_, callback) in due {
            callback();
        }
    }

    pub fn pending_count() -> usize {
        PENDING.with(|pending| pending.borrow().len())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod testing {
    pub use super::native::{fire_all, pending_count};
}
