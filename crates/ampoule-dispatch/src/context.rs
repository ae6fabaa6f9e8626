//! Thread-local request context.
//!
//! The dispatcher enters the context before running the middleware
//! chain and refreshes it at the terminal so mutations middleware made
//! to the request are visible. Handler code reads it through
//! [`current`] without threading the request through every call.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use ampoule_exception::{Error, Result};
use ampoule_http::Request;

struct ActiveRequest {
	request: Request,
	entered_at: Instant,
}

thread_local! {
	static CURRENT: RefCell<Option<ActiveRequest>> = const { RefCell::new(None) };
}

/// Restores the previously active request (if any) when dropped, so
/// nested dispatches on one thread unwind correctly.
pub struct ContextGuard {
	previous: Option<ActiveRequest>,
}

impl Drop for ContextGuard {
	fn drop(&mut self) {
		CURRENT.with(|current| {
			*current.borrow_mut() = self.previous.take();
		});
	}
}

/// Make `request` the active request for this thread.
pub fn enter(request: Request) -> ContextGuard {
	CURRENT.with(|current| ContextGuard {
		previous: current.borrow_mut().replace(ActiveRequest {
			request,
			entered_at: Instant::now(),
		}),
	})
}

/// Replace the active request in place, keeping the original entry
/// time. No-op outside a request.
pub fn refresh(request: &Request) {
	CURRENT.with(|current| {
		if let Some(active) = current.borrow_mut().as_mut() {
			active.request = request.clone();
		}
	});
}

/// The active request, cloned out of the thread-local slot.
///
/// # Examples
///
/// ```
/// assert!(ampoule_dispatch::current().is_err());
/// ```
pub fn current() -> Result<Request> {
	CURRENT.with(|current| {
		current
			.borrow()
			.as_ref()
			.map(|active| active.request.clone())
			.ok_or_else(Error::not_in_request)
	})
}

/// Wall time spent inside the active request so far.
pub fn elapsed_time() -> Result<Duration> {
	CURRENT.with(|current| {
		current
			.borrow()
			.as_ref()
			.map(|active| active.entered_at.elapsed())
			.ok_or_else(Error::not_in_request)
	})
}

/// Time left before the platform deadline, as reported at invocation
/// minus the time elapsed since. Saturates at zero.
pub fn remaining_time() -> Result<Duration> {
	CURRENT.with(|current| {
		current
			.borrow()
			.as_ref()
			.map(|active| {
				let budget =
					Duration::from_millis(active.request.context.remaining_time_in_millis());
				budget.saturating_sub(active.entered_at.elapsed())
			})
			.ok_or_else(Error::not_in_request)
	})
}
