//! Per-trait registry with a pending buffer and a late-attached intake.
//!
//! # Role
//!
//! Decides, atomically for each submission, whether a consumer is live. Live
//! payloads are forwarded; everything else waits in `pending` until
//! [`Registry::attach_consumer`] drains it.
//!
//! # Delivery
//!
//! The forward-or-buffer decision and intake installation share one critical
//! section. The intake itself runs outside the lock: accepted payloads go
//! through an outbox drained by a single active deliverer. A caller that finds
//! no delivery in progress becomes the deliverer and drains the outbox until it
//! is empty; a caller that finds one in progress hands its payload to it. On an
//! uncontended registry this means a live submission is accepted before
//! `submit` returns.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::Intake;

/// How a submission was routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
	/// A consumer was live and accepted the payload before `submit` returned.
	Forwarded,
	/// A consumer was live, but another caller was mid-delivery; the payload was
	/// queued behind it and will be accepted before that delivery finishes.
	Deferred,
	/// No consumer yet. `pending` is the buffer length after this submission.
	Buffered { pending: usize },
}

impl Submission {
	/// Whether the payload took the live path.
	pub fn is_live(self) -> bool {
		!matches!(self, Submission::Buffered { .. })
	}
}

/// Outcome of [`Registry::attach_consumer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttachReport {
	/// Buffered payloads handed to the new intake.
	pub drained: usize,
	/// Whether an earlier intake was replaced.
	pub replaced: bool,
}

/// Counters describing a registry's traffic so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryStats {
	pub submitted: usize,
	pub buffered: usize,
	pub forwarded: usize,
	pub drained: usize,
	pub delivered: usize,
}

struct State<P> {
	intake: Option<Arc<dyn Intake<P>>>,
	pending: VecDeque<P>,
	outbox: VecDeque<P>,
	delivering: bool,
	stats: RegistryStats,
}

/// Process-wide hand-off point for one trait's implementor fragments.
pub struct Registry<P> {
	label: Arc<str>,
	state: Mutex<State<P>>,
}

impl<P> Registry<P> {
	/// Creates an empty registry with no consumer attached.
	pub fn new(label: impl Into<Arc<str>>) -> Self {
		Self {
			label: label.into(),
			state: Mutex::new(State {
				intake: None,
				pending: VecDeque::new(),
				outbox: VecDeque::new(),
				delivering: false,
				stats: RegistryStats::default(),
			}),
		}
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	/// Whether a consumer has been attached.
	pub fn is_live(&self) -> bool {
		self.state.lock().intake.is_some()
	}

	/// Payloads buffered while waiting for a consumer.
	pub fn pending_len(&self) -> usize {
		self.state.lock().pending.len()
	}

	pub fn stats(&self) -> RegistryStats {
		self.state.lock().stats
	}

	/// Submits one payload.
	///
	/// Forwards to the live intake when a consumer is attached, otherwise
	/// appends to the pending buffer. Each call submits independently.
	pub fn submit(&self, payload: P) -> Submission {
		let mut state = self.state.lock();
		state.stats.submitted += 1;

		if state.intake.is_none() {
			state.pending.push_back(payload);
			state.stats.buffered += 1;
			let pending = state.pending.len();
			drop(state);
			debug!(registry = %self.label, pending, "buffered payload until consumer attaches");
			return Submission::Buffered { pending };
		}

		state.outbox.push_back(payload);
		state.stats.forwarded += 1;
		if state.delivering {
			return Submission::Deferred;
		}
		state.delivering = true;
		drop(state);

		self.deliver();
		Submission::Forwarded
	}

	/// Installs `intake` as the live consumer and drains the pending buffer into
	/// it, oldest first.
	///
	/// Meant to be called once. A second call replaces the target for future
	/// deliveries; payloads already accepted by the previous intake are not
	/// redelivered.
	pub fn attach_consumer<I>(&self, intake: I) -> AttachReport
	where
		I: Intake<P> + 'static,
	{
		self.attach_shared(Arc::new(intake))
	}

	/// Like [`Registry::attach_consumer`], for an intake shared with other
	/// registries.
	pub fn attach_shared(&self, intake: Arc<dyn Intake<P>>) -> AttachReport {
		let mut state = self.state.lock();
		let replaced = state.intake.replace(intake).is_some();

		// Non-empty only while no intake was installed, so the outbox is empty here.
		let drained = state.pending.len();
		let pending = std::mem::take(&mut state.pending);
		state.outbox.extend(pending);
		state.stats.drained += drained;

		let start = !state.delivering && !state.outbox.is_empty();
		if start {
			state.delivering = true;
		}
		drop(state);

		if replaced {
			warn!(registry = %self.label, "consumer replaced; earlier deliveries are not repeated");
		}
		debug!(registry = %self.label, drained, "consumer attached");

		if start {
			self.deliver();
		}
		AttachReport { drained, replaced }
	}

	/// Drains the outbox into the current intake. Caller must have set
	/// `delivering`.
	fn deliver(&self) {
		let mut guard = DeliveryGuard { registry: self, armed: true };
		loop {
			let next = {
				let mut state = self.state.lock();
				let next = state
					.intake
					.clone()
					.and_then(|intake| state.outbox.pop_front().map(|payload| (intake, payload)));
				match next {
					Some(next) => {
						state.stats.delivered += 1;
						next
					}
					None => {
						state.delivering = false;
						guard.armed = false;
						return;
					}
				}
			};
			let (intake, payload) = next;
			trace!(registry = %self.label, "delivering payload");
			intake.accept(payload);
		}
	}
}

/// Releases the delivery flag if an intake unwinds mid-delivery, so later
/// submissions can deliver again.
struct DeliveryGuard<'a, P> {
	registry: &'a Registry<P>,
	armed: bool,
}

impl<P> Drop for DeliveryGuard<'_, P> {
	fn drop(&mut self) {
		if self.armed {
			let mut state = self.registry.state.lock();
			state.delivering = false;
			let stranded = state.outbox.len();
			drop(state);
			warn!(registry = %self.registry.label, stranded, "intake panicked during delivery");
		}
	}
}

impl<P> fmt::Debug for Registry<P> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.lock();
		f.debug_struct("Registry")
			.field("label", &self.label)
			.field("live", &state.intake.is_some())
			.field("pending", &state.pending.len())
			.field("stats", &state.stats)
			.finish()
	}
}

#[cfg(test)]
mod tests;
