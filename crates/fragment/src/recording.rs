use std::sync::Arc;

use parking_lot::Mutex;

use crate::{FragmentPayload, Intake};

/// Intake that keeps every payload it is given, in arrival order.
///
/// Clones share storage: attach one clone, read through another.
#[derive(Debug, Clone, Default)]
pub struct RecordingIntake {
	received: Arc<Mutex<Vec<FragmentPayload>>>,
}

impl RecordingIntake {
	pub fn new() -> Self {
		Self::default()
	}

	/// Payloads received so far.
	pub fn received(&self) -> Vec<FragmentPayload> {
		self.received.lock().clone()
	}

	/// Removes and returns everything received so far.
	pub fn take(&self) -> Vec<FragmentPayload> {
		std::mem::take(&mut *self.received.lock())
	}

	pub fn len(&self) -> usize {
		self.received.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.received.lock().is_empty()
	}
}

impl Intake<FragmentPayload> for RecordingIntake {
	fn accept(&self, payload: FragmentPayload) {
		self.received.lock().push(payload);
	}
}
