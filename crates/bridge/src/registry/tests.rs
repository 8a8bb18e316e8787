use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::Mutex;

use super::{AttachReport, Registry, Submission};

fn recorder<P: Send + 'static>() -> (Arc<Mutex<Vec<P>>>, impl Fn(P) + Send + Sync + 'static) {
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&seen);
	(seen, move |payload| sink.lock().push(payload))
}

#[test]
fn buffers_until_attach_then_drains_in_order() {
	let registry = Registry::new("test");
	assert_eq!(registry.submit("a"), Submission::Buffered { pending: 1 });
	assert_eq!(registry.submit("b"), Submission::Buffered { pending: 2 });
	assert!(!registry.is_live());

	let (seen, intake) = recorder::<&str>();
	let report = registry.attach_consumer(intake);

	assert_eq!(report, AttachReport { drained: 2, replaced: false });
	assert_eq!(*seen.lock(), vec!["a", "b"]);
	assert_eq!(registry.pending_len(), 0);
}

#[test]
fn forwards_immediately_once_live() {
	let registry = Registry::new("test");
	let (seen, intake) = recorder::<i32>();
	let report = registry.attach_consumer(intake);
	assert_eq!(report.drained, 0);

	assert_eq!(registry.submit(1), Submission::Forwarded);
	assert_eq!(*seen.lock(), vec![1]);
	assert_eq!(registry.submit(2), Submission::Forwarded);
	assert_eq!(*seen.lock(), vec![1, 2]);
	assert_eq!(registry.pending_len(), 0);
}

#[test]
fn stats_track_each_path() {
	let registry = Registry::new("test");
	registry.submit(());
	registry.submit(());
	let (_seen, intake) = recorder::<()>();
	registry.attach_consumer(intake);
	registry.submit(());

	let stats = registry.stats();
	assert_eq!(stats.submitted, 3);
	assert_eq!(stats.buffered, 2);
	assert_eq!(stats.drained, 2);
	assert_eq!(stats.forwarded, 1);
	assert_eq!(stats.delivered, 3);
}

#[test]
fn second_attach_replaces_without_redelivery() {
	let registry = Registry::new("test");
	registry.submit("early");
	let (first, intake) = recorder::<&str>();
	registry.attach_consumer(intake);

	let (second, intake) = recorder::<&str>();
	let report = registry.attach_consumer(intake);
	assert_eq!(report, AttachReport { drained: 0, replaced: true });

	registry.submit("late");
	assert_eq!(*first.lock(), vec!["early"]);
	assert_eq!(*second.lock(), vec!["late"]);
}

#[test]
fn reentrant_submit_is_delivered_after_current_payload() {
	let registry = Arc::new(Registry::new("test"));
	let seen = Arc::new(Mutex::new(Vec::new()));

	let intake = {
		let registry = Arc::clone(&registry);
		let seen = Arc::clone(&seen);
		move |n: u32| {
			seen.lock().push(n);
			if n == 1 {
				assert_eq!(registry.submit(10), Submission::Deferred);
				seen.lock().push(100);
			}
		}
	};

	registry.submit(1);
	registry.submit(2);
	registry.attach_consumer(intake);

	// 10 was queued while 1 was in flight, but 2 was buffered first.
	assert_eq!(*seen.lock(), vec![1, 100, 2, 10]);
	assert_eq!(registry.stats().delivered, 3);
}

#[test]
fn panicking_intake_does_not_wedge_delivery() {
	let registry = Registry::new("test");
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&seen);
	registry.attach_consumer(move |n: u32| {
		if n == 0 {
			panic!("bad payload");
		}
		sink.lock().push(n);
	});

	let result = catch_unwind(AssertUnwindSafe(|| registry.submit(0)));
	assert!(result.is_err());

	assert_eq!(registry.submit(1), Submission::Forwarded);
	assert_eq!(*seen.lock(), vec![1]);
}

#[test]
fn debug_output_reports_state() {
	let registry = Registry::<u8>::new("core::ops::Shr");
	registry.submit(7);
	let rendered = format!("{registry:?}");
	assert!(rendered.contains("core::ops::Shr"));
	assert!(rendered.contains("live: false"));
	assert!(rendered.contains("pending: 1"));
}
