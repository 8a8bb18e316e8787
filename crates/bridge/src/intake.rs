/// Consumer side of a [`Registry`](crate::Registry).
///
/// Installed once through [`Registry::attach_consumer`](crate::Registry::attach_consumer);
/// receives every payload submitted to that registry exactly once.
pub trait Intake<P>: Send + Sync {
	/// Takes ownership of one payload.
	fn accept(&self, payload: P);
}

impl<P, F> Intake<P> for F
where
	F: Fn(P) + Send + Sync,
{
	fn accept(&self, payload: P) {
		self(payload)
	}
}
