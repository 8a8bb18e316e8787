//! Registry bridge between independently loaded implementor fragments and the
//! single consumer that renders them.
//!
//! Fragments may run before or after the consumer initializes. Each trait owns
//! one [`Registry`]: while no consumer is attached, submitted payloads are
//! buffered in arrival order; once [`Registry::attach_consumer`] installs an
//! [`Intake`], the buffer is drained into it and every later submission is
//! forwarded immediately.
//!
//! ```text
//!  fragment ──submit──▶ ┌────────────────┐
//!  fragment ──submit──▶ │    Registry    │ ──accept──▶ Intake (consumer)
//!  fragment ──submit──▶ │ intake/pending │
//!                       └────────────────┘
//!                               ▲
//!                    attach_consumer (once)
//! ```
//!
//! # Invariants
//!
//! - The live intake, once installed, is never removed.
//! - Every submitted payload reaches an intake exactly once.
//! - Payloads reach the intake in the order their submissions entered the
//!   registry; buffered payloads are never overtaken by live ones.
//! - The intake is never invoked while the registry lock is held, so an intake
//!   may submit back into the same registry.

mod intake;
mod key;
mod registry;
mod set;

pub use intake::Intake;
pub use key::TraitPath;
pub use registry::{AttachReport, Registry, RegistryStats, Submission};
pub use set::RegistrySet;
