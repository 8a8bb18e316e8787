//! Drives implementor fragments found in a documentation tree through the
//! registry bridge, the way a page load would, and reports what the consumer
//! received.

pub mod config;
pub mod render;
pub mod scan;
pub mod session;
