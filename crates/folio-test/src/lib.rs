//! Testing harness for Folio widgets.
//!
//! [`MockHost`] stands in for the browser: a virtual clock, a document
//! listener registry and hand-set layout rects. [`Harness`] drives a widget
//! against it and checks that nothing leaks.

mod harness;
mod host;

pub use harness::Harness;
pub use host::MockHost;
