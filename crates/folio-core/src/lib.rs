//! Core types and host traits for Folio widgets.
//!
//! This crate provides the foundation the widgets build on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Pointer input: [`Event`]
//! - Host services: [`Timers`], [`DocumentListeners`], [`LayoutQuery`]
//! - In-memory hosts for those services: [`ManualTimers`], [`ListenerRegistry`]

mod event;
mod geometry;
mod listener;
mod timer;
pub mod widget;

pub use event::Event;
pub use geometry::{Point, Rect, Size};
pub use listener::{DocumentListeners, ListenerId, ListenerRegistry};
pub use timer::{Deferred, ManualTimers, TimerId, Timers};
pub use widget::{Host, LayoutQuery, TypeId, Widget, WidgetId};
