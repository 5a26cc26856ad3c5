//! Sort events and runtime events.
//!
//! Two kinds of traffic flow through the runtime:
//! - **Sort events** ([`ComparisonEvent`], [`SwapEvent`]) travel from one sort task to
//!   its two observers over bounded, ordered, single-producer/single-consumer queues
//!   ([`EventSender`] / [`EventReceiver`]). Each queue ends with exactly one
//!   [`StreamItem::EndOfStream`].
//! - **Runtime events** ([`Event`], [`EventKind`]) are published on the [`Bus`] by
//!   sort tasks, observers and supervisors, and fanned out to subscribers.
//!
//! ## Quick reference
//! - **Sort event producers**: `SortContext::compare` / `SortContext::swap`.
//! - **Sort event consumers**: `core::observer::Observer` (one per algorithm × category).
//! - **Runtime event consumers**: the per-run subscriber listener in `Supervisor`.

mod bus;
mod event;
mod stream;

pub use bus::Bus;
pub use event::{Event, EventKind};
pub use stream::{
    Category, ComparisonEvent, EventReceiver, EventSender, StreamEvent, StreamItem, SwapEvent,
    channel,
};
