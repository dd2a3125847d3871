//! Broadcast groups.
//!
//! A [`BroadcastGroup`] owns an ordered list of platform clients and sends
//! one logical message to all of them at once. Each member's outcome is
//! captured independently: a failing member shows up as a failed
//! [`BroadcastResult`] and never interrupts delivery to the others.

mod group;
mod summary;

pub use group::{BroadcastGroup, ClientInfo};
pub use summary::{BroadcastResult, BroadcastSummary, EMBED_FALLBACK_NOTE, TestConnectionResult};
