//! Admin client for the StockPick investment platform backend.
//!
//! The backend is the source of truth; this crate only holds transport DTOs
//! and per-page view state. Two pieces do the real work:
//!
//! - the list engine (`list`): pagination/filter state, a debounced search
//!   input, a fetch orchestrator that replaces the page wholesale, and an
//!   action dispatcher that re-fetches after every mutation instead of
//!   patching locally;
//! - the notification bridge (`notify`): a websocket listener that feeds an
//!   in-memory log and invalidates the pending-counts aggregate through a
//!   timestamp channel.

pub mod api;
pub mod auth;
pub mod core;
pub mod list;
pub mod notify;
