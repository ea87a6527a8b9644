//! MSME compliance dashboard core.
//!
//! The interesting part of this crate is the client-side data-refresh and
//! state-synchronization model: how the panels request, cache, and reconcile
//! asynchronously arriving data keyed by a mutable sector filter. Each panel
//! is a ractor actor owning its load lifecycle; fetches run in spawned tasks
//! tagged with a sequence number, and a resolution that is no longer the
//! latest issued request for its panel is discarded rather than applied.
//!
//! The backend is an in-process mock behind async trait seams
//! ([`datasource::DataSource`], [`datasource::ChecklistSource`],
//! [`actors::assistant::ReplyScript`]) so a real HTTP backend can be
//! substituted without touching the actors.

pub mod actors;
pub mod config;
pub mod datasource;
