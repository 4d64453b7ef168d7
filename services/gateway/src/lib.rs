//! Gateway — HTTP intake and order-book service
//!
//! Accepts signed trade submissions, runs them through the intake workflow
//! (shape check → signature dispatch → persist or audit), and serves the
//! accumulated order book. All domain logic lives in `sigcore` and
//! `orderstore`; this crate is the HTTP surface plus the workflow wiring.

pub mod error;
pub mod handlers;
pub mod intake;
pub mod models;
pub mod router;
pub mod state;
