//! Durable Order Store
//!
//! Append-only persistence for the two record types a submission can
//! produce: verified orders and audit snapshots. Each logical table is one
//! checksummed binary journal; every append is flushed and fsynced before
//! returning, so a submission's single record is either durably committed
//! or absent.
//!
//! The verified-orders journal is replayed at startup to rebuild the
//! in-memory book served by queries. The audit journal is write-only from
//! the core's perspective.

pub mod journal;
pub mod store;

pub use journal::{Journal, JournalError, JournalRecord};
pub use store::{OrderStore, StoreError};
