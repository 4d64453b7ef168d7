//! Typed store facade over the two journals
//!
//! One journal per logical table: `orders.journal` holds bincode-encoded
//! verified orders, `audit.journal` holds the JSON snapshots of rejected
//! submissions. The order book is replayed into memory at open time and
//! kept consistent with the durable state: an order is only visible to
//! queries after its journal record is committed.

use crate::journal::{Journal, JournalError};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use types::trade::{AuditRecord, VerifiedOrder};

/// File name of the verified-orders table.
pub const ORDERS_JOURNAL: &str = "orders.journal";

/// File name of the audit-log table.
pub const AUDIT_JOURNAL: &str = "audit.journal";

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored order at sequence {sequence} failed to decode: {detail}")]
    Decode { sequence: u64, detail: String },

    #[error("order failed to encode: {0}")]
    Encode(String),
}

// ── Order Store ─────────────────────────────────────────────────────

/// The single shared mutable resource of the intake pipeline.
pub struct OrderStore {
    data_dir: PathBuf,
    orders: Journal,
    audit: Journal,
    book: Vec<VerifiedOrder>,
}

impl OrderStore {
    /// Open the store in a data directory, creating it if needed, and
    /// replay the verified-orders journal into the in-memory book.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;

        let (orders, records) = Journal::open(data_dir.join(ORDERS_JOURNAL))?;
        let mut book = Vec::with_capacity(records.len());
        for record in &records {
            let order: VerifiedOrder =
                bincode::deserialize(&record.payload).map_err(|e| StoreError::Decode {
                    sequence: record.sequence,
                    detail: e.to_string(),
                })?;
            book.push(order);
        }

        let (audit, _) = Journal::open(data_dir.join(AUDIT_JOURNAL))?;

        Ok(Self {
            data_dir,
            orders,
            audit,
            book,
        })
    }

    /// Durably append one verified order.
    ///
    /// The in-memory book is extended only after the journal write has been
    /// fsynced, so queries never observe an uncommitted order.
    pub fn append_order(&mut self, order: &VerifiedOrder) -> Result<(), StoreError> {
        let payload =
            bincode::serialize(order).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.orders.append(now_nanos(), payload)?;
        self.book.push(order.clone());
        Ok(())
    }

    /// Durably append one audit snapshot. Write-only: nothing in the core
    /// reads this journal back.
    pub fn append_audit(&mut self, record: &AuditRecord) -> Result<(), StoreError> {
        self.audit.append(now_nanos(), record.to_json().into_bytes())?;
        Ok(())
    }

    /// All verified orders, in insertion order.
    pub fn orders(&self) -> &[VerifiedOrder] {
        &self.book
    }

    /// Number of verified orders in the book.
    pub fn len(&self) -> usize {
        self.book.len()
    }

    pub fn is_empty(&self) -> bool {
        self.book.is_empty()
    }

    /// Number of audit records written since the store was created.
    pub fn audit_count(&self) -> u64 {
        self.audit.next_sequence()
    }

    /// Data directory backing this store.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn now_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0)
}

// ── Tests ───────────────────────────────────────────────────────────
