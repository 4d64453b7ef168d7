//! Append-only journal with CRC32C checksums
//!
//! # Binary Format (per record)
//! ```text
//! [body_len:    u32]
//! [sequence:    u64]
//! [timestamp:   i64]
//! [payload_len: u32][payload: bytes]
//! [checksum:    u32]  // CRC32C over sequence+timestamp+payload
//! ```
//!
//! Appends are durable: each record is flushed and fsynced before the call
//! returns. Reading tolerates a truncated final record (crash tail) by
//! stopping at the last complete record; a checksum mismatch or sequence
//! gap mid-stream is reported as corruption instead.

use crc32c::crc32c;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Checksum mismatch at byte offset {offset}: record seq={sequence}")]
    ChecksumMismatch { offset: u64, sequence: u64 },

    #[error("Corruption at byte offset {offset}: {detail}")]
    Corrupt { offset: u64, detail: String },

    #[error("Sequence error: expected {expected}, got {got}")]
    SequenceError { expected: u64, got: u64 },
}

/// Why a record could not be parsed from a byte slice.
enum ParseIssue {
    /// Not enough bytes for a complete record; valid at end of file.
    Truncated,
    /// Structurally impossible record.
    Implausible(String),
}

// ── Journal Record ──────────────────────────────────────────────────

/// A single persisted record.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalRecord {
    /// Per-journal monotonic sequence number, gapless from 0.
    pub sequence: u64,
    /// Unix nanosecond timestamp of the append.
    pub timestamp: i64,
    /// Opaque payload bytes (bincode or JSON, owned by the caller).
    pub payload: Vec<u8>,
    /// CRC32C over (sequence ++ timestamp ++ payload).
    pub checksum: u32,
}

impl JournalRecord {
    /// Create a record, computing its checksum.
    pub fn new(sequence: u64, timestamp: i64, payload: Vec<u8>) -> Self {
        let checksum = Self::compute_checksum(sequence, timestamp, &payload);
        Self {
            sequence,
            timestamp,
            payload,
            checksum,
        }
    }

    /// CRC32C over the concatenation of (sequence, timestamp, payload).
    pub fn compute_checksum(sequence: u64, timestamp: i64, payload: &[u8]) -> u32 {
        let mut buf = Vec::with_capacity(8 + 8 + payload.len());
        buf.extend_from_slice(&sequence.to_le_bytes());
        buf.extend_from_slice(&timestamp.to_le_bytes());
        buf.extend_from_slice(payload);
        crc32c(&buf)
    }

    /// Validate the stored checksum against a recomputed value.
    pub fn verify_checksum(&self) -> bool {
        self.checksum == Self::compute_checksum(self.sequence, self.timestamp, &self.payload)
    }

    /// Serialize to the binary wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload_len = self.payload.len() as u32;
        // body = 8 (seq) + 8 (ts) + 4 (pl_len) + payload + 4 (crc)
        let body_len: u32 = 8 + 8 + 4 + payload_len + 4;

        let mut buf = Vec::with_capacity(4 + body_len as usize);
        buf.extend_from_slice(&body_len.to_le_bytes());
        buf.extend_from_slice(&self.sequence.to_le_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf.extend_from_slice(&payload_len.to_le_bytes());
        buf.extend_from_slice(&self.payload);
        buf.extend_from_slice(&self.checksum.to_le_bytes());
        buf
    }

    /// Deserialize from the binary wire format.
    ///
    /// Returns `(record, bytes_consumed)` on success.
    fn from_bytes(data: &[u8]) -> Result<(Self, usize), ParseIssue> {
        if data.len() < 4 {
            return Err(ParseIssue::Truncated);
        }
        let body_len = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        // Minimum body: 8 (seq) + 8 (ts) + 4 (pl_len) + 0 + 4 (crc) = 24
        if body_len < 24 {
            return Err(ParseIssue::Implausible(format!(
                "body length {} below minimum of 24",
                body_len
            )));
        }
        if body_len > 100_000_000 {
            return Err(ParseIssue::Implausible(format!(
                "implausible body length {}",
                body_len
            )));
        }

        let total = 4 + body_len;
        if data.len() < total {
            return Err(ParseIssue::Truncated);
        }

        let body = &data[4..total];
        let sequence = u64::from_le_bytes(body[..8].try_into().expect("sized slice"));
        let timestamp = i64::from_le_bytes(body[8..16].try_into().expect("sized slice"));
        let payload_len = u32::from_le_bytes(body[16..20].try_into().expect("sized slice")) as usize;

        if 20 + payload_len + 4 != body.len() {
            return Err(ParseIssue::Implausible(format!(
                "payload length {} inconsistent with body length {}",
                payload_len, body_len
            )));
        }

        let payload = body[20..20 + payload_len].to_vec();
        let checksum =
            u32::from_le_bytes(body[20 + payload_len..].try_into().expect("sized slice"));

        Ok((
            Self {
                sequence,
                timestamp,
                payload,
                checksum,
            },
            total,
        ))
    }
}

// ── Journal ─────────────────────────────────────────────────────────

/// Append-only journal over a single file.
pub struct Journal {
    path: PathBuf,
    writer: BufWriter<File>,
    next_sequence: u64,
}

impl Journal {
    /// Open a journal, creating the file if needed, and replay its records.
    ///
    /// Returns the journal positioned for appending plus every valid record
    /// currently on disk, in storage order.
    pub fn open(path: impl Into<PathBuf>) -> Result<(Self, Vec<JournalRecord>), JournalError> {
        let path = path.into();
        let (records, valid_len) = Self::read_all(&path)?;
        let next_sequence = records.last().map(|r| r.sequence + 1).unwrap_or(0);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        // Drop a non-durable crash tail so new appends extend the valid prefix
        if file.metadata()?.len() > valid_len {
            file.set_len(valid_len)?;
        }
        Ok((
            Self {
                path,
                writer: BufWriter::new(file),
                next_sequence,
            },
            records,
        ))
    }

    /// Append one payload as a durable record.
    ///
    /// The record is flushed and fsynced before this returns; on any error
    /// the record must be considered not written. Returns the assigned
    /// sequence number.
    pub fn append(&mut self, timestamp: i64, payload: Vec<u8>) -> Result<u64, JournalError> {
        let record = JournalRecord::new(self.next_sequence, timestamp, payload);
        self.writer.write_all(&record.to_bytes())?;
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;

        self.next_sequence = record.sequence + 1;
        Ok(record.sequence)
    }

    /// Next sequence number to be assigned.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every valid record from a journal file.
    ///
    /// A truncated final record is tolerated (the write was not durable);
    /// anything else that fails to parse or checksum is corruption. Returns
    /// the records plus the byte length of the valid prefix.
    fn read_all(path: &Path) -> Result<(Vec<JournalRecord>, u64), JournalError> {
        if !path.exists() {
            return Ok((Vec::new(), 0));
        }
        let data = fs::read(path)?;

        let mut records = Vec::new();
        let mut pos = 0usize;
        while pos < data.len() {
            match JournalRecord::from_bytes(&data[pos..]) {
                Ok((record, consumed)) => {
                    if !record.verify_checksum() {
                        return Err(JournalError::ChecksumMismatch {
                            offset: pos as u64,
                            sequence: record.sequence,
                        });
                    }
                    let expected = records
                        .last()
                        .map(|r: &JournalRecord| r.sequence + 1)
                        .unwrap_or(0);
                    if record.sequence != expected {
                        return Err(JournalError::SequenceError {
                            expected,
                            got: record.sequence,
                        });
                    }
                    pos += consumed;
                    records.push(record);
                }
                Err(ParseIssue::Truncated) => break,
                Err(ParseIssue::Implausible(detail)) => {
                    return Err(JournalError::Corrupt {
                        offset: pos as u64,
                        detail,
                    });
                }
            }
        }
        Ok((records, pos as u64))
    }
}

// ── Tests ───────────────────────────────────────────────────────────
