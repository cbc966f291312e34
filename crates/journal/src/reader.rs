// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Journal Reader
//!
//! # Recovery Contract
//! - Invalid header → fail closed
//! - Entry header checksum mismatch or oversized length → fail closed
//! - Checksum mismatch, sequence gap, undecodable record → fail closed
//! - Incomplete final entry (crash mid-append) → ignored, reported as a
//!   torn tail so the writer can cut it off. A tail only counts as torn when
//!   it is shorter than an entry header, or its entry header is intact and
//!   its payload stops at EOF.

use crate::error::{JournalError, Result};
use crate::format::{decode_record, EntryHeader, JournalHeader};
use state_ledger::StateRecord;
use std::fs;
use std::path::Path;

/// Everything recovered from one pass over a journal file.
#[derive(Debug, Clone, Default)]
pub struct JournalScan {
    pub records: Vec<StateRecord>,
    /// Offset just past the last complete entry.
    pub valid_len: u64,
    /// Bytes of an incomplete trailing entry, if any.
    pub torn_bytes: u64,
}

/// Parse a journal image held in memory.
pub fn scan_bytes(bytes: &[u8]) -> Result<JournalScan> {
    if bytes.len() < JournalHeader::SIZE {
        return Err(JournalError::InvalidHeader);
    }
    JournalHeader::read_from(&bytes[..JournalHeader::SIZE])?;

    let mut records = Vec::new();
    let mut offset = JournalHeader::SIZE;

    while offset < bytes.len() {
        let remaining = bytes.len() - offset;
        if remaining < EntryHeader::SIZE {
            break;
        }

        let header = EntryHeader::read_from(&bytes[offset..offset + EntryHeader::SIZE])?;
        if !header.is_intact() {
            tracing::error!("Corrupted entry header at offset {}", offset);
            return Err(JournalError::Corrupted {
                offset: offset as u64,
            });
        }

        let expected = records.len() as u64;
        if header.sequence != expected {
            return Err(JournalError::SequenceGap {
                expected,
                found: header.sequence,
            });
        }

        let payload_start = offset + EntryHeader::SIZE;
        let payload_end = payload_start + header.payload_len as usize;
        if payload_end > bytes.len() {
            break;
        }

        let payload = &bytes[payload_start..payload_end];
        header.verify(payload)?;
        let record = decode_record(payload).map_err(|e| {
            tracing::error!("Undecodable journal entry at offset {}: {}", offset, e);
            JournalError::Corrupted {
                offset: offset as u64,
            }
        })?;

        records.push(record);
        offset = payload_end;
    }

    let torn_bytes = (bytes.len() - offset) as u64;
    if torn_bytes > 0 {
        tracing::warn!(
            "Ignoring incomplete entry at end of journal (offset {}, {} bytes)",
            offset,
            torn_bytes
        );
    }

    Ok(JournalScan {
        records,
        valid_len: offset as u64,
        torn_bytes,
    })
}

pub fn scan_journal(path: impl AsRef<Path>) -> Result<JournalScan> {
    let bytes = fs::read(path.as_ref())?;
    scan_bytes(&bytes)
}

/// Committed records in journal order.
pub fn read_journal(path: impl AsRef<Path>) -> Result<Vec<StateRecord>> {
    Ok(scan_journal(path)?.records)
}
