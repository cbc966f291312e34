// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Append-Only Journal Writer
//!
//! - Each record is written and fsync'd before `append` returns
//! - No rewriting of existing entries
//! - A torn tail left by a crash is cut off on open

use crate::error::{JournalError, Result};
use crate::format::{encode_record, EntryHeader, JournalHeader, MAX_RECORD_LEN};
use crate::reader::{scan_journal, JournalScan};
use state_ledger::{LedgerError, LedgerResult, RecordSink, StateRecord};
use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Storage a journal writes through.
pub trait JournalFile: Write + Seek {
    fn set_len(&mut self, len: u64) -> io::Result<()>;
    fn sync_data(&mut self) -> io::Result<()>;
}

impl JournalFile for File {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        File::set_len(self, len)
    }

    fn sync_data(&mut self) -> io::Result<()> {
        File::sync_data(self)
    }
}

pub struct JournalWriter<F: JournalFile = File> {
    path: PathBuf,
    file: F,
    /// End of the last complete entry.
    len: u64,
    next_sequence: u64,
    /// Set when a failed append could not be undone.
    failed: bool,
}

impl JournalWriter<File> {
    /// Open or create a journal file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_scan(path).map(|(writer, _)| writer)
    }

    /// Open or create a journal file, also returning what was already in it.
    ///
    /// A new (or zero-length) file gets a header. An existing file is
    /// scanned (fail closed on corruption); a torn tail is truncated so
    /// appends start on an entry boundary.
    pub fn open_with_scan(path: impl AsRef<Path>) -> Result<(Self, JournalScan)> {
        let path = path.as_ref().to_path_buf();
        let is_new = !path.exists() || std::fs::metadata(&path)?.len() == 0;

        let scan = if is_new {
            JournalScan {
                valid_len: JournalHeader::SIZE as u64,
                ..JournalScan::default()
            }
        } else {
            scan_journal(&path)?
        };

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)?;

        if is_new {
            JournalHeader::new().write_to(&mut file)?;
            file.sync_all()?;
            tracing::info!("Created journal at {:?}", path);
        } else if scan.torn_bytes > 0 {
            tracing::warn!(
                "Truncating {} torn bytes from journal {:?}",
                scan.torn_bytes,
                path
            );
            file.set_len(scan.valid_len)?;
            file.sync_all()?;
        }

        file.seek(SeekFrom::Start(scan.valid_len))?;

        let writer = Self::with_file(path, file, scan.valid_len, scan.records.len() as u64);
        Ok((writer, scan))
    }
}

impl<F: JournalFile> JournalWriter<F> {
    /// Wrap `file`, already positioned at `len`, the end of its last entry.
    fn with_file(path: PathBuf, file: F, len: u64, next_sequence: u64) -> Self {
        Self {
            path,
            file,
            len,
            next_sequence,
            failed: false,
        }
    }

    /// Append one record; returns its sequence number.
    ///
    /// On error nothing of the entry remains in the file and the sequence
    /// number is reused by the next append. If the partial entry cannot be
    /// removed, every later append fails with `WriterFailed`.
    pub fn append(&mut self, record: &StateRecord) -> Result<u64> {
        if self.failed {
            return Err(JournalError::WriterFailed);
        }

        let payload = encode_record(record)?;
        if payload.len() > MAX_RECORD_LEN {
            return Err(JournalError::RecordTooLarge {
                len: payload.len(),
                max: MAX_RECORD_LEN,
            });
        }

        let sequence = self.next_sequence;
        let mut entry = Vec::with_capacity(EntryHeader::SIZE + payload.len());
        EntryHeader::for_payload(sequence, &payload).write_to(&mut entry)?;
        entry.extend_from_slice(&payload);

        if let Err(e) = self.write_entry(&entry) {
            tracing::error!("Journal append of entry {} failed: {}", sequence, e);
            self.discard_partial_entry();
            return Err(e.into());
        }

        self.len += entry.len() as u64;
        self.next_sequence += 1;
        Ok(sequence)
    }

    fn write_entry(&mut self, entry: &[u8]) -> io::Result<()> {
        self.file.write_all(entry)?;
        self.file.flush()?;
        self.file.sync_data()
    }

    fn discard_partial_entry(&mut self) {
        if let Err(e) = self.truncate_to_len() {
            tracing::error!(
                "Could not cut journal {:?} back to {} bytes: {}. Refusing further appends.",
                self.path,
                self.len,
                e
            );
            self.failed = true;
        }
    }

    fn truncate_to_len(&mut self) -> io::Result<()> {
        self.file.set_len(self.len)?;
        self.file.seek(SeekFrom::Start(self.len))?;
        self.file.sync_data()
    }

    /// Number of entries in the journal.
    pub fn entry_count(&self) -> u64 {
        self.next_sequence
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<F: JournalFile + Send> RecordSink for JournalWriter<F> {
    fn persist(&mut self, record: &StateRecord) -> LedgerResult<()> {
        self.append(record)
            .map(|_| ())
            .map_err(|e| LedgerError::Persistence(e.to_string()))
    }
}
