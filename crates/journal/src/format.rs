// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! On-disk layout.
//!
//! # File Format
//! ```text
//! [Header: 16 bytes][Entry][Entry][Entry]...
//! ```
//!
//! Header:
//! - magic: [u8; 4] = "SLDG"
//! - version: u32 (1)
//! - reserved: u64 (0)
//!
//! Entry:
//! - sequence: u64 (0 = genesis)
//! - payload_len: u32 (at most `MAX_RECORD_LEN`)
//! - header_checksum: u64 (CRC-64 over sequence, payload_len)
//! - checksum: u64 (CRC-64 over sequence, payload_len, payload)
//! - payload: bincode-encoded StateRecord
//!
//! The header checksum lets a reader trust `payload_len` before the payload
//! is complete. Only then can an entry that runs past EOF be told apart
//! from a corrupted length field.

use crate::error::{JournalError, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crc64fast::Digest;
use state_ledger::StateRecord;
use std::io::{Read, Write};

pub const MAGIC: [u8; 4] = *b"SLDG";
pub const FORMAT_VERSION: u32 = 1;

/// Largest encoded record a journal entry may hold.
pub const MAX_RECORD_LEN: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub reserved: u64,
}

impl JournalHeader {
    pub const SIZE: usize = 4 + 4 + 8;

    pub fn new() -> Self {
        Self {
            magic: MAGIC,
            version: FORMAT_VERSION,
            reserved: 0,
        }
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.magic)?;
        writer.write_u32::<LittleEndian>(self.version)?;
        writer.write_u64::<LittleEndian>(self.reserved)?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        let version = reader.read_u32::<LittleEndian>()?;
        let reserved = reader.read_u64::<LittleEndian>()?;

        let header = Self {
            magic,
            version,
            reserved,
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> Result<()> {
        if self.magic != MAGIC || self.version != FORMAT_VERSION {
            return Err(JournalError::InvalidHeader);
        }
        Ok(())
    }
}

impl Default for JournalHeader {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHeader {
    pub sequence: u64,
    pub payload_len: u32,
    pub header_checksum: u64,
    pub checksum: u64,
}

impl EntryHeader {
    pub const SIZE: usize = 8 + 4 + 8 + 8; // 28 bytes

    /// Header for `payload`. The caller bounds the length by `MAX_RECORD_LEN`.
    pub fn for_payload(sequence: u64, payload: &[u8]) -> Self {
        let payload_len = payload.len() as u32;
        Self {
            sequence,
            payload_len,
            header_checksum: header_checksum(sequence, payload_len),
            checksum: checksum(sequence, payload_len, payload),
        }
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_u64::<LittleEndian>(self.sequence)?;
        writer.write_u32::<LittleEndian>(self.payload_len)?;
        writer.write_u64::<LittleEndian>(self.header_checksum)?;
        writer.write_u64::<LittleEndian>(self.checksum)?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        Ok(Self {
            sequence: reader.read_u64::<LittleEndian>()?,
            payload_len: reader.read_u32::<LittleEndian>()?,
            header_checksum: reader.read_u64::<LittleEndian>()?,
            checksum: reader.read_u64::<LittleEndian>()?,
        })
    }

    /// Sequence and length are as written and the length is in bounds.
    pub fn is_intact(&self) -> bool {
        self.header_checksum == header_checksum(self.sequence, self.payload_len)
            && self.payload_len as usize <= MAX_RECORD_LEN
    }

    /// Fail if `payload` does not match the stored checksum.
    pub fn verify(&self, payload: &[u8]) -> Result<()> {
        let found = checksum(self.sequence, self.payload_len, payload);
        if found != self.checksum {
            return Err(JournalError::ChecksumMismatch {
                expected: self.checksum,
                found,
            });
        }
        Ok(())
    }
}

pub fn header_checksum(sequence: u64, payload_len: u32) -> u64 {
    let mut digest = Digest::new();
    digest.write(&sequence.to_le_bytes());
    digest.write(&payload_len.to_le_bytes());
    digest.sum64()
}

pub fn checksum(sequence: u64, payload_len: u32, payload: &[u8]) -> u64 {
    let mut digest = Digest::new();
    digest.write(&sequence.to_le_bytes());
    digest.write(&payload_len.to_le_bytes());
    digest.write(payload);
    digest.sum64()
}

pub fn encode_record(record: &StateRecord) -> Result<Vec<u8>> {
    bincode::serde::encode_to_vec(record, bincode::config::standard())
        .map_err(|e| JournalError::Serialization(e.to_string()))
}

pub fn decode_record(payload: &[u8]) -> Result<StateRecord> {
    let (record, _) = bincode::serde::decode_from_slice(payload, bincode::config::standard())
        .map_err(|e| JournalError::Serialization(e.to_string()))?;
    Ok(record)
}
