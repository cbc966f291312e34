// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Core value types shared by every ledger component.

pub mod digest;
pub mod timestamp;

pub use digest::{Digest, DIGEST_LEN};
pub use timestamp::Timestamp;
