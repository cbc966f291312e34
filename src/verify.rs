// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transition Verification
//!
//! Pure checks over records. Nothing here touches ledger state.
//!
//! # Rules
//! - State: every command non-blank, trailing command differs from the one
//!   before it
//! - Transition: timestamp strictly increases, stack strictly grows,
//!   hash-sequence rule holds
//! - Hash sequence: `rehash(prev) < curr`, big-endian
//!
//! The hash-sequence rule is an ordering policy carried over unchanged. It is
//! not a chaining construction and gives no security guarantee; roughly half
//! of all fresh candidates fail it.

use crate::error::Violation;
use crate::hash::rehash;
use crate::state::StateRecord;
use crate::types::Digest;

/// Structural check of a command stack.
pub fn check_stack(stack: &[String]) -> Result<(), Violation> {
    if let Some(index) = stack.iter().position(|c| c.trim().is_empty()) {
        return Err(Violation::EmptyCommand { index });
    }

    if let [.., before, last] = stack {
        if before == last {
            return Err(Violation::DuplicateCommand {
                index: stack.len() - 1,
            });
        }
    }

    Ok(())
}

pub fn check_state(candidate: &StateRecord) -> Result<(), Violation> {
    check_stack(candidate.command_stack())
}

pub fn check_hash_sequence(prev: &Digest, curr: &Digest) -> Result<(), Violation> {
    if rehash(prev) < *curr {
        Ok(())
    } else {
        Err(Violation::DigestOrder)
    }
}

/// Check `candidate` against `previous`. A missing predecessor (genesis)
/// always passes.
pub fn check_transition(
    candidate: &StateRecord,
    previous: Option<&StateRecord>,
) -> Result<(), Violation> {
    let Some(previous) = previous else {
        return Ok(());
    };

    if candidate.timestamp() <= previous.timestamp() {
        return Err(Violation::TimestampNotIncreasing {
            previous: previous.timestamp(),
            candidate: candidate.timestamp(),
        });
    }

    let (prev_len, cand_len) = (
        previous.command_stack().len(),
        candidate.command_stack().len(),
    );
    if cand_len <= prev_len {
        return Err(Violation::StackNotGrowing {
            previous: prev_len,
            candidate: cand_len,
        });
    }

    check_hash_sequence(&previous.digest(), &candidate.digest())
}

pub fn verify_state(candidate: &StateRecord) -> bool {
    check_state(candidate).is_ok()
}

pub fn verify_transition(candidate: &StateRecord, previous: Option<&StateRecord>) -> bool {
    check_transition(candidate, previous).is_ok()
}

pub fn verify_hash_sequence(prev: &Digest, curr: &Digest) -> bool {
    check_hash_sequence(prev, curr).is_ok()
}
