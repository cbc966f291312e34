// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Command Journal - Pending Stack Management
//!
//! Maintains the distinction between:
//! - **committed** = the head record's command stack
//! - **buffer** = a command whose transition is still being verified
//!
//! # Flow
//! 1. append_buffered() - tentative command
//! 2. verification runs over tentative_stack()
//! 3. commit_buffer() - promote to committed
//! 4. rollback_buffer() - discard on failure

#[derive(Clone, Debug, Default)]
pub struct CommandJournal {
    committed: Vec<String>,
    buffer: Vec<String>,
}

impl CommandJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal whose committed stack is taken from a restored head.
    pub fn from_committed(commands: Vec<String>) -> Self {
        Self {
            committed: commands,
            buffer: Vec::new(),
        }
    }

    pub fn append_buffered(&mut self, command: String) {
        self.buffer.push(command);
    }

    /// Committed stack followed by any buffered commands.
    pub fn tentative_stack(&self) -> Vec<String> {
        let mut stack = Vec::with_capacity(self.committed.len() + self.buffer.len());
        stack.extend(self.committed.iter().cloned());
        stack.extend(self.buffer.iter().cloned());
        stack
    }

    pub fn commit_buffer(&mut self) {
        self.committed.append(&mut self.buffer);
    }

    pub fn rollback_buffer(&mut self) {
        self.buffer.clear();
    }

    pub fn committed(&self) -> &[String] {
        &self.committed
    }

    pub fn buffered(&self) -> &[String] {
        &self.buffer
    }

    pub fn has_pending_buffer(&self) -> bool {
        !self.buffer.is_empty()
    }
}
