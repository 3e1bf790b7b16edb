//! Receipt / return / registration number generation
//!
//! Numbers are generated in-process at commit time, not by the store:
//! a millisecond timestamp plus an atomic per-process sequence, so
//! concurrent commits from the same process can never collide. The
//! format is opaque to callers; only uniqueness matters.

use shared::util::now_millis;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generates unique ledger numbers (`BILL-`, `RET-`, `REG-`).
#[derive(Debug, Default)]
pub struct NumberGenerator {
    seq: AtomicU64,
}

impl NumberGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bill receipt number.
    pub fn receipt_number(&self) -> String {
        self.next("BILL")
    }

    /// Sales-return number.
    pub fn return_number(&self) -> String {
        self.next("RET")
    }

    /// Registration receipt number.
    pub fn registration_number(&self) -> String {
        self.next("REG")
    }

    fn next(&self, prefix: &str) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) % 10_000;
        format!("{prefix}-{}-{seq:04}", now_millis())
    }
}
