//! Clock and id ports
//!
//! Timestamps are stored as display strings in local wall-clock time.

use chrono::{Local, NaiveDateTime};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

const CREATED_AT_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";
const MESSAGE_TIME_FORMAT: &str = "%I:%M %p";

pub trait Clock: Send + Sync {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

pub trait IdGenerator: Send + Sync {
    /// A session id that no earlier call returned
    fn next_id(&self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic ids: `{prefix}-1`, `{prefix}-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("session")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

pub fn format_created_at(at: NaiveDateTime) -> String {
    at.format(CREATED_AT_FORMAT).to_string()
}

pub fn format_message_time(at: NaiveDateTime) -> String {
    at.format(MESSAGE_TIME_FORMAT).to_string()
}
