//! Request id generation
//!
//! Used when the caller does not supply a `request_id`. The default is a
//! random UUID v4; tests and log-correlation setups usually prefer
//! [`SequentialRequestIds`].

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use nlmarket_domain::RequestId;
use uuid::Uuid;

/// Source of fresh request ids.
pub trait RequestIdGenerator: Send + Sync {
    fn next_id(&self) -> RequestId;
}

/// Random UUID v4 ids (`"0b8f5d8e-..."`).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestIds;

impl RequestIdGenerator for UuidRequestIds {
    fn next_id(&self) -> RequestId {
        RequestId::Text(Uuid::new_v4().to_string())
    }
}

/// Monotonic ids: `1, 2, 3, ...` or `"{prefix}1", "{prefix}2", ...`.
pub struct SequentialRequestIds {
    prefix: Option<String>,
    next: AtomicI64,
}

impl SequentialRequestIds {
    /// Integer ids starting at 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: i64) -> Self {
        Self { prefix: None, next: AtomicI64::new(first) }
    }

    /// String ids `"{prefix}{n}"` starting at 1
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: Some(prefix.into()), next: AtomicI64::new(1) }
    }
}

impl Default for SequentialRequestIds {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SequentialRequestIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequentialRequestIds")
            .field("prefix", &self.prefix)
            .field("next", &self.next.load(Ordering::Relaxed))
            .finish()
    }
}

impl RequestIdGenerator for SequentialRequestIds {
    fn next_id(&self) -> RequestId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        match &self.prefix {
            Some(prefix) => RequestId::Text(format!("{prefix}{n}")),
            None => RequestId::Number(n),
        }
    }
}

impl<F> RequestIdGenerator for F
where
    F: Fn() -> RequestId + Send + Sync,
{
    fn next_id(&self) -> RequestId {
        self()
    }
}
