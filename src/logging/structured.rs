//! Structured logging utilities.
//!
//! Provides context-aware logging with request_id and index included
//! in every log message.

use std::fmt;

use uuid::Uuid;

/// Logging context for a single dashboard API request.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub request_id: String,
    pub index: Option<String>,
}

impl LogContext {
    pub fn new(request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            index: None,
        }
    }

    /// Create a context with a freshly generated request id.
    pub fn for_request() -> Self {
        let request_id = format!("req-{}", &Uuid::new_v4().to_string()[..8]);
        Self::new(&request_id)
    }

    pub fn with_index(&self, index: &str) -> Self {
        Self {
            request_id: self.request_id.clone(),
            index: Some(index.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.index {
            Some(index) => write!(f, "[request={}] [index={}]", self.request_id, index),
            None => write!(f, "[request={}]", self.request_id),
        }
    }
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::warn!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event,
            $($value),*
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::debug!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event,
            $($value),*
        );
    };
}
