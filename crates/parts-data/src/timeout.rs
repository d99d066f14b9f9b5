//! Timeout configuration for outbound requests.

use std::time::Duration;

/// Timeout configuration applied to an HTTP client.
///
/// A request that exceeds `total` fails with [`crate::DataError::Timeout`]
/// instead of hanging the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total operation timeout.
    pub total: Duration,
}

impl TimeoutConfig {
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self {
            connect: connect.min(total),
            total,
        }
    }

    /// Create from a single total timeout, spending at most a quarter of it
    /// on connecting.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }

    /// Build from the millisecond values used in config files.
    pub fn from_millis(connect_ms: u64, total_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(connect_ms),
            Duration::from_millis(total_ms),
        )
    }

    /// Apply to a reqwest client builder.
    pub fn apply(&self, builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
        builder.connect_timeout(self.connect).timeout(self.total)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(3),
            total: Duration::from_secs(10),
        }
    }
}
