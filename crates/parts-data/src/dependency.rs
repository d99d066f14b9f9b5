//! Dependency tagging for outbound calls.

use std::time::Duration;

use crate::timeout::TimeoutConfig;

/// The remote services this crate talks to.
///
/// Each tag carries a default timeout and a name used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    /// Row reads and writes on the hosted database.
    Rows,
    /// File uploads to hosted storage.
    Storage,
    /// Public administrative-division API.
    Regions,
}

impl DependencyTag {
    /// Get the default timeout for this dependency type.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Rows => Duration::from_secs(10),
            Self::Storage => Duration::from_secs(60),
            Self::Regions => Duration::from_secs(8),
        }
    }

    /// Timeouts derived from [`DependencyTag::default_timeout`].
    pub fn default_timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::from_total(self.default_timeout())
    }

    /// Whether a failure blocks the user's action rather than degrading a view.
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Rows | Self::Storage)
    }

    /// Get the name of this dependency.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rows => "rows",
            Self::Storage => "storage",
            Self::Regions => "regions",
        }
    }
}

impl std::fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
