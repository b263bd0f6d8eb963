//! Normalized project model produced by adapters and consumed by callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the most recent finished build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildOutcome {
    /// The last build finished successfully
    Passed,
    /// The last build finished with a failure
    Failed,
    /// The vendor reported no usable outcome
    Unknown,
}

impl std::fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Whether a build is currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildActivity {
    /// A build is running right now
    Building,
    /// No build in flight
    Done,
}

impl std::fmt::Display for BuildActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Building => "building",
            Self::Done => "done",
        };
        f.write_str(s)
    }
}

/// A normalized CI project
///
/// Every instance is self-consistent: `current_status` is derived
/// deterministically from `last_build_status` plus whatever in-flight signal
/// the vendor exposes. Adapters never return a partially populated record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project name
    pub name: String,
    /// Web URL to the project's builds
    pub build_url: String,
    /// Vendor-native identifier of the last build; empty when the vendor
    /// reports no build yet
    pub last_build_id: String,
    /// When the last build finished, if the vendor reports it
    pub last_build_time: Option<DateTime<Utc>>,
    /// Outcome of the last finished build
    pub last_build_status: BuildOutcome,
    /// Whether a build is in flight
    pub current_status: BuildActivity,
}
