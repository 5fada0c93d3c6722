//! Closed status enumerations.
//!
//! The backend sends statuses as free strings. Each domain gets a closed
//! enum whose `Unrecognized` variant keeps the raw value, so an unexpected
//! string stays visible instead of silently collapsing into a default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedbackStatus {
    Pending,
    Processing,
    Resolved,
    Rejected,
    Unrecognized(String),
}

impl FeedbackStatus {
    /// Every recognized status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Resolved,
        Self::Rejected,
    ];

    /// Parse a backend value, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "resolved" => Self::Resolved,
            "rejected" => Self::Rejected,
            _ => Self::Unrecognized(value.to_string()),
        }
    }

    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Resolved and Rejected end the primary flow.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }

    /// Whether the value is one of the known statuses.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

/// Flood report status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FloodReportStatus {
    Pending,
    Approved,
    Rejected,
    Unrecognized(String),
}

impl FloodReportStatus {
    /// Every recognized status.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Parse a backend value, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Unrecognized(value.to_string()),
        }
    }

    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Approved and Rejected end the primary flow.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Whether the value is one of the known statuses.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

/// Flood severity assigned on approval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WaterLevel {
    Low,
    Medium,
    High,
    Dangerous,
    /// Not assessed yet.
    Unknown,
    Unrecognized(String),
}

impl WaterLevel {
    /// Levels an operator may assign.
    pub const ASSESSABLE: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Dangerous];

    /// Parse a backend value, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "dangerous" => Self::Dangerous,
            "unknown" | "" => Self::Unknown,
            _ => Self::Unrecognized(value.to_string()),
        }
    }

    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Dangerous => "Dangerous",
            Self::Unknown => "Unknown",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Whether this level may be sent with an approval.
    #[must_use]
    pub const fn is_assessable(&self) -> bool {
        matches!(self, Self::Low | Self::Medium | Self::High | Self::Dangerous)
    }

    /// Whether the value is one of the known levels.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Depth range shown next to the level in the selector.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Low => "Dưới 20cm",
            Self::Medium => "20-40cm",
            Self::High => "Trên 40cm",
            Self::Dangerous => "Trên 60cm",
            Self::Unknown | Self::Unrecognized(_) => "",
        }
    }
}

/// Confidence reported by the image analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AiConfidence {
    Low,
    Medium,
    High,
    Unrecognized(String),
}

impl AiConfidence {
    /// Parse a backend value, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Unrecognized(value.to_string()),
        }
    }

    /// Wire representation (lowercase).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Whether the value is one of the known levels.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for FeedbackStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FeedbackStatus> for String {
    fn from(value: FeedbackStatus) -> Self {
        value.as_str().to_string()
    }
}

impl From<String> for FloodReportStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FloodReportStatus> for String {
    fn from(value: FloodReportStatus) -> Self {
        value.as_str().to_string()
    }
}

impl From<String> for WaterLevel {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<WaterLevel> for String {
    fn from(value: WaterLevel) -> Self {
        value.as_str().to_string()
    }
}

impl From<String> for AiConfidence {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<AiConfidence> for String {
    fn from(value: AiConfidence) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FloodReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WaterLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AiConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
