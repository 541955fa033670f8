use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A binary build uploaded for an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub id: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    pub expired: bool,
    pub processing_state: ProcessingState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
}

impl Build {
    /// A build can be distributed only when it is unexpired and processed.
    pub fn is_usable(&self) -> bool {
        !self.expired && self.processing_state == ProcessingState::Valid
    }
}

/// Server-side processing state of an uploaded build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingState {
    Processing,
    Failed,
    Invalid,
    Valid,
}

impl ProcessingState {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProcessingState::Processing => "Processing",
            ProcessingState::Failed => "Failed",
            ProcessingState::Invalid => "Invalid",
            ProcessingState::Valid => "Valid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(expired: bool, state: ProcessingState) -> Build {
        Build {
            id: "b-1".into(),
            version: "42".into(),
            uploaded_date: None,
            expiration_date: None,
            expired,
            processing_state: state,
            build_number: None,
        }
    }

    #[test]
    fn valid_unexpired_build_is_usable() {
        assert!(build(false, ProcessingState::Valid).is_usable());
    }

    #[test]
    fn expired_or_unprocessed_build_is_not_usable() {
        assert!(!build(true, ProcessingState::Valid).is_usable());
        assert!(!build(false, ProcessingState::Processing).is_usable());
        assert!(!build(false, ProcessingState::Failed).is_usable());
    }
}
