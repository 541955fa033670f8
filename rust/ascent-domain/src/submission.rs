use crate::affordances::Affordances;
use crate::version::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A review submission grouping one or more items for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub id: String,
    /// Parent app identifier, always present so agents can correlate
    /// responses.
    pub app_id: String,
    pub platform: Platform,
    pub state: SubmissionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_date: Option<DateTime<Utc>>,
}

impl ReviewSubmission {
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn has_issues(&self) -> bool {
        self.state.has_issues()
    }
}

impl Affordances for ReviewSubmission {
    fn affordances(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(
            "listVersions".to_string(),
            format!("ascent versions list --app-id {}", self.app_id),
        )])
    }
}

/// Lifecycle states of a [`ReviewSubmission`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionState {
    ReadyForReview,
    WaitingForReview,
    InReview,
    UnresolvedIssues,
    Canceling,
    Completing,
    Complete,
}

impl SubmissionState {
    /// The review process is finished.
    pub fn is_complete(&self) -> bool {
        matches!(self, SubmissionState::Complete)
    }

    /// The submission is in the review pipeline; an agent should wait, not
    /// act.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            SubmissionState::WaitingForReview
                | SubmissionState::InReview
                | SubmissionState::Canceling
                | SubmissionState::Completing
        )
    }

    /// The submission has unresolved issues that require developer action.
    pub fn has_issues(&self) -> bool {
        matches!(self, SubmissionState::UnresolvedIssues)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubmissionState::ReadyForReview => "Ready for Review",
            SubmissionState::WaitingForReview => "Waiting for Review",
            SubmissionState::InReview => "In Review",
            SubmissionState::UnresolvedIssues => "Unresolved Issues",
            SubmissionState::Canceling => "Canceling",
            SubmissionState::Completing => "Completing",
            SubmissionState::Complete => "Complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_is_terminal_predicate() {
        assert!(SubmissionState::Complete.is_complete());
        assert!(!SubmissionState::InReview.is_complete());
    }

    #[test]
    fn pending_states() {
        assert!(SubmissionState::WaitingForReview.is_pending());
        assert!(SubmissionState::Completing.is_pending());
        assert!(!SubmissionState::ReadyForReview.is_pending());
        assert!(!SubmissionState::UnresolvedIssues.is_pending());
    }

    #[test]
    fn unresolved_issues_require_action() {
        assert!(SubmissionState::UnresolvedIssues.has_issues());
        assert!(!SubmissionState::Complete.has_issues());
    }
}
