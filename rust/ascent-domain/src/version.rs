use crate::affordances::Affordances;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A store version of an app, tracked through the review pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreVersion {
    pub id: String,
    /// Parent app identifier, always present so agents can correlate
    /// responses.
    pub app_id: String,
    pub version_string: String,
    pub platform: Platform,
    pub state: VersionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}

impl AppStoreVersion {
    pub fn is_live(&self) -> bool {
        self.state.is_live()
    }

    pub fn is_editable(&self) -> bool {
        self.state.is_editable()
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.platform, self.version_string)
    }
}

impl Affordances for AppStoreVersion {
    fn affordances(&self) -> BTreeMap<String, String> {
        let mut commands = BTreeMap::from([
            (
                "listLocalizations".to_string(),
                format!("ascent localizations list --version-id {}", self.id),
            ),
            (
                "listVersions".to_string(),
                format!("ascent versions list --app-id {}", self.app_id),
            ),
        ]);
        if self.is_editable() {
            commands.insert(
                "submitForReview".to_string(),
                format!("ascent versions submit --version-id {}", self.id),
            );
        }
        commands
    }
}

/// Platforms a version can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "IOS")]
    Ios,
    #[serde(rename = "MAC_OS")]
    MacOs,
    #[serde(rename = "TV_OS")]
    TvOs,
    #[serde(rename = "WATCH_OS")]
    WatchOs,
    #[serde(rename = "VISION_OS")]
    VisionOs,
}

impl Platform {
    /// Accepts lowercase CLI argument strings (e.g. "ios", "macos").
    pub fn from_cli_argument(argument: &str) -> Option<Self> {
        match argument.to_lowercase().as_str() {
            "ios" => Some(Platform::Ios),
            "macos" => Some(Platform::MacOs),
            "tvos" => Some(Platform::TvOs),
            "watchos" => Some(Platform::WatchOs),
            "visionos" => Some(Platform::VisionOs),
            _ => None,
        }
    }

    /// The wire string used by the remote service.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Platform::Ios => "IOS",
            Platform::MacOs => "MAC_OS",
            Platform::TvOs => "TV_OS",
            Platform::WatchOs => "WATCH_OS",
            Platform::VisionOs => "VISION_OS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Ios => "iOS",
            Platform::MacOs => "macOS",
            Platform::TvOs => "tvOS",
            Platform::WatchOs => "watchOS",
            Platform::VisionOs => "visionOS",
        };
        f.write_str(name)
    }
}

/// Review-pipeline states of an [`AppStoreVersion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionState {
    PrepareForSubmission,
    WaitingForReview,
    InReview,
    PendingDeveloperRelease,
    PendingAppleRelease,
    ProcessingForAppStore,
    ReadyForSale,
    DeveloperRejected,
    Rejected,
    MetadataRejected,
    RemovedFromSale,
    DeveloperRemovedFromSale,
    InvalidBinary,
    WaitingForExportCompliance,
    PendingContract,
}

impl VersionState {
    /// The version is live on the store.
    pub fn is_live(&self) -> bool {
        matches!(self, VersionState::ReadyForSale)
    }

    /// The version can be edited (metadata, screenshots, etc.).
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            VersionState::PrepareForSubmission
                | VersionState::DeveloperRejected
                | VersionState::Rejected
                | VersionState::MetadataRejected
        )
    }

    /// The version is in the review pipeline; an agent should wait, not act.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            VersionState::WaitingForReview
                | VersionState::InReview
                | VersionState::PendingDeveloperRelease
                | VersionState::PendingAppleRelease
                | VersionState::ProcessingForAppStore
                | VersionState::WaitingForExportCompliance
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VersionState::PrepareForSubmission => "Prepare for Submission",
            VersionState::WaitingForReview => "Waiting for Review",
            VersionState::InReview => "In Review",
            VersionState::PendingDeveloperRelease => "Pending Developer Release",
            VersionState::PendingAppleRelease => "Pending Apple Release",
            VersionState::ProcessingForAppStore => "Processing for App Store",
            VersionState::ReadyForSale => "Ready for Sale",
            VersionState::DeveloperRejected => "Developer Rejected",
            VersionState::Rejected => "Rejected",
            VersionState::MetadataRejected => "Metadata Rejected",
            VersionState::RemovedFromSale => "Removed from Sale",
            VersionState::DeveloperRemovedFromSale => "Developer Removed from Sale",
            VersionState::InvalidBinary => "Invalid Binary",
            VersionState::WaitingForExportCompliance => "Waiting for Export Compliance",
            VersionState::PendingContract => "Pending Contract",
        }
    }
}

/// A localization of a store version (e.g. `en-US`, `zh-Hans`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionLocalization {
    pub id: String,
    /// Parent version identifier, always present so agents can correlate
    /// responses.
    pub version_id: String,
    pub locale: String,
}
