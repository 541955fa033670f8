use crate::affordances::Affordances;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An uploaded (or uploading) screenshot asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screenshot {
    pub id: String,
    /// Parent screenshot set identifier, always present so agents can
    /// correlate responses.
    pub set_id: String,
    pub file_name: String,
    pub file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_state: Option<AssetDeliveryState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,
}

impl Screenshot {
    pub fn is_complete(&self) -> bool {
        self.asset_state == Some(AssetDeliveryState::Complete)
    }

    pub fn file_size_description(&self) -> String {
        let bytes = self.file_size as f64;
        if self.file_size < 1024 {
            format!("{} B", self.file_size)
        } else if self.file_size < 1_048_576 {
            format!("{:.1} KB", bytes / 1024.0)
        } else {
            format!("{:.1} MB", bytes / 1_048_576.0)
        }
    }

    pub fn dimensions_description(&self) -> Option<String> {
        match (self.image_width, self.image_height) {
            (Some(w), Some(h)) => Some(format!("{w} × {h}")),
            _ => None,
        }
    }
}

/// Server-tracked lifecycle of an uploaded asset.
///
/// Advances `AwaitingUpload → UploadComplete → Complete`; `Failed` is
/// terminal and reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetDeliveryState {
    AwaitingUpload,
    UploadComplete,
    Complete,
    Failed,
}

impl AssetDeliveryState {
    pub fn is_complete(&self) -> bool {
        matches!(self, AssetDeliveryState::Complete)
    }

    pub fn has_failed(&self) -> bool {
        matches!(self, AssetDeliveryState::Failed)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AssetDeliveryState::AwaitingUpload => "Awaiting Upload",
            AssetDeliveryState::UploadComplete => "Upload Complete",
            AssetDeliveryState::Complete => "Complete",
            AssetDeliveryState::Failed => "Failed",
        }
    }
}

/// A set of screenshots for one display type within a localization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotSet {
    pub id: String,
    /// Parent localization identifier, always present so agents can
    /// correlate responses.
    pub localization_id: String,
    pub display_type: DisplayType,
    pub screenshots_count: usize,
}

impl ScreenshotSet {
    pub fn is_empty(&self) -> bool {
        self.screenshots_count == 0
    }

    pub fn device_category(&self) -> DeviceCategory {
        self.display_type.device_category()
    }
}

impl Affordances for ScreenshotSet {
    fn affordances(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                "listScreenshots".to_string(),
                format!("ascent screenshots list --set-id {}", self.id),
            ),
            (
                "listScreenshotSets".to_string(),
                format!(
                    "ascent screenshot-sets list --localization-id {}",
                    self.localization_id
                ),
            ),
        ])
    }
}

/// Display types a screenshot set can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayType {
    // iPhone
    #[serde(rename = "APP_IPHONE_67")]
    Iphone67,
    #[serde(rename = "APP_IPHONE_65")]
    Iphone65,
    #[serde(rename = "APP_IPHONE_61")]
    Iphone61,
    #[serde(rename = "APP_IPHONE_58")]
    Iphone58,
    #[serde(rename = "APP_IPHONE_55")]
    Iphone55,
    #[serde(rename = "APP_IPHONE_47")]
    Iphone47,
    #[serde(rename = "APP_IPHONE_40")]
    Iphone40,
    #[serde(rename = "APP_IPHONE_35")]
    Iphone35,
    // iPad
    #[serde(rename = "APP_IPAD_PRO_3GEN_129")]
    IpadPro3gen129,
    #[serde(rename = "APP_IPAD_PRO_3GEN_11")]
    IpadPro3gen11,
    #[serde(rename = "APP_IPAD_PRO_129")]
    IpadPro129,
    #[serde(rename = "APP_IPAD_105")]
    Ipad105,
    #[serde(rename = "APP_IPAD_97")]
    Ipad97,
    // Other platforms
    #[serde(rename = "APP_DESKTOP")]
    Desktop,
    #[serde(rename = "APP_WATCH_ULTRA")]
    WatchUltra,
    #[serde(rename = "APP_WATCH_SERIES_10")]
    WatchSeries10,
    #[serde(rename = "APP_WATCH_SERIES_7")]
    WatchSeries7,
    #[serde(rename = "APP_WATCH_SERIES_4")]
    WatchSeries4,
    #[serde(rename = "APP_WATCH_SERIES_3")]
    WatchSeries3,
    #[serde(rename = "APP_APPLE_TV")]
    AppleTv,
    #[serde(rename = "APP_APPLE_VISION_PRO")]
    AppleVisionPro,
    // iMessage
    #[serde(rename = "IMESSAGE_APP_IPHONE_67")]
    ImessageIphone67,
    #[serde(rename = "IMESSAGE_APP_IPHONE_65")]
    ImessageIphone65,
    #[serde(rename = "IMESSAGE_APP_IPHONE_61")]
    ImessageIphone61,
    #[serde(rename = "IMESSAGE_APP_IPAD_PRO_3GEN_129")]
    ImessageIpadPro3gen129,
    #[serde(rename = "IMESSAGE_APP_IPAD_PRO_3GEN_11")]
    ImessageIpadPro3gen11,
}

/// Coarse device families used for grouping in list output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceCategory {
    Iphone,
    Ipad,
    Mac,
    Watch,
    AppleTv,
    AppleVisionPro,
    Imessage,
}

impl DeviceCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            DeviceCategory::Iphone => "iPhone",
            DeviceCategory::Ipad => "iPad",
            DeviceCategory::Mac => "Mac",
            DeviceCategory::Watch => "Apple Watch",
            DeviceCategory::AppleTv => "Apple TV",
            DeviceCategory::AppleVisionPro => "Apple Vision Pro",
            DeviceCategory::Imessage => "iMessage",
        }
    }
}

impl DisplayType {
    /// The wire string used by the remote service.
    pub fn wire_name(&self) -> &'static str {
        use DisplayType::*;
        match self {
            Iphone67 => "APP_IPHONE_67",
            Iphone65 => "APP_IPHONE_65",
            Iphone61 => "APP_IPHONE_61",
            Iphone58 => "APP_IPHONE_58",
            Iphone55 => "APP_IPHONE_55",
            Iphone47 => "APP_IPHONE_47",
            Iphone40 => "APP_IPHONE_40",
            Iphone35 => "APP_IPHONE_35",
            IpadPro3gen129 => "APP_IPAD_PRO_3GEN_129",
            IpadPro3gen11 => "APP_IPAD_PRO_3GEN_11",
            IpadPro129 => "APP_IPAD_PRO_129",
            Ipad105 => "APP_IPAD_105",
            Ipad97 => "APP_IPAD_97",
            Desktop => "APP_DESKTOP",
            WatchUltra => "APP_WATCH_ULTRA",
            WatchSeries10 => "APP_WATCH_SERIES_10",
            WatchSeries7 => "APP_WATCH_SERIES_7",
            WatchSeries4 => "APP_WATCH_SERIES_4",
            WatchSeries3 => "APP_WATCH_SERIES_3",
            AppleTv => "APP_APPLE_TV",
            AppleVisionPro => "APP_APPLE_VISION_PRO",
            ImessageIphone67 => "IMESSAGE_APP_IPHONE_67",
            ImessageIphone65 => "IMESSAGE_APP_IPHONE_65",
            ImessageIphone61 => "IMESSAGE_APP_IPHONE_61",
            ImessageIpadPro3gen129 => "IMESSAGE_APP_IPAD_PRO_3GEN_129",
            ImessageIpadPro3gen11 => "IMESSAGE_APP_IPAD_PRO_3GEN_11",
        }
    }

    /// Parse the wire string used by the remote service.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        use DisplayType::*;
        let display_type = match name {
            "APP_IPHONE_67" => Iphone67,
            "APP_IPHONE_65" => Iphone65,
            "APP_IPHONE_61" => Iphone61,
            "APP_IPHONE_58" => Iphone58,
            "APP_IPHONE_55" => Iphone55,
            "APP_IPHONE_47" => Iphone47,
            "APP_IPHONE_40" => Iphone40,
            "APP_IPHONE_35" => Iphone35,
            "APP_IPAD_PRO_3GEN_129" => IpadPro3gen129,
            "APP_IPAD_PRO_3GEN_11" => IpadPro3gen11,
            "APP_IPAD_PRO_129" => IpadPro129,
            "APP_IPAD_105" => Ipad105,
            "APP_IPAD_97" => Ipad97,
            "APP_DESKTOP" => Desktop,
            "APP_WATCH_ULTRA" => WatchUltra,
            "APP_WATCH_SERIES_10" => WatchSeries10,
            "APP_WATCH_SERIES_7" => WatchSeries7,
            "APP_WATCH_SERIES_4" => WatchSeries4,
            "APP_WATCH_SERIES_3" => WatchSeries3,
            "APP_APPLE_TV" => AppleTv,
            "APP_APPLE_VISION_PRO" => AppleVisionPro,
            "IMESSAGE_APP_IPHONE_67" => ImessageIphone67,
            "IMESSAGE_APP_IPHONE_65" => ImessageIphone65,
            "IMESSAGE_APP_IPHONE_61" => ImessageIphone61,
            "IMESSAGE_APP_IPAD_PRO_3GEN_129" => ImessageIpadPro3gen129,
            "IMESSAGE_APP_IPAD_PRO_3GEN_11" => ImessageIpadPro3gen11,
            _ => return None,
        };
        Some(display_type)
    }

    pub fn device_category(&self) -> DeviceCategory {
        let wire = self.wire_name();
        if wire.starts_with("IMESSAGE_") {
            DeviceCategory::Imessage
        } else if wire.contains("IPHONE") {
            DeviceCategory::Iphone
        } else if wire.contains("IPAD") {
            DeviceCategory::Ipad
        } else if wire.contains("WATCH") {
            DeviceCategory::Watch
        } else if wire == "APP_APPLE_TV" {
            DeviceCategory::AppleTv
        } else if wire == "APP_APPLE_VISION_PRO" {
            DeviceCategory::AppleVisionPro
        } else {
            DeviceCategory::Mac
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn screenshot(size: u64) -> Screenshot {
        Screenshot {
            id: "img-1".into(),
            set_id: "set-1".into(),
            file_name: "hero.png".into(),
            file_size: size,
            asset_state: None,
            image_width: None,
            image_height: None,
        }
    }

    #[test]
    fn file_size_description_scales_units() {
        assert_eq!(screenshot(512).file_size_description(), "512 B");
        assert_eq!(screenshot(2048).file_size_description(), "2.0 KB");
        assert_eq!(screenshot(2_097_152).file_size_description(), "2.0 MB");
    }

    #[test]
    fn dimensions_require_both_axes() {
        let mut shot = screenshot(1);
        assert_eq!(shot.dimensions_description(), None);
        shot.image_width = Some(1290);
        shot.image_height = Some(2796);
        assert_eq!(shot.dimensions_description().as_deref(), Some("1290 × 2796"));
    }

    #[test]
    fn device_categories() {
        assert_eq!(DisplayType::Iphone67.device_category(), DeviceCategory::Iphone);
        assert_eq!(DisplayType::Ipad97.device_category(), DeviceCategory::Ipad);
        assert_eq!(DisplayType::Desktop.device_category(), DeviceCategory::Mac);
        assert_eq!(
            DisplayType::ImessageIphone67.device_category(),
            DeviceCategory::Imessage
        );
        assert_eq!(
            DisplayType::AppleVisionPro.device_category(),
            DeviceCategory::AppleVisionPro
        );
    }

    #[test]
    fn wire_name_round_trip() {
        for display_type in [
            DisplayType::Iphone67,
            DisplayType::IpadPro3gen129,
            DisplayType::WatchUltra,
            DisplayType::ImessageIpadPro3gen11,
        ] {
            assert_eq!(
                DisplayType::from_wire_name(display_type.wire_name()),
                Some(display_type)
            );
        }
        assert_eq!(DisplayType::from_wire_name("APP_TOASTER"), None);
    }

    #[test]
    fn delivery_state_predicates() {
        assert!(AssetDeliveryState::Complete.is_complete());
        assert!(AssetDeliveryState::Failed.has_failed());
        assert!(!AssetDeliveryState::AwaitingUpload.is_complete());
    }
}
