use crate::client::{ApiClient, ApiRequest};
use crate::dto::{
    CollectionDocument, Document, LocalizationAttributes, Resource, ScreenshotAttributes,
    ScreenshotSetAttributes, parse_wire_enum,
};
use crate::error::ApiError;
use crate::transport::{HttpTransport, StorageTransport};
use crate::upload::{UploadCoordinator, UploadError};
use ascent_domain::{DisplayType, Screenshot, ScreenshotSet, VersionLocalization};
use async_trait::async_trait;
use serde_json::json;
use std::path::Path;

/// Version localizations, screenshot sets, and screenshot assets.
#[async_trait]
pub trait ScreenshotRepository: Send + Sync {
    async fn list_localizations(
        &self,
        version_id: &str,
    ) -> Result<Vec<VersionLocalization>, ApiError>;
    async fn create_localization(
        &self,
        version_id: &str,
        locale: &str,
    ) -> Result<VersionLocalization, ApiError>;
    async fn list_screenshot_sets(
        &self,
        localization_id: &str,
    ) -> Result<Vec<ScreenshotSet>, ApiError>;
    async fn create_screenshot_set(
        &self,
        localization_id: &str,
        display_type: DisplayType,
    ) -> Result<ScreenshotSet, ApiError>;
    async fn list_screenshots(&self, set_id: &str) -> Result<Vec<Screenshot>, ApiError>;
    async fn upload_screenshot(&self, set_id: &str, path: &Path)
    -> Result<Screenshot, UploadError>;
}

/// REST-backed [`ScreenshotRepository`].
///
/// Listing and creation go through the authenticated API channel; uploads
/// additionally use a direct storage transport for the byte transfers.
pub struct RestScreenshotRepository<C, T = HttpTransport> {
    client: C,
    transport: T,
}

impl<C: ApiClient> RestScreenshotRepository<C> {
    pub fn new(client: C) -> Self {
        RestScreenshotRepository {
            client,
            transport: HttpTransport::new(),
        }
    }
}

impl<C: ApiClient, T: StorageTransport> RestScreenshotRepository<C, T> {
    pub fn with_transport(client: C, transport: T) -> Self {
        RestScreenshotRepository { client, transport }
    }
}

#[async_trait]
impl<C: ApiClient, T: StorageTransport> ScreenshotRepository for RestScreenshotRepository<C, T> {
    async fn list_localizations(
        &self,
        version_id: &str,
    ) -> Result<Vec<VersionLocalization>, ApiError> {
        let value = self
            .client
            .send(ApiRequest::get(format!(
                "/v1/appStoreVersions/{version_id}/appStoreVersionLocalizations"
            )))
            .await?;
        let document: CollectionDocument<LocalizationAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        Ok(document
            .data
            .iter()
            .map(|resource| map_localization(resource, version_id))
            .collect())
    }

    async fn create_localization(
        &self,
        version_id: &str,
        locale: &str,
    ) -> Result<VersionLocalization, ApiError> {
        let body = json!({
            "data": {
                "type": "appStoreVersionLocalizations",
                "attributes": {"locale": locale},
                "relationships": {
                    "appStoreVersion": {
                        "data": {"type": "appStoreVersions", "id": version_id}
                    }
                }
            }
        });
        let value = self
            .client
            .send(ApiRequest::post("/v1/appStoreVersionLocalizations", body))
            .await?;
        let document: Document<LocalizationAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        Ok(map_localization(&document.data, version_id))
    }

    async fn list_screenshot_sets(
        &self,
        localization_id: &str,
    ) -> Result<Vec<ScreenshotSet>, ApiError> {
        let value = self
            .client
            .send(ApiRequest::get(format!(
                "/v1/appStoreVersionLocalizations/{localization_id}/appScreenshotSets"
            )))
            .await?;
        let document: CollectionDocument<ScreenshotSetAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        // Sets with an unrecognized display type are dropped rather than
        // guessed at.
        Ok(document
            .data
            .iter()
            .filter_map(|resource| map_screenshot_set(resource, localization_id))
            .collect())
    }

    async fn create_screenshot_set(
        &self,
        localization_id: &str,
        display_type: DisplayType,
    ) -> Result<ScreenshotSet, ApiError> {
        let body = json!({
            "data": {
                "type": "appScreenshotSets",
                "attributes": {"screenshotDisplayType": display_type.wire_name()},
                "relationships": {
                    "appStoreVersionLocalization": {
                        "data": {
                            "type": "appStoreVersionLocalizations",
                            "id": localization_id
                        }
                    }
                }
            }
        });
        let value = self
            .client
            .send(ApiRequest::post("/v1/appScreenshotSets", body))
            .await?;
        let document: Document<ScreenshotSetAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        map_screenshot_set(&document.data, localization_id)
            .ok_or_else(|| ApiError::Decoding("created set has no display type".into()))
    }

    async fn list_screenshots(&self, set_id: &str) -> Result<Vec<Screenshot>, ApiError> {
        let value = self
            .client
            .send(ApiRequest::get(format!(
                "/v1/appScreenshotSets/{set_id}/appScreenshots"
            )))
            .await?;
        let document: CollectionDocument<ScreenshotAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        Ok(document
            .data
            .iter()
            .map(|resource| map_screenshot(resource, set_id))
            .collect())
    }

    async fn upload_screenshot(
        &self,
        set_id: &str,
        path: &Path,
    ) -> Result<Screenshot, UploadError> {
        UploadCoordinator::new(&self.client, &self.transport)
            .upload(set_id, path)
            .await
    }
}

fn map_localization(
    resource: &Resource<LocalizationAttributes>,
    version_id: &str,
) -> VersionLocalization {
    VersionLocalization {
        id: resource.id.clone(),
        version_id: version_id.to_string(),
        locale: resource
            .attributes
            .as_ref()
            .and_then(|a| a.locale.clone())
            .unwrap_or_default(),
    }
}

fn map_screenshot_set(
    resource: &Resource<ScreenshotSetAttributes>,
    localization_id: &str,
) -> Option<ScreenshotSet> {
    let display_type = resource
        .attributes
        .as_ref()
        .and_then(|a| a.screenshot_display_type.as_deref())
        .and_then(DisplayType::from_wire_name)?;
    Some(ScreenshotSet {
        id: resource.id.clone(),
        localization_id: localization_id.to_string(),
        display_type,
        screenshots_count: resource.related_count("appScreenshots"),
    })
}

pub(crate) fn map_screenshot(resource: &Resource<ScreenshotAttributes>, set_id: &str) -> Screenshot {
    let attributes = resource.attributes.as_ref();
    Screenshot {
        id: resource.id.clone(),
        set_id: set_id.to_string(),
        file_name: attributes
            .and_then(|a| a.file_name.clone())
            .unwrap_or_default(),
        file_size: attributes.and_then(|a| a.file_size).unwrap_or(0),
        asset_state: attributes
            .and_then(|a| a.asset_delivery_state.as_ref())
            .and_then(|s| s.state.as_deref())
            .and_then(parse_wire_enum),
        image_width: attributes
            .and_then(|a| a.image_asset.as_ref())
            .and_then(|asset| asset.width),
        image_height: attributes
            .and_then(|a| a.image_asset.as_ref())
            .and_then(|asset| asset.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubClient, StubTransport};
    use ascent_domain::AssetDeliveryState;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    fn repository(client: StubClient) -> RestScreenshotRepository<StubClient, StubTransport> {
        RestScreenshotRepository::with_transport(client, StubTransport::new())
    }

    #[tokio::test]
    async fn list_localizations_injects_version_id() -> TestResult {
        let client = StubClient::new();
        client.will_return(json!({
            "data": [
                {"type": "appStoreVersionLocalizations", "id": "loc-1",
                 "attributes": {"locale": "en-US"}},
                {"type": "appStoreVersionLocalizations", "id": "loc-2",
                 "attributes": {"locale": "ja"}},
            ]
        }));
        let repository = repository(client);

        let localizations = repository.list_localizations("v-3").await?;
        assert_eq!(localizations.len(), 2);
        assert_eq!(localizations[0].version_id, "v-3");
        assert_eq!(localizations[1].locale, "ja");

        let requests = repository.client.requests();
        assert_eq!(
            requests[0].path,
            "/v1/appStoreVersions/v-3/appStoreVersionLocalizations"
        );
        Ok(())
    }

    #[tokio::test]
    async fn create_localization_posts_version_relationship() -> TestResult {
        let client = StubClient::new();
        client.will_return(json!({
            "data": {"type": "appStoreVersionLocalizations", "id": "loc-new",
                     "attributes": {"locale": "de-DE"}}
        }));
        let repository = repository(client);

        let localization = repository.create_localization("v-3", "de-DE").await?;
        assert_eq!(localization.id, "loc-new");
        assert_eq!(localization.locale, "de-DE");

        let requests = repository.client.requests();
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(body["data"]["attributes"]["locale"], "de-DE");
        assert_eq!(
            body["data"]["relationships"]["appStoreVersion"]["data"]["id"],
            "v-3"
        );
        Ok(())
    }

    #[tokio::test]
    async fn list_sets_counts_screenshots_and_drops_unknown_types() -> TestResult {
        let client = StubClient::new();
        client.will_return(json!({
            "data": [
                {"type": "appScreenshotSets", "id": "set-1",
                 "attributes": {"screenshotDisplayType": "APP_IPHONE_67"},
                 "relationships": {"appScreenshots": {"data": [
                     {"type": "appScreenshots", "id": "a"},
                     {"type": "appScreenshots", "id": "b"},
                 ]}}},
                {"type": "appScreenshotSets", "id": "set-2",
                 "attributes": {"screenshotDisplayType": "APP_TOASTER"}},
            ]
        }));
        let repository = repository(client);

        let sets = repository.list_screenshot_sets("loc-1").await?;
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].localization_id, "loc-1");
        assert_eq!(sets[0].display_type, DisplayType::Iphone67);
        assert_eq!(sets[0].screenshots_count, 2);
        Ok(())
    }

    #[tokio::test]
    async fn create_set_posts_display_type_wire_name() -> TestResult {
        let client = StubClient::new();
        client.will_return(json!({
            "data": {"type": "appScreenshotSets", "id": "set-new",
                     "attributes": {"screenshotDisplayType": "APP_IPAD_PRO_3GEN_129"}}
        }));
        let repository = repository(client);

        let set = repository
            .create_screenshot_set("loc-1", DisplayType::IpadPro3gen129)
            .await?;
        assert_eq!(set.id, "set-new");
        assert!(set.is_empty());

        let requests = repository.client.requests();
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(
            body["data"]["attributes"]["screenshotDisplayType"],
            "APP_IPAD_PRO_3GEN_129"
        );
        Ok(())
    }

    #[tokio::test]
    async fn list_screenshots_maps_delivery_state_and_dimensions() -> TestResult {
        let client = StubClient::new();
        client.will_return(json!({
            "data": [
                {"type": "appScreenshots", "id": "img-1",
                 "attributes": {
                     "fileName": "hero.png", "fileSize": 120000,
                     "assetDeliveryState": {"state": "COMPLETE"},
                     "imageAsset": {"width": 1290, "height": 2796},
                 }},
            ]
        }));
        let repository = repository(client);

        let screenshots = repository.list_screenshots("set-1").await?;
        assert_eq!(screenshots.len(), 1);
        assert_eq!(screenshots[0].set_id, "set-1");
        assert_eq!(screenshots[0].asset_state, Some(AssetDeliveryState::Complete));
        assert_eq!(
            screenshots[0].dimensions_description().as_deref(),
            Some("1290 × 2796")
        );
        Ok(())
    }
}
