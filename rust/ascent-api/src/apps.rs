use crate::client::{ApiClient, ApiRequest};
use crate::dto::{
    AppAttributes, CollectionDocument, Document, Resource, VersionAttributes, parse_wire_enum,
};
use crate::error::ApiError;
use ascent_domain::{App, AppStoreVersion, Page, Platform, VersionState};
use async_trait::async_trait;
use serde_json::json;

/// App metadata and store versions.
#[async_trait]
pub trait AppRepository: Send + Sync {
    async fn list_apps(&self, limit: Option<u32>) -> Result<Page<App>, ApiError>;
    async fn get_app(&self, id: &str) -> Result<App, ApiError>;
    async fn list_versions(&self, app_id: &str) -> Result<Vec<AppStoreVersion>, ApiError>;
    async fn create_version(
        &self,
        app_id: &str,
        version_string: &str,
        platform: Platform,
    ) -> Result<AppStoreVersion, ApiError>;
}

/// REST-backed [`AppRepository`].
pub struct RestAppRepository<C> {
    client: C,
}

impl<C: ApiClient> RestAppRepository<C> {
    pub fn new(client: C) -> Self {
        RestAppRepository { client }
    }
}

#[async_trait]
impl<C: ApiClient> AppRepository for RestAppRepository<C> {
    async fn list_apps(&self, limit: Option<u32>) -> Result<Page<App>, ApiError> {
        let mut request = ApiRequest::get("/v1/apps");
        if let Some(limit) = limit {
            request = request.query("limit", limit.to_string());
        }
        let value = self.client.send(request).await?;
        let document: CollectionDocument<AppAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        let apps = document.data.iter().map(map_app).collect();
        Ok(Page::with_cursor(apps, document.links.next))
    }

    async fn get_app(&self, id: &str) -> Result<App, ApiError> {
        let value = self.client.send(ApiRequest::get(format!("/v1/apps/{id}"))).await?;
        let document: Document<AppAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        Ok(map_app(&document.data))
    }

    async fn list_versions(&self, app_id: &str) -> Result<Vec<AppStoreVersion>, ApiError> {
        let value = self
            .client
            .send(ApiRequest::get(format!("/v1/apps/{app_id}/appStoreVersions")))
            .await?;
        let document: CollectionDocument<VersionAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        Ok(document
            .data
            .iter()
            .filter_map(|resource| map_version(resource, app_id))
            .collect())
    }

    async fn create_version(
        &self,
        app_id: &str,
        version_string: &str,
        platform: Platform,
    ) -> Result<AppStoreVersion, ApiError> {
        let body = json!({
            "data": {
                "type": "appStoreVersions",
                "attributes": {
                    "platform": platform.wire_name(),
                    "versionString": version_string,
                },
                "relationships": {
                    "app": {"data": {"type": "apps", "id": app_id}}
                }
            }
        });
        let value = self
            .client
            .send(ApiRequest::post("/v1/appStoreVersions", body))
            .await?;
        let document: Document<VersionAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        map_version(&document.data, app_id)
            .ok_or_else(|| ApiError::Decoding("created version has no platform".into()))
    }
}

fn map_app(resource: &Resource<AppAttributes>) -> App {
    let attributes = resource.attributes.clone().unwrap_or(AppAttributes {
        name: None,
        bundle_id: None,
        sku: None,
        primary_locale: None,
    });
    App {
        id: resource.id.clone(),
        name: attributes.name.unwrap_or_default(),
        bundle_id: attributes.bundle_id.unwrap_or_default(),
        sku: attributes.sku,
        primary_locale: attributes.primary_locale,
    }
}

/// `None` when the platform is missing or unrecognized; such versions are
/// dropped from listings rather than guessed at.
pub(crate) fn map_version(
    resource: &Resource<VersionAttributes>,
    app_id: &str,
) -> Option<AppStoreVersion> {
    let attributes = resource.attributes.as_ref()?;
    let platform: Platform = parse_wire_enum(attributes.platform.as_deref()?)?;
    let state = attributes
        .app_store_state
        .as_deref()
        .and_then(parse_wire_enum)
        .unwrap_or(VersionState::PrepareForSubmission);
    Some(AppStoreVersion {
        id: resource.id.clone(),
        app_id: app_id.to_string(),
        version_string: attributes.version_string.clone().unwrap_or_default(),
        platform,
        state,
        created_date: attributes.created_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubClient;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    #[tokio::test]
    async fn list_apps_maps_attributes_and_cursor() -> TestResult {
        let client = StubClient::new();
        client.will_return(json!({
            "data": [
                {"type": "apps", "id": "app-1",
                 "attributes": {"name": "Demo", "bundleId": "com.example.demo", "sku": "SKU1"}},
                {"type": "apps", "id": "app-2",
                 "attributes": {"name": "", "bundleId": "com.example.other"}},
            ],
            "links": {"next": "https://api/next?cursor=abc"}
        }));
        let repository = RestAppRepository::new(client);

        let page = repository.list_apps(Some(2)).await?;
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].name, "Demo");
        assert_eq!(page.data[0].sku.as_deref(), Some("SKU1"));
        assert_eq!(page.data[1].display_name(), "com.example.other");
        assert!(page.has_more());

        let requests = repository.client.requests();
        assert_eq!(requests[0].path, "/v1/apps");
        assert_eq!(requests[0].query, vec![("limit".to_string(), "2".to_string())]);
        Ok(())
    }

    #[tokio::test]
    async fn list_versions_injects_app_id_and_drops_unknown_platforms() -> TestResult {
        let client = StubClient::new();
        client.will_return(json!({
            "data": [
                {"type": "appStoreVersions", "id": "v-1",
                 "attributes": {"versionString": "1.0", "platform": "IOS",
                                 "appStoreState": "READY_FOR_SALE"}},
                {"type": "appStoreVersions", "id": "v-2",
                 "attributes": {"versionString": "1.1", "platform": "PLAYDATE"}},
            ]
        }));
        let repository = RestAppRepository::new(client);

        let versions = repository.list_versions("app-9").await?;
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].app_id, "app-9");
        assert_eq!(versions[0].state, VersionState::ReadyForSale);
        Ok(())
    }

    #[tokio::test]
    async fn create_version_posts_relationship_to_app() -> TestResult {
        let client = StubClient::new();
        client.will_return(json!({
            "data": {"type": "appStoreVersions", "id": "v-new",
                     "attributes": {"versionString": "2.0", "platform": "IOS",
                                     "appStoreState": "PREPARE_FOR_SUBMISSION"}}
        }));
        let repository = RestAppRepository::new(client);

        let version = repository.create_version("app-1", "2.0", Platform::Ios).await?;
        assert_eq!(version.id, "v-new");
        assert_eq!(version.state, VersionState::PrepareForSubmission);

        let requests = repository.client.requests();
        let body = requests[0].body.as_ref().unwrap();
        assert_eq!(body["data"]["attributes"]["platform"], "IOS");
        assert_eq!(body["data"]["relationships"]["app"]["data"]["id"], "app-1");
        Ok(())
    }

    #[tokio::test]
    async fn get_app_surfaces_decoding_errors() {
        let client = StubClient::new();
        client.will_return(json!({"unexpected": "shape"}));
        let repository = RestAppRepository::new(client);

        let result = repository.get_app("app-1").await;
        assert!(matches!(result, Err(ApiError::Decoding(_))));
    }
}
