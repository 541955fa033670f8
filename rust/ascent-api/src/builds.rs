use crate::client::{ApiClient, ApiRequest};
use crate::dto::{BuildAttributes, CollectionDocument, Document, Resource, parse_wire_enum};
use crate::error::ApiError;
use ascent_domain::{Build, Page, ProcessingState};
use async_trait::async_trait;

/// Uploaded binary builds.
#[async_trait]
pub trait BuildRepository: Send + Sync {
    async fn list_builds(
        &self,
        app_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Page<Build>, ApiError>;
    async fn get_build(&self, id: &str) -> Result<Build, ApiError>;
}

/// REST-backed [`BuildRepository`].
pub struct RestBuildRepository<C> {
    client: C,
}

impl<C: ApiClient> RestBuildRepository<C> {
    pub fn new(client: C) -> Self {
        RestBuildRepository { client }
    }
}

#[async_trait]
impl<C: ApiClient> BuildRepository for RestBuildRepository<C> {
    async fn list_builds(
        &self,
        app_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Page<Build>, ApiError> {
        let mut request = ApiRequest::get("/v1/builds");
        if let Some(app_id) = app_id {
            request = request.query("filter[app]", app_id);
        }
        if let Some(limit) = limit {
            request = request.query("limit", limit.to_string());
        }
        let value = self.client.send(request).await?;
        let document: CollectionDocument<BuildAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        let builds = document.data.iter().map(map_build).collect();
        Ok(Page::with_cursor(builds, document.links.next))
    }

    async fn get_build(&self, id: &str) -> Result<Build, ApiError> {
        let value = self
            .client
            .send(ApiRequest::get(format!("/v1/builds/{id}")))
            .await?;
        let document: Document<BuildAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        Ok(map_build(&document.data))
    }
}

fn map_build(resource: &Resource<BuildAttributes>) -> Build {
    let attributes = resource.attributes.as_ref();
    // A build whose processing state is unknown is still processing as far
    // as this client is concerned.
    let processing_state = attributes
        .and_then(|a| a.processing_state.as_deref())
        .and_then(parse_wire_enum)
        .unwrap_or(ProcessingState::Processing);
    Build {
        id: resource.id.clone(),
        version: attributes
            .and_then(|a| a.version.clone())
            .unwrap_or_default(),
        uploaded_date: attributes.and_then(|a| a.uploaded_date),
        expiration_date: attributes.and_then(|a| a.expiration_date),
        expired: attributes.and_then(|a| a.expired).unwrap_or(false),
        processing_state,
        build_number: None,
    }
}
