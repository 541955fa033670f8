use crate::client::{ApiClient, ApiRequest};
use crate::dto::{
    BetaGroupAttributes, BetaTesterAttributes, CollectionDocument, Resource, parse_wire_enum,
};
use crate::error::ApiError;
use ascent_domain::{BetaGroup, BetaTester, Page};
use async_trait::async_trait;

/// Beta-testing groups and testers.
#[async_trait]
pub trait TestFlightRepository: Send + Sync {
    async fn list_beta_groups(
        &self,
        app_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Page<BetaGroup>, ApiError>;
    async fn list_beta_testers(
        &self,
        group_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Page<BetaTester>, ApiError>;
}

/// REST-backed [`TestFlightRepository`].
pub struct RestTestFlightRepository<C> {
    client: C,
}

impl<C: ApiClient> RestTestFlightRepository<C> {
    pub fn new(client: C) -> Self {
        RestTestFlightRepository { client }
    }
}

#[async_trait]
impl<C: ApiClient> TestFlightRepository for RestTestFlightRepository<C> {
    async fn list_beta_groups(
        &self,
        app_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Page<BetaGroup>, ApiError> {
        let mut request = ApiRequest::get("/v1/betaGroups");
        if let Some(app_id) = app_id {
            request = request.query("filter[app]", app_id);
        }
        if let Some(limit) = limit {
            request = request.query("limit", limit.to_string());
        }
        let value = self.client.send(request).await?;
        let document: CollectionDocument<BetaGroupAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        let groups = document.data.iter().map(map_beta_group).collect();
        Ok(Page::with_cursor(groups, document.links.next))
    }

    async fn list_beta_testers(
        &self,
        group_id: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Page<BetaTester>, ApiError> {
        let mut request = ApiRequest::get("/v1/betaTesters");
        if let Some(group_id) = group_id {
            request = request.query("filter[betaGroups]", group_id);
        }
        if let Some(limit) = limit {
            request = request.query("limit", limit.to_string());
        }
        let value = self.client.send(request).await?;
        let document: CollectionDocument<BetaTesterAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        let testers = document.data.iter().map(map_beta_tester).collect();
        Ok(Page::with_cursor(testers, document.links.next))
    }
}

fn map_beta_group(resource: &Resource<BetaGroupAttributes>) -> BetaGroup {
    let attributes = resource.attributes.as_ref();
    BetaGroup {
        id: resource.id.clone(),
        name: attributes.and_then(|a| a.name.clone()).unwrap_or_default(),
        is_internal_group: attributes
            .and_then(|a| a.is_internal_group)
            .unwrap_or(false),
        public_link_enabled: attributes
            .and_then(|a| a.public_link_enabled)
            .unwrap_or(false),
        created_date: attributes.and_then(|a| a.created_date),
    }
}

fn map_beta_tester(resource: &Resource<BetaTesterAttributes>) -> BetaTester {
    let attributes = resource.attributes.as_ref();
    BetaTester {
        id: resource.id.clone(),
        first_name: attributes.and_then(|a| a.first_name.clone()),
        last_name: attributes.and_then(|a| a.last_name.clone()),
        email: attributes.and_then(|a| a.email.clone()),
        invite_type: attributes
            .and_then(|a| a.invite_type.as_deref())
            .and_then(parse_wire_enum),
    }
}
