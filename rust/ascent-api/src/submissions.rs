//! Review submission flow.
//!
//! Submitting a version is a small orchestration, not a single call: the
//! service attaches versions to a per-app, per-platform review submission,
//! and an open submission must be reused rather than duplicated.

use crate::client::{ApiClient, ApiRequest};
use crate::dto::{
    CollectionDocument, Document, Resource, SubmissionAttributes, VersionAttributes,
    parse_wire_enum,
};
use crate::error::ApiError;
use ascent_domain::{Platform, ReviewSubmission, SubmissionState};
use async_trait::async_trait;
use serde_json::json;

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Submit an App Store version for review.
    ///
    /// Reuses an open review submission for the version's app and platform
    /// when one exists, otherwise creates one; then attaches the version as
    /// a submission item and marks the submission submitted.
    async fn submit_version(&self, version_id: &str) -> Result<ReviewSubmission, ApiError>;
}

/// REST-backed [`SubmissionRepository`].
pub struct RestSubmissionRepository<C> {
    client: C,
}

impl<C: ApiClient> RestSubmissionRepository<C> {
    pub fn new(client: C) -> Self {
        RestSubmissionRepository { client }
    }

    async fn version_context(&self, version_id: &str) -> Result<(String, Platform), ApiError> {
        let value = self
            .client
            .send(
                ApiRequest::get(format!("/v1/appStoreVersions/{version_id}"))
                    .query("include", "app"),
            )
            .await?;
        let document: Document<VersionAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        let app_id = document
            .data
            .related_id("app")
            .ok_or_else(|| ApiError::Decoding("version has no app relationship".into()))?
            .to_string();
        let platform = document
            .data
            .attributes
            .as_ref()
            .and_then(|a| a.platform.as_deref())
            .and_then(parse_wire_enum)
            .ok_or_else(|| ApiError::Decoding("version has no recognizable platform".into()))?;
        Ok((app_id, platform))
    }

    async fn open_submission(
        &self,
        app_id: &str,
        platform: Platform,
    ) -> Result<Option<Resource<SubmissionAttributes>>, ApiError> {
        let request = ApiRequest::get("/v1/reviewSubmissions")
            .query("filter[app]", app_id)
            .query("filter[state]", "READY_FOR_REVIEW,UNRESOLVED_ISSUES")
            .query("filter[platform]", platform.wire_name());
        let value = self.client.send(request).await?;
        let document: CollectionDocument<SubmissionAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        Ok(document.data.into_iter().next())
    }

    async fn create_submission(
        &self,
        app_id: &str,
        platform: Platform,
    ) -> Result<Resource<SubmissionAttributes>, ApiError> {
        let body = json!({
            "data": {
                "type": "reviewSubmissions",
                "attributes": {"platform": platform.wire_name()},
                "relationships": {
                    "app": {"data": {"type": "apps", "id": app_id}}
                }
            }
        });
        let value = self
            .client
            .send(ApiRequest::post("/v1/reviewSubmissions", body))
            .await?;
        let document: Document<SubmissionAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        Ok(document.data)
    }

    async fn attach_version(&self, submission_id: &str, version_id: &str) -> Result<(), ApiError> {
        let body = json!({
            "data": {
                "type": "reviewSubmissionItems",
                "relationships": {
                    "reviewSubmission": {
                        "data": {"type": "reviewSubmissions", "id": submission_id}
                    },
                    "appStoreVersionForReview": {
                        "data": {"type": "appStoreVersions", "id": version_id}
                    }
                }
            }
        });
        self.client
            .send(ApiRequest::post("/v1/reviewSubmissionItems", body))
            .await?;
        Ok(())
    }

    async fn mark_submitted(
        &self,
        submission_id: &str,
    ) -> Result<Resource<SubmissionAttributes>, ApiError> {
        let body = json!({
            "data": {
                "type": "reviewSubmissions",
                "id": submission_id,
                "attributes": {"submitted": true}
            }
        });
        let value = self
            .client
            .send(ApiRequest::patch(
                format!("/v1/reviewSubmissions/{submission_id}"),
                body,
            ))
            .await?;
        let document: Document<SubmissionAttributes> =
            serde_json::from_value(value).map_err(|e| ApiError::Decoding(e.to_string()))?;
        Ok(document.data)
    }
}

#[async_trait]
impl<C: ApiClient> SubmissionRepository for RestSubmissionRepository<C> {
    async fn submit_version(&self, version_id: &str) -> Result<ReviewSubmission, ApiError> {
        let (app_id, platform) = self.version_context(version_id).await?;

        let submission = match self.open_submission(&app_id, platform).await? {
            Some(existing) => {
                tracing::debug!(submission_id = %existing.id, "reusing open review submission");
                existing
            }
            None => self.create_submission(&app_id, platform).await?,
        };

        self.attach_version(&submission.id, version_id).await?;
        let submitted = self.mark_submitted(&submission.id).await?;
        Ok(map_submission(&submitted, &app_id, platform))
    }
}

fn map_submission(
    resource: &Resource<SubmissionAttributes>,
    app_id: &str,
    platform: Platform,
) -> ReviewSubmission {
    let attributes = resource.attributes.as_ref();
    ReviewSubmission {
        id: resource.id.clone(),
        app_id: app_id.to_string(),
        platform: attributes
            .and_then(|a| a.platform.as_deref())
            .and_then(parse_wire_enum)
            .unwrap_or(platform),
        state: attributes
            .and_then(|a| a.state.as_deref())
            .and_then(parse_wire_enum)
            .unwrap_or(SubmissionState::ReadyForReview),
        submitted_date: attributes.and_then(|a| a.submitted_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubClient;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use testresult::TestResult;

    fn version_response(version_id: &str, app_id: &str, platform: &str) -> Value {
        json!({
            "data": {
                "type": "appStoreVersions",
                "id": version_id,
                "attributes": {"versionString": "1.2", "platform": platform},
                "relationships": {"app": {"data": {"type": "apps", "id": app_id}}}
            }
        })
    }

    fn submission_resource(id: &str, state: &str) -> Value {
        json!({
            "type": "reviewSubmissions",
            "id": id,
            "attributes": {"platform": "IOS", "state": state}
        })
    }

    #[tokio::test]
    async fn submit_creates_submission_when_none_open() -> TestResult {
        let client = StubClient::new();
        client.will_return(version_response("v-1", "app-1", "IOS"));
        client.will_return(json!({"data": []}));
        client.will_return(json!({"data": submission_resource("sub-1", "READY_FOR_REVIEW")}));
        client.will_return(json!({"data": {"type": "reviewSubmissionItems", "id": "item-1"}}));
        client.will_return(json!({"data": submission_resource("sub-1", "WAITING_FOR_REVIEW")}));
        let repository = RestSubmissionRepository::new(client);

        let submission = repository.submit_version("v-1").await?;
        assert_eq!(submission.id, "sub-1");
        assert_eq!(submission.app_id, "app-1");
        assert_eq!(submission.state, SubmissionState::WaitingForReview);
        assert!(submission.is_pending());

        let requests = repository.client.requests();
        assert_eq!(requests.len(), 5);
        assert_eq!(requests[0].path, "/v1/appStoreVersions/v-1");
        assert_eq!(requests[1].path, "/v1/reviewSubmissions");
        assert_eq!(
            requests[1].query,
            vec![
                ("filter[app]".to_string(), "app-1".to_string()),
                (
                    "filter[state]".to_string(),
                    "READY_FOR_REVIEW,UNRESOLVED_ISSUES".to_string()
                ),
                ("filter[platform]".to_string(), "IOS".to_string()),
            ]
        );
        let create_body = requests[2].body.as_ref().unwrap();
        assert_eq!(
            create_body["data"]["relationships"]["app"]["data"]["id"],
            "app-1"
        );
        let item_body = requests[3].body.as_ref().unwrap();
        assert_eq!(
            item_body["data"]["relationships"]["appStoreVersionForReview"]["data"]["id"],
            "v-1"
        );
        let patch_body = requests[4].body.as_ref().unwrap();
        assert_eq!(patch_body["data"]["attributes"]["submitted"], true);
        Ok(())
    }

    #[tokio::test]
    async fn submit_reuses_open_submission() -> TestResult {
        let client = StubClient::new();
        client.will_return(version_response("v-1", "app-1", "IOS"));
        client.will_return(json!({"data": [submission_resource("sub-9", "READY_FOR_REVIEW")]}));
        client.will_return(json!({"data": {"type": "reviewSubmissionItems", "id": "item-1"}}));
        client.will_return(json!({"data": submission_resource("sub-9", "WAITING_FOR_REVIEW")}));
        let repository = RestSubmissionRepository::new(client);

        let submission = repository.submit_version("v-1").await?;
        assert_eq!(submission.id, "sub-9");

        // No create call: straight from lookup to item attachment.
        let requests = repository.client.requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[2].path, "/v1/reviewSubmissionItems");
        Ok(())
    }

    #[tokio::test]
    async fn submit_fails_when_version_lacks_app_relationship() {
        let client = StubClient::new();
        client.will_return(json!({
            "data": {"type": "appStoreVersions", "id": "v-1",
                     "attributes": {"platform": "IOS"}}
        }));
        let repository = RestSubmissionRepository::new(client);

        let result = repository.submit_version("v-1").await;
        assert!(matches!(result, Err(ApiError::Decoding(_))));
    }
}
