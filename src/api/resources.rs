//! Typed endpoint wrappers. Listings return `(items, has_more)`; with `all_pages` set every
//! cursor is followed and `has_more` is always false.

use super::client::{BugsnagClient, QueryParams};
use super::models::{
    BugsnagError, Collaborator, Comment, CreateCommentRequest, Event, Organization, Project,
    Release, StabilityTrend, TrendBucket,
};
use crate::error::ApiError;
use serde::de::DeserializeOwned;

pub type Listing<T> = (Vec<T>, bool);

/// Filters accepted by the error listing endpoint. Empty strings are not sent.
#[derive(Debug, Clone, Default)]
pub struct ListErrorsOptions {
    pub project_id: String,
    pub status: String,
    pub severity: String,
    pub sort: String,
    pub direction: String,
    pub all_pages: bool,
}

impl ListErrorsOptions {
    fn query(&self) -> QueryParams {
        [
            ("status", &self.status),
            ("severity", &self.severity),
            ("sort", &self.sort),
            ("direction", &self.direction),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
    }
}

impl BugsnagClient {
    async fn list<T>(
        &self,
        path: &str,
        params: &QueryParams,
        all_pages: bool,
    ) -> Result<Listing<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        if all_pages {
            let items = self.collect_all_pages(path, params).await?;
            Ok((items, false))
        } else {
            self.fetch_single_page(path, params).await
        }
    }

    pub async fn list_organizations(
        &self,
        all_pages: bool,
    ) -> Result<Listing<Organization>, ApiError> {
        self.list("/user/organizations", &QueryParams::new(), all_pages)
            .await
    }

    pub async fn list_projects(
        &self,
        org_id: &str,
        all_pages: bool,
    ) -> Result<Listing<Project>, ApiError> {
        let path = format!("/organizations/{}/projects", org_id);
        self.list(&path, &QueryParams::new(), all_pages).await
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Project, ApiError> {
        let path = format!("/projects/{}", project_id);
        self.get_json(&path, &QueryParams::new()).await
    }

    pub async fn list_errors(
        &self,
        options: &ListErrorsOptions,
    ) -> Result<Listing<BugsnagError>, ApiError> {
        let path = format!("/projects/{}/errors", options.project_id);
        self.list(&path, &options.query(), options.all_pages).await
    }

    pub async fn get_error(
        &self,
        project_id: &str,
        error_id: &str,
    ) -> Result<BugsnagError, ApiError> {
        let path = format!("/projects/{}/errors/{}", project_id, error_id);
        self.get_json(&path, &QueryParams::new()).await
    }

    /// Events of one error when `error_id` is non-empty, otherwise of the whole project.
    pub async fn list_events(
        &self,
        project_id: &str,
        error_id: &str,
        all_pages: bool,
    ) -> Result<Listing<Event>, ApiError> {
        let path = if error_id.is_empty() {
            format!("/projects/{}/events", project_id)
        } else {
            format!("/projects/{}/errors/{}/events", project_id, error_id)
        };
        self.list(&path, &QueryParams::new(), all_pages).await
    }

    pub async fn get_event(&self, project_id: &str, event_id: &str) -> Result<Event, ApiError> {
        let path = format!("/projects/{}/events/{}", project_id, event_id);
        self.get_json(&path, &QueryParams::new()).await
    }

    pub async fn list_comments(
        &self,
        project_id: &str,
        error_id: &str,
        all_pages: bool,
    ) -> Result<Listing<Comment>, ApiError> {
        let path = format!("/projects/{}/errors/{}/comments", project_id, error_id);
        self.list(&path, &QueryParams::new(), all_pages).await
    }

    pub async fn create_comment(
        &self,
        project_id: &str,
        error_id: &str,
        message: &str,
    ) -> Result<Comment, ApiError> {
        let path = format!("/projects/{}/errors/{}/comments", project_id, error_id);
        self.post_json(&path, &CreateCommentRequest { message })
            .await
    }

    pub async fn list_releases(
        &self,
        project_id: &str,
        all_pages: bool,
    ) -> Result<Listing<Release>, ApiError> {
        let path = format!("/projects/{}/releases", project_id);
        self.list(&path, &QueryParams::new(), all_pages).await
    }

    pub async fn list_collaborators(
        &self,
        org_id: &str,
        all_pages: bool,
    ) -> Result<Listing<Collaborator>, ApiError> {
        let path = format!("/organizations/{}/collaborators", org_id);
        self.list(&path, &QueryParams::new(), all_pages).await
    }

    /// Event counts bucketed over time. `buckets_count` of zero lets the server choose.
    pub async fn get_project_trends(
        &self,
        project_id: &str,
        resolution: &str,
        buckets_count: u32,
    ) -> Result<Vec<TrendBucket>, ApiError> {
        let path = format!("/projects/{}/trend", project_id);
        let mut params = QueryParams::new();
        params.insert("resolution".to_string(), resolution.to_string());
        if buckets_count > 0 {
            params.insert("buckets_count".to_string(), buckets_count.to_string());
        }
        self.get_json(&path, &params).await
    }

    pub async fn get_error_trends(
        &self,
        project_id: &str,
        error_id: &str,
    ) -> Result<Vec<TrendBucket>, ApiError> {
        let path = format!("/projects/{}/errors/{}/trend", project_id, error_id);
        self.get_json(&path, &QueryParams::new()).await
    }

    pub async fn get_stability_trend(
        &self,
        project_id: &str,
        release_stage: &str,
    ) -> Result<StabilityTrend, ApiError> {
        let path = format!("/projects/{}/stability_trend", project_id);
        let mut params = QueryParams::new();
        params.insert("release_stage".to_string(), release_stage.to_string());
        self.get_json(&path, &params).await
    }
}
