//! Travis-style adapter over the classic `/repositories.json` surface

use buildlight_core::logging::ErrorSink;
use buildlight_core::{
    BuildActivity, BuildOutcome, BuildProvider, HttpTransport, Project, ProviderClient,
    ProviderConfig, ProviderError, RawResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_BUILDS_PATH: &str = "/repositories.json";

/// Adapter for Travis-style CI servers
#[derive(Debug)]
pub struct TravisProvider {
    client: ProviderClient,
}

/// One repository entry in the vendor payload
///
/// Null fields signal a build in flight: the vendor clears
/// `last_build_status` and `last_build_finished_at` while a build runs.
#[derive(Debug, Deserialize)]
struct TravisRepository {
    slug: Option<String>,
    last_build_id: Option<i64>,
    last_build_status: Option<i64>,
    last_build_finished_at: Option<String>,
}

impl TravisProvider {
    /// Create an adapter; `builds_path` defaults to `/repositories.json`
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Config` if `url` is missing or empty.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = ProviderClient::new(Self::with_default_path(config))?;
        Ok(Self { client })
    }

    /// Create an adapter with an injected transport and sink
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Config` if `url` is missing or empty.
    pub fn with_transport(
        config: ProviderConfig,
        transport: Arc<dyn HttpTransport>,
        sink: Arc<dyn ErrorSink>,
    ) -> Result<Self, ProviderError> {
        let client =
            ProviderClient::with_transport(Self::with_default_path(config), transport, sink)?;
        Ok(Self { client })
    }

    fn with_default_path(mut config: ProviderConfig) -> ProviderConfig {
        if config.builds_path.is_none() {
            config.builds_path = Some(DEFAULT_BUILDS_PATH.to_string());
        }
        config
    }

    /// Fetch the repositories resource once
    ///
    /// `None` means the upstream is unavailable; the failure has already been
    /// logged by the client.
    pub fn refresh(&self) -> Option<RawResponse> {
        self.client.refresh()
    }

    fn to_project(&self, repository: &TravisRepository) -> Project {
        let slug = repository.slug.as_deref().unwrap_or_default();
        let name = slug.rsplit('/').next().unwrap_or_default().to_string();
        let base = self.client.config().url.trim_end_matches('/');

        let last_build_status = match repository.last_build_status {
            Some(0) => BuildOutcome::Passed,
            Some(1) => BuildOutcome::Failed,
            _ => BuildOutcome::Unknown,
        };
        let building = repository.last_build_status.is_none()
            || repository.last_build_finished_at.is_none();

        Project {
            name,
            build_url: format!("{base}/{slug}"),
            last_build_id: repository
                .last_build_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            last_build_time: repository
                .last_build_finished_at
                .as_deref()
                .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
                .map(|t| t.with_timezone(&Utc)),
            last_build_status,
            current_status: if building {
                BuildActivity::Building
            } else {
                BuildActivity::Done
            },
        }
    }
}

impl BuildProvider for TravisProvider {
    fn provider_name(&self) -> &str {
        "travis"
    }

    fn projects(&self) -> Result<Vec<Project>, ProviderError> {
        let Some(response) = self.client.response() else {
            return Ok(Vec::new());
        };

        let repositories: Vec<TravisRepository> = serde_json::from_str(&response.body)
            .map_err(|e| ProviderError::Parse {
                message: format!("decoding repositories payload: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(repositories.iter().map(|r| self.to_project(r)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildlight_core::test_support::{CapturedSink, MockTransport};

    fn provider_with(body: &str) -> (TravisProvider, MockTransport) {
        let transport = MockTransport::with_response(200, body);
        let provider = TravisProvider::with_transport(
            ProviderConfig::new("http://ci.example.org"),
            Arc::new(transport.clone()),
            Arc::new(CapturedSink::default()),
        )
        .unwrap();
        (provider, transport)
    }

    #[test]
    fn test_default_builds_path() {
        let (provider, transport) = provider_with("[]");
        provider.refresh();
        assert_eq!(
            transport.requests()[0].url,
            "http://ci.example.org/repositories.json"
        );
    }

    #[test]
    fn test_configured_builds_path_kept() {
        let mut config = ProviderConfig::new("http://ci.example.org");
        config.builds_path = Some("/repos.json".to_string());
        let transport = MockTransport::with_response(200, "[]");
        let provider = TravisProvider::with_transport(
            config,
            Arc::new(transport.clone()),
            Arc::new(CapturedSink::default()),
        )
        .unwrap();

        provider.refresh();
        assert_eq!(transport.requests()[0].url, "http://ci.example.org/repos.json");
    }

    #[test]
    fn test_projects_without_refresh_is_empty() {
        let (provider, _) = provider_with("[]");
        assert!(provider.projects().unwrap().is_empty());
    }

    #[test]
    fn test_finished_build_mapping() {
        let body = r#"[{
            "slug": "acme/widget",
            "last_build_id": 77,
            "last_build_status": 0,
            "last_build_finished_at": "2026-02-13T10:05:00Z"
        }]"#;
        let (provider, _) = provider_with(body);
        provider.refresh();

        let projects = provider.projects().unwrap();
        assert_eq!(projects.len(), 1);
        let project = &projects[0];
        assert_eq!(project.name, "widget");
        assert_eq!(project.build_url, "http://ci.example.org/acme/widget");
        assert_eq!(project.last_build_id, "77");
        assert!(project.last_build_time.is_some());
        assert_eq!(project.last_build_status, BuildOutcome::Passed);
        assert_eq!(project.current_status, BuildActivity::Done);
    }

    #[test]
    fn test_in_flight_build_mapping() {
        let body = r#"[{
            "slug": "acme/widget",
            "last_build_id": 78,
            "last_build_status": null,
            "last_build_finished_at": null
        }]"#;
        let (provider, _) = provider_with(body);
        provider.refresh();

        let project = &provider.projects().unwrap()[0];
        assert_eq!(project.last_build_status, BuildOutcome::Unknown);
        assert_eq!(project.current_status, BuildActivity::Building);
        assert!(project.last_build_time.is_none());
    }

    #[test]
    fn test_never_built_repository() {
        let body = r#"[{
            "slug": "acme/new",
            "last_build_id": null,
            "last_build_status": null,
            "last_build_finished_at": null
        }]"#;
        let (provider, _) = provider_with(body);
        provider.refresh();

        let project = &provider.projects().unwrap()[0];
        assert_eq!(project.last_build_id, "");
        assert_eq!(project.last_build_status, BuildOutcome::Unknown);
    }

    #[test]
    fn test_unparseable_finish_time_is_none() {
        let body = r#"[{
            "slug": "acme/widget",
            "last_build_id": 79,
            "last_build_status": 1,
            "last_build_finished_at": "yesterday"
        }]"#;
        let (provider, _) = provider_with(body);
        provider.refresh();

        let project = &provider.projects().unwrap()[0];
        assert!(project.last_build_time.is_none());
        assert_eq!(project.last_build_status, BuildOutcome::Failed);
        assert_eq!(project.current_status, BuildActivity::Done);
    }

    #[test]
    fn test_bad_payload_is_parse_error() {
        let (provider, _) = provider_with("<html>not json</html>");
        provider.refresh();

        let err = provider.projects().unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[test]
    fn test_provider_name() {
        let (provider, _) = provider_with("[]");
        assert_eq!(provider.provider_name(), "travis");
    }
}
