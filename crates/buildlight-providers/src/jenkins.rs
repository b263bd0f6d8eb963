//! Jenkins adapter over the JSON API (`/api/json`)

use buildlight_core::logging::ErrorSink;
use buildlight_core::{
    BuildActivity, BuildOutcome, BuildProvider, HttpTransport, Project, ProviderClient,
    ProviderConfig, ProviderError, RawResponse, RequestSpec,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_BUILDS_PATH: &str = "/api/json";

/// Fields requested from the Jenkins API; keeps the payload small
const TREE_FILTER: &str = "jobs[name,url,color,lastBuild[number,timestamp]]";

/// Adapter for Jenkins CI servers
#[derive(Debug)]
pub struct JenkinsProvider {
    client: ProviderClient,
}

#[derive(Debug, Deserialize)]
struct JenkinsDocument {
    #[serde(default)]
    jobs: Vec<JenkinsJob>,
}

#[derive(Debug, Deserialize)]
struct JenkinsJob {
    name: String,
    url: Option<String>,
    color: Option<String>,
    #[serde(rename = "lastBuild")]
    last_build: Option<JenkinsBuild>,
}

#[derive(Debug, Deserialize)]
struct JenkinsBuild {
    number: Option<i64>,
    timestamp: Option<i64>,
}

impl JenkinsProvider {
    /// Create an adapter; `builds_path` defaults to `/api/json`
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

    /// Fetch the jobs listing once, narrowed by the tree filter
    ///
    /// `None` means the upstream is unavailable; the failure has already been
    /// logged by the client.
    pub fn refresh(&self) -> Option<RawResponse> {
        let mut spec = RequestSpec::default();
        spec.url_options
            .query
            .insert("tree".to_string(), TREE_FILTER.to_string());
        self.client.refresh_with(&spec)
    }

    /// Split a Jenkins ball color into (outcome, in-flight)
    ///
    /// An `_anime` suffix means a build is running; the base color carries
    /// the outcome of the previous build.
    fn parse_color(color: Option<&str>) -> (BuildOutcome, BuildActivity) {
        let Some(color) = color else {
            return (BuildOutcome::Unknown, BuildActivity::Done);
        };
        let (base, building) = match color.strip_suffix("_anime") {
            Some(base) => (base, BuildActivity::Building),
            None => (color, BuildActivity::Done),
        };
        let outcome = match base {
            "blue" | "green" => BuildOutcome::Passed,
            "red" | "yellow" => BuildOutcome::Failed,
            _ => BuildOutcome::Unknown,
        };
        (outcome, building)
    }

    fn to_project(&self, job: &JenkinsJob) -> Project {
        let (last_build_status, current_status) = Self::parse_color(job.color.as_deref());
        let last_build = job.last_build.as_ref();
        let base = self.client.config().url.trim_end_matches('/');

        Project {
            name: job.name.clone(),
            build_url: job
                .url
                .clone()
                .unwrap_or_else(|| format!("{base}/job/{}", job.name)),
            last_build_id: last_build
                .and_then(|b| b.number)
                .map(|n| n.to_string())
                .unwrap_or_default(),
            last_build_time: last_build
                .and_then(|b| b.timestamp)
                .and_then(DateTime::<Utc>::from_timestamp_millis),
            last_build_status,
            current_status,
        }
    }
}

impl BuildProvider for JenkinsProvider {
    fn provider_name(&self) -> &str {
        "jenkins"
    }

    fn projects(&self) -> Result<Vec<Project>, ProviderError> {
        let Some(response) = self.client.response() else {
            return Ok(Vec::new());
        };

        let document: JenkinsDocument =
            serde_json::from_str(&response.body).map_err(|e| ProviderError::Parse {
                message: format!("decoding jobs payload: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(document.jobs.iter().map(|j| self.to_project(j)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildlight_core::test_support::{CapturedSink, MockTransport};

    fn provider_with(body: &str) -> (JenkinsProvider, MockTransport) {
        let transport = MockTransport::with_response(200, body);
        let provider = JenkinsProvider::with_transport(
            ProviderConfig::new("http://jenkins.example.org"),
            Arc::new(transport.clone()),
            Arc::new(CapturedSink::default()),
        )
        .unwrap();
        (provider, transport)
    }

    #[test]
    fn test_refresh_hits_api_json_with_tree_filter() {
        let (provider, transport) = provider_with(r#"{"jobs": []}"#);
        provider.refresh();

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://jenkins.example.org/api/json");
        assert_eq!(
            requests[0].options.query.get("tree").map(String::as_str),
            Some(TREE_FILTER)
        );
    }

    #[test]
    fn test_job_mapping() {
        let body = r#"{
            "jobs": [{
                "name": "widget",
                "url": "http://jenkins.example.org/job/widget/",
                "color": "blue",
                "lastBuild": {"number": 12, "timestamp": 1770976800000}
            }]
        }"#;
        let (provider, _) = provider_with(body);
        provider.refresh();

        let projects = provider.projects().unwrap();
        assert_eq!(projects.len(), 1);
        let project = &projects[0];
        assert_eq!(project.name, "widget");
        assert_eq!(project.build_url, "http://jenkins.example.org/job/widget/");
        assert_eq!(project.last_build_id, "12");
        assert!(project.last_build_time.is_some());
        assert_eq!(project.last_build_status, BuildOutcome::Passed);
        assert_eq!(project.current_status, BuildActivity::Done);
    }

    #[test]
    fn test_color_table() {
        let cases = [
            ("blue", BuildOutcome::Passed, BuildActivity::Done),
            ("green", BuildOutcome::Passed, BuildActivity::Done),
            ("red", BuildOutcome::Failed, BuildActivity::Done),
            ("yellow", BuildOutcome::Failed, BuildActivity::Done),
            ("blue_anime", BuildOutcome::Passed, BuildActivity::Building),
            ("red_anime", BuildOutcome::Failed, BuildActivity::Building),
            ("grey", BuildOutcome::Unknown, BuildActivity::Done),
            ("disabled", BuildOutcome::Unknown, BuildActivity::Done),
            ("aborted", BuildOutcome::Unknown, BuildActivity::Done),
            ("notbuilt", BuildOutcome::Unknown, BuildActivity::Done),
        ];
        for (color, outcome, activity) in cases {
            let (got_outcome, got_activity) = JenkinsProvider::parse_color(Some(color));
            assert_eq!(got_outcome, outcome, "color {color}");
            assert_eq!(got_activity, activity, "color {color}");
        }
        assert_eq!(
            JenkinsProvider::parse_color(None),
            (BuildOutcome::Unknown, BuildActivity::Done)
        );
    }

    #[test]
    fn test_never_built_job() {
        let body = r#"{
            "jobs": [{
                "name": "fresh",
                "url": null,
                "color": "notbuilt",
                "lastBuild": null
            }]
        }"#;
        let (provider, _) = provider_with(body);
        provider.refresh();

        let project = &provider.projects().unwrap()[0];
        assert_eq!(project.last_build_id, "");
        assert!(project.last_build_time.is_none());
        assert_eq!(project.build_url, "http://jenkins.example.org/job/fresh");
        assert_eq!(project.last_build_status, BuildOutcome::Unknown);
    }

    #[test]
    fn test_missing_jobs_key_is_empty() {
        let (provider, _) = provider_with("{}");
        provider.refresh();
        assert!(provider.projects().unwrap().is_empty());
    }

    #[test]
    fn test_bad_payload_is_parse_error() {
        let (provider, _) = provider_with("not json");
        provider.refresh();
        let err = provider.projects().unwrap_err();
        assert!(matches!(err, ProviderError::Parse { .. }));
    }

    #[test]
    fn test_provider_name() {
        let (provider, _) = provider_with("{}");
        assert_eq!(provider.provider_name(), "jenkins");
    }
}
