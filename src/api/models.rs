use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Custom deserializer: treats an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Account models
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Organization {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub auto_upgrade: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub billing_emails: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub api_key: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub project_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_full_view: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub release_stages: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub open_error_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub for_review: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub collaborator_count: i64,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub global_grouping: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub location_grouping: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub discarded_app_versions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub discarded_errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub url_whitelist: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub ignore_old_browsers: bool,
    #[serde(
        skip_serializing_if = "HashMap::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub ignored_browser_versions: HashMap<String, i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub resolve_on_deploy: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_event_fields_used: i64,
}

// Error models
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BugsnagError {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error_class: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub context: String,
    #[serde(deserialize_with = "null_as_default")]
    pub severity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub unhandled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub first_seen: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_seen: String,
    /// Occurrence count within the current filters; shown in tables
    #[serde(deserialize_with = "null_as_default")]
    pub events: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub events_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub unthrottled_occurrence_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub assigned_collaborator_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub comment_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_issue: Option<Issue>,
    #[serde(deserialize_with = "null_as_default")]
    pub original_severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ErrorOverrides>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub missing_dsyms: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub release_stages: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub grouping_reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping_fields: Option<GroupingFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reopen_rules: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub first_seen_unfiltered: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_seen_unfiltered: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Issue {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub issue_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ErrorOverrides {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub severity: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GroupingFields {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub error_class: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linenum: Option<i64>,
}

/// A single occurrence of an error. Nested payloads are passed through untouched.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Event {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub received_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub severity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub unhandled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub context: String,
    #[serde(deserialize_with = "null_as_default")]
    pub error_class: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadcrumbs: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exceptions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Comment {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct CreateCommentRequest<'a> {
    pub message: &'a str,
}

// Release models
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Release {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: String,
    #[serde(rename = "app_version", deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub release_stage: ReleaseStage,
    #[serde(deserialize_with = "null_as_default")]
    pub builder_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub release_source: String,
    #[serde(deserialize_with = "null_as_default")]
    pub release_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub build_label: String,
    #[serde(
        skip_serializing_if = "HashMap::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub metadata: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_control: Option<SourceControl>,
    #[serde(deserialize_with = "null_as_default")]
    pub total_sessions_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub unhandled_sessions_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub errors_introduced_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub errors_seen_count: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ReleaseStage {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SourceControl {
    #[serde(deserialize_with = "null_as_default")]
    pub provider: String,
    #[serde(deserialize_with = "null_as_default")]
    pub revision: String,
    #[serde(deserialize_with = "null_as_default")]
    pub repository: String,
    #[serde(deserialize_with = "null_as_default")]
    pub diff_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Collaborator {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_admin: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub projects_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

// Trend models
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TrendBucket {
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub events_count: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StabilityTrend {
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: String,
    #[serde(rename = "release_stage_name", deserialize_with = "null_as_default")]
    pub release_stage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timeline_points: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TimelinePoint {
    #[serde(deserialize_with = "null_as_default")]
    pub bucket_start: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bucket_end: String,
    #[serde(deserialize_with = "null_as_default")]
    pub total_sessions_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub unhandled_sessions_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub unhandled_rate: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub users_seen: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub users_with_unhandled: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub unhandled_user_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_organization_missing_fields_default() {
        let json = r#"{"id": "org1", "name": "Acme"}"#;
        let org: Organization = serde_json::from_str(json).unwrap();
        assert_eq!(org.id, "org1");
        assert_eq!(org.name, "Acme");
        assert_eq!(org.slug, "");
        assert!(org.billing_emails.is_empty());
    }

    #[test]
    fn test_null_fields_become_defaults() {
        let json = r#"{
            "id": "e1",
            "error_class": "TypeError",
            "message": null,
            "context": null,
            "assigned_collaborator_id": null,
            "release_stages": null
        }"#;
        let error: BugsnagError = serde_json::from_str(json).unwrap();
        assert_eq!(error.message, "");
        assert_eq!(error.context, "");
        assert_eq!(error.assigned_collaborator_id, "");
        assert!(error.release_stages.is_empty());
    }

    fn assert_all_null_is_default<T>(keys: &[&str])
    where
        T: for<'de> Deserialize<'de> + Default + PartialEq + std::fmt::Debug,
    {
        let object: serde_json::Map<String, Value> = keys
            .iter()
            .map(|key| (key.to_string(), Value::Null))
            .collect();
        let parsed: T = serde_json::from_value(Value::Object(object))
            .unwrap_or_else(|e| panic!("null fields rejected: {}", e));
        assert_eq!(parsed, T::default());
    }

    #[test]
    fn test_every_field_accepts_null() {
        assert_all_null_is_default::<Organization>(&[
            "id", "name", "slug", "created_at", "updated_at", "auto_upgrade", "billing_emails",
        ]);
        assert_all_null_is_default::<Project>(&[
            "id", "name", "slug", "api_key", "type", "is_full_view", "release_stages",
            "language", "created_at", "updated_at", "url", "html_url", "open_error_count",
            "for_review", "collaborator_count", "global_grouping", "location_grouping",
            "discarded_app_versions", "discarded_errors", "url_whitelist",
            "ignore_old_browsers", "ignored_browser_versions", "resolve_on_deploy",
            "custom_event_fields_used",
        ]);
        assert_all_null_is_default::<BugsnagError>(&[
            "id", "project_id", "error_class", "message", "context", "severity", "status",
            "unhandled", "first_seen", "last_seen", "events", "events_count",
            "unthrottled_occurrence_count", "url", "assigned_collaborator_id",
            "comment_count", "created_issue", "original_severity", "overrides",
            "missing_dsyms", "release_stages", "grouping_reason", "grouping_fields",
            "reopen_rules", "first_seen_unfiltered", "last_seen_unfiltered",
        ]);
        assert_all_null_is_default::<Issue>(&["id", "number", "type", "url"]);
        assert_all_null_is_default::<ErrorOverrides>(&["severity"]);
        assert_all_null_is_default::<GroupingFields>(&["error_class", "file", "linenum"]);
        assert_all_null_is_default::<Event>(&[
            "id", "project_id", "error_id", "received_at", "severity", "unhandled", "context",
            "error_class", "message", "app", "device", "user", "breadcrumbs", "exceptions",
            "threads", "meta_data", "request", "url",
        ]);
        assert_all_null_is_default::<Comment>(&[
            "id", "message", "author_id", "author_name", "created_at",
        ]);
        assert_all_null_is_default::<Release>(&[
            "id", "project_id", "app_version", "release_stage", "builder_name",
            "release_source", "release_time", "build_label", "metadata", "source_control",
            "total_sessions_count", "unhandled_sessions_count", "errors_introduced_count",
            "errors_seen_count",
        ]);
        assert_all_null_is_default::<ReleaseStage>(&["name"]);
        assert_all_null_is_default::<SourceControl>(&[
            "provider", "revision", "repository", "diff_url",
        ]);
        assert_all_null_is_default::<Collaborator>(&[
            "id", "email", "name", "is_admin", "projects_count", "created_at",
        ]);
        assert_all_null_is_default::<TrendBucket>(&["from", "to", "events_count"]);
        assert_all_null_is_default::<StabilityTrend>(&[
            "project_id", "release_stage_name", "timeline_points",
        ]);
        assert_all_null_is_default::<TimelinePoint>(&[
            "bucket_start", "bucket_end", "total_sessions_count", "unhandled_sessions_count",
            "unhandled_rate", "users_seen", "users_with_unhandled", "unhandled_user_rate",
        ]);
    }

    #[test]
    fn test_error_page_with_null_timestamps() {
        let json = r#"[{"id":"e1","last_seen":null,"url":null},{"id":"e2"}]"#;
        let errors: Vec<BugsnagError> = serde_json::from_str(json).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].last_seen, "");
        assert_eq!(errors[0].url, "");
    }

    #[test]
    fn test_bugsnag_error_event_counts() {
        let json = r#"{"id": "e1", "events": 42, "events_count": 7}"#;
        let error: BugsnagError = serde_json::from_str(json).unwrap();
        assert_eq!(error.events, 42);
        assert_eq!(error.events_count, 7);
    }

    #[test]
    fn test_project_type_rename() {
        let json = r#"{"id": "p1", "type": "rails", "open_error_count": 3}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.project_type, "rails");
        assert_eq!(project.open_error_count, 3);

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["type"], "rails");
        assert!(value.get("release_stages").is_none());
    }

    #[test]
    fn test_release_version_and_stage() {
        let json = r#"{
            "id": "r1",
            "app_version": "1.2.3",
            "release_stage": {"name": "production"},
            "source_control": {"provider": "github", "revision": "abc"}
        }"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.version, "1.2.3");
        assert_eq!(release.release_stage.name, "production");
        assert_eq!(release.source_control.unwrap().revision, "abc");

        let value = serde_json::to_value(Release {
            version: "2.0".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(value["app_version"], "2.0");
        assert!(value.get("version").is_none());
    }

    #[test]
    fn test_event_keeps_raw_payloads() {
        let json = json!({
            "id": "ev1",
            "error_class": "NoMethodError",
            "app": {"version": "1.0", "type": "rails"},
            "exceptions": [{"message": "undefined method"}],
            "meta_data": {"custom": {"key": "value"}}
        });
        let event: Event = serde_json::from_value(json).unwrap();
        assert_eq!(event.app.as_ref().unwrap()["version"], "1.0");
        assert!(event.exceptions.as_ref().unwrap().is_array());
        assert!(event.device.is_none());

        let out = serde_json::to_value(&event).unwrap();
        assert_eq!(out["meta_data"]["custom"]["key"], "value");
        assert!(out.get("device").is_none());
    }

    #[test]
    fn test_stability_trend_fields() {
        let json = json!({
            "project_id": "p1",
            "release_stage_name": "production",
            "timeline_points": [
                {"bucket_start": "2024-01-01", "bucket_end": "2024-01-02",
                 "total_sessions_count": 100, "unhandled_sessions_count": 2,
                 "unhandled_rate": 0.02}
            ]
        });
        let trend: StabilityTrend = serde_json::from_value(json).unwrap();
        assert_eq!(trend.release_stage, "production");
        assert_eq!(trend.timeline_points.len(), 1);
        assert_eq!(trend.timeline_points[0].total_sessions_count, 100);
        assert!((trend.timeline_points[0].unhandled_rate - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_create_comment_request_body() {
        let body = serde_json::to_value(CreateCommentRequest { message: "Fixed" }).unwrap();
        assert_eq!(body, json!({"message": "Fixed"}));
    }
}
