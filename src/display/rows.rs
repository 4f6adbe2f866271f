//! Column layouts for each resource type.

use super::table::TableRow;
use crate::api::models::{
    BugsnagError, Collaborator, Comment, Event, Organization, Project, Release, TimelinePoint,
    TrendBucket,
};
use crate::utils::text::truncate_text;

const COMMENT_WIDTH: usize = 60;

impl TableRow for Organization {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "SLUG", "CREATED_AT"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.slug.clone(),
            self.created_at.clone(),
        ]
    }
}

impl TableRow for Project {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "LANGUAGE", "OPEN_ERRORS", "CREATED_AT"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.language.clone(),
            self.open_error_count.to_string(),
            self.created_at.clone(),
        ]
    }
}

impl TableRow for BugsnagError {
    fn headers() -> &'static [&'static str] {
        &["ID", "ERROR_CLASS", "SEVERITY", "STATUS", "EVENTS", "LAST_SEEN"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.error_class.clone(),
            self.severity.clone(),
            self.status.clone(),
            self.events.to_string(),
            self.last_seen.clone(),
        ]
    }
}

impl TableRow for Event {
    fn headers() -> &'static [&'static str] {
        &["ID", "ERROR_CLASS", "SEVERITY", "CONTEXT", "RECEIVED_AT"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.error_class.clone(),
            self.severity.clone(),
            self.context.clone(),
            self.received_at.clone(),
        ]
    }
}

impl TableRow for Comment {
    fn headers() -> &'static [&'static str] {
        &["ID", "AUTHOR", "MESSAGE", "CREATED_AT"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.author_name.clone(),
            truncate_text(&self.message, COMMENT_WIDTH),
            self.created_at.clone(),
        ]
    }
}

impl TableRow for Release {
    fn headers() -> &'static [&'static str] {
        &["ID", "VERSION", "RELEASE_STAGE", "SOURCE", "RELEASE_TIME"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.version.clone(),
            self.release_stage.name.clone(),
            self.release_source.clone(),
            self.release_time.clone(),
        ]
    }
}

impl TableRow for Collaborator {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "EMAIL", "IS_ADMIN"]
    }

    fn row(&self) -> Vec<String> {
        let admin = if self.is_admin { "yes" } else { "no" };
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            admin.to_string(),
        ]
    }
}

impl TableRow for TrendBucket {
    fn headers() -> &'static [&'static str] {
        &["FROM", "TO", "EVENTS_COUNT"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.from.clone(),
            self.to.clone(),
            self.events_count.to_string(),
        ]
    }
}

impl TableRow for TimelinePoint {
    fn headers() -> &'static [&'static str] {
        &[
            "BUCKET_START",
            "BUCKET_END",
            "SESSIONS",
            "UNHANDLED",
            "UNHANDLED_RATE",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.bucket_start.clone(),
            self.bucket_end.clone(),
            self.total_sessions_count.to_string(),
            self.unhandled_sessions_count.to_string(),
            format!("{:.4}", self.unhandled_rate),
        ]
    }
}
