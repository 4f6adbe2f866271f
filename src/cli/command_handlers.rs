use crate::api::client::BugsnagClient;
use crate::api::resources::ListErrorsOptions;
use crate::cli::main_types::{
    CollaboratorCommands, CommentCommands, ErrorCommands, EventCommands, OrganizationCommands,
    ProjectCommands, ReleaseCommands, StabilityCommands, TrendCommands,
};
use crate::display::{OutputFormat, Printer};
use crate::error::{AppError, CliError};
use crate::storage::Config;
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

/// Unwrap a required flag value; missing or empty is a usage error.
pub fn require(value: Option<String>, flag: &str) -> Result<String, CliError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CliError::MissingFlag {
            flag: flag.to_string(),
        })
}

/// Values collected by `configure`
#[derive(Debug, Clone, Default)]
pub struct ConfigureInput {
    pub api_token: Option<String>,
    pub default_format: Option<String>,
    pub default_base_url: Option<String>,
    pub default_per_page: Option<u32>,
}

#[derive(Default)]
pub struct ConfigureHandler;

impl ConfigureHandler {
    pub fn new() -> Self {
        Self
    }

    /// Overwrite the config file with the given token and defaults.
    pub fn handle(
        &self,
        input: ConfigureInput,
        path: Option<PathBuf>,
        printer: &Printer,
    ) -> Result<(), AppError> {
        let api_token = require(input.api_token, "--api-token")?;

        let config = Config {
            api_token: Some(api_token),
            format: input.default_format.filter(|v| !v.is_empty()),
            base_url: input.default_base_url.filter(|v| !v.is_empty()),
            per_page: input.default_per_page.filter(|&n| n > 0),
        };

        let written = config.save(path)?;
        debug!(path = %written.display(), "saved configuration");

        printer.print_value(&json!({
            "status": "ok",
            "path": written.to_string_lossy(),
        }))?;
        Ok(())
    }
}

/// Runs API-backed commands against one client and prints the results.
pub struct ResourceHandler<'a> {
    client: &'a BugsnagClient,
    printer: &'a Printer,
    all_pages: bool,
}

impl<'a> ResourceHandler<'a> {
    pub fn new(client: &'a BugsnagClient, printer: &'a Printer, all_pages: bool) -> Self {
        Self {
            client,
            printer,
            all_pages,
        }
    }

    pub async fn organizations(&self, command: OrganizationCommands) -> Result<(), AppError> {
        match command {
            OrganizationCommands::List => {
                debug!("listing organizations");
                let (orgs, has_more) = self.client.list_organizations(self.all_pages).await?;
                self.printer.print_list(&orgs, has_more)?;
            }
        }
        Ok(())
    }

    pub async fn projects(&self, command: ProjectCommands) -> Result<(), AppError> {
        match command {
            ProjectCommands::List { org_id } => {
                let org_id = require(org_id, "--org-id")?;
                debug!(%org_id, "listing projects");
                let (projects, has_more) =
                    self.client.list_projects(&org_id, self.all_pages).await?;
                self.printer.print_list(&projects, has_more)?;
            }
            ProjectCommands::Get { project_id } => {
                let project_id = require(project_id, "--project-id")?;
                let project = self.client.get_project(&project_id).await?;
                self.printer.print_single(&project)?;
            }
        }
        Ok(())
    }

    pub async fn errors(&self, command: ErrorCommands) -> Result<(), AppError> {
        match command {
            ErrorCommands::List {
                project_id,
                status,
                severity,
                sort,
                direction,
            } => {
                let options = ListErrorsOptions {
                    project_id: require(project_id, "--project-id")?,
                    status,
                    severity,
                    sort,
                    direction,
                    all_pages: self.all_pages,
                };
                debug!(project_id = %options.project_id, "listing errors");
                let (errors, has_more) = self.client.list_errors(&options).await?;
                self.printer.print_list(&errors, has_more)?;
            }
            ErrorCommands::Get {
                project_id,
                error_id,
            } => {
                let project_id = require(project_id, "--project-id")?;
                let error_id = require(error_id, "--error-id")?;
                let error = self.client.get_error(&project_id, &error_id).await?;
                self.printer.print_single(&error)?;
            }
        }
        Ok(())
    }

    pub async fn events(&self, command: EventCommands) -> Result<(), AppError> {
        match command {
            EventCommands::List {
                project_id,
                error_id,
            } => {
                let project_id = require(project_id, "--project-id")?;
                debug!(%project_id, %error_id, "listing events");
                let (events, has_more) = self
                    .client
                    .list_events(&project_id, &error_id, self.all_pages)
                    .await?;
                self.printer.print_list(&events, has_more)?;
            }
            EventCommands::Get {
                project_id,
                event_id,
            } => {
                let project_id = require(project_id, "--project-id")?;
                let event_id = require(event_id, "--event-id")?;
                let event = self.client.get_event(&project_id, &event_id).await?;
                self.printer.print_single(&event)?;
            }
        }
        Ok(())
    }

    pub async fn comments(&self, command: CommentCommands) -> Result<(), AppError> {
        match command {
            CommentCommands::List {
                project_id,
                error_id,
            } => {
                let project_id = require(project_id, "--project-id")?;
                let error_id = require(error_id, "--error-id")?;
                let (comments, has_more) = self
                    .client
                    .list_comments(&project_id, &error_id, self.all_pages)
                    .await?;
                self.printer.print_list(&comments, has_more)?;
            }
            CommentCommands::Create {
                project_id,
                error_id,
                message,
            } => {
                let project_id = require(project_id, "--project-id")?;
                let error_id = require(error_id, "--error-id")?;
                let message = require(message, "--message")?;
                let comment = self
                    .client
                    .create_comment(&project_id, &error_id, &message)
                    .await?;
                self.printer.print_single(&comment)?;
            }
        }
        Ok(())
    }

    pub async fn releases(&self, command: ReleaseCommands) -> Result<(), AppError> {
        match command {
            ReleaseCommands::List { project_id } => {
                let project_id = require(project_id, "--project-id")?;
                let (releases, has_more) = self
                    .client
                    .list_releases(&project_id, self.all_pages)
                    .await?;
                self.printer.print_list(&releases, has_more)?;
            }
        }
        Ok(())
    }

    pub async fn collaborators(&self, command: CollaboratorCommands) -> Result<(), AppError> {
        match command {
            CollaboratorCommands::List { org_id } => {
                let org_id = require(org_id, "--org-id")?;
                let (collaborators, has_more) = self
                    .client
                    .list_collaborators(&org_id, self.all_pages)
                    .await?;
                self.printer.print_list(&collaborators, has_more)?;
            }
        }
        Ok(())
    }

    pub async fn trends(&self, command: TrendCommands) -> Result<(), AppError> {
        let buckets = match command {
            TrendCommands::Project {
                project_id,
                resolution,
                buckets_count,
            } => {
                let project_id = require(project_id, "--project-id")?;
                self.client
                    .get_project_trends(&project_id, &resolution, buckets_count)
                    .await?
            }
            TrendCommands::Error {
                project_id,
                error_id,
            } => {
                let project_id = require(project_id, "--project-id")?;
                let error_id = require(error_id, "--error-id")?;
                self.client.get_error_trends(&project_id, &error_id).await?
            }
        };
        self.printer.print_list(&buckets, false)?;
        Ok(())
    }

    pub async fn stability(&self, command: StabilityCommands) -> Result<(), AppError> {
        match command {
            StabilityCommands::Trend {
                project_id,
                release_stage,
            } => {
                let project_id = require(project_id, "--project-id")?;
                let trend = self
                    .client
                    .get_stability_trend(&project_id, &release_stage)
                    .await?;

                // Tables show the timeline; JSON keeps the whole trend object
                match self.printer.format() {
                    OutputFormat::Table => self.printer.print_list(&trend.timeline_points, false)?,
                    OutputFormat::Json => self.printer.print_value(&trend)?,
                }
            }
        }
        Ok(())
    }
}
