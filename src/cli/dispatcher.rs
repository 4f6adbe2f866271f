use crate::api::client::BugsnagClient;
use crate::cli::command_handlers::{ConfigureHandler, ConfigureInput, ResourceHandler};
use crate::cli::main_types::Commands;
use crate::core::Settings;
use crate::display::Printer;
use crate::error::AppError;
use tracing::debug;

pub struct Dispatcher {
    settings: Settings,
    printer: Printer,
    /// Token given on the command line or in the environment, ignoring the config file
    explicit_token: Option<String>,
}

impl Dispatcher {
    pub fn new(settings: Settings, explicit_token: Option<String>) -> Self {
        let printer = Printer::new(settings.format).with_error_format(settings.error_format);
        Self {
            settings,
            printer,
            explicit_token,
        }
    }

    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Version => {
                println!("bugsnag-cli version {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            Commands::Configure {
                default_format,
                default_base_url,
                default_per_page,
            } => {
                let input = ConfigureInput {
                    api_token: self.explicit_token.clone(),
                    default_format,
                    default_base_url,
                    default_per_page,
                };
                ConfigureHandler::new().handle(
                    input,
                    self.settings.config_path.clone(),
                    &self.printer,
                )
            }
            command => self.dispatch_resource(command).await,
        }
    }

    async fn dispatch_resource(&self, command: Commands) -> Result<(), AppError> {
        let client = BugsnagClient::new(self.settings.client_config()?)?;
        debug!(
            base_url = %self.settings.base_url,
            per_page = self.settings.per_page,
            all_pages = self.settings.all_pages,
            "dispatching API command"
        );

        let handler = ResourceHandler::new(&client, &self.printer, self.settings.all_pages);
        match command {
            Commands::Organizations { command } => handler.organizations(command).await,
            Commands::Projects { command } => handler.projects(command).await,
            Commands::Errors { command } => handler.errors(command).await,
            Commands::Events { command } => handler.events(command).await,
            Commands::Comments { command } => handler.comments(command).await,
            Commands::Releases { command } => handler.releases(command).await,
            Commands::Collaborators { command } => handler.collaborators(command).await,
            Commands::Trends { command } => handler.trends(command).await,
            Commands::Stability { command } => handler.stability(command).await,
            Commands::Version | Commands::Configure { .. } => Ok(()),
        }
    }
}
