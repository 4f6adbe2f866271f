use bugsnag_cli::cli::{Cli, Dispatcher, format_from_args, usage_error};
use bugsnag_cli::core::{Settings, classify};
use bugsnag_cli::display::{OutputFormat, Printer};
use bugsnag_cli::storage::Config;
use bugsnag_cli::utils::logging::init_logging;
use bugsnag_cli::AppError;
use clap::Parser;
use clap::error::ErrorKind;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
            _ => {
                let format = format_from_args(std::env::args_os().skip(1))
                    .or_else(|| std::env::var("BUGSNAG_FORMAT").ok());
                let printer = Printer::for_format_name(format.as_deref());
                exit_with(&printer, AppError::from(usage_error(&err)), false);
            }
        },
    };
    init_logging(cli.global.verbose);

    // Load Config
    let config = match Config::load(cli.global.config.clone()) {
        Ok(config) => config,
        Err(err) => {
            let printer = Printer::for_format_name(cli.global.format.as_deref());
            exit_with(&printer, AppError::from(err), cli.global.verbose);
        }
    };

    let settings = Settings::resolve(&cli.global, &config);
    let verbose = settings.verbose;
    let dispatcher = Dispatcher::new(settings, cli.global.api_token.clone());

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        exit_with(dispatcher.printer(), e, verbose);
    }
}

fn exit_with(printer: &Printer, error: AppError, verbose: bool) -> ! {
    printer.print_error(&error.to_string());
    if verbose && printer.error_format() == OutputFormat::Table {
        if let Some(hint) = error.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
    }
    std::process::exit(classify(Some(&error)).code());
}
