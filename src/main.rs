use plugin_registry::cli::{handle_add, handle_update, CliArgs, Commands};
use plugin_registry::util::{init_logging, parse_level, LoggingConfig};
use plugin_registry::{RegistryConfig, NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::{debug, error, Level};

fn main() {
    let args = CliArgs::parse();

    let mut config = RegistryConfig::default();
    if let Some(path) = &args.registry {
        config.registry_path = path.clone();
    }
    if let Some(path) = &args.document {
        config.document_path = path.clone();
    }

    init_logging(LoggingConfig {
        level: log_level(&args, &config),
        use_json: config.log_json,
        ansi: atty::is(atty::Stream::Stderr),
        ..Default::default()
    });

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    if let Err(e) = config.validate() {
        error!("{}", e);
        process::exit(2);
    }

    let exit_code = match &args.command {
        Commands::Add(add_args) => handle_add(add_args, &config),
        Commands::Update(update_args) => handle_update(update_args, &config),
    };

    process::exit(exit_code);
}

fn log_level(args: &CliArgs, config: &RegistryConfig) -> Level {
    if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    }
}
