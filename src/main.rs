use clap::Parser;
use tracing::{error, info};

use campaign_desk::app::App;
use campaign_desk::cli::{Cli, Commands};
use campaign_desk::config::{load_config, schema_json};
use campaign_desk::startup::build_state;
use campaign_desk::utils::logger::init_logging;
use campaign_desk::views::{LoginPrompt, StaticCredentials, TerminalPrompt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Commands::Schema = cli.command {
        match schema_json() {
            Ok(schema) => println!("{}", schema),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let state = match build_state(config) {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let prompt: Box<dyn LoginPrompt> = match (cli.username, cli.password) {
        (Some(username), Some(password)) => Box::new(StaticCredentials::new(username, password)),
        (username, password) => Box::new(TerminalPrompt::new(username, password)),
    };
    let app = App::new(state, prompt);

    match cli.command.execute(&app).await {
        Ok(output) => {
            info!("Command completed");
            print!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
