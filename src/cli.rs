//! Command line surface of the `campaign-desk` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::App;
use crate::auth::SessionStatus;
use crate::routes::{Location, Route};
use crate::views::ViewError;

#[derive(Parser)]
#[command(name = "campaign-desk")]
#[command(about = "Admin console for advertising campaigns")]
#[command(version)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'c', long, global = true, env = "CAMPAIGN_DESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Username for the login view, prompted for when missing
    #[arg(short = 'u', long, global = true, env = "CAMPAIGN_DESK_USERNAME")]
    pub username: Option<String>,

    /// Password for the login view, prompted for when missing
    #[arg(long, global = true, env = "CAMPAIGN_DESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe the server and print the session state
    Status,
    /// Sign in, then open a location
    Login {
        /// Where to go afterwards
        #[arg(long, default_value = "/")]
        next: Location,
    },
    /// Sign out
    Logout,
    /// Open any location, e.g. "/?page=2" or "/campaign/3"
    Open { location: Location },
    /// List campaigns
    Campaigns {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Show one campaign with its line items
    Campaign { id: u64 },
    /// Set the adjustment amount of a line item
    Adjust {
        campaign_id: u64,
        line_item_id: u64,
        /// Decimal amount, e.g. -12.5
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Download a CSV export
    Export {
        /// Directory to write into (defaults to export.directory)
        #[arg(short, long, global = true)]
        dir: Option<PathBuf>,

        #[command(subcommand)]
        what: ExportCommand,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

#[derive(Subcommand)]
pub enum ExportCommand {
    /// All campaigns
    Campaigns,
    /// The line items of one campaign
    LineItems { campaign_id: u64 },
}

impl Commands {
    /// Run against `app` and return what to print on stdout.
    pub async fn execute(self, app: &App) -> Result<String, ViewError> {
        match self {
            Commands::Status => {
                let state = app.status().await;
                Ok(match state.status() {
                    SessionStatus::Authenticated => "Signed in\n".to_string(),
                    SessionStatus::Unauthenticated => "Signed out\n".to_string(),
                    SessionStatus::Unknown => "Session state unknown\n".to_string(),
                })
            }
            Commands::Login { next } => app
                .open(Location::login_then(&next))
                .await
                .map(|screen| screen.render()),
            Commands::Logout => {
                let location = app.logout().await;
                Ok(format!("Signed out. Continue at {}\n", location))
            }
            Commands::Open { location } => app.open(location).await.map(|screen| screen.render()),
            Commands::Campaigns { page } => app
                .open(Route::Campaigns { page }.location())
                .await
                .map(|screen| screen.render()),
            Commands::Campaign { id } => app
                .open(Route::CampaignDetail { id }.location())
                .await
                .map(|screen| screen.render()),
            Commands::Adjust {
                campaign_id,
                line_item_id,
                amount,
            } => {
                let (editor, detail) = app.adjust(campaign_id, line_item_id, &amount).await?;
                Ok(format!("{}\n{}", editor.render(), detail.render()))
            }
            Commands::Export { dir, what } => {
                let dir = dir.unwrap_or_else(|| app.state().config.export.directory.clone());
                let download = match what {
                    ExportCommand::Campaigns => app.export_campaigns(&dir).await?,
                    ExportCommand::LineItems { campaign_id } => {
                        app.export_line_items(campaign_id, &dir).await?
                    }
                };
                Ok(format!(
                    "Saved {} ({} bytes)\n",
                    download.path.display(),
                    download.bytes
                ))
            }
            Commands::Schema => crate::config::schema_json()
                .map(|schema| format!("{}\n", schema))
                .map_err(|e| ViewError::new(format!("Could not render schema: {}", e))),
        }
    }
}
