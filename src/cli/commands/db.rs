use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{connect_pool, output_success};
use crate::cli::OutputFormat;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Apply pending migrations")]
    Migrate {
        #[arg(long, help = "Database URL override")]
        database_url: Option<String>,
    },

    #[command(about = "Check database connectivity")]
    Check {
        #[arg(long, help = "Database URL override")]
        database_url: Option<String>,
    },
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DbCommands::Migrate { database_url } => {
            let pool = connect_pool(database_url).await?;
            DatabaseManager::migrate(&pool).await?;
            output_success(&output_format, "Migrations applied", None)
        }
        DbCommands::Check { database_url } => {
            let pool = connect_pool(database_url).await?;
            DatabaseManager::health_check(&pool).await?;
            output_success(
                &output_format,
                "Database reachable",
                Some(json!({ "database": "ok" })),
            )
        }
    }
}
