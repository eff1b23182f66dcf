use clap::Parser;
use sako::{
    cli::{self, AppContext, Cli},
    config::{database, settings},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible); stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenvy::dotenv().ok();

    // 3. Parse arguments after .env so `DATABASE_URL` can come from it
    let args = Cli::parse();

    // 4. Load settings
    let app_settings = settings::load_settings_or_default(&args.config)
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;

    // 5. Connect and make sure the tables exist
    let database_url = args
        .database_url
        .clone()
        .unwrap_or_else(database::get_database_url);
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database ready at {}", database_url))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 6. Run the command
    let ctx = AppContext::new(db, app_settings);
    cli::run(&ctx, args.command).await
}
