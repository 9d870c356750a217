use clap::Parser;
use score_sync::utils::logger;
use score_sync::{CliConfig, FootballDataClient, JsonFileStore, Settings, SyncEngine, TomlConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_job_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting score-sync");

    // A config file provides the base settings; flags passed explicitly on
    // the command line win over the file's values.
    let resolved = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .and_then(TomlConfig::into_settings)
            .and_then(|base| cli.clone().overlay(base)),
        None => cli.clone().into_settings(),
    };
    let settings: Settings = match resolved {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let client = FootballDataClient::new(&settings.api_url, &settings.api_token, settings.timeout)?;
    let store = JsonFileStore::new(&settings.store_path);
    let engine = SyncEngine::new(client, store, settings.sync_options());

    match engine.sync_fixtures().await {
        Ok(report) => {
            tracing::info!("✅ Sync completed");
            println!(
                "✅ Synced {} fixtures ({} fetched, {} skipped, {} failed) into {}",
                report.upserted,
                report.fetched,
                report.skipped_unknown_league + report.skipped_unparseable,
                report.failed,
                settings.store_path.display()
            );
        }
        Err(e) => {
            tracing::error!("❌ Sync failed: {}", e);
            eprintln!("❌ {}", e);
            // Transient network trouble is recovered by the next scheduled
            // run; anything else deserves a non-zero exit.
            let exit_code = if e.is_transient() { 2 } else { 1 };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
