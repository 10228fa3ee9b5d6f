//! GeoSage: place extraction, toponym disambiguation and focus scoring.

use std::path::PathBuf;
use std::sync::Arc;

use geosage_core::GeoSageConfig;
use geosage_extract::HeuristicExtractor;
use geosage_gazetteer::SqliteGazetteer;
use geosage_runtime::GeoParser;
use geosage_server::{build_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn open_parser(config: &GeoSageConfig) -> anyhow::Result<GeoParser> {
    let gazetteer = SqliteGazetteer::open(&config.gazetteer_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to open gazetteer {}: {}",
            config.gazetteer_path.display(),
            e
        )
    })?;
    Ok(GeoParser::new(
        Arc::new(HeuristicExtractor::new()),
        Arc::new(gazetteer),
        config.clone(),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config = GeoSageConfig::from_env()?;

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "--validate" | "validate" => {
                if args.len() > 2 {
                    config.gazetteer_path = PathBuf::from(&args[2]);
                }
                match SqliteGazetteer::open(&config.gazetteer_path) {
                    Ok(gazetteer) => {
                        let stats = gazetteer.stats()?;
                        println!("Gazetteer: {}", config.gazetteer_path.display());
                        println!("  records:        {}", stats.total_records);
                        println!("  names:          {}", stats.total_names);
                        println!("  countries:      {}", stats.countries);
                        println!("  admin1 regions: {}", stats.admin1_regions);
                        return Ok(());
                    }
                    Err(e) => {
                        eprintln!("Invalid gazetteer {}: {}", config.gazetteer_path.display(), e);
                        std::process::exit(1);
                    }
                }
            }
            "parse" => {
                if args.len() < 3 {
                    eprintln!("Usage: geosage parse <text>");
                    std::process::exit(1);
                }
                let parser = open_parser(&config)?;
                let envelope = parser.parse_text(&args[2..].join(" "), config.replace_demonyms);
                println!("{}", serde_json::to_string_pretty(&envelope)?);
                return Ok(());
            }
            "lookup" => {
                let id = match args.get(2).and_then(|a| a.parse::<i64>().ok()) {
                    Some(id) => id,
                    None => {
                        eprintln!("Usage: geosage lookup <geoname-id>");
                        std::process::exit(1);
                    }
                };
                let parser = open_parser(&config)?;
                println!("{}", serde_json::to_string_pretty(&parser.geoname_info(id))?);
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("GeoSage: geoparsing server");
                println!();
                println!("Usage: geosage [command]");
                println!();
                println!("Commands:");
                println!("  (none)                   Start the server");
                println!("  validate [gazetteer]     Check a gazetteer database and print its stats");
                println!("  parse <text>             Geoparse text and print the result");
                println!("  lookup <geoname-id>      Print one gazetteer record");
                println!("  help                     Show this help message");
                println!();
                println!("Environment: PORT, GEOSAGE_GAZETTEER, GEOSAGE_MAX_RESULTS,");
                println!("             GEOSAGE_FUZZY, GEOSAGE_REPLACE_DEMONYMS, RUST_LOG");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'geosage help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    info!("Gazetteer: {}", config.gazetteer_path.display());
    let parser = open_parser(&config)?;
    let port = config.port;

    // Build application state
    let state = Arc::new(AppState::new(parser));

    // Build router
    let app = build_router(state.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("GeoSage server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    state.parser.log_stats();
    Ok(())
}
