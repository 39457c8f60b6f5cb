use clap::Parser;
use legalease::application::answer::QueryOutcome;
use legalease::cli::commands::{Cli, Commands};
use legalease::config::Settings;
use legalease::http::routes::NO_DOCUMENTS;
use legalease::LegalEase;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading configuration: {e}");
            std::process::exit(1);
        }
    };

    let app = match LegalEase::new(&settings) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing LegalEase: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(app, &settings, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(
    app: LegalEase,
    settings: &Settings,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind.clone());
            legalease::http::serve(Arc::new(app), &bind).await?;
        }
        Commands::Ingest { path, text } => {
            let result = match (path, text) {
                (_, Some(text)) => app.ingest_text(&text).await?,
                (Some(path), None) => {
                    let bytes = std::fs::read(&path)?;
                    let name = path.to_string_lossy().into_owned();
                    app.ingest_document(&name, bytes).await?
                }
                (None, None) => return Err("nothing to ingest".into()),
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Search { query, top_k } => {
            let hits = app.search(&query, Some(top_k)).await?;
            if hits.is_empty() && app.health().await.index_size == 0 {
                eprintln!("{NO_DOCUMENTS}");
            }
            println!("{}", serde_json::to_string_pretty(&hits)?);
        }
        Commands::Ask { messages, top_k } => match app.ask(messages, Some(top_k)).await? {
            QueryOutcome::NoDocuments => eprintln!("{NO_DOCUMENTS}"),
            QueryOutcome::Answered(answer) => {
                println!("{}", serde_json::to_string_pretty(&answer)?);
            }
        },
        Commands::Chunk { id } => {
            let chunk = app.chunk(id).await?;
            println!("{}", serde_json::to_string_pretty(&chunk)?);
        }
        Commands::Health => {
            println!("{}", serde_json::to_string_pretty(&app.health().await)?);
        }
    }
    Ok(())
}
