use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use qna_api::config::ApiConfig;
use qna_api::middleware::AuthenticationMiddleware;
use qna_api::storage::SqliteQuestionStore;
use qna_api::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "qna-api", about = "Serves received questions and their answers")]
struct Args {
    /// Path to the config file (defaults to ~/.config/qna/api.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let (config, config_path) = match args.config {
        Some(path) => (ApiConfig::load_from(&path)?, path),
        None => ApiConfig::load()?,
    };
    info!("Loaded config from {}", config_path.display());

    let store = SqliteQuestionStore::open(&config.database.path)?;
    info!("Using database at {}", config.database.path.display());

    let state = web::Data::new(AppState::new(
        Arc::new(store),
        config.auth.jwt_secret.clone(),
    ));
    let allowed_origins = config.allowed_origins().to_vec();

    let bind_addr = config.bind_addr();
    info!("Starting qna-api server at http://{}", bind_addr);

    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(AuthenticationMiddleware)
            .wrap(cors)
            .wrap(Logger::default())
            .configure(qna_api::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
