use std::process::ExitCode;
use std::sync::Arc;

use actix_web::{App, HttpServer};
use anyhow::Context;

use domain_ledger_app::AppStateBuilder;
use domain_ledger_app::adapters::DatabaseStore;
use domain_ledger_provider::create_registrar;
use domain_ledger_web::WebState;
use domain_ledger_web::auth::SessionCookieGate;
use domain_ledger_web::config::Config;
use domain_ledger_web::logging::init_logging;
use domain_ledger_web::render::JsonPageRenderer;

#[actix_web::main]
async fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // guard 持有到进程退出
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Domain Ledger stopped: {e:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }

    let store = DatabaseStore::connect(&config.database.url)
        .await
        .context("Failed to open ledger database")?;

    let registrar = create_registrar(
        config.registrar.credentials(),
        config.registrar.client_options(),
    )
    .context("Failed to build registrar client")?;

    let state = AppStateBuilder::new()
        .registrar(registrar)
        .ledger(Arc::new(store))
        .build()?;
    state
        .run_startup()
        .await
        .context("Startup sequence failed")?;

    let gate = SessionCookieGate::new(
        config.auth.session_secret.as_bytes(),
        config.auth.cookie_name.clone(),
        config.auth.admin_name.clone(),
    )?;

    let web_state = WebState::new(
        state,
        Arc::new(gate),
        Arc::new(JsonPageRenderer::default()),
        config.app.clone(),
    );

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        workers = config.server.workers,
        "Starting Domain Ledger"
    );

    HttpServer::new(move || {
        let web_state = web_state.clone();
        App::new().configure(move |cfg| web_state.configure(cfg))
    })
    .workers(config.server.workers)
    .bind((config.server.host.as_str(), config.server.port))
    .with_context(|| {
        format!(
            "Failed to bind {}:{}",
            config.server.host, config.server.port
        )
    })?
    .run()
    .await
    .context("HTTP server error")
}
