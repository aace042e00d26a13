//! Domain Ledger web backend.
//!
//! Thin actix-web layer over `domain-ledger-app`: configuration, logging,
//! the operator gate, page rendering and the HTTP routes.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod routes;

use std::sync::Arc;

use actix_web::web;

use domain_ledger_app::AppState;

use auth::OperatorGate;
use config::AppConfig;
use render::ViewRenderer;

/// Shared state handed to every worker.
#[derive(Clone)]
pub struct WebState {
    pub app: web::Data<AppState>,
    pub gate: web::Data<dyn OperatorGate>,
    pub renderer: web::Data<dyn ViewRenderer>,
    pub site: web::Data<AppConfig>,
}

impl WebState {
    pub fn new(
        app: AppState,
        gate: Arc<dyn OperatorGate>,
        renderer: Arc<dyn ViewRenderer>,
        site: AppConfig,
    ) -> Self {
        Self {
            app: web::Data::new(app),
            gate: web::Data::from(gate),
            renderer: web::Data::from(renderer),
            site: web::Data::new(site),
        }
    }

    /// Register app data and routes on an `App`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.app.clone())
            .app_data(self.gate.clone())
            .app_data(self.renderer.clone())
            .app_data(self.site.clone());
        routes::configure(cfg);
    }
}
