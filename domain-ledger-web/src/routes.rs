//! HTTP 路由
//!
//! 除 `/` 和 `/health` 外所有路由都需要 [`Operator`]。

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing_attributes::instrument;

use domain_ledger_app::AppState;
use domain_ledger_core::types::{DomainSource, ProvisionRequest};

use crate::auth::{Operator, OperatorGate};
use crate::config::AppConfig;
use crate::error::{ApiError, json_payload_error};
use crate::render::ViewRenderer;

/// 创建成功时的固定响应消息
pub const PROVISION_OK_MESSAGE: &str = "successfully sent!";

/// `/domains` 请求体
#[derive(Debug, Deserialize)]
pub struct DomainsRequest {
    #[serde(default)]
    pub kind: Option<String>,
}

/// 注册全部路由
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .content_type_required(true)
            .error_handler(|err, _req| json_payload_error(err).into()),
    )
    .route("/", web::get().to(home))
    .route("/health", web::get().to(health))
    .route("/domains", web::post().to(domains))
    .route("/data", web::post().to(provision))
    .route("/dashboard", web::get().to(dashboard))
    .route("/porkbun", web::get().to(owned_domains))
    .route("/owned-domains", web::get().to(owned_domains));
}

/// 首页，未登录也可访问
async fn home(
    req: HttpRequest,
    gate: web::Data<dyn OperatorGate>,
    renderer: web::Data<dyn ViewRenderer>,
) -> HttpResponse {
    let operator = gate.authenticate(&req);
    let user = json!({
        "name": operator.as_ref().map(|o| o.login.as_str()).unwrap_or_default(),
        "logged_in": operator.is_some(),
    });
    renderer.render(&req, "Index", json!({ "user": user }))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[instrument(skip_all, fields(operator = %operator.login))]
async fn domains(
    operator: Operator,
    state: web::Data<AppState>,
    body: web::Json<DomainsRequest>,
) -> Result<HttpResponse, ApiError> {
    let source = DomainSource::from_kind(body.kind.as_deref());
    let domains = state.reconciliation_service.domain_view(source).await?;
    tracing::debug!(%source, count = domains.len(), "Domain view built");
    Ok(HttpResponse::Ok().json(json!({ "domains": domains })))
}

#[instrument(skip_all, fields(operator = %operator.login, domain = %request.domain, prefix = %request.prefix))]
async fn provision(
    operator: Operator,
    state: web::Data<AppState>,
    request: web::Json<ProvisionRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    request.validate()?;

    let record = state.provisioning_service.provision(request).await?;
    tracing::info!(record_id = %record.id, "Record provisioned");
    Ok(HttpResponse::Ok().json(json!({ "message": PROVISION_OK_MESSAGE })))
}

#[instrument(skip_all, fields(operator = %operator.login))]
async fn dashboard(
    operator: Operator,
    req: HttpRequest,
    state: web::Data<AppState>,
    renderer: web::Data<dyn ViewRenderer>,
    app: web::Data<AppConfig>,
) -> Result<HttpResponse, ApiError> {
    let domains = state.reconciliation_service.owned_domain_names().await?;
    Ok(renderer.render(
        &req,
        "Dashboard",
        json!({ "url": app.public_url, "domains": domains }),
    ))
}

#[instrument(skip_all, fields(operator = %operator.login))]
async fn owned_domains(
    operator: Operator,
    req: HttpRequest,
    state: web::Data<AppState>,
    renderer: web::Data<dyn ViewRenderer>,
) -> Result<HttpResponse, ApiError> {
    let domains = state.reconciliation_service.owned_domains_by_expiry().await?;
    Ok(renderer.render(&req, "Porkbun", json!({ "domains": domains })))
}
