//! Dealer portal demo
//!
//! A small axum application wired with DealerGate. The upstream session
//! layer is simulated with request headers:
//!
//! ```text
//! curl -H 'x-dealergate-role: dealer_admin' -H 'x-dealergate-dealer-id: D1' \
//!     http://127.0.0.1:3000/dealers/D1/claims
//! ```
//!
//! Pass a JSON config file as the first argument to override the defaults.

use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use dealergate_core::prelude::*;
use dealergate_guards::prelude::*;
use dealergate_server::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

type AppState = Arc<GuardConfig>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            "dealer_portal=info,dealergate_guards=info,dealergate_server=info".to_string()
        }))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GuardConfig::from_file(&path)?,
        None => GuardConfig::development(),
    };
    info!(
        redirect = %config.default_redirect,
        audit = config.audit_enabled,
        "Loaded guard configuration"
    );

    let app = portal(Arc::new(config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    info!("Dealer portal listening on http://127.0.0.1:3000");
    axum::serve(listener, app).await?;

    Ok(())
}

fn portal(config: AppState) -> Router {
    let audit = config.audit_enabled;

    let admin = Router::<AppState>::new()
        .route("/admin/dealers", get(list_dealers))
        .route_layer(GuardLayer::admin().with_audit_logging(audit));

    let platform = Router::<AppState>::new()
        .route("/platform/settings", get(platform_settings))
        .route_layer(GuardLayer::super_admin().with_audit_logging(audit));

    let dealers = Router::<AppState>::new()
        .route("/dealers/:dealer_id/claims", get(warranty_claims))
        .route(
            "/dealers/:dealer_id/inventory",
            get(rv_inventory).route_layer(GuardLayer::dealer_admin().with_audit_logging(audit)),
        );

    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/nav", get(navigation))
        .route("/settings", get(settings_page))
        .merge(admin)
        .merge(platform)
        .merge(dealers)
        .layer(TraceLayer::new_for_http())
        .layer(PrincipalLayer::new(config.headers.clone()))
        .with_state(config)
}

async fn dashboard(CurrentPrincipal(principal): CurrentPrincipal) -> axum::Json<Value> {
    let badge = principal.role.display();
    axum::Json(json!({
        "role": principal.role,
        "label": badge.label,
        "color": badge.color,
        "dealer_id": principal.dealer_id,
    }))
}

/// Server-rendered navigation; links are gated without redirecting.
async fn navigation(CurrentPrincipal(principal): CurrentPrincipal) -> Html<String> {
    let mut links = vec![r#"<a href="/dashboard">Dashboard</a>"#.to_string()];

    if let Some(dealer) = &principal.dealer_id {
        let claims = AccessGate::dealer_scoped(dealer.clone()).render(Some(&principal), || {
            format!(r#"<a href="/dealers/{dealer}/claims">Warranty claims</a>"#)
        });
        links.extend(claims.content());
    }

    let admin = AccessGate::admin_only().render(Some(&principal), || {
        r#"<a href="/admin/dealers">Dealers</a>"#.to_string()
    });
    links.extend(admin.content());

    let platform = AccessGate::super_admin_only().render(Some(&principal), || {
        r#"<a href="/platform/settings">Platform</a>"#.to_string()
    });
    links.extend(platform.content());

    Html(format!("<nav>{}</nav>", links.join(" | ")))
}

/// Server-rendered page behind a redirect guard.
async fn settings_page(
    State(config): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Response {
    let navigator = Arc::new(RecordingNavigator::new());
    let identity = Arc::new(StaticIdentity::principal(principal));
    let handle = RoleGuard::from_config(Role::SuperAdmin, &config).mount(identity, navigator.clone());

    if let Some(target) = navigator.last() {
        return Redirect::to(target.as_str()).into_response();
    }

    let page = handle
        .render(|| "<h1>Platform settings</h1>".to_string())
        .or_spinner(|| config.loading_placeholder.clone())
        .unwrap_or_default();
    Html(page).into_response()
}

async fn list_dealers() -> axum::Json<Value> {
    axum::Json(json!({ "dealers": ["D1", "D2", "D3"] }))
}

async fn platform_settings() -> axum::Json<Value> {
    axum::Json(json!({ "maintenance": false }))
}

async fn warranty_claims(scope: DealerScope) -> axum::Json<Value> {
    axum::Json(json!({
        "dealer_id": scope.dealer_id,
        "claims": [],
    }))
}

async fn rv_inventory(scope: DealerScope) -> axum::Json<Value> {
    axum::Json(json!({
        "dealer_id": scope.dealer_id,
        "units": [],
        "viewer": scope.principal.role.label(),
    }))
}
