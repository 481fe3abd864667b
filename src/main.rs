//! Premium access server.
//!
//! Loads configuration from the environment, wires the commerce store and
//! credential verifier into the access gateway, and serves the HTTP routes.

use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use premium::adapters::auth::{
    FakeCredentialVerifier, HttpKeySource, JwtConfig, JwtCredentialVerifier,
};
use premium::adapters::commerce::{WooCommerceClient, WooCommerceConfig};
use premium::adapters::http::{access_router, AccessAppState};
use premium::application::services::StoreLinks;
use premium::application::{AccessGateway, GatewaySettings};
use premium::config::{AppConfig, AuthConfig, ServerConfig};
use premium::observability::init_tracing;
use premium::ports::CredentialVerifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    if let Err(e) = init_tracing(&config.server) {
        eprintln!("failed to initialise tracing: {}", e);
    }
    config.validate().context("invalid configuration")?;

    let http_client = reqwest::Client::builder()
        .timeout(config.commerce.request_timeout())
        .build()
        .context("failed to build HTTP client")?;

    let store_url = config.commerce.store_url()?;
    let commerce = WooCommerceClient::new(
        WooCommerceConfig::new(
            store_url.clone(),
            config.commerce.consumer_key.clone(),
            config.commerce.consumer_secret.clone(),
        )
        .with_api_version(config.commerce.api_version.clone())
        .with_login_path(config.commerce.login_path.clone())
        .with_subscription_page_cap(config.commerce.subscription_page_cap),
        http_client.clone(),
    );

    let verifier = credential_verifier(&config.auth, http_client);

    let links = StoreLinks::with_autologin_path(store_url, &config.commerce.autologin_path)?;
    let settings = GatewaySettings::new(links)
        .with_email_domain(config.commerce.customer_email_domain.clone())
        .with_ungated_policy(config.access.ungated_policy);

    let gateway = AccessGateway::new(verifier, Arc::new(commerce), settings);

    let app = access_router(AccessAppState::new(Arc::new(gateway)))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        ungated_policy = %config.access.ungated_policy,
        "premium access server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn credential_verifier(
    auth: &AuthConfig,
    http_client: reqwest::Client,
) -> Arc<dyn CredentialVerifier> {
    if auth.fake_mode {
        return Arc::new(FakeCredentialVerifier::new(auth.subject_claim.clone()));
    }

    let mut jwt = JwtConfig::new().with_subject_claim(auth.subject_claim.clone());
    if let Some(issuer) = &auth.issuer {
        jwt = jwt.with_issuer(issuer.clone());
    }
    if let Some(audience) = &auth.audience {
        jwt = jwt.with_audience(audience.clone());
    }

    let keys = HttpKeySource::new(http_client, auth.keys_url.clone());
    Arc::new(JwtCredentialVerifier::new(jwt, Arc::new(keys)))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() && !server.is_production() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
