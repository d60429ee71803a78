//! Longbow application composition root
//!
//! Composes all domain routers into a single application.

use axum::Router;
use longbow_auth::{AuthBackend, AuthConfig};
use longbow_billing::{BillingRepositories, BillingState, PaymentEventDispatcher};
use longbow_common::Config;
use longbow_content::{ContentRepositories, ContentState};
use longbow_email::{EmailConfig, EmailServiceFactory};
use longbow_members::{MembersRepositories, MembersState};
use longbow_paystack::{client::PaystackClient, PaymentProvider, PaystackConfig};
use sqlx::PgPool;
use std::sync::Arc;

/// Create the main application router with all routes and middleware
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let members_repos = MembersRepositories::new(pool.clone());
    let billing_repos = BillingRepositories::new(pool.clone());
    let content_repos = ContentRepositories::new(pool.clone());

    let auth = AuthBackend::new(pool, AuthConfig::new(config.jwt_secret.clone()));

    let paystack_config = PaystackConfig {
        secret_key: config.paystack_secret_key.clone(),
        base_url: std::env::var("PAYSTACK_BASE_URL")
            .unwrap_or_else(|_| "https://api.paystack.co".to_string()),
    };
    let payments: Arc<dyn PaymentProvider> = Arc::new(PaystackClient::new(paystack_config));

    let email_config = EmailConfig::from_env()?;
    let email_service = EmailServiceFactory::create(email_config).await?;
    let email = Arc::from(email_service);

    let dispatcher = PaymentEventDispatcher::new(
        members_repos.clone(),
        billing_repos.clone(),
        Arc::clone(&payments),
    );

    let members_state = MembersState {
        repos: members_repos.clone(),
        auth: auth.clone(),
        payments: Arc::clone(&payments),
    };

    let billing_state = BillingState {
        members: members_repos,
        billing: billing_repos,
        dispatcher,
        payments,
        auth: auth.clone(),
        webhook_secret: config.paystack_secret_key,
    };

    let content_state = ContentState {
        repos: content_repos,
        auth,
        email,
    };

    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Longbow API v0.0.1-SNAPSHOT" }),
        )
        .merge(longbow_members::routes(members_state))
        .merge(longbow_billing::routes(billing_state))
        .merge(longbow_content::routes(content_state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
