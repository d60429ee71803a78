//! Registration funnel flow against a live database
//!
//! Ignored by default. Point DATABASE_URL at a migrated Postgres
//! instance and run:
//!
//!   cargo test --test registration_flow_test -- --ignored

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use common::{authed_get, json_request, members_app, send};

async fn db_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at a migrated test database");
    PgPoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .expect("database connection")
}

#[tokio::test]
#[ignore = "requires a migrated Postgres database"]
async fn test_registration_funnel_end_to_end() {
    let pool = db_pool().await;
    let app = members_app(pool);

    let email = format!("archer-{}@example.com", uuid::Uuid::new_v4().simple());
    let password = "a-long-enough-password";

    // Step 1: register, landing at the terms stage
    let payload = json!({
        "email": email,
        "password": password,
        "first_name": "Robin",
        "last_name": "Loxley"
    });
    let (status, body) = send(
        app.clone(),
        json_request(Method::POST, "/v1/auth/register", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["data"]["user_id"]
        .as_str()
        .expect("registration returns the new user id")
        .to_string();

    // Step 2: acknowledge terms, moving to the waiver stage
    let payload = json!({
        "member_acknowledgement": true,
        "city": "Lagos",
        "phone_number": "+2348000000000"
    });
    let (status, body) = send(
        app.clone(),
        json_request(
            Method::PUT,
            &format!("/v1/auth/register/acknowledgment/{user_id}"),
            &payload,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated successfully.");

    // Replaying the acknowledgment is rejected: the funnel only moves forward
    let payload = json!({ "member_acknowledgement": true });
    let (status, _) = send(
        app.clone(),
        json_request(
            Method::PUT,
            &format!("/v1/auth/register/acknowledgment/{user_id}"),
            &payload,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Step 3: sign the code of conduct, moving to the payment stage
    let payload = json!({
        "acknowledge_risks": true,
        "consent_to_media": true,
        "initials": "RL"
    });
    let (status, _) = send(
        app.clone(),
        json_request(
            Method::PUT,
            &format!("/v1/auth/register/conduct/{user_id}"),
            &payload,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Step 4: log in and read the account back
    let payload = json!({ "email": email, "password": password });
    let (status, body) = send(
        app.clone(),
        json_request(Method::POST, "/v1/auth/login", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "payment");
    let token = body["data"]["access_token"]
        .as_str()
        .expect("login returns an access token")
        .to_string();

    let (status, body) = send(app, authed_get("/v1/account", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fullName"], "Robin Loxley");
}

#[tokio::test]
#[ignore = "requires a migrated Postgres database"]
async fn test_duplicate_registration_conflicts() {
    let pool = db_pool().await;
    let app = members_app(pool);

    let email = format!("archer-{}@example.com", uuid::Uuid::new_v4().simple());
    let payload = json!({
        "email": email,
        "password": "a-long-enough-password",
        "first_name": "Robin",
        "last_name": "Loxley"
    });

    let (status, _) = send(
        app.clone(),
        json_request(Method::POST, "/v1/auth/register", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        json_request(Method::POST, "/v1/auth/register", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "User already exists.");
}

#[tokio::test]
#[ignore = "requires a migrated Postgres database"]
async fn test_logout_revokes_refresh_token() {
    let pool = db_pool().await;
    let app = members_app(pool);

    let email = format!("archer-{}@example.com", uuid::Uuid::new_v4().simple());
    let password = "a-long-enough-password";
    let payload = json!({
        "email": email,
        "password": password,
        "first_name": "Robin",
        "last_name": "Loxley"
    });
    let (status, _) = send(
        app.clone(),
        json_request(Method::POST, "/v1/auth/register", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let payload = json!({ "email": email, "password": password });
    let (_, body) = send(
        app.clone(),
        json_request(Method::POST, "/v1/auth/login", &payload),
    )
    .await;
    let refresh_token = body["data"]["refresh_token"]
        .as_str()
        .expect("login returns a refresh token")
        .to_string();

    // Refresh works before logout
    let (status, _) = send(app.clone(), authed_get("/v1/auth/refresh", &refresh_token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(app.clone(), authed_get("/v1/auth/logout", &refresh_token)).await;
    assert_eq!(status, StatusCode::OK);

    // The revoked token can no longer mint access tokens
    let (status, _) = send(app, authed_get("/v1/auth/refresh", &refresh_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a migrated Postgres database"]
async fn test_walk_in_day_cap_closes_the_seventh_slot() {
    let pool = db_pool().await;
    let app = common::billing_app(pool.clone());

    let plans = longbow_members::PlanRepository::new(pool.clone());
    if plans.find_walk_in_plan().await.expect("plan lookup").is_none() {
        let day_pass = longbow_members::Plan::new(
            format!("Day Pass {}", uuid::Uuid::new_v4().simple()),
            500000,
            vec!["Range access for one day".to_string()],
            longbow_members::PlanInterval::WalkIn,
            1,
            None,
        )
        .expect("valid plan");
        plans.create(&day_pass).await.expect("plan insert");
    }

    // A far-future day nothing else writes to
    let offset = (uuid::Uuid::new_v4().as_u128() % 20_000 + 1_000) as i64;
    let entry_date = chrono::Utc::now().date_naive() + chrono::Duration::days(offset);

    let walk_ins = longbow_billing::WalkInRepository::new(pool.clone());
    for n in 0..5 {
        let paid = longbow_billing::WalkIn::new(
            format!("visitor-{n}-{}@example.com", uuid::Uuid::new_v4().simple()),
            entry_date,
            500000,
        );
        walk_ins.create(&paid).await.expect("walk-in insert");
    }

    // Five sold: the sixth visitor can still open a checkout
    let payload = json!({
        "email": format!("sixth-{}@example.com", uuid::Uuid::new_v4().simple()),
        "entry_date": entry_date,
    });
    let (status, body) = send(
        app.clone(),
        json_request(Method::POST, "/v1/walk-ins/initialize", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Walk-in payment initialized.");

    // Six sold: the day is full
    let sixth = longbow_billing::WalkIn::new(
        format!("visitor-5-{}@example.com", uuid::Uuid::new_v4().simple()),
        entry_date,
        500000,
    );
    walk_ins.create(&sixth).await.expect("walk-in insert");

    let payload = json!({
        "email": format!("seventh-{}@example.com", uuid::Uuid::new_v4().simple()),
        "entry_date": entry_date,
    });
    let (status, body) = send(
        app,
        json_request(Method::POST, "/v1/walk-ins/initialize", &payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Walk-in slots for this day are filled.");
}

#[tokio::test]
#[ignore = "requires a migrated Postgres database"]
async fn test_replayed_subscription_create_keeps_one_row() {
    let pool = db_pool().await;
    let repos = longbow_members::MembersRepositories::new(pool.clone());

    let tag = uuid::Uuid::new_v4().simple().to_string();
    let customer_code = format!("CUS_{tag}");
    let plan_code = format!("PLN_{tag}");

    let mut member = longbow_members::User::new(
        format!("archer-{tag}@example.com"),
        "hash".to_string(),
        "Marian".to_string(),
        "Fitzwalter".to_string(),
    )
    .expect("valid user");
    member.customer_code = Some(customer_code.clone());
    let member = repos.users.create(&member).await.expect("user insert");

    let plan = longbow_members::Plan::new(
        format!("Monthly {tag}"),
        1500000,
        vec!["Unlimited range time".to_string()],
        longbow_members::PlanInterval::Monthly,
        30,
        Some(plan_code.clone()),
    )
    .expect("valid plan");
    let plan = repos.plans.create(&plan).await.expect("plan insert");

    let dispatcher = longbow_billing::PaymentEventDispatcher::new(
        repos.clone(),
        longbow_billing::BillingRepositories::new(pool.clone()),
        std::sync::Arc::new(longbow_paystack::mock::MockPaymentProvider::new()),
    );

    let payload = json!({
        "status": "active",
        "subscription_code": format!("SUB_{tag}"),
        "email_token": format!("tok_{tag}"),
        "next_payment_date": "2026-10-01T00:00:00Z",
        "createdAt": "2026-09-01T00:00:00Z",
        "plan": { "plan_code": plan_code, "name": "Monthly" },
        "customer": { "customer_code": customer_code, "email": member.email },
    });

    // The provider retries deliveries; both must land on the same row
    for _ in 0..2 {
        let outcome = dispatcher
            .dispatch("subscription.create", payload.clone())
            .await
            .expect("dispatch succeeds");
        assert_eq!(outcome.message, "Subscription create success");
    }

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM subscriptions WHERE user_id = $1 AND plan_id = $2",
    )
    .bind(member.id)
    .bind(plan.id)
    .fetch_one(&pool)
    .await
    .expect("subscription count");
    assert_eq!(rows, 1);
}
