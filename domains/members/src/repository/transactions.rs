//! Transactional free functions for the members domain
//!
//! The invoice.update webhook changes a subscription and appends a history
//! row; the two writes run inside one transaction so a crash between them
//! cannot leave a half-applied delivery.

use crate::domain::entities::{PaymentHistory, SubscriptionStatus};
use chrono::{DateTime, Utc};
use sqlx::{Postgres, Transaction};

/// Update the subscription referenced by an invoice within an existing
/// transaction. A successful invoice also moves the billing period; a
/// failed one only changes the status. Returns the number of rows matched.
pub async fn update_subscription_from_invoice_tx(
    transaction: &mut Transaction<'_, Postgres>,
    subscription_code: &str,
    status: SubscriptionStatus,
    period: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> Result<u64, sqlx::Error> {
    let result = match period {
        Some((start, end)) => {
            sqlx::query(
                r#"
                UPDATE subscriptions
                SET status = $2, start_date = $3, end_date = $4, updated_at = NOW()
                WHERE subscription_code = $1
                "#,
            )
            .bind(subscription_code)
            .bind(status)
            .bind(start)
            .bind(end)
            .execute(&mut **transaction)
            .await?
        }
        None => {
            sqlx::query(
                r#"
                UPDATE subscriptions SET status = $2, updated_at = NOW()
                WHERE subscription_code = $1
                "#,
            )
            .bind(subscription_code)
            .bind(status)
            .execute(&mut **transaction)
            .await?
        }
    };
    Ok(result.rows_affected())
}

/// Append a payment-history row within an existing transaction.
pub async fn append_payment_history_tx(
    transaction: &mut Transaction<'_, Postgres>,
    history: &PaymentHistory,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO payment_history (id, user_id, plan_id, amount, status, reference,
                                     name, email, payment_date, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(history.id)
    .bind(history.user_id)
    .bind(history.plan_id)
    .bind(history.amount)
    .bind(&history.status)
    .bind(&history.reference)
    .bind(&history.name)
    .bind(&history.email)
    .bind(history.payment_date)
    .bind(history.created_at)
    .bind(history.updated_at)
    .execute(&mut **transaction)
    .await?;
    Ok(())
}
