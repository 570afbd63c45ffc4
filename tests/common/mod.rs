#![allow(dead_code)]

use chrono::Utc;
use sea_orm::{ActiveModelTrait, Set};
use storefront_api::{
    db::{create_orm_conn, run_migrations},
    entity::{customers, products},
    state::AppState,
};
use uuid::Uuid;

/// A fresh in-memory database with the schema applied.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:", 1).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm))
}

pub async fn create_customer(
    state: &AppState,
    email: &str,
    region: &str,
) -> anyhow::Result<customers::Model> {
    let now = Utc::now();
    let customer = customers::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.into()),
        name: Set(email.split('@').next().unwrap_or(email).into()),
        region: Set(region.into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(customer)
}

/// Inserts a product priced at `price_cents`.
pub async fn create_product(
    state: &AppState,
    name: &str,
    price_cents: i64,
    region: &str,
) -> anyhow::Result<products::Model> {
    let now = Utc::now();
    let product = products::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        description: Set(Some(format!("{name} for testing"))),
        price: Set(price_cents),
        region: Set(region.into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}
