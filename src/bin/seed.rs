use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{customers, products},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url, 1).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    ensure_customer(&orm, "alice@example.com", "Alice", "North").await?;
    ensure_customer(&orm, "bob@example.com", "Bob", "South").await?;
    seed_products(&orm).await?;

    println!("Seed completed");
    Ok(())
}

async fn ensure_customer(
    orm: &DatabaseConnection,
    email: &str,
    name: &str,
    region: &str,
) -> anyhow::Result<Uuid> {
    let existing = customers::Entity::find()
        .filter(customers::Column::Email.eq(email))
        .one(orm)
        .await?;
    if let Some(customer) = existing {
        return Ok(customer.id);
    }

    let now = Utc::now();
    let customer = customers::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        name: Set(name.to_string()),
        region: Set(region.to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(orm)
    .await?;

    println!("Ensured customer {email}");
    Ok(customer.id)
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let catalog = vec![
        ("Axum Hoodie", "Warm hoodie for Rustaceans", 5500, "North"),
        ("Ferris Mug", "Coffee tastes better with Ferris", 1200, "North"),
        ("Rust Sticker Pack", "Decorate your laptop", 500, "South"),
        ("E-book: Async Rust", "Learn async Rust patterns", 2500, "South"),
    ];

    for (name, desc, price, region) in catalog {
        let exists = products::Entity::find()
            .filter(products::Column::Name.eq(name))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let now = Utc::now();
        products::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(Some(desc.to_string())),
            price: Set(price),
            region: Set(region.to_string()),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(orm)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
