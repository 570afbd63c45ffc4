mod common;

use std::time::Duration;

use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QuerySelect, Set,
    TransactionTrait,
};
use storefront_api::{
    db::{create_orm_conn, run_migrations},
    dto::purchases::CreatePurchaseRequest,
    entity::{Customers, Products, Purchases, products},
    money,
    services::{purchase_service, report_service},
    state::AppState,
};
use uuid::Uuid;

fn order(product_id: Uuid, email: &str, quantity: i32) -> CreatePurchaseRequest {
    CreatePurchaseRequest {
        product_id: Some(product_id),
        customer_id: Some(email.into()),
        quantity: Some(quantity),
    }
}

// Row locks, isolation levels and the report casts only mean something on
// Postgres, so this flow runs against a real server. The steps share one
// database and run in order inside a single test.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn purchases_lock_commit_cancel_and_report_on_postgres() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) if url.starts_with("postgres") => url,
        _ => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to a Postgres URL to run the Postgres purchase flow."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let alice = common::create_customer(&state, "alice@example.com", "North").await?;
    let bob = common::create_customer(&state, "bob@example.com", "South").await?;
    let product = common::create_product(&state, "P1", 1000, "North").await?;

    // A writer holding the product row makes the purchase wait, and the
    // purchase then prices against the committed edit.
    let writer = state.orm.begin().await?;
    let locked = Products::find_by_id(product.id)
        .lock(LockType::Update)
        .one(&writer)
        .await?
        .expect("product row");

    let pending = tokio::spawn({
        let state = state.clone();
        let request = order(product.id, &alice.email, 2);
        async move { purchase_service::create_purchase(&state, request).await }
    });
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!pending.is_finished(), "purchase did not wait for the product lock");

    let mut repriced: products::ActiveModel = locked.into();
    repriced.price = Set(1500);
    repriced.update(&writer).await?;
    writer.commit().await?;

    let purchase = pending.await??.data.expect("purchase data");
    assert_eq!(purchase.unit_price, money::to_decimal(1500));
    assert_eq!(purchase.total_price, money::to_decimal(3000));

    // Two purchases of one product in parallel, each on its own connection.
    let first = tokio::spawn({
        let state = state.clone();
        let request = order(product.id, &alice.email, 1);
        async move { purchase_service::create_purchase(&state, request).await }
    });
    let second = tokio::spawn({
        let state = state.clone();
        let request = order(product.id, &bob.email, 2);
        async move { purchase_service::create_purchase(&state, request).await }
    });
    first.await??;
    second.await??;
    assert_eq!(Purchases::find().count(&state.orm).await?, 3);

    // A purchase stuck on its insert (the customer row is held, which blocks
    // the foreign key check) is dropped by the timeout and leaves nothing.
    let holder = state.orm.begin().await?;
    Customers::find_by_id(bob.id)
        .lock(LockType::Update)
        .one(&holder)
        .await?
        .expect("customer row");

    let attempt = tokio::time::timeout(
        Duration::from_millis(300),
        purchase_service::create_purchase(&state, order(product.id, &bob.email, 5)),
    )
    .await;
    assert!(attempt.is_err(), "purchase finished while its customer was locked");

    holder.rollback().await?;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let fresh = create_orm_conn(&database_url, 1).await?;
    assert_eq!(Purchases::find().count(&fresh).await?, 3);

    // SUM over bigint is numeric on Postgres; the report casts it back.
    let report = report_service::sales_report(&state)
        .await?
        .data
        .expect("report data");
    assert_eq!(report.total_purchases, 3);
    assert_eq!(report.total_revenue, money::to_decimal(7500));
    assert_eq!(report.average_ticket.to_string(), "25.00");
    assert_eq!(report.sales_by_product.len(), 1);
    assert_eq!(report.sales_by_product[0].total_sales, 5);
    assert_eq!(report.sales_by_product[0].product.price, money::to_decimal(1500));
    assert_eq!(report.sales_by_region[0].region, "North");

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url, 5).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    orm.execute_unprepared(
        "TRUNCATE TABLE purchases, audit_logs, products, customers RESTART IDENTITY CASCADE",
    )
    .await?;

    Ok(AppState::new(orm))
}
