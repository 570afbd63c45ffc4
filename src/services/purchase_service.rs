use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    audit,
    dto::purchases::{
        CreatePurchaseRequest, PurchaseList, PurchaseOrder, UpdatePurchaseRequest,
        validate_quantity,
    },
    entity::{
        products::{Entity as Products, Model as ProductModel},
        purchases::{
            ActiveModel as PurchaseActive, Column as PurchaseCol, Entity as Purchases,
            Model as PurchaseModel,
        },
    },
    error::{AppError, AppResult, Resource},
    models::PurchaseWithProduct,
    money,
    response::{ApiResponse, Meta},
    services::customer_service,
    state::AppState,
};

/// Creates a purchase for the customer identified by email.
///
/// Product lookup, customer resolution, the insert and the re-read all run
/// in one READ COMMITTED transaction. Any failure rolls it back before the
/// error is returned, so a failed call never leaves a row behind. If the
/// caller drops this future before commit (client gone, request timed out)
/// the transaction is rolled back when it is dropped.
pub async fn create_purchase(
    state: &AppState,
    payload: CreatePurchaseRequest,
) -> AppResult<ApiResponse<PurchaseWithProduct>> {
    let order = PurchaseOrder::try_from(payload)?;

    let txn = state
        .orm
        .begin_with_config(Some(IsolationLevel::ReadCommitted), None)
        .await
        .map_err(|err| AppError::Transaction(err.to_string()))?;

    let purchase = match place_purchase(&txn, &order).await {
        Ok(purchase) => purchase,
        Err(err) => {
            rollback(txn).await;
            tracing::warn!(
                product_id = %order.product_id,
                customer = %order.customer_email,
                error = %err,
                "purchase rolled back"
            );
            return Err(err.into_transaction_error());
        }
    };

    txn.commit()
        .await
        .map_err(|err| AppError::Transaction(err.to_string()))?;

    tracing::info!(
        purchase_id = %purchase.id,
        product_id = %purchase.product_id,
        quantity = purchase.quantity,
        total_price = %purchase.total_price,
        "purchase created"
    );

    audit::record(
        &state.orm,
        Some(order.customer_email.as_str()),
        "purchase_create",
        "purchases",
        serde_json::json!({
            "purchase_id": purchase.id,
            "product_id": purchase.product_id,
            "quantity": purchase.quantity,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Purchase created",
        purchase,
        Some(Meta::empty()),
    ))
}

async fn place_purchase(
    txn: &DatabaseTransaction,
    order: &PurchaseOrder,
) -> AppResult<PurchaseWithProduct> {
    // FOR SHARE: the price we snapshot cannot change, and the row cannot be
    // deleted, until this transaction ends.
    let product = Products::find_by_id(order.product_id)
        .lock(LockType::Share)
        .one(txn)
        .await?
        .ok_or(AppError::NotFound(Resource::Product))?;

    let customer = customer_service::find_by_email(txn, &order.customer_email).await?;

    // An unpriceable line aborts the purchase like any other store failure.
    let total_price = money::line_total(product.price, order.quantity)
        .map_err(|_| AppError::Transaction("total price is out of range".into()))?;
    let now = Utc::now();

    let inserted = PurchaseActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(product.id),
        customer_id: Set(customer.id),
        quantity: Set(order.quantity),
        unit_price: Set(product.price),
        total_price: Set(total_price),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(txn)
    .await?;

    load_with_product(txn, inserted.id).await
}

/// Purchase history for the customer with `email`, newest first.
pub async fn customer_purchases(
    state: &AppState,
    email: &str,
) -> AppResult<ApiResponse<PurchaseList>> {
    let customer = customer_service::find_by_email(&state.orm, email.trim()).await?;

    let items = joined(
        Purchases::find()
            .filter(PurchaseCol::CustomerId.eq(customer.id))
            .find_also_related(Products)
            .order_by_desc(PurchaseCol::CreatedAt)
            .order_by_desc(PurchaseCol::Id)
            .all(&state.orm)
            .await?,
    );

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Purchases", PurchaseList { items }, Some(meta)))
}

pub async fn list_purchases(state: &AppState) -> AppResult<ApiResponse<PurchaseList>> {
    let items = joined(
        Purchases::find()
            .find_also_related(Products)
            .order_by_desc(PurchaseCol::CreatedAt)
            .order_by_desc(PurchaseCol::Id)
            .all(&state.orm)
            .await?,
    );

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Purchases", PurchaseList { items }, Some(meta)))
}

pub async fn get_purchase(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<PurchaseWithProduct>> {
    let purchase = load_with_product(&state.orm, id).await?;
    Ok(ApiResponse::success("Purchase", purchase, None))
}

/// Changes the quantity and recomputes the total from the unit price that
/// was snapshotted at creation, not from the current product price.
pub async fn update_purchase(
    state: &AppState,
    id: Uuid,
    payload: UpdatePurchaseRequest,
) -> AppResult<ApiResponse<PurchaseWithProduct>> {
    let quantity = validate_quantity(payload.quantity)?;

    let txn = state.orm.begin().await?;
    let purchase = match requantify(&txn, id, quantity).await {
        Ok(purchase) => purchase,
        Err(err) => {
            rollback(txn).await;
            return Err(err);
        }
    };
    txn.commit().await?;

    audit::record(
        &state.orm,
        None,
        "purchase_update",
        "purchases",
        serde_json::json!({ "purchase_id": purchase.id, "quantity": purchase.quantity }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        purchase,
        Some(Meta::empty()),
    ))
}

async fn requantify(
    txn: &DatabaseTransaction,
    id: Uuid,
    quantity: i32,
) -> AppResult<PurchaseWithProduct> {
    let existing = Purchases::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or(AppError::NotFound(Resource::Purchase))?;

    let total_price = money::line_total(existing.unit_price, quantity)?;

    let mut active: PurchaseActive = existing.into();
    active.quantity = Set(quantity);
    active.total_price = Set(total_price);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(txn).await?;

    load_with_product(txn, updated.id).await
}

pub async fn delete_purchase(state: &AppState, id: Uuid) -> AppResult<()> {
    let result = Purchases::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(Resource::Purchase));
    }

    audit::record(
        &state.orm,
        None,
        "purchase_delete",
        "purchases",
        serde_json::json!({ "purchase_id": id }),
    )
    .await;

    Ok(())
}

async fn load_with_product<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<PurchaseWithProduct> {
    let (purchase, product) = Purchases::find_by_id(id)
        .find_also_related(Products)
        .one(db)
        .await?
        .ok_or(AppError::NotFound(Resource::Purchase))?;
    let product = product.ok_or(AppError::NotFound(Resource::Product))?;
    Ok(PurchaseWithProduct::new(purchase, product))
}

fn joined(rows: Vec<(PurchaseModel, Option<ProductModel>)>) -> Vec<PurchaseWithProduct> {
    rows.into_iter()
        .filter_map(|(purchase, product)| {
            product.map(|product| PurchaseWithProduct::new(purchase, product))
        })
        .collect()
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(err) = txn.rollback().await {
        tracing::error!(error = %err, "transaction rollback failed");
    }
}
