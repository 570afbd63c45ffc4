use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    entity::{
        products::{ActiveModel, Column, Entity as Products},
        purchases::{Column as PurchaseCol, Entity as Purchases},
    },
    error::{AppError, AppResult, Resource},
    models::Product,
    money,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    services::{optional_text, required_text},
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Name.contains(search));
    }

    if let Some(region) = query.region.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Region.eq(region));
    }

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::Name => Column::Name,
    };

    let mut finder = Products::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let items: Vec<Product> = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(Resource::Product))?;
    Ok(ApiResponse::success("Product", product.into(), None))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let name = required_text("name", &payload.name)?;
    let region = required_text("region", &payload.region)?;
    let price = money::to_cents(payload.price)?;
    let now = Utc::now();

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        description: Set(optional_text(payload.description)),
        price: Set(price),
        region: Set(region),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        None,
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

/// Price changes only affect future purchases; existing ones keep their
/// snapshotted totals.
pub async fn update_product(
    state: &AppState,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(Resource::Product))?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(required_text("name", &name)?);
    }
    if let Some(description) = payload.description {
        active.description = Set(optional_text(Some(description)));
    }
    if let Some(price) = payload.price {
        active.price = Set(money::to_cents(price)?);
    }
    if let Some(region) = payload.region {
        active.region = Set(required_text("region", &region)?);
    }
    active.updated_at = Set(Utc::now().into());

    let product = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        None,
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        product.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(state: &AppState, id: Uuid) -> AppResult<()> {
    let referenced = Purchases::find()
        .filter(PurchaseCol::ProductId.eq(id))
        .count(&state.orm)
        .await?;
    if referenced > 0 {
        return Err(AppError::Conflict(
            "product is referenced by existing purchases".into(),
        ));
    }

    let result = Products::delete_by_id(id)
        .exec(&state.orm)
        .await
        .map_err(|err| {
            AppError::from_constraint(err, "product is referenced by existing purchases")
        })?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(Resource::Product));
    }

    audit::record(
        &state.orm,
        None,
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(())
}
