use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{
        purchases::{CreatePurchaseRequest, PurchaseList, UpdatePurchaseRequest},
        reports::SalesReport,
    },
    error::AppResult,
    extract::AppJson,
    models::PurchaseWithProduct,
    response::ApiResponse,
    services::{purchase_service, report_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_purchases).post(create_purchase))
        .route("/report", get(sales_report))
        .route("/customer/{customer_id}", get(customer_purchases))
        .route(
            "/{id}",
            get(get_purchase).put(update_purchase).delete(delete_purchase),
        )
}

#[utoipa::path(
    post,
    path = "/api/purchases",
    request_body = CreatePurchaseRequest,
    responses(
        (status = 201, description = "Purchase created", body = ApiResponse<PurchaseWithProduct>),
        (status = 400, description = "Invalid request or purchase failed"),
        (status = 404, description = "Product or customer not found"),
    ),
    tag = "Purchases"
)]
pub async fn create_purchase(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePurchaseRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PurchaseWithProduct>>)> {
    let resp = purchase_service::create_purchase(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/purchases/customer/{customer_id}",
    params(
        ("customer_id" = String, Path, description = "Customer email")
    ),
    responses(
        (status = 200, description = "Purchases of the customer, newest first", body = ApiResponse<PurchaseList>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Purchases"
)]
pub async fn customer_purchases(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> AppResult<Json<ApiResponse<PurchaseList>>> {
    let resp = purchase_service::customer_purchases(&state, &customer_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/purchases/report",
    responses(
        (status = 200, description = "Sales report for the admin dashboard", body = ApiResponse<SalesReport>),
        (status = 500, description = "Report could not be computed"),
    ),
    tag = "Reports"
)]
pub async fn sales_report(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SalesReport>>> {
    let resp = report_service::sales_report(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/purchases",
    responses(
        (status = 200, description = "All purchases, newest first", body = ApiResponse<PurchaseList>)
    ),
    tag = "Purchases"
)]
pub async fn list_purchases(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PurchaseList>>> {
    let resp = purchase_service::list_purchases(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/purchases/{id}",
    params(
        ("id" = Uuid, Path, description = "Purchase ID")
    ),
    responses(
        (status = 200, description = "Get purchase", body = ApiResponse<PurchaseWithProduct>),
        (status = 404, description = "Purchase not found"),
    ),
    tag = "Purchases"
)]
pub async fn get_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PurchaseWithProduct>>> {
    let resp = purchase_service::get_purchase(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/purchases/{id}",
    params(
        ("id" = Uuid, Path, description = "Purchase ID")
    ),
    request_body = UpdatePurchaseRequest,
    responses(
        (status = 200, description = "Updated purchase", body = ApiResponse<PurchaseWithProduct>),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Purchase not found"),
    ),
    tag = "Purchases"
)]
pub async fn update_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdatePurchaseRequest>,
) -> AppResult<Json<ApiResponse<PurchaseWithProduct>>> {
    let resp = purchase_service::update_purchase(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/purchases/{id}",
    params(
        ("id" = Uuid, Path, description = "Purchase ID")
    ),
    responses(
        (status = 204, description = "Deleted purchase"),
        (status = 404, description = "Purchase not found"),
    ),
    tag = "Purchases"
)]
pub async fn delete_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    purchase_service::delete_purchase(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
