use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
    entity::{
        customers::{ActiveModel, Column, Entity as Customers, Model as CustomerModel},
        purchases::{Column as PurchaseCol, Entity as Purchases},
    },
    error::{AppError, AppResult, Resource},
    models::Customer,
    response::{ApiResponse, Meta},
    routes::params::CustomerQuery,
    services::required_text,
    state::AppState,
};

const DUPLICATE_EMAIL: &str = "a customer with this email already exists";

/// Resolves the external email key to the stored customer.
pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<CustomerModel> {
    Customers::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or(AppError::NotFound(Resource::Customer))
}

pub async fn list_customers(
    state: &AppState,
    query: CustomerQuery,
) -> AppResult<ApiResponse<CustomerList>> {
    let mut condition = Condition::all();
    if let Some(region) = query.region.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(Column::Region.eq(region));
    }

    let items: Vec<Customer> = Customers::find()
        .filter(condition)
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Email)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Customer::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Customers", CustomerList { items }, Some(meta)))
}

pub async fn get_customer(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Customer>> {
    let customer = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(Resource::Customer))?;
    Ok(ApiResponse::success("Customer", customer.into(), None))
}

pub async fn create_customer(
    state: &AppState,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let email = validate_email(&payload.email)?;
    let name = required_text("name", &payload.name)?;
    let region = required_text("region", &payload.region)?;

    ensure_email_free(state, &email, None).await?;

    let now = Utc::now();
    let customer = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        name: Set(name),
        region: Set(region),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| AppError::from_constraint(err, DUPLICATE_EMAIL))?;

    audit::record(
        &state.orm,
        Some(customer.email.as_str()),
        "customer_create",
        "customers",
        serde_json::json!({ "customer_id": customer.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Customer created",
        customer.into(),
        Some(Meta::empty()),
    ))
}

pub async fn update_customer(
    state: &AppState,
    id: Uuid,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let existing = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound(Resource::Customer))?;

    let mut active: ActiveModel = existing.into();
    if let Some(email) = payload.email {
        let email = validate_email(&email)?;
        ensure_email_free(state, &email, Some(id)).await?;
        active.email = Set(email);
    }
    if let Some(name) = payload.name {
        active.name = Set(required_text("name", &name)?);
    }
    if let Some(region) = payload.region {
        active.region = Set(required_text("region", &region)?);
    }
    active.updated_at = Set(Utc::now().into());

    let customer = active
        .update(&state.orm)
        .await
        .map_err(|err| AppError::from_constraint(err, DUPLICATE_EMAIL))?;

    audit::record(
        &state.orm,
        Some(customer.email.as_str()),
        "customer_update",
        "customers",
        serde_json::json!({ "customer_id": customer.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        customer.into(),
        Some(Meta::empty()),
    ))
}

pub async fn delete_customer(state: &AppState, id: Uuid) -> AppResult<()> {
    let referenced = Purchases::find()
        .filter(PurchaseCol::CustomerId.eq(id))
        .count(&state.orm)
        .await?;
    if referenced > 0 {
        return Err(AppError::Conflict(
            "customer is referenced by existing purchases".into(),
        ));
    }

    let result = Customers::delete_by_id(id)
        .exec(&state.orm)
        .await
        .map_err(|err| {
            AppError::from_constraint(err, "customer is referenced by existing purchases")
        })?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(Resource::Customer));
    }

    audit::record(
        &state.orm,
        None,
        "customer_delete",
        "customers",
        serde_json::json!({ "customer_id": id }),
    )
    .await;

    Ok(())
}

fn validate_email(email: &str) -> AppResult<String> {
    let email = required_text("email", email)?;
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        return Err(AppError::BadRequest("email is not valid".into()));
    }
    Ok(email)
}

async fn ensure_email_free(state: &AppState, email: &str, except: Option<Uuid>) -> AppResult<()> {
    let mut condition = Condition::all().add(Column::Email.eq(email));
    if let Some(id) = except {
        condition = condition.add(Column::Id.ne(id));
    }
    let taken = Customers::find()
        .filter(condition)
        .count(&state.orm)
        .await?;
    if taken > 0 {
        return Err(AppError::Conflict(DUPLICATE_EMAIL.into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_email;

    #[test]
    fn email_needs_both_sides_of_the_at_sign() {
        assert_eq!(validate_email(" bob@example.com ").unwrap(), "bob@example.com");
        assert!(validate_email("bob").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("bob@").is_err());
    }
}
