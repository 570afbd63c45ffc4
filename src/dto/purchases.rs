use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::PurchaseWithProduct,
};

/// Body of `POST /purchases`. `customerId` carries the customer's email.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub product_id: Option<Uuid>,
    pub customer_id: Option<String>,
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePurchaseRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PurchaseList {
    #[schema(value_type = Vec<PurchaseWithProduct>)]
    pub items: Vec<PurchaseWithProduct>,
}

/// A purchase request that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrder {
    pub product_id: Uuid,
    pub customer_email: String,
    pub quantity: i32,
}

impl TryFrom<CreatePurchaseRequest> for PurchaseOrder {
    type Error = AppError;

    fn try_from(payload: CreatePurchaseRequest) -> AppResult<Self> {
        let product_id = payload
            .product_id
            .ok_or_else(|| AppError::BadRequest("productId is required".into()))?;
        let customer_email = payload
            .customer_id
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AppError::BadRequest("customerId is required".into()))?;
        let quantity = validate_quantity(payload.quantity.unwrap_or(1))?;
        Ok(PurchaseOrder {
            product_id,
            customer_email,
            quantity,
        })
    }
}

pub fn validate_quantity(quantity: i32) -> AppResult<i32> {
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".into(),
        ));
    }
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_defaults_to_one() {
        let order = PurchaseOrder::try_from(CreatePurchaseRequest {
            product_id: Some(Uuid::new_v4()),
            customer_id: Some(" alice@example.com ".into()),
            quantity: None,
        })
        .unwrap();
        assert_eq!(order.quantity, 1);
        assert_eq!(order.customer_email, "alice@example.com");
    }

    #[test]
    fn missing_fields_are_rejected() {
        let missing_product = PurchaseOrder::try_from(CreatePurchaseRequest {
            customer_id: Some("alice@example.com".into()),
            ..Default::default()
        });
        assert!(matches!(missing_product, Err(AppError::BadRequest(_))));

        let blank_customer = PurchaseOrder::try_from(CreatePurchaseRequest {
            product_id: Some(Uuid::new_v4()),
            customer_id: Some("   ".into()),
            quantity: Some(2),
        });
        assert!(matches!(blank_customer, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let result = PurchaseOrder::try_from(CreatePurchaseRequest {
            product_id: Some(Uuid::new_v4()),
            customer_id: Some("alice@example.com".into()),
            quantity: Some(0),
        });
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
