use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::{customers, products, purchases},
    money,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub region: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The product attributes shown next to a purchase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PurchaseProduct {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseWithProduct {
    pub id: Uuid,
    pub product_id: Uuid,
    pub customer_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub product: PurchaseProduct,
}

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Customer {
            id: model.id,
            email: model.email,
            name: model.name,
            region: model.region,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Product {
            id: model.id,
            name: model.name,
            description: model.description,
            price: money::to_decimal(model.price),
            region: model.region,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<products::Model> for PurchaseProduct {
    fn from(model: products::Model) -> Self {
        PurchaseProduct {
            id: model.id,
            name: model.name,
            price: money::to_decimal(model.price),
            description: model.description,
        }
    }
}

impl PurchaseWithProduct {
    pub fn new(purchase: purchases::Model, product: products::Model) -> Self {
        PurchaseWithProduct {
            id: purchase.id,
            product_id: purchase.product_id,
            customer_id: purchase.customer_id,
            quantity: purchase.quantity,
            unit_price: money::to_decimal(purchase.unit_price),
            total_price: money::to_decimal(purchase.total_price),
            created_at: purchase.created_at.with_timezone(&Utc),
            updated_at: purchase.updated_at.with_timezone(&Utc),
            product: product.into(),
        }
    }
}
