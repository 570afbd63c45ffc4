use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Product attributes attached to a report row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ReportProduct {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ProductSales {
    #[serde(rename = "productId")]
    pub product_id: Uuid,
    pub total_sales: i64,
    pub total_revenue: Decimal,
    pub product: ReportProduct,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RegionSales {
    pub region: String,
    pub total_sales: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub sales_by_product: Vec<ProductSales>,
    pub sales_by_region: Vec<RegionSales>,
    pub average_ticket: Decimal,
    pub total_purchases: i64,
    pub total_revenue: Decimal,
}
