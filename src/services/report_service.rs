use std::collections::HashMap;

use sea_orm::{
    AccessMode, ConnectionTrait, EntityTrait, FromQueryResult, IsolationLevel, JoinType,
    QuerySelect, QueryOrder, RelationTrait, TransactionTrait,
};
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use uuid::Uuid;

use crate::{
    dto::reports::{ProductSales, RegionSales, ReportProduct, SalesReport},
    entity::{
        products::Column as ProdCol,
        purchases::{Column as PurchaseCol, Entity as Purchases, Relation as PurchaseRel},
    },
    error::{AppError, AppResult},
    money,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, FromQueryResult)]
struct ProductSalesRow {
    product_id: Uuid,
    total_sales: i64,
    total_revenue: i64,
    name: String,
    price: i64,
    region: String,
}

#[derive(Debug, FromQueryResult)]
struct TotalsRow {
    total_purchases: i64,
    total_revenue: Option<i64>,
}

/// Aggregate sales over every purchase.
///
/// Both queries run in one read-only REPEATABLE READ transaction, so the
/// per-product rows and the totals describe the same snapshot.
pub async fn sales_report(state: &AppState) -> AppResult<ApiResponse<SalesReport>> {
    let report = build_report(state).await.map_err(|err| match err {
        AppError::OrmError(db_err) => AppError::Aggregation(db_err.to_string()),
        other => AppError::Aggregation(other.to_string()),
    })?;
    Ok(ApiResponse::success(
        "Sales report",
        report,
        Some(Meta::empty()),
    ))
}

async fn build_report(state: &AppState) -> AppResult<SalesReport> {
    let txn = state
        .orm
        .begin_with_config(
            Some(IsolationLevel::RepeatableRead),
            Some(AccessMode::ReadOnly),
        )
        .await?;

    let rows = product_sales(&txn).await?;
    let totals = totals(&txn).await?;
    txn.commit().await?;

    let sales_by_product: Vec<ProductSales> = rows.into_iter().map(ProductSales::from).collect();
    let sales_by_region = fold_by_region(&sales_by_product);
    let total_revenue = totals.total_revenue.unwrap_or(0);

    Ok(SalesReport {
        sales_by_product,
        sales_by_region,
        average_ticket: money::average(total_revenue, totals.total_purchases),
        total_purchases: totals.total_purchases,
        total_revenue: money::to_decimal(total_revenue),
    })
}

fn sum_as_bigint(col: PurchaseCol) -> SimpleExpr {
    // Postgres widens SUM(bigint) to numeric.
    Func::cast_as(Expr::col((Purchases, col)).sum(), Alias::new("BIGINT")).into()
}

async fn product_sales<C: ConnectionTrait>(db: &C) -> AppResult<Vec<ProductSalesRow>> {
    let rows = Purchases::find()
        .select_only()
        .column(PurchaseCol::ProductId)
        .column_as(sum_as_bigint(PurchaseCol::Quantity), "total_sales")
        .column_as(sum_as_bigint(PurchaseCol::TotalPrice), "total_revenue")
        .join(JoinType::InnerJoin, PurchaseRel::Products.def())
        .column_as(ProdCol::Name, "name")
        .column_as(ProdCol::Price, "price")
        .column_as(ProdCol::Region, "region")
        .group_by(PurchaseCol::ProductId)
        .group_by(ProdCol::Name)
        .group_by(ProdCol::Price)
        .group_by(ProdCol::Region)
        .order_by_desc(SimpleExpr::from(
            Expr::col((Purchases, PurchaseCol::Quantity)).sum(),
        ))
        .order_by_asc(ProdCol::Name)
        .into_model::<ProductSalesRow>()
        .all(db)
        .await?;
    Ok(rows)
}

async fn totals<C: ConnectionTrait>(db: &C) -> AppResult<TotalsRow> {
    let totals = Purchases::find()
        .select_only()
        .column_as(Expr::col((Purchases, PurchaseCol::Id)).count(), "total_purchases")
        .column_as(sum_as_bigint(PurchaseCol::TotalPrice), "total_revenue")
        .into_model::<TotalsRow>()
        .one(db)
        .await?;
    Ok(totals.unwrap_or(TotalsRow {
        total_purchases: 0,
        total_revenue: None,
    }))
}

impl From<ProductSalesRow> for ProductSales {
    fn from(row: ProductSalesRow) -> Self {
        ProductSales {
            product_id: row.product_id,
            total_sales: row.total_sales,
            total_revenue: money::to_decimal(row.total_revenue),
            product: ReportProduct {
                id: row.product_id,
                name: row.name,
                price: money::to_decimal(row.price),
                region: row.region,
            },
        }
    }
}

/// Sums product rows per product region, biggest sellers first.
pub fn fold_by_region(sales: &[ProductSales]) -> Vec<RegionSales> {
    let mut by_region: HashMap<&str, RegionSales> = HashMap::new();
    for sale in sales {
        let entry = by_region
            .entry(sale.product.region.as_str())
            .or_insert_with(|| RegionSales {
                region: sale.product.region.clone(),
                total_sales: 0,
                total_revenue: money::to_decimal(0),
            });
        entry.total_sales += sale.total_sales;
        entry.total_revenue += sale.total_revenue;
    }

    let mut regions: Vec<RegionSales> = by_region.into_values().collect();
    regions.sort_by(|a, b| {
        b.total_sales
            .cmp(&a.total_sales)
            .then_with(|| a.region.cmp(&b.region))
    });
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(name: &str, region: &str, total_sales: i64, revenue_cents: i64) -> ProductSales {
        let id = Uuid::new_v4();
        ProductSales {
            product_id: id,
            total_sales,
            total_revenue: money::to_decimal(revenue_cents),
            product: ReportProduct {
                id,
                name: name.into(),
                price: money::to_decimal(100),
                region: region.into(),
            },
        }
    }

    #[test]
    fn regions_are_summed_and_ranked() {
        let sales = vec![
            sale("Mug", "South", 4, 400),
            sale("Hoodie", "North", 3, 1500),
            sale("Sticker", "North", 2, 200),
        ];

        let regions = fold_by_region(&sales);

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].region, "North");
        assert_eq!(regions[0].total_sales, 5);
        assert_eq!(regions[0].total_revenue, money::to_decimal(1700));
        assert_eq!(regions[1].region, "South");
        assert_eq!(regions[1].total_sales, 4);
    }

    #[test]
    fn ties_are_ordered_by_region_name() {
        let sales = vec![sale("A", "West", 1, 100), sale("B", "East", 1, 100)];
        let regions = fold_by_region(&sales);
        let names: Vec<&str> = regions.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, ["East", "West"]);
    }

    #[test]
    fn no_sales_means_no_regions() {
        assert!(fold_by_region(&[]).is_empty());
    }
}
