use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        customers::{CreateCustomerRequest, CustomerList, UpdateCustomerRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        purchases::{CreatePurchaseRequest, PurchaseList, UpdatePurchaseRequest},
        reports::{ProductSales, RegionSales, ReportProduct, SalesReport},
    },
    models::{Customer, Product, PurchaseProduct, PurchaseWithProduct},
    response::{ApiResponse, Meta},
    routes::{customers, health, params, products, purchases},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        customers::list_customers,
        customers::create_customer,
        customers::get_customer,
        customers::update_customer,
        customers::delete_customer,
        purchases::create_purchase,
        purchases::customer_purchases,
        purchases::sales_report,
        purchases::list_purchases,
        purchases::get_purchase,
        purchases::update_purchase,
        purchases::delete_purchase
    ),
    components(
        schemas(
            Customer,
            Product,
            PurchaseProduct,
            PurchaseWithProduct,
            CreateProductRequest,
            UpdateProductRequest,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CreatePurchaseRequest,
            UpdatePurchaseRequest,
            ProductList,
            CustomerList,
            PurchaseList,
            ReportProduct,
            ProductSales,
            RegionSales,
            SalesReport,
            params::ProductQuery,
            params::CustomerQuery,
            params::ProductSortBy,
            params::SortOrder,
            health::HealthData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Customer>,
            ApiResponse<CustomerList>,
            ApiResponse<PurchaseWithProduct>,
            ApiResponse<PurchaseList>,
            ApiResponse<SalesReport>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Customers", description = "Customer endpoints"),
        (name = "Purchases", description = "Purchase endpoints"),
        (name = "Reports", description = "Sales reporting endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
