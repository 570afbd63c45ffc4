pub mod audit_logs;
pub mod customers;
pub mod products;
pub mod purchases;

pub use audit_logs::Entity as AuditLogs;
pub use customers::Entity as Customers;
pub use products::Entity as Products;
pub use purchases::Entity as Purchases;
