pub mod customers;
pub mod products;
pub mod purchases;
pub mod reports;
