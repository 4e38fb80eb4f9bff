pub mod audit_logs;
pub mod product_associations;
pub mod products;

pub use audit_logs::Entity as AuditLogs;
pub use product_associations::Entity as ProductAssociations;
pub use products::Entity as Products;
