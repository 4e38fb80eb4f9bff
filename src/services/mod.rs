pub mod product_service;
pub mod recommendation_service;
