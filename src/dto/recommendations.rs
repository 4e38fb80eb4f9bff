use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{AssociationType, Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartRecommendationRequest {
    pub product_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAssociationRequest {
    pub product_id: Uuid,
    pub associated_product_id: Uuid,
    pub association_type: AssociationType,
    pub strength: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RecommendationList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
