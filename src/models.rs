use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category: String,
    pub stock: i32,
    pub rating: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Directed, typed, weighted link from one product to another.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductAssociation {
    pub id: Uuid,
    pub product_id: Uuid,
    pub associated_product_id: Uuid,
    pub association_type: String,
    pub strength: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssociationType {
    Complementary,
    Substitute,
}

impl AssociationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociationType::Complementary => "COMPLEMENTARY",
            AssociationType::Substitute => "SUBSTITUTE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn association_type_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&AssociationType::Complementary).unwrap();
        assert_eq!(json, "\"COMPLEMENTARY\"");
        assert_eq!(AssociationType::Complementary.as_str(), "COMPLEMENTARY");

        let parsed: AssociationType = serde_json::from_str("\"SUBSTITUTE\"").unwrap();
        assert_eq!(parsed, AssociationType::Substitute);
    }
}
