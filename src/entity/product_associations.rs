use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_associations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub associated_product_id: Uuid,
    pub association_type: String,
    pub strength: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::AssociatedProductId",
        to = "super::products::Column::Id"
    )]
    AssociatedProduct,
}

// Joins resolve the edge target, so `Related` follows AssociatedProduct.
impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssociatedProduct.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
