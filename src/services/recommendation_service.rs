use std::collections::{HashMap, HashSet};

use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::recommendations::{CreateAssociationRequest, RecommendationList},
    entity::{
        product_associations::{
            ActiveModel as AssociationActive, Column as AssociationCol,
            Entity as ProductAssociations, Model as AssociationModel,
        },
        products::{Column as ProductCol, Entity as Products},
    },
    error::{AppError, AppResult},
    models::{Product, ProductAssociation},
    response::{ApiResponse, Meta},
    services::product_service::product_from_entity,
    state::AppState,
};

/// Most direct associations returned for a product page.
const MAX_RECOMMENDATIONS: usize = 8;
/// Below this many direct results the same-category fallback tops up.
const FALLBACK_TARGET: usize = 4;
/// Most candidates returned for a cart.
const MAX_CART_RECOMMENDATIONS: usize = 5;

/// Recommendations for a single product page.
///
/// Direct associations ranked by strength come first; when fewer than
/// [`FALLBACK_TARGET`] in-stock targets exist, same-category products top the
/// list up. Unknown ids and sparse data yield a short or empty list, never an
/// error.
pub async fn get_recommendations(
    state: &AppState,
    product_id: Uuid,
) -> AppResult<ApiResponse<RecommendationList>> {
    if let Some(items) = state.recommendations.get(product_id).await {
        return Ok(ApiResponse::success(
            "Recommendations",
            RecommendationList { items },
            None,
        ));
    }

    let items = compute_recommendations(state, product_id).await?;
    state.recommendations.put(product_id, items.clone()).await;

    Ok(ApiResponse::success(
        "Recommendations",
        RecommendationList { items },
        None,
    ))
}

async fn compute_recommendations(state: &AppState, product_id: Uuid) -> AppResult<Vec<Product>> {
    // Strength ties fall back to insertion order so output stays stable.
    let rows = ProductAssociations::find()
        .filter(AssociationCol::ProductId.eq(product_id))
        .find_also_related(Products)
        .order_by_desc(AssociationCol::Strength)
        .order_by_asc(AssociationCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let mut recommended: Vec<Product> = rows
        .into_iter()
        .filter_map(|(_, product)| product)
        .filter(|p| p.stock > 0)
        .take(MAX_RECOMMENDATIONS)
        .map(product_from_entity)
        .collect();

    if recommended.len() < FALLBACK_TARGET {
        if let Some(source) = Products::find_by_id(product_id).one(&state.orm).await? {
            let picked: Vec<Uuid> = recommended.iter().map(|p| p.id).collect();
            let mut finder = Products::find()
                .filter(ProductCol::Category.eq(source.category.clone()))
                .filter(ProductCol::Id.ne(product_id))
                .filter(ProductCol::Stock.gt(0));
            if !picked.is_empty() {
                finder = finder.filter(ProductCol::Id.is_not_in(picked));
            }
            let fallback = finder
                .order_by_asc(ProductCol::CreatedAt)
                .order_by_asc(ProductCol::Id)
                .limit((FALLBACK_TARGET - recommended.len()) as u64)
                .all(&state.orm)
                .await?;
            recommended.extend(fallback.into_iter().map(product_from_entity));
        }
    }

    Ok(recommended)
}

/// Recommendations for a whole cart.
///
/// Every cart item contributes its outgoing associations; a candidate's score
/// is the sum of association strength across contributing items. No category
/// fallback on this path.
pub async fn get_cart_recommendations(
    state: &AppState,
    product_ids: Vec<Uuid>,
) -> AppResult<ApiResponse<RecommendationList>> {
    // Dedup the cart so one product listed twice does not double its vote.
    let mut seen = HashSet::new();
    let cart_ids: Vec<Uuid> = product_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect();

    if cart_ids.is_empty() {
        return Ok(ApiResponse::success(
            "Cart recommendations",
            RecommendationList { items: Vec::new() },
            None,
        ));
    }

    let rows = ProductAssociations::find()
        .filter(AssociationCol::ProductId.is_in(cart_ids.clone()))
        .find_also_related(Products)
        .all(&state.orm)
        .await?;

    let pairs: Vec<(f64, Product)> = rows
        .into_iter()
        .filter_map(|(assoc, product)| product.map(|p| (assoc.strength, product_from_entity(p))))
        .collect();

    let items = rank_cart_candidates(pairs, &cart_ids);

    Ok(ApiResponse::success(
        "Cart recommendations",
        RecommendationList { items },
        None,
    ))
}

/// Sum strength per candidate, rank by summed strength descending (ties by
/// product id ascending), drop cart members and out-of-stock products, and cap
/// at [`MAX_CART_RECOMMENDATIONS`]. Duplicate association rows contribute once
/// per row.
fn rank_cart_candidates(pairs: Vec<(f64, Product)>, cart_ids: &[Uuid]) -> Vec<Product> {
    let mut scores: HashMap<Uuid, (f64, Product)> = HashMap::new();
    for (strength, product) in pairs {
        let entry = scores.entry(product.id).or_insert((0.0, product));
        entry.0 += strength;
    }

    let mut candidates: Vec<(f64, Product)> = scores.into_values().collect();
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id)));

    candidates
        .into_iter()
        .map(|(_, product)| product)
        .filter(|p| !cart_ids.contains(&p.id) && p.stock > 0)
        .take(MAX_CART_RECOMMENDATIONS)
        .collect()
}

/// Append a new association between two existing products.
///
/// Unlike the seeder this path is strict: an unresolved id is a hard
/// `NotFound` and no row is written.
pub async fn create_association(
    state: &AppState,
    payload: CreateAssociationRequest,
) -> AppResult<ApiResponse<ProductAssociation>> {
    if !(0.0..=1.0).contains(&payload.strength) {
        return Err(AppError::BadRequest(
            "strength must be between 0.0 and 1.0".into(),
        ));
    }

    if Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }
    if Products::find_by_id(payload.associated_product_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    let active = AssociationActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(payload.product_id),
        associated_product_id: Set(payload.associated_product_id),
        association_type: Set(payload.association_type.as_str().to_string()),
        strength: Set(payload.strength),
        created_at: NotSet,
    };
    let association = active.insert(&state.orm).await?;

    // Only the source product's cached list changes.
    state
        .recommendations
        .invalidate(association.product_id)
        .await;

    if let Err(err) = log_audit(
        &state.pool,
        "association_create",
        Some("product_associations"),
        Some(serde_json::json!({
            "association_id": association.id,
            "product_id": association.product_id,
            "associated_product_id": association.associated_product_id,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Association created",
        association_from_entity(association),
        Some(Meta::empty()),
    ))
}

fn association_from_entity(model: AssociationModel) -> ProductAssociation {
    ProductAssociation {
        id: model.id,
        product_id: model.product_id,
        associated_product_id: model.associated_product_id,
        association_type: model.association_type,
        strength: model.strength,
        created_at: model.created_at.with_timezone(&chrono::Utc),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: Uuid, name: &str, stock: i32) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            price: Decimal::new(9999, 2),
            image_url: None,
            category: "Electronics".to_string(),
            stock,
            rating: 4.5,
            review_count: 42,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn cart_candidates_sum_strength_across_items() {
        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        // X is recommended by two cart items (0.9 + 0.85), Y by one (1.0).
        let pairs = vec![
            (0.9, product(x, "x", 3)),
            (1.0, product(y, "y", 3)),
            (0.85, product(x, "x", 3)),
        ];

        let ranked = rank_cart_candidates(pairs, &[]);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, x);
        assert_eq!(ranked[1].id, y);
    }

    #[test]
    fn cart_candidates_never_include_cart_members() {
        let a = Uuid::new_v4();
        let x = Uuid::new_v4();
        let pairs = vec![(0.95, product(a, "a", 5)), (0.2, product(x, "x", 5))];

        let ranked = rank_cart_candidates(pairs, &[a]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, x);
    }

    #[test]
    fn cart_candidates_drop_out_of_stock() {
        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        let pairs = vec![(0.9, product(x, "x", 0)), (0.1, product(y, "y", 1))];

        let ranked = rank_cart_candidates(pairs, &[]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, y);
    }

    #[test]
    fn cart_candidates_cap_at_five() {
        let pairs: Vec<(f64, Product)> = (0..9)
            .map(|i| (0.1 * (i + 1) as f64, product(Uuid::new_v4(), "p", 2)))
            .collect();

        let ranked = rank_cart_candidates(pairs, &[]);
        assert_eq!(ranked.len(), MAX_CART_RECOMMENDATIONS);
    }

    #[test]
    fn cart_candidates_break_ties_by_id_ascending() {
        let mut ids = [Uuid::new_v4(), Uuid::new_v4()];
        ids.sort();
        // Insert the higher id first; equal scores must still rank the lower
        // id ahead.
        let pairs = vec![
            (0.5, product(ids[1], "high", 2)),
            (0.5, product(ids[0], "low", 2)),
        ];

        let ranked = rank_cart_candidates(pairs, &[]);
        assert_eq!(ranked[0].id, ids[0]);
        assert_eq!(ranked[1].id, ids[1]);
    }

    #[test]
    fn duplicate_association_rows_double_count() {
        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        // The same ordered pair inserted twice keeps both contributions.
        let pairs = vec![
            (0.4, product(x, "x", 2)),
            (0.4, product(x, "x", 2)),
            (0.7, product(y, "y", 2)),
        ];

        let ranked = rank_cart_candidates(pairs, &[]);
        assert_eq!(ranked[0].id, x);
        assert_eq!(ranked[1].id, y);
    }
}
