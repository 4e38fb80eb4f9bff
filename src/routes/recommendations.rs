use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::recommendations::{
        CartRecommendationRequest, CreateAssociationRequest, RecommendationList,
    },
    error::AppResult,
    models::ProductAssociation,
    response::ApiResponse,
    services::recommendation_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", post(cart_recommendations))
        .route("/associations", post(create_association))
        .route("/{product_id}", get(product_recommendations))
}

#[utoipa::path(
    get,
    path = "/api/recommendations/{product_id}",
    params(
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Up to 8 recommended products, strongest associations first, topped up from the product's category", body = ApiResponse<RecommendationList>),
    ),
    tag = "Recommendations"
)]
pub async fn product_recommendations(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RecommendationList>>> {
    let response = recommendation_service::get_recommendations(&state, product_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/recommendations/cart",
    request_body = CartRecommendationRequest,
    responses(
        (status = 200, description = "Up to 5 products ranked by association strength summed across cart items", body = ApiResponse<RecommendationList>),
    ),
    tag = "Recommendations"
)]
pub async fn cart_recommendations(
    State(state): State<AppState>,
    Json(payload): Json<CartRecommendationRequest>,
) -> AppResult<Json<ApiResponse<RecommendationList>>> {
    let response =
        recommendation_service::get_cart_recommendations(&state, payload.product_ids).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/recommendations/associations",
    request_body = CreateAssociationRequest,
    responses(
        (status = 200, description = "Association created", body = ApiResponse<ProductAssociation>),
        (status = 400, description = "Strength out of range"),
        (status = 404, description = "Source or target product not found"),
    ),
    tag = "Recommendations"
)]
pub async fn create_association(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssociationRequest>,
) -> AppResult<Json<ApiResponse<ProductAssociation>>> {
    let response = recommendation_service::create_association(&state, payload).await?;
    Ok(Json(response))
}
