use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        recommendations::{CartRecommendationRequest, CreateAssociationRequest, RecommendationList},
    },
    models::{AssociationType, Product, ProductAssociation},
    response::{ApiResponse, Meta},
    routes::{health, params, products, recommendations},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        recommendations::product_recommendations,
        recommendations::cart_recommendations,
        recommendations::create_association,
    ),
    components(
        schemas(
            Product,
            ProductAssociation,
            AssociationType,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CartRecommendationRequest,
            CreateAssociationRequest,
            RecommendationList,
            params::Pagination,
            params::ProductQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<ProductAssociation>,
            ApiResponse<RecommendationList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Recommendations", description = "Recommendation and association endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
