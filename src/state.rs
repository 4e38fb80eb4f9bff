use crate::{
    cache::RecommendationCache,
    db::{DbPool, OrmConn},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub recommendations: RecommendationCache,
}
