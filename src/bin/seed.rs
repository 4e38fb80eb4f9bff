use shopsphere_api::{
    cache::RecommendationCache,
    config::AppConfig,
    db::{create_orm_conn, create_pool},
    seed,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;
    let orm = create_orm_conn(&config.database_url).await?;

    let state = AppState {
        pool,
        orm,
        recommendations: RecommendationCache::default(),
    };

    if seed::run_if_empty(&state).await? {
        println!("Seed completed");
    } else {
        println!("Catalog already populated, nothing to do");
    }
    Ok(())
}
