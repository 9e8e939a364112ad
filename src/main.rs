use std::io;
use std::sync::Arc;

use actix_web::web;
use dotenvy::dotenv;
use freshbox_service::application::catalog_service::CatalogService;
use freshbox_service::infrastructure::catalog_repo::DieselCatalogRepository;
use freshbox_service::{build_server, create_pool, run_migrations, AppConfig, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let pool = create_pool(&config.database_url, config.pool_size).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    if config.seed_catalog {
        let catalog = CatalogService::new(Arc::new(DieselCatalogRepository::new(pool.clone())));
        web::block(move || catalog.seed_defaults())
            .await
            .map_err(io::Error::other)?
            .map_err(io::Error::other)?;
    }

    let state = AppState::from_pool(pool, &config);

    log::info!(
        "Starting server at http://{}:{} (status policy {:?}, revenue basis {:?})",
        config.host,
        config.port,
        config.status_policy,
        config.revenue_basis
    );

    build_server(state, &config.host, config.port)?.await
}
