pub mod api_doc;
pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;
pub mod state;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_doc::ApiDoc;
pub use config::AppConfig;
pub use db::{create_pool, DbPool};
pub use state::AppState;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), BoxError> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Register the `/api` routes and the extractor error handlers.
///
/// Shared by the server and the handler tests so both answer malformed input
/// with the same `{"error": ...}` body.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    use handlers::{catalog, contact, orders, payments, stats};

    cfg.app_data(web::JsonConfig::default().error_handler(errors::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(errors::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(errors::path_error_handler))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/box-types")
                        .route("", web::get().to(catalog::list_box_types))
                        .route("", web::post().to(catalog::create_box_type))
                        .route("/{id}", web::put().to(catalog::update_box_type)),
                )
                .service(
                    web::scope("/products")
                        .route("", web::get().to(catalog::list_products))
                        .route("", web::post().to(catalog::create_product))
                        .route("/{id}", web::put().to(catalog::update_product))
                        .route("/{id}", web::delete().to(catalog::delete_product)),
                )
                .service(
                    web::scope("/orders")
                        .route("", web::post().to(orders::create_order))
                        .route("", web::get().to(orders::list_orders))
                        .route("/{id}", web::get().to(orders::get_order))
                        .route("/{id}/receipt", web::get().to(orders::get_receipt))
                        .route("/{id}/status", web::put().to(orders::update_order_status))
                        .route("/{id}/payment", web::put().to(orders::update_payment_status)),
                )
                .route("/payment/{method}", web::post().to(payments::initiate_payment))
                .route("/stats", web::get().to(stats::get_stats))
                .service(
                    web::scope("/contact")
                        .route("", web::post().to(contact::create_message))
                        .route("", web::get().to(contact::list_messages))
                        .route("/{id}/replied", web::put().to(contact::mark_replied)),
                ),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = ApiDoc::openapi();
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(configure_routes)
    })
    .bind((host.to_string(), port))?
    .run())
}
