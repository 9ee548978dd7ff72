use actix_web::{middleware::Logger, web, App, HttpServer};
use member_registry::config::EnvConfig;
use member_registry::db::repository::Repository;
use member_registry::routes::configure_routes;
use member_registry::seed::seed_demo_members;
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let repository = Arc::new(
        Repository::new(&config.db_url)
            .await
            .expect("Failed to initialize Repository")
    );

    if config.seed_demo_data {
        seed_demo_members(repository.as_ref())
            .await
            .expect("Failed to seed demo members");
    }

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&repository)))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
