use actix_web::web;

pub mod health;
pub mod member;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health").service(health::health)
    );
    cfg.service(
        web::scope("/members")
            .service(member::list::list)
            .service(member::find::find)
    );
}
