use actix_web::{get, web};
use serde::Serialize;
use std::sync::Arc;

use crate::db::repository::Repository;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize)]
pub struct Response {
    status: &'static str,
}

#[get("")]
async fn health(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<Repository>>,
) -> ApiResult<Response> {
    db.connection().ping().await?;

    Ok(ApiResponse::Ok(Response { status: "UP" }))
}
