use actix_web::{get, web};
use std::sync::Arc;

use crate::db::repository::Repository;
use crate::types::response::{ApiResponse, ApiResult};

/// Answers with the member's user name as plain text.
#[get("/{id}")]
pub async fn find(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<Repository>>,
    path: web::Path<i32>,
) -> ApiResult<String> {
    let member = db.get_member(path.into_inner()).await?;

    Ok(ApiResponse::Text(member.user_name))
}
