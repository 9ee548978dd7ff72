use actix_web::{get, web};
use std::sync::Arc;
use tracing::debug;

use crate::db::repository::Repository;
use crate::types::member::MemberDto;
use crate::types::page::{Page, PageRequest};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::page_request_from_pairs;

/*
 GET /members?page=0&size=3&sort=id,desc&sort=userName,desc
 Without parameters: page 0, five per page, user names descending.
 */
#[get("")]
pub async fn list(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<Repository>>,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<Page<MemberDto>> {
    let request = page_request_from_pairs(&query, &PageRequest::default())?;
    debug!("Listing members: {:?}", request);

    let page = db.find_member_dto_page(&request).await?;

    Ok(ApiResponse::Ok(page))
}
