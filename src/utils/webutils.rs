use crate::types::error::AppError;
use crate::types::page::{PageRequest, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Builds a page request from `page`, `size` and any number of `sort`
/// parameters, given as decoded pairs in query order. Missing values come
/// from `defaults`; a size below one falls back to the default size and
/// sizes above [`MAX_PAGE_SIZE`] are clamped.
pub fn page_request_from_pairs(pairs: &[(String, String)], defaults: &PageRequest) -> Result<PageRequest, AppError> {
    let mut request = PageRequest { sort: Vec::new(), ..defaults.clone() };
    let mut sort_given = false;

    for (key, value) in pairs {
        match key.as_str() {
            "page" => request.page = parse_number(key, value)?,
            "size" => {
                let size = parse_number(key, value)?;
                request.size = match size {
                    0 => DEFAULT_PAGE_SIZE,
                    s => s.min(MAX_PAGE_SIZE),
                };
            }
            "sort" => {
                sort_given = true;
                request.sort.extend(SortOrder::parse_param(value)?);
            }
            _ => {}
        }
    }

    if !sort_given {
        request.sort = defaults.sort.clone();
    }
    request.validate()?;
    Ok(request)
}

fn parse_number(key: &str, value: &str) -> Result<u64, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("'{key}' must be a non-negative integer, got '{value}'")))
}
