use std::str::FromStr;

use sea_orm::Order;
use serde::Serialize;

use crate::types::error::AppError;

pub const DEFAULT_PAGE_SIZE: u64 = 5;
pub const MAX_PAGE_SIZE: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn order(self) -> Order {
        match self {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        }
    }
}

impl FromStr for Direction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(AppError::BadRequest(format!("unknown sort direction '{other}'"))),
        }
    }
}

/// Member properties a page can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSortField {
    Id,
    UserName,
    Age,
    CreatedDate,
    LastModifiedDate,
}

impl MemberSortField {
    pub fn column(self) -> entity::member::Column {
        use entity::member::Column;
        match self {
            MemberSortField::Id => Column::Id,
            MemberSortField::UserName => Column::UserName,
            MemberSortField::Age => Column::Age,
            MemberSortField::CreatedDate => Column::CreatedDate,
            MemberSortField::LastModifiedDate => Column::LastModifiedDate,
        }
    }
}

impl FromStr for MemberSortField {
    type Err = AppError;

    // accepts both the JSON spelling (userName) and the column spelling (user_name)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(MemberSortField::Id),
            "userName" | "user_name" => Ok(MemberSortField::UserName),
            "age" => Ok(MemberSortField::Age),
            "createdDate" | "created_date" => Ok(MemberSortField::CreatedDate),
            "lastModifiedDate" | "last_modified_date" => Ok(MemberSortField::LastModifiedDate),
            other => Err(AppError::BadRequest(format!("unknown sort property '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: MemberSortField,
    pub direction: Direction,
}

impl SortOrder {
    pub fn new(field: MemberSortField, direction: Direction) -> Self {
        Self { field, direction }
    }

    /// Parses one `sort` parameter: `property[,property...][,direction]`.
    /// The direction applies to every property listed before it and
    /// defaults to ascending.
    pub fn parse_param(param: &str) -> Result<Vec<SortOrder>, AppError> {
        let mut tokens: Vec<&str> = param
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        let direction = match tokens.last().map(|t| t.parse::<Direction>()) {
            Some(Ok(direction)) => {
                tokens.pop();
                direction
            }
            _ => Direction::Asc,
        };

        if tokens.is_empty() {
            return Err(AppError::BadRequest(format!("sort parameter '{param}' names no property")));
        }

        tokens
            .into_iter()
            .map(|t| Ok(SortOrder::new(t.parse()?, direction)))
            .collect()
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn of(page: u64, size: u64) -> Self {
        Self { page, size, sort: Vec::new() }
    }

    pub fn sorted_by(mut self, field: MemberSortField, direction: Direction) -> Self {
        self.sort.push(SortOrder::new(field, direction));
        self
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// Offsets and limits are bound as signed 64-bit integers.
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.size == 0 {
            return Err(AppError::BadRequest("page size must be at least 1".into()));
        }
        let in_range = |n: u64| n <= i64::MAX as u64;
        match self.page.checked_mul(self.size) {
            Some(offset) if in_range(offset) && in_range(self.size) => Ok(()),
            _ => Err(AppError::BadRequest(format!(
                "page {} of size {} is out of range",
                self.page, self.size
            ))),
        }
    }
}

impl Default for PageRequest {
    /// Listing default: first page of five, newest user names first.
    fn default() -> Self {
        PageRequest::of(0, DEFAULT_PAGE_SIZE).sorted_by(MemberSortField::UserName, Direction::Desc)
    }
}

/// A slice of an ordered result set plus its position in the whole.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u64,
    pub first: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size;
        let total_pages = if size == 0 { 0 } else { total_elements.div_ceil(size) };
        Page {
            content,
            total_elements,
            total_pages,
            number: request.page,
            size,
            first: request.page == 0,
            has_next: request.page.saturating_add(1).saturating_mul(size) < total_elements,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            first: self.first,
            has_next: self.has_next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_metadata_first_of_two() {
        let page = Page::new(vec![1, 2, 3], &PageRequest::of(0, 3), 5);
        assert_eq!(page.total_pages, 2);
        assert!(page.first);
        assert!(page.has_next);
    }

    #[test]
    fn page_metadata_last_page() {
        let page = Page::new(vec![4, 5], &PageRequest::of(1, 3), 5);
        assert_eq!(page.number, 1);
        assert!(!page.first);
        assert!(!page.has_next);
    }

    #[test]
    fn page_metadata_exact_fit_and_empty() {
        let exact = Page::new(vec![1, 2], &PageRequest::of(1, 2), 4);
        assert_eq!(exact.total_pages, 2);
        assert!(!exact.has_next);

        let empty: Page<i32> = Page::new(vec![], &PageRequest::of(0, 5), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.first);
        assert!(!empty.has_next);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], &PageRequest::of(0, 3), 7).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20, 30]);
        assert_eq!(page.total_elements, 7);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_serializes_camel_case() {
        let page = Page::new(vec!["a"], &PageRequest::of(0, 1), 2);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 2);
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["first"], true);
        assert_eq!(json["number"], 0);
    }

    #[test]
    fn parse_sort_with_direction() {
        let orders = SortOrder::parse_param("userName,desc").unwrap();
        assert_eq!(orders, vec![SortOrder::new(MemberSortField::UserName, Direction::Desc)]);
    }

    #[test]
    fn parse_sort_defaults_to_ascending() {
        let orders = SortOrder::parse_param("age").unwrap();
        assert_eq!(orders, vec![SortOrder::new(MemberSortField::Age, Direction::Asc)]);
    }

    #[test]
    fn parse_sort_multiple_properties_share_direction() {
        let orders = SortOrder::parse_param("id,user_name,DESC").unwrap();
        assert_eq!(
            orders,
            vec![
                SortOrder::new(MemberSortField::Id, Direction::Desc),
                SortOrder::new(MemberSortField::UserName, Direction::Desc),
            ]
        );
    }

    #[test]
    fn parse_sort_rejects_unknown_property() {
        assert!(matches!(SortOrder::parse_param("teamName,asc"), Err(AppError::BadRequest(_))));
        assert!(matches!(SortOrder::parse_param(",desc"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn validate_rejects_unbindable_offsets() {
        assert!(PageRequest::of(3, 5).validate().is_ok());
        assert!(PageRequest::of(i64::MAX as u64, 1).validate().is_ok());
        assert!(matches!(PageRequest::of(0, 0).validate(), Err(AppError::BadRequest(_))));
        assert!(matches!(PageRequest::of(u64::MAX / 2, 5).validate(), Err(AppError::BadRequest(_))));
        assert!(matches!(PageRequest::of(i64::MAX as u64, 2).validate(), Err(AppError::BadRequest(_))));
        assert!(matches!(PageRequest::of(0, u64::MAX).validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn default_request_sorts_user_name_desc() {
        let request = PageRequest::default();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.sort, vec![SortOrder::new(MemberSortField::UserName, Direction::Desc)]);
    }
}
