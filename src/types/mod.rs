pub mod error;
pub mod member;
pub mod page;
pub mod response;
pub mod team;
