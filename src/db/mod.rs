pub mod member;
pub mod repository;
pub mod team;
