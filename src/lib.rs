pub mod config;
pub mod db;
pub mod routes;
pub mod seed;
pub mod types;
pub mod utils;
