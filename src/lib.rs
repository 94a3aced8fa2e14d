pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod search;
pub mod store;
