//! Movie catalog browsing with a durable personal watchlist and ratings.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
