pub mod center;
pub mod charts;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod migrations;
pub mod models;
pub mod reports;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod text;
pub mod version;
