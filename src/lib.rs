pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod models;
pub mod render;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;
