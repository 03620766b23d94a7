pub mod config;
pub mod importers;
pub mod models;
pub mod normalizer;
pub mod schema;
pub mod services;
pub mod store;
pub mod workdir;
