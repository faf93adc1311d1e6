pub mod app;
pub mod config;
pub mod csv_loader;
pub mod entitlement;
pub mod logging;
pub mod presentation;
pub mod utils;
