pub mod audit;
pub mod config;
pub mod errors;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod state;
