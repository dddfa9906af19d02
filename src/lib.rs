pub mod cli_args;
pub mod error;
mod extractor;
mod middleware;
mod route;
pub mod server;
mod state;
mod traits;
pub mod types;
