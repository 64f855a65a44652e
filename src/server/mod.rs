mod handlers;
mod models;
mod state;
mod trans;

pub use handlers::run_server;
