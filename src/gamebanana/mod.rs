pub mod client;
pub mod models;
pub mod retry;

pub use client::GameBananaClient;
