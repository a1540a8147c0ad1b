mod deck;
pub use deck::*;

mod config;
pub use config::*;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
