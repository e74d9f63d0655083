// Adapters layer: concrete implementations of the domain ports (marketplace HTTP clients, .env store).

pub mod ebay;
pub mod env_store;
pub mod http;
pub mod temu;
