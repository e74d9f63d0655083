pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "mock-server")]
pub mod mock_server;

pub use crate::adapters::{ebay::EbayClient, env_store::EnvFileStore, temu::TemuClient};
pub use crate::config::SyncConfig;
pub use crate::core::{mapper::map_item, sync::SyncEngine};
pub use crate::utils::error::{Result, SyncError};
