pub mod mapper;
pub mod sync;

pub use crate::domain::model::{DestinationListingPayload, ItemOutcome, SourceItem};
pub use crate::domain::ports::{CredentialStore, ListingDestination, ListingSource};
pub use crate::utils::error::Result;
