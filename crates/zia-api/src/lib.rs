// zia-api: Async Rust client for the Zscaler Internet Access REST API

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;

pub use auth::{Credentials, ZiaCloud, obfuscate_api_key};
pub use client::ZiaClient;
pub use endpoints::MAX_PAGE_SIZE;
pub use error::{Error, RESOURCE_NOT_FOUND};
pub use transport::{TlsMode, TransportConfig};
