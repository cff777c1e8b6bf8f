//! # ShareFile Client SDK
//!
//! An async client for the ShareFile `sf/v3` REST API.
//!
//! ## Features
//!
//! - **Password grant authentication**: one call yields a [`Session`] used by every request
//! - **Items**: root listing, item lookup, folder create/update, delete, download
//! - **Standard upload**: upload negotiation plus a byte-exact `multipart/form-data` POST
//! - **Client users**: list and create
//!
//! Uploads buffer the whole file in memory.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sharefile_client::{Config, Credentials, ShareFileClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ShareFileClient::new(Config::default())?;
//!
//!     client
//!         .authenticate(&Credentials::new(
//!             "https://secure.sharefile.com",
//!             "client-id",
//!             "client-secret",
//!             "user@example.com",
//!             "password",
//!         ))
//!         .await?;
//!
//!     let root = client.get_root(true).await?;
//!     for child in &root.children {
//!         println!("{} {}", child.id, child.name);
//!     }
//!
//!     let status = client.upload_file("report.pdf", &root.id).await?;
//!     println!("Upload finished with {}", status);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
pub mod multipart;
mod session;
mod types;
mod upload;

pub use client::{ShareFileClient, CHILDREN_SELECT};
pub use config::{Config, API_DOMAIN};
pub use error::{ClientError, Result};
pub use multipart::MultipartPayload;
pub use session::{Credentials, Session, TOKEN_PATH};
pub use types::*;
