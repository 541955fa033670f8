//! Authenticated REST client, typed repositories, and the three-phase asset
//! upload pipeline for the Ascent CLI.
//!
//! Every API call goes through [`client::RestClient`], which mints a fresh
//! bearer token per request. Binary asset upload is orchestrated by
//! [`upload::UploadCoordinator`]: reserve a server-side slot, transfer byte
//! ranges directly to server-issued storage targets, then confirm with a
//! whole-file checksum.

pub mod apps;
pub mod builds;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod screenshots;
pub mod submissions;
pub mod testflight;
pub mod testing;
pub mod transport;
pub mod upload;

pub use apps::*;
pub use builds::*;
pub use client::*;
pub use config::*;
pub use error::*;
pub use screenshots::*;
pub use submissions::*;
pub use testflight::*;
pub use transport::*;
pub use upload::*;
