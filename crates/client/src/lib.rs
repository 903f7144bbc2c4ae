//! leavecal_client - HTTP collaborators and developer CLI for leavecal.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;

pub use client::LeavecalClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
