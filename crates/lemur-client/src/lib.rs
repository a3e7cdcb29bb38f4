//! HTTP client for the Lemur certificate management API.
//!
//! This crate provides the main [`LemurClient`] for talking to Lemur. Every
//! request carries the bearer token, every non-200 answer becomes
//! [`LemurError::Status`] with the raw body, and nothing is retried.

#![doc(html_root_url = "https://docs.rs/lemur-client/0.3.0")]

mod client;
mod config;
pub mod api;

pub use client::{LemurClient, LemurClientBuilder};
pub use config::*;
pub use lemur_core::{LemurError, Result};
