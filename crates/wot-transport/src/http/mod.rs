//! HTTP transport capabilities.
//!
//! This module provides the HTTP(S) protocol client and its factory.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientFactory};
