//! File transport capabilities.

mod client;

pub use client::{FileClient, FileClientFactory};
