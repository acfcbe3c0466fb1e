//! Remote client for the REST gateway

pub mod client;

pub use client::{HttpClient, BASE_URL_ENV, DEFAULT_BASE_URL};
