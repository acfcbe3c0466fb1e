//! API layer - REST surface and client implementations

pub mod http;
pub mod native;
pub mod rest;
