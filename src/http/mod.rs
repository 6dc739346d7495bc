//! The HTTP capability the rest of the crate talks through.
//!
//! `HttpClient` plays the role of the platform `fetch`: it sends a request
//! with the cookie jar when asked to and hands back the raw response.

pub mod client;
pub mod reqwest_client;

#[cfg(test)]
pub mod fake;

pub use client::{
    ApiRequest, ApiResponse, CredentialsMode, HttpClient, RequestInit, TransportError,
};
pub use reqwest_client::ReqwestClient;
