//! Library exports for campaign-desk, shared between the binary and tests.

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod cookies;
pub mod http;
pub mod models;
pub mod routes;
pub mod startup;
pub mod state;
pub mod utils;
pub mod views;
