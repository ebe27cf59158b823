//! DashDrop storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
