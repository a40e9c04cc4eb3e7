//! Cafedex - a café directory REST API
//!
//! This library provides the core functionality for the Cafedex service:
//! user accounts with bearer-token authentication, a browsable café and
//! area directory, and per-user favorite lists.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
