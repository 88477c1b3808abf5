//! OpenLink - link-in-bio backend
//!
//! An owner claims a username, curates an ordered list of links, themes a
//! public page and sees per-link click counts. Visitors follow links through
//! a click-recording redirect.
//!
//! # Features
//! - **server**: HTTP server mode (default)
//! - **cli**: Command-line interface
//!
//! # Architecture
//! - `links`: ordering policy, gesture translation, per-owner link controller
//! - `storage`: store traits, SeaORM and memory backends
//! - `services`: username claim, redirect, public page, analytics, sessions
//! - `api`: HTTP services and middleware
//! - `interfaces`: CLI commands
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod links;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
