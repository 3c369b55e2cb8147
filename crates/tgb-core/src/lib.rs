//! Core domain for the Telegram bot client.
//!
//! This crate is transport-agnostic: the Bot API HTTP calls live behind the
//! `MessageActions` port implemented in `tgb-client`.

pub mod command;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod port;
pub mod update;

pub use errors::{Error, Result};
