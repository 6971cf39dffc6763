//! Foundation types for termfolio.
//!
//! This crate contains the types shared by every termfolio crate: the error
//! type, platform-agnostic input events, and the TOML-backed configuration.

pub mod config;
pub mod error;
pub mod input;
