//! # swallows-story: settings, publishing and the CLI
//!
//! This crate turns the `swallows-core` engine into finished stories:
//!
//! - `setting`: TOML world descriptions, plus the built-in ones
//! - `publisher`: runs the ticks and lays out chapters and paragraphs
//!
//! The `swallows` binary wires both to the command line.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod publisher;
pub mod setting;

pub use publisher::{Chapter, Novel, Publisher};
pub use setting::Setting;
