//! # Swallows Core Library
//!
//! The character-agent engine behind a procedurally generated mystery
//! novel. Characters wander a small world, notice things, hide and look for
//! treasure, threaten one another at gunpoint, and argue over what to do
//! about a body. Everything they do is narrated as templated lines.
//!
//! - **World**: an arena of locations, items and characters ([`World`])
//! - **Memory**: per-character beliefs about where things are ([`MemoryStore`])
//! - **Perception**: reactions on entering a location
//! - **Decision**: the per-turn priority cascade ([`World::tick`])
//! - **Hide and seek**: containers, secrets, and stale beliefs
//! - **Dialogue**: one-shot replies to a closed set of [`Topic`]s
//! - **Negotiation**: reaching a shared decision about a sensitive subject
//!
//! ## Determinism Contract
//!
//! Every random choice draws from an injected RNG, and every collection the
//! engine iterates is ordered. Seeding the RNG reproduces a story exactly.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod chance;
pub mod character;
pub mod config;
pub mod decision;
pub mod dialogue;
pub mod error;
pub mod grammar;
pub mod hide_seek;
pub mod memory;
pub mod narration;
pub mod negotiation;
pub mod perception;
pub mod topic;
pub mod types;
pub mod world;

pub use character::{Actor, Character, Props};
pub use config::{Chances, StoryConfig};
pub use error::StoryError;
pub use memory::{Memory, MemoryStore};
pub use narration::{Event, Narrator, Transcript};
pub use topic::Topic;
pub use types::*;
pub use world::World;
