//! Core type definitions shared across the engine.
//!
//! Everything here is a small value type: identities, capability flags,
//! and the closed enumerations that drive character behaviour.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Index of an entity (location, item or character) in the [`World`](crate::world::World) arena.
///
/// Ids are dense and assigned in insertion order, so ordered collections
/// keyed by `EntityId` iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Position of this entity in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Fixed capability flags of an entity.
///
/// Flags combine freely: a jewellery box may be both a container and
/// treasure. They never change after the world is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traits {
    /// A character.
    #[serde(default)]
    pub animate: bool,
    /// Worth stealing, hiding, and threatening people over.
    #[serde(default)]
    pub treasure: bool,
    /// Can be pointed at people.
    #[serde(default)]
    pub weapon: bool,
    /// Things can be hidden in it.
    #[serde(default)]
    pub container: bool,
    /// Worth remarking on when seen.
    #[serde(default)]
    pub notable: bool,
    /// Corpse-like; frightens whoever sees it.
    #[serde(default)]
    pub horror: bool,
}

impl Traits {
    /// Traits of a character.
    pub const ANIMATE: Self = Self {
        animate: true,
        treasure: false,
        weapon: false,
        container: false,
        notable: false,
        horror: false,
    };

    /// Plain, uninteresting scenery.
    pub const NONE: Self = Self {
        animate: false,
        treasure: false,
        weapon: false,
        container: false,
        notable: false,
        horror: false,
    };

    /// Something a character will pick up on sight.
    #[must_use]
    pub fn is_valuable(self) -> bool {
        self.treasure || self.weapon
    }
}

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

/// Grammatical gender, used for pronoun rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// he / him / his
    Male,
    /// she / her / her
    Female,
    /// it / it / its
    #[default]
    Neuter,
}

/// How an entity's name is rendered in prose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Naming {
    /// A proper noun: "Alice", "Main Street".
    Proper,
    /// A common noun taking an article: "the revolver", "a revolver".
    #[default]
    Common,
}

// ---------------------------------------------------------------------------
// Character state enums
// ---------------------------------------------------------------------------

/// A character's nerve state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nerves {
    /// Composed; able to negotiate.
    #[default]
    Calm,
    /// Has seen something horrible; wants a drink before anything else.
    Shaken,
}

/// What to do about a sensitive subject, such as a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Report it.
    Call,
    /// Make it go away.
    Dispose,
}

impl Decision {
    /// Every decision a character may reach.
    pub const ALL: [Self; 2] = [Self::Call, Self::Dispose];

    /// The course of action as it appears in speech. `<3>` is the subject slot.
    #[must_use]
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Call => "call the police",
            Self::Dispose => "try to dispose of <3>",
        }
    }
}

/// A weapon held on someone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aim {
    /// The weapon being pointed.
    pub weapon: EntityId,
    /// Who it is pointed at.
    pub target: EntityId,
}
