//! World descriptions: where everything starts.
//!
//! A setting is a TOML document naming locations, items and characters.
//! Names are the only references; every `at` and every exit must name
//! something declared in the same document.
//!
//! ```toml
//! title = "THE SWALLOWS"
//!
//! [[locations]]
//! name = "kitchen"
//! exits = ["dining room"]
//!
//! [[characters]]
//! name = "Alice"
//! gender = "female"
//! at = "kitchen"
//!
//! [[items]]
//! name = "revolver"
//! at = "Alice"
//! weapon = true
//! role = "revolver"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use swallows_core::error::{Result, StoryError};
use swallows_core::{Character, EntityId, Gender, Naming, Props, Traits, World};

const SWALLOWS: &str = include_str!("../settings/swallows.toml");
const DOWNTOWN: &str = include_str!("../settings/downtown.toml");

/// Names accepted by [`Setting::builtin`].
pub const BUILTIN_NAMES: [&str; 2] = ["swallows", "downtown"];

/// A complete world description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    /// Printed at the top of the novel.
    pub title: String,
    /// Places, in declaration order.
    #[serde(default)]
    pub locations: Vec<LocationSpec>,
    /// Things, placed after locations and characters.
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    /// The cast, in turn order.
    #[serde(default)]
    pub characters: Vec<CharacterSpec>,
}

/// A place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSpec {
    /// Unique name.
    pub name: String,
    /// Rendered without an article ("Main Street").
    #[serde(default)]
    pub proper: bool,
    /// Names of the locations reachable from here. One way.
    #[serde(default)]
    pub exits: Vec<String>,
}

/// A thing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    /// Unique name.
    pub name: String,
    /// A location, character, or earlier-declared item.
    pub at: String,
    /// Rendered without an article.
    #[serde(default)]
    pub proper: bool,
    /// Capability flags, written inline (`treasure = true`).
    #[serde(flatten)]
    pub traits: Traits,
    /// Part this item plays in the plot, if any.
    #[serde(default)]
    pub role: Option<Role>,
}

/// A member of the cast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSpec {
    /// Unique name.
    pub name: String,
    /// Pronoun set.
    #[serde(default)]
    pub gender: Gender,
    /// Starting location.
    pub at: String,
}

/// Plot roles every character knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The weapon threats are made with.
    Revolver,
    /// What calms shaken nerves.
    Brandy,
    /// The subject the cast must agree what to do about.
    DeadBody,
}

fn naming(proper: bool) -> Naming {
    if proper { Naming::Proper } else { Naming::Common }
}

impl Setting {
    /// Parse a setting from TOML.
    ///
    /// # Errors
    /// Returns `StoryError::Setting` if the document does not parse.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| StoryError::Setting(e.to_string()))
    }

    /// Load a setting from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// One of the settings shipped with the crate; see [`BUILTIN_NAMES`].
    ///
    /// # Errors
    /// Returns `StoryError::Setting` for an unknown name.
    pub fn builtin(name: &str) -> Result<Self> {
        match name {
            "swallows" => Self::from_toml(SWALLOWS),
            "downtown" => Self::from_toml(DOWNTOWN),
            other => Err(StoryError::Setting(format!(
                "no built-in setting named {other:?} (try one of {BUILTIN_NAMES:?})"
            ))),
        }
    }

    /// Build the world this setting describes.
    ///
    /// # Errors
    /// Returns `StoryError::Setting` for duplicate names, dangling
    /// references, a role claimed twice, or an empty cast.
    pub fn build(&self) -> Result<World> {
        if self.characters.is_empty() {
            return Err(StoryError::Setting("a setting needs at least one character".to_string()));
        }

        let mut world = World::new();
        let mut names: BTreeMap<&str, EntityId> = BTreeMap::new();

        for location in &self.locations {
            let id = world.add_location(&location.name, naming(location.proper));
            if names.insert(location.name.as_str(), id).is_some() {
                return Err(duplicate(&location.name));
            }
        }
        for location in &self.locations {
            let from = resolve(&names, &location.name)?;
            let exits = location
                .exits
                .iter()
                .map(|exit| resolve_location(&world, &names, exit))
                .collect::<Result<Vec<_>>>()?;
            world.set_exits(from, &exits)?;
        }

        for spec in &self.characters {
            let at = resolve_location(&world, &names, &spec.at)?;
            let id = world.add_character(&spec.name, spec.gender, at, Character::default())?;
            if names.insert(spec.name.as_str(), id).is_some() {
                return Err(duplicate(&spec.name));
            }
        }

        let mut props = Props::default();
        for spec in &self.items {
            let at = resolve(&names, &spec.at)?;
            let id = world.add_item(&spec.name, spec.traits, naming(spec.proper), at)?;
            if names.insert(spec.name.as_str(), id).is_some() {
                return Err(duplicate(&spec.name));
            }
            if let Some(role) = spec.role {
                let slot = match role {
                    Role::Revolver => &mut props.revolver,
                    Role::Brandy => &mut props.brandy,
                    Role::DeadBody => &mut props.dead_body,
                };
                if slot.replace(id).is_some() {
                    return Err(StoryError::Setting(format!("role {role:?} is claimed twice")));
                }
            }
        }

        for id in world.characters() {
            if let Some(character) = world.character_mut(id) {
                character.props = props;
            }
        }
        debug!(
            title = %self.title,
            entities = world.entities().count(),
            "world built"
        );
        Ok(world)
    }
}

fn duplicate(name: &str) -> StoryError {
    StoryError::Setting(format!("{name:?} is declared twice"))
}

fn resolve(names: &BTreeMap<&str, EntityId>, name: &str) -> Result<EntityId> {
    names
        .get(name)
        .copied()
        .ok_or_else(|| StoryError::Setting(format!("nothing called {name:?} has been declared")))
}

fn resolve_location(world: &World, names: &BTreeMap<&str, EntityId>, name: &str) -> Result<EntityId> {
    let id = resolve(names, name)?;
    if world.is_location(id) {
        Ok(id)
    } else {
        Err(StoryError::Setting(format!("{name:?} is not a location")))
    }
}
