//! The world arena: locations, items and characters, and what contains what.
//!
//! Every entity lives in one `Vec` and is addressed by [`EntityId`]. An
//! entity's `location` is whatever directly contains it: a location for
//! things lying about, a character for things carried, a container item for
//! things hidden away.

use std::collections::BTreeMap;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::character::{Actor, Character};
use crate::config::Chances;
use crate::error::{Result, StoryError};
use crate::memory::MemoryStore;
use crate::narration::Narrator;
use crate::types::{EntityId, Gender, Naming, Traits};

/// What sort of thing an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// A place with exits.
    Location,
    /// A thing that can be carried, hidden, or hidden in.
    Item,
    /// A character with an agent state.
    Person,
}

/// A single entity in the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Arena index.
    pub id: EntityId,
    /// Bare name: "revolver", "Alice", "kitchen".
    pub name: String,
    /// Location, item or person.
    pub kind: EntityKind,
    /// Capability flags.
    pub traits: Traits,
    /// Pronoun set.
    pub gender: Gender,
    /// Proper or common noun.
    pub naming: Naming,
    /// Whatever directly contains this entity. `None` for locations.
    pub location: Option<EntityId>,
    /// Entities directly contained, in arrival order.
    pub contents: Vec<EntityId>,
    /// Navigable neighbours. Empty for anything but a location.
    pub exits: Vec<EntityId>,
}

/// The whole world: every entity plus every character's agent state.
#[derive(Debug, Clone, Default)]
pub struct World {
    entities: Vec<Entity>,
    characters: BTreeMap<EntityId, Character>,
}

impl World {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: &str, kind: EntityKind, traits: Traits, naming: Naming) -> EntityId {
        let id = EntityId(
            u32::try_from(self.entities.len()).unwrap_or(u32::MAX),
        );
        self.entities.push(Entity {
            id,
            name: name.to_string(),
            kind,
            traits,
            gender: Gender::Neuter,
            naming,
            location: None,
            contents: Vec::new(),
            exits: Vec::new(),
        });
        id
    }

    /// Add a location with no exits yet.
    pub fn add_location(&mut self, name: &str, naming: Naming) -> EntityId {
        self.push(name, EntityKind::Location, Traits::NONE, naming)
    }

    /// Add an item at `at` (a location, a character, or a container).
    ///
    /// # Errors
    /// Returns `StoryError::UnknownEntity` if `at` is not in the arena.
    pub fn add_item(&mut self, name: &str, traits: Traits, naming: Naming, at: EntityId) -> Result<EntityId> {
        self.entity(at).ok_or(StoryError::UnknownEntity(at))?;
        let traits = Traits {
            animate: false,
            ..traits
        };
        let id = self.push(name, EntityKind::Item, traits, naming);
        self.place(id, at);
        Ok(id)
    }

    /// Add a character at a location.
    ///
    /// # Errors
    /// Returns `StoryError::UnknownEntity` if `at` is not in the arena.
    pub fn add_character(
        &mut self,
        name: &str,
        gender: Gender,
        at: EntityId,
        character: Character,
    ) -> Result<EntityId> {
        self.entity(at).ok_or(StoryError::UnknownEntity(at))?;
        let id = self.push(name, EntityKind::Person, Traits::ANIMATE, Naming::Proper);
        self.entities[id.index()].gender = gender;
        self.place(id, at);
        self.characters.insert(id, character);
        Ok(id)
    }

    /// Connect two locations both ways. Existing connections are not duplicated.
    ///
    /// # Errors
    /// Returns `StoryError::UnknownEntity` if either end is not in the arena.
    pub fn connect(&mut self, a: EntityId, b: EntityId) -> Result<()> {
        self.entity(a).ok_or(StoryError::UnknownEntity(a))?;
        self.entity(b).ok_or(StoryError::UnknownEntity(b))?;
        for (from, to) in [(a, b), (b, a)] {
            let exits = &mut self.entities[from.index()].exits;
            if !exits.contains(&to) {
                exits.push(to);
            }
        }
        Ok(())
    }

    /// Replace a location's exits, one way only.
    ///
    /// # Errors
    /// Returns `StoryError::UnknownEntity` if any id is not in the arena.
    pub fn set_exits(&mut self, location: EntityId, exits: &[EntityId]) -> Result<()> {
        for id in exits.iter().chain(std::iter::once(&location)) {
            self.entity(*id).ok_or(StoryError::UnknownEntity(*id))?;
        }
        self.entities[location.index()].exits = exits.to_vec();
        Ok(())
    }

    fn place(&mut self, id: EntityId, at: EntityId) {
        self.entities[id.index()].location = Some(at);
        self.entities[at.index()].contents.push(id);
    }

    /// Relocate an entity, keeping both containment lists in step.
    ///
    /// Unknown ids are ignored with a warning; moving something into itself
    /// is refused the same way.
    pub fn move_to(&mut self, id: EntityId, destination: EntityId) {
        if self.entity(id).is_none() || self.entity(destination).is_none() || id == destination {
            warn!(%id, %destination, "refusing impossible move");
            return;
        }
        if let Some(old) = self.entities[id.index()].location {
            self.entities[old.index()].contents.retain(|x| *x != id);
        }
        self.place(id, destination);
    }

    /// Look up an entity.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    /// All entities in arena order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Capability flags; an unknown id has none.
    #[must_use]
    pub fn traits(&self, id: EntityId) -> Traits {
        self.entity(id).map_or(Traits::NONE, |e| e.traits)
    }

    /// Whatever directly contains `id`.
    #[must_use]
    pub fn location_of(&self, id: EntityId) -> Option<EntityId> {
        self.entity(id).and_then(|e| e.location)
    }

    /// Entities directly inside `id`.
    #[must_use]
    pub fn contents(&self, id: EntityId) -> &[EntityId] {
        self.entity(id).map_or(&[], |e| e.contents.as_slice())
    }

    /// Exits of a location.
    #[must_use]
    pub fn exits(&self, id: EntityId) -> &[EntityId] {
        self.entity(id).map_or(&[], |e| e.exits.as_slice())
    }

    /// Bare name, or `"?"` for an unknown id.
    #[must_use]
    pub fn name(&self, id: EntityId) -> &str {
        self.entity(id).map_or("?", |e| e.name.as_str())
    }

    /// Find an entity by exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<EntityId> {
        self.entities.iter().find(|e| e.name == name).map(|e| e.id)
    }

    /// Whether `id` is a location.
    #[must_use]
    pub fn is_location(&self, id: EntityId) -> bool {
        self.entity(id).is_some_and(|e| e.kind == EntityKind::Location)
    }

    /// Ids of every character, in the order they were added.
    #[must_use]
    pub fn characters(&self) -> Vec<EntityId> {
        self.characters.keys().copied().collect()
    }

    /// A character's agent state.
    ///
    /// Returns `None` for non-characters and for the character currently
    /// taking its turn inside [`World::with_actor`].
    #[must_use]
    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Mutable agent state; see [`World::character`].
    pub fn character_mut(&mut self, id: EntityId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// Read-only view of another character's beliefs.
    ///
    /// Used by an armed character to sense what someone is hiding.
    #[must_use]
    pub fn memories_of(&self, id: EntityId) -> Option<&MemoryStore> {
        self.characters.get(&id).map(|c| &c.memories)
    }

    /// Run `f` with the character `id` acting.
    ///
    /// The character's agent state is lifted out of the arena for the
    /// duration, so the actor may freely mutate every other character. This
    /// is the single-writer-per-tick invariant: one actor at a time, and the
    /// actor is the only one touching its own state.
    ///
    /// Returns `None` (and does nothing) if `id` is not a character.
    pub fn with_actor<T>(
        &mut self,
        id: EntityId,
        narrator: &mut dyn Narrator,
        rng: &mut dyn RngCore,
        chances: &Chances,
        f: impl FnOnce(&mut Actor<'_>) -> T,
    ) -> Option<T> {
        let Some(mut me) = self.characters.remove(&id) else {
            warn!(%id, "not a character, or already acting");
            return None;
        };
        let out = {
            let mut actor = Actor {
                id,
                me: &mut me,
                world: &mut *self,
                narrator,
                rng,
                chances,
            };
            f(&mut actor)
        };
        self.characters.insert(id, me);
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> (World, EntityId, EntityId) {
        let mut world = World::new();
        let kitchen = world.add_location("kitchen", Naming::Common);
        let hall = world.add_location("hall", Naming::Common);
        world.connect(kitchen, hall).expect("connect");
        (world, kitchen, hall)
    }

    #[test]
    fn connect_is_bidirectional_and_idempotent() {
        let (mut world, kitchen, hall) = house();
        world.connect(hall, kitchen).expect("connect");
        assert_eq!(world.exits(kitchen), &[hall]);
        assert_eq!(world.exits(hall), &[kitchen]);
    }

    #[test]
    fn move_to_updates_both_sides() {
        let (mut world, kitchen, hall) = house();
        let knife = world
            .add_item("knife", Traits { weapon: true, ..Traits::NONE }, Naming::Common, kitchen)
            .expect("add");
        assert_eq!(world.contents(kitchen), &[knife]);

        world.move_to(knife, hall);
        assert!(world.contents(kitchen).is_empty());
        assert_eq!(world.contents(hall), &[knife]);
        assert_eq!(world.location_of(knife), Some(hall));
    }

    #[test]
    fn items_are_never_animate() {
        let (mut world, kitchen, _) = house();
        let statue = world
            .add_item("statue", Traits::ANIMATE, Naming::Common, kitchen)
            .expect("add");
        assert!(!world.traits(statue).animate);
    }

    #[test]
    fn unknown_location_rejected() {
        let mut world = World::new();
        let err = world.add_item("ghost", Traits::NONE, Naming::Common, EntityId(9));
        assert!(matches!(err, Err(StoryError::UnknownEntity(EntityId(9)))));
    }

    #[test]
    fn characters_listed_in_insertion_order() {
        let (mut world, kitchen, _) = house();
        let alice = world
            .add_character("Alice", Gender::Female, kitchen, Character::default())
            .expect("add");
        let bob = world
            .add_character("Bob", Gender::Male, kitchen, Character::default())
            .expect("add");
        assert_eq!(world.characters(), vec![alice, bob]);
        assert!(world.traits(alice).animate);
        assert_eq!(world.find("Bob"), Some(bob));
    }
}
