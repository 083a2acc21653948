//! Characters: their agent state, and the acting context for a turn.
//!
//! [`Character`] is what a character owns between turns. [`Actor`] bundles a
//! character with the world, narrator, RNG and probability table for the
//! duration of one turn; the behaviour in [`crate::perception`],
//! [`crate::decision`], [`crate::hide_seek`], [`crate::dialogue`] and
//! [`crate::negotiation`] is written as methods on it.

use std::collections::{BTreeMap, BTreeSet};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chance;
use crate::config::Chances;
use crate::memory::MemoryStore;
use crate::narration::{Event, Narrator};
use crate::topic::Topic;
use crate::types::{Aim, Decision, EntityId, Nerves};
use crate::world::World;

/// The few world entities a character must know by identity.
///
/// Injected at construction; any of them may be absent from a setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Props {
    /// The weapon that makes threats possible.
    pub revolver: Option<EntityId>,
    /// What calms shaken nerves.
    pub brandy: Option<EntityId>,
    /// The sensitive subject characters must agree what to do about.
    pub dead_body: Option<EntityId>,
}

/// Agent state owned by one character.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Character {
    /// Calm or shaken.
    pub nerves: Nerves,
    /// Inbound topic awaiting a reply.
    pub topic: Option<Topic>,
    /// Beliefs about where things are.
    pub memories: MemoryStore,
    /// Items this character will pick up wherever it sees them.
    pub desired_items: BTreeSet<EntityId>,
    /// Own decision per sensitive subject.
    pub what_to_do_about: BTreeMap<EntityId, Decision>,
    /// Belief about the other party's decision per sensitive subject.
    pub other_decision_about: BTreeMap<EntityId, Decision>,
    /// Well-known entities.
    pub props: Props,
    /// Weapon currently held on someone.
    pub aim: Option<Aim>,
}

impl Character {
    /// A calm character with no memories, knowing the given props.
    #[must_use]
    pub fn new(props: Props) -> Self {
        Self {
            props,
            ..Self::default()
        }
    }
}

/// One character acting, with everything it may touch.
pub struct Actor<'a> {
    /// The acting character's entity id.
    pub id: EntityId,
    /// The acting character's agent state, detached from the world.
    pub me: &'a mut Character,
    /// Everything else.
    pub world: &'a mut World,
    /// Where emitted lines go.
    pub narrator: &'a mut dyn Narrator,
    /// Source of every random choice.
    pub rng: &'a mut dyn RngCore,
    /// Probability table.
    pub chances: &'a Chances,
}

impl Actor<'_> {
    /// Where the actor is standing.
    #[must_use]
    pub fn location(&self) -> Option<EntityId> {
        self.world.location_of(self.id)
    }

    /// The revolver, if the actor is holding it.
    #[must_use]
    pub fn armed_with(&self) -> Option<EntityId> {
        self.me
            .props
            .revolver
            .filter(|r| self.world.location_of(*r) == Some(self.id))
    }

    /// Whether the actor is carrying `item` right now.
    #[must_use]
    pub fn carries(&self, item: EntityId) -> bool {
        self.world.location_of(item) == Some(self.id)
    }

    // -----------------------------------------------------------------------
    // Emission
    // -----------------------------------------------------------------------

    fn push(&mut self, observer: EntityId, phrase: &str, participants: &[EntityId], exclamatory: bool) {
        let event = Event {
            observer,
            location: self.world.location_of(observer),
            phrase: phrase.to_string(),
            participants: participants.to_vec(),
            exclamatory,
        };
        self.narrator.emit(event);
    }

    /// Narrate a line from the actor's viewpoint.
    pub fn emit(&mut self, phrase: &str, participants: &[EntityId]) {
        self.push(self.id, phrase, participants, false);
    }

    /// Narrate an exclamation from the actor's viewpoint.
    pub fn exclaim(&mut self, phrase: &str, participants: &[EntityId]) {
        self.push(self.id, phrase, participants, true);
    }

    /// Narrate a line from another character's viewpoint.
    pub fn emit_to(&mut self, observer: EntityId, phrase: &str, participants: &[EntityId]) {
        self.push(observer, phrase, participants, false);
    }

    // -----------------------------------------------------------------------
    // Addressing other characters
    // -----------------------------------------------------------------------

    /// Say `phrase` and leave `topic` pending on `other`.
    ///
    /// Whatever `other` had pending is replaced.
    pub fn address(&mut self, other: EntityId, topic: Topic, phrase: &str, participants: &[EntityId]) {
        if let Some(listener) = self.world.character_mut(other) {
            listener.topic = Some(topic);
            debug!(
                speaker = self.world.name(self.id),
                listener = self.world.name(other),
                ?topic,
                "topic assigned"
            );
        }
        self.emit(phrase, participants);
    }

    /// Greet `other`.
    pub fn greet(&mut self, other: EntityId, phrase: &str) {
        self.address(other, Topic::Greet { from: self.id }, phrase, &[self.id, other]);
    }

    /// Make a remark to `other`.
    pub fn speak_to(&mut self, other: EntityId, phrase: &str, participants: &[EntityId], subject: Option<EntityId>) {
        self.address(other, Topic::Speech { from: self.id, subject }, phrase, participants);
    }

    /// Ask `other` a question.
    pub fn question(&mut self, other: EntityId, phrase: &str, participants: &[EntityId], subject: Option<EntityId>) {
        self.address(other, Topic::Question { from: self.id, subject }, phrase, participants);
    }

    // -----------------------------------------------------------------------
    // Handling things
    // -----------------------------------------------------------------------

    /// Hold a carried weapon on `other`.
    pub fn point_at(&mut self, other: EntityId, weapon: EntityId) {
        if !self.carries(weapon) {
            return;
        }
        self.emit("<1> pointed <3> at <2>", &[self.id, other, weapon]);
        self.me.aim = Some(Aim {
            weapon,
            target: other,
        });
        debug!(actor = self.world.name(self.id), target = self.world.name(other), "aiming");
    }

    fn lower_if_aiming(&mut self, item: EntityId) {
        if self.me.aim.is_some_and(|aim| aim.weapon == item) {
            self.me.aim = None;
        }
    }

    /// Hand a carried item to `other`; both now know who has it.
    pub fn give_to(&mut self, other: EntityId, item: EntityId) {
        if !self.carries(item) {
            return;
        }
        self.emit("<1> gave <3> to <2>", &[self.id, other, item]);
        self.lower_if_aiming(item);
        self.world.move_to(item, other);
        self.me.memories.remember(item, other);
        if let Some(receiver) = self.world.character_mut(other) {
            receiver.memories.remember(item, other);
        }
    }

    /// Put a carried item down where the actor stands.
    pub fn put_down(&mut self, item: EntityId) {
        let Some(here) = self.location() else {
            return;
        };
        if !self.carries(item) {
            return;
        }
        self.emit("<1> put down <2>", &[self.id, item]);
        self.lower_if_aiming(item);
        self.world.move_to(item, here);
        self.me.memories.remember(item, here);
    }

    /// Take an item lying where the actor stands.
    pub fn pick_up(&mut self, item: EntityId) {
        self.emit("<1> picked up <2>", &[self.id, item]);
        self.world.move_to(item, self.id);
        self.me.memories.remember(item, self.id);
    }

    // -----------------------------------------------------------------------
    // Moving
    // -----------------------------------------------------------------------

    /// Walk to `destination` and look around.
    pub fn move_to(&mut self, destination: EntityId) {
        self.world.move_to(self.id, destination);
        if self.world.location_of(self.id) != Some(destination) {
            return;
        }
        self.me.aim = None;
        self.emit("<1> went to <2>", &[self.id, destination]);
        self.look_around();
    }

    /// Walk through a random exit. With nowhere to go, stay put.
    pub fn wander(&mut self) {
        let Some(here) = self.location() else {
            return;
        };
        let exits = self.world.exits(here).to_vec();
        if let Some(&next) = chance::pick(self.rng, &exits) {
            self.move_to(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::Transcript;
    use crate::types::{Gender, Naming, Traits};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Fixture {
        world: World,
        hall: EntityId,
        study: EntityId,
        alice: EntityId,
        bob: EntityId,
        revolver: EntityId,
    }

    fn fixture() -> Fixture {
        let mut world = World::new();
        let hall = world.add_location("hall", Naming::Common);
        let study = world.add_location("study", Naming::Common);
        world.connect(hall, study).expect("connect");
        let alice = world
            .add_character("Alice", Gender::Female, hall, Character::default())
            .expect("alice");
        let bob = world
            .add_character("Bob", Gender::Male, hall, Character::default())
            .expect("bob");
        let revolver = world
            .add_item("revolver", Traits { weapon: true, ..Traits::NONE }, Naming::Common, alice)
            .expect("revolver");
        Fixture { world, hall, study, alice, bob, revolver }
    }

    #[test]
    fn give_to_moves_item_and_informs_both() {
        let mut f = fixture();
        let mut transcript = Transcript::new();
        let mut rng = StdRng::seed_from_u64(1);
        let chances = Chances::default();
        let (bob, revolver) = (f.bob, f.revolver);
        f.world
            .with_actor(f.alice, &mut transcript, &mut rng, &chances, |a| a.give_to(bob, revolver))
            .expect("alice acts");

        assert_eq!(f.world.location_of(f.revolver), Some(f.bob));
        let bob_state = f.world.character(f.bob).expect("bob");
        assert_eq!(bob_state.memories.recall(f.revolver).map(|m| m.location), Some(f.bob));
        let alice_state = f.world.character(f.alice).expect("alice");
        assert_eq!(alice_state.memories.recall(f.revolver).map(|m| m.location), Some(f.bob));
        assert!(transcript.contains_phrase("<1> gave <3> to <2>"));
    }

    #[test]
    fn cannot_give_what_you_do_not_carry() {
        let mut f = fixture();
        let mut events: Vec<Event> = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        let chances = Chances::default();
        let (alice, revolver) = (f.alice, f.revolver);
        f.world
            .with_actor(f.bob, &mut events, &mut rng, &chances, |a| a.give_to(alice, revolver))
            .expect("bob acts");
        assert_eq!(f.world.location_of(f.revolver), Some(f.alice));
        assert!(events.is_empty());
    }

    #[test]
    fn address_sets_pending_topic() {
        let mut f = fixture();
        let mut events: Vec<Event> = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        let chances = Chances::default();
        let bob = f.bob;
        f.world
            .with_actor(f.alice, &mut events, &mut rng, &chances, |a| a.greet(bob, "'Hello, <2>,' said <1>"))
            .expect("alice acts");
        let pending = f.world.character(f.bob).and_then(|c| c.topic);
        assert_eq!(pending, Some(Topic::Greet { from: f.alice }));
    }

    #[test]
    fn moving_lowers_the_weapon_and_narrates() {
        let mut f = fixture();
        let mut transcript = Transcript::new();
        let mut rng = StdRng::seed_from_u64(3);
        let chances = Chances::default();
        let (bob, revolver, study) = (f.bob, f.revolver, f.study);
        f.world
            .with_actor(f.alice, &mut transcript, &mut rng, &chances, |a| {
                a.point_at(bob, revolver);
                assert!(a.me.aim.is_some());
                a.move_to(study);
                assert!(a.me.aim.is_none());
            })
            .expect("alice acts");
        assert_eq!(f.world.location_of(f.alice), Some(f.study));
        assert!(transcript.contains_phrase("<1> went to <2>"));
        assert!(f.world.contents(f.hall).contains(&f.bob));
    }

    #[test]
    fn put_down_leaves_item_in_room_and_remembers_it() {
        let mut f = fixture();
        let mut events: Vec<Event> = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        let chances = Chances::default();
        let revolver = f.revolver;
        f.world
            .with_actor(f.alice, &mut events, &mut rng, &chances, |a| a.put_down(revolver))
            .expect("alice acts");
        assert_eq!(f.world.location_of(f.revolver), Some(f.hall));
        let memory = f.world.character(f.alice).and_then(|c| c.memories.recall(f.revolver));
        assert_eq!(memory.map(|m| m.location), Some(f.hall));
    }
}
