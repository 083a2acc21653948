//! Hiding things in containers, and going back for them.
//!
//! A character alone with a container either hides what it is fixated on,
//! acts on a memory of something inside (checking or retrieving it), or
//! searches the container afresh. Acting on a memory is where stale beliefs
//! are discovered and forgotten.

use tracing::debug;

use crate::chance;
use crate::character::Actor;
use crate::memory::Memory;
use crate::types::EntityId;

impl Actor<'_> {
    /// Play with the containers here. Wanders off if there are none.
    pub fn hide_and_seek(&mut self, fixation: Option<EntityId>) {
        let Some(here) = self.location() else {
            return;
        };
        let containers: Vec<EntityId> = self
            .world
            .contents(here)
            .iter()
            .copied()
            .filter(|x| self.world.traits(*x).container)
            .collect();
        let Some(&container) = chance::pick(self.rng, &containers) else {
            self.wander();
            return;
        };

        if let Some(item) = fixation {
            self.hide(item, container);
            self.wander();
            return;
        }

        let mut memories = self.me.memories.located_in(container);
        if !memories.is_empty() && self.chances.forget_container_memories.hits(self.rng) {
            memories.clear();
        }
        match chance::pick(self.rng, &memories).copied() {
            Some(memory) => self.revisit(memory, container),
            None => self.search(container),
        }
    }

    fn hide(&mut self, item: EntityId, container: EntityId) {
        self.emit("<1> hid <2> in <3>", &[self.id, item, container]);
        if self.me.aim.is_some_and(|aim| aim.weapon == item) {
            self.me.aim = None;
        }
        self.world.move_to(item, container);
        self.me.memories.remember_with(item, container, true);
        debug!(
            actor = self.world.name(self.id),
            item = self.world.name(item),
            container = self.world.name(container),
            "hidden"
        );
    }

    /// Check on, or take back, something remembered in `container`.
    fn revisit(&mut self, memory: Memory, container: EntityId) {
        let subject = memory.subject;
        let lucky = self.chances.retrieve_remembered.hits(self.rng);
        let retrieving = lucky || self.me.props.revolver == Some(subject);

        let phrase = match (retrieving, memory.i_hid_it_there) {
            (true, true) => "<1> retrieved <3> <he-1> had hidden in <2>",
            (true, false) => "<1> retrieved <3> from <2>",
            (false, _) => "<1> checked that <3> <was-3> still in <2>",
        };
        self.emit(phrase, &[self.id, container, subject]);

        if self.world.location_of(subject) != Some(container) {
            self.exclaim("But <he-2> <was-2> missing", &[self.id, subject]);
            self.me.memories.forget(subject);
            debug!(
                actor = self.world.name(self.id),
                subject = self.world.name(subject),
                "stale memory forgotten"
            );
            return;
        }
        if retrieving {
            self.world.move_to(subject, self.id);
            self.me.memories.remember(subject, self.id);
        }
    }

    fn search(&mut self, container: EntityId) {
        self.emit("<1> searched <2>", &[self.id, container]);
        let found = self.world.contents(container).to_vec();
        let mut wanted = Vec::new();
        for thing in found {
            self.me.memories.remember(thing, container);
            if self.world.traits(thing).is_valuable() || self.me.desired_items.contains(&thing) {
                wanted.push(thing);
            }
        }
        if let Some(&thing) = chance::pick(self.rng, &wanted) {
            self.emit("<1> found <2> there, and took <him-2>", &[self.id, thing]);
            self.world.move_to(thing, self.id);
            self.me.memories.remember(thing, self.id);
        }
    }
}
