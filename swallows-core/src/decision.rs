//! The per-turn decision procedure.
//!
//! Precedence, highest first:
//!
//! 1. Reply to a pending topic.
//! 2. Pick up anything here worth having.
//! 3. Roll the turn die: hide and seek when alone, wander, or idle.

use rand::RngCore;
use tracing::{trace, warn};

use crate::chance;
use crate::character::Actor;
use crate::config::Chances;
use crate::narration::Narrator;
use crate::types::EntityId;
use crate::world::World;

const IDLE_LINES: [&str; 5] = [
    "<1> yawned",
    "<1> gazed thoughtfully into the distance",
    "<1> thought <he-1> heard something",
    "<1> scratched <his-1> head",
    "<1> immediately had a feeling something was amiss",
];

impl Actor<'_> {
    /// Take one turn.
    pub fn live(&mut self) {
        if let Some(topic) = self.me.topic {
            trace!(actor = self.world.name(self.id), "conversing");
            self.converse(topic);
            return;
        }
        let Some(here) = self.location() else {
            return;
        };

        if let Some(item) = self.worth_taking(here) {
            trace!(actor = self.world.name(self.id), "picking up");
            self.pick_up(item);
            return;
        }

        let fixation = self.fixation();
        let people_about = self
            .world
            .contents(here)
            .iter()
            .any(|x| *x != self.id && self.world.traits(*x).animate);

        let choice = chance::roll(self.rng, self.chances.turn_roll_sides);
        if choice < self.chances.hide_seek_below && !people_about {
            trace!(actor = self.world.name(self.id), choice, "hide and seek");
            self.hide_and_seek(fixation);
        } else if choice < self.chances.wander_below {
            trace!(actor = self.world.name(self.id), choice, "wandering");
            self.wander();
        } else {
            let idle = usize::try_from(choice - self.chances.wander_below)
                .ok()
                .and_then(|i| IDLE_LINES.get(i));
            match idle {
                Some(line) => {
                    trace!(actor = self.world.name(self.id), choice, "idling");
                    self.emit(line, &[self.id]);
                }
                None => {
                    trace!(actor = self.world.name(self.id), choice, "wandering");
                    self.wander();
                }
            }
        }
    }

    fn worth_taking(&self, here: EntityId) -> Option<EntityId> {
        self.world.contents(here).iter().copied().find(|x| {
            let traits = self.world.traits(*x);
            !traits.animate && (traits.is_valuable() || self.me.desired_items.contains(x))
        })
    }

    /// The item the actor is preoccupied with hiding this turn, if any.
    fn fixation(&mut self) -> Option<EntityId> {
        let treasure = self
            .world
            .contents(self.id)
            .iter()
            .copied()
            .find(|x| self.world.traits(*x).treasure);
        if treasure.is_some() {
            return treasure;
        }
        if self.chances.revolver_fixation.hits(self.rng) {
            return self.armed_with();
        }
        None
    }
}

impl World {
    /// Give one character its turn.
    pub fn take_turn(&mut self, id: EntityId, narrator: &mut dyn Narrator, rng: &mut dyn RngCore, chances: &Chances) {
        if self.with_actor(id, narrator, rng, chances, |a| a.live()).is_none() {
            warn!(%id, "turn skipped");
        }
    }

    /// Give every character one turn, in roster order.
    pub fn tick(&mut self, narrator: &mut dyn Narrator, rng: &mut dyn RngCore, chances: &Chances) {
        for id in self.characters() {
            self.take_turn(id, narrator, rng, chances);
        }
    }
}
