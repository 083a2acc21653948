//! What a character notices on arriving somewhere, and how it reacts.

use std::ops::ControlFlow;

use tracing::debug;

use crate::chance;
use crate::character::Actor;
use crate::memory::Memory;
use crate::topic::Topic;
use crate::types::{EntityId, Nerves};

const HORROR_AMOUNTS: [&str; 2] = ["shudder", "wave"];
const HORROR_FEELINGS: [&str; 4] = ["fear", "disgust", "sickness", "loathing"];
const HORROR_REACTIONS: [&str; 3] = ["screamed", "yelped", "went pale"];

impl Actor<'_> {
    /// Scan the current location and react to what is there.
    ///
    /// Works from a snapshot of the location's contents taken on entry. A
    /// threat issued to someone here ends the scan.
    pub fn look_around(&mut self) {
        let Some(here) = self.location() else {
            return;
        };
        if self.chances.nostalgia.hits(self.rng) {
            self.exclaim("It was so nice being in <2> again", &[self.id, here]);
        }

        let present = self.world.contents(here).to_vec();
        for x in present {
            if x == self.id {
                continue;
            }
            let traits = self.world.traits(x);
            if traits.horror {
                self.behold_horror(x, here);
            } else if traits.animate {
                if self.encounter(x, here).is_break() {
                    return;
                }
            } else if traits.notable {
                self.emit("<1> saw <2>", &[self.id, x]);
                self.me.memories.remember(x, here);
            }
        }
    }

    fn behold_horror(&mut self, horror: EntityId, here: EntityId) {
        if self.me.memories.recall(horror).is_some() {
            let amount = chance::pick(self.rng, &HORROR_AMOUNTS).copied().unwrap_or("shudder");
            let feeling = chance::pick(self.rng, &HORROR_FEELINGS).copied().unwrap_or("fear");
            self.emit(
                &format!("<1> felt a {amount} of {feeling} as <he-1> looked at <2>"),
                &[self.id, horror],
            );
        } else {
            let reaction = chance::pick(self.rng, &HORROR_REACTIONS).copied().unwrap_or("screamed");
            self.exclaim(&format!("<1> {reaction} at the sight of <indef-2>"), &[self.id, horror]);
            self.me.nerves = Nerves::Shaken;
            debug!(actor = self.world.name(self.id), "nerves shaken");
        }
        self.me.memories.remember(horror, here);
    }

    /// Meet another character. Breaks if a threat was made.
    fn encounter(&mut self, other: EntityId, here: EntityId) -> ControlFlow<()> {
        self.emit("<1> saw <2>", &[self.id, other]);
        self.emit_to(other, "<1> saw <2> walk into <3>", &[other, self.id, here]);
        self.me.memories.remember(other, here);
        self.greet(other, "'Hello, <2>,' said <1>");

        let carried = self.world.contents(other).to_vec();
        for item in carried {
            if !self.world.traits(item).treasure {
                continue;
            }
            self.emit("<1> noticed <2> <was-2> carrying <indef-3>", &[self.id, other, item]);
            if let Some(revolver) = self.armed_with() {
                self.point_at(other, revolver);
                debug!(actor = self.world.name(self.id), target = self.world.name(other), "demanding item");
                self.address(
                    other,
                    Topic::ThreatGiveMe {
                        from: self.id,
                        subject: item,
                    },
                    "'Please give me <3>, <2>, or I shall shoot you,' <he-1> said",
                    &[self.id, other, item],
                );
                return ControlFlow::Break(());
            }
        }

        let Some(revolver) = self.armed_with() else {
            return ControlFlow::Continue(());
        };
        let secrets: Vec<Memory> = self
            .world
            .memories_of(other)
            .map(|m| m.iter().copied().collect())
            .unwrap_or_default();
        for memory in secrets {
            if self.me.memories.recall(memory.subject).is_some() {
                continue;
            }
            if memory.i_hid_it_there && memory.subject != revolver {
                self.point_at(other, revolver);
                debug!(actor = self.world.name(self.id), target = self.world.name(other), "demanding a secret");
                self.address(
                    other,
                    Topic::ThreatTellMe {
                        from: self.id,
                        subject: memory.subject,
                    },
                    "'Tell me where you have hidden <3>, <2>, or I shall shoot you,' <he-1> said",
                    &[self.id, other, memory.subject],
                );
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}
