//! Talking about a sensitive subject until both parties agree what to do.
//!
//! Each side keeps its own decision and a belief about the other's. Every
//! exchange moves the pair toward one of: both know and agree (a confirming
//! question, settled by the reply), or disagree (persuasion, possibly at
//! gunpoint). A shaken character must first find a drink.

use tracing::debug;

use crate::chance;
use crate::character::Actor;
use crate::memory::Memory;
use crate::topic::Topic;
use crate::types::{Decision, EntityId, Nerves};

impl Actor<'_> {
    /// Raise the remembered subject of `memory` with `other`.
    pub fn discuss(&mut self, other: EntityId, memory: Memory) {
        let subject = memory.subject;
        let other_knows = self
            .world
            .memories_of(other)
            .is_some_and(|m| m.recall(subject).is_some());
        if !other_knows {
            self.question(
                other,
                "'Did you know there's <indef-3> in <4>?' asked <1>",
                &[self.id, other, subject, memory.location],
                Some(subject),
            );
            return;
        }

        match chance::roll(self.rng, 3) {
            0 => self.question(
                other,
                "'Do you think we should do something about <3>?' asked <1>",
                &[self.id, other, subject],
                None,
            ),
            1 => self.speak_to(
                other,
                "'I think we should do something about <3>, <2>,' said <1>",
                &[self.id, other, subject],
                None,
            ),
            _ => match self.me.nerves {
                Nerves::Calm => self.decide_what_to_do_about(other, subject),
                Nerves::Shaken => self.calm_nerves(other, subject),
            },
        }
    }

    /// Commit to a decision about `thing` and press it on `other`.
    pub fn decide_what_to_do_about(&mut self, other: EntityId, thing: EntityId) {
        let mine = match self.me.what_to_do_about.get(&thing) {
            Some(decision) => *decision,
            None => {
                let decision = chance::pick(self.rng, &Decision::ALL)
                    .copied()
                    .unwrap_or(Decision::Call);
                self.me.what_to_do_about.insert(thing, decision);
                debug!(actor = self.world.name(self.id), ?decision, "decided");
                decision
            }
        };
        let parties = [self.id, other, thing];

        match self.me.other_decision_about.get(&thing).copied() {
            Some(theirs) if theirs == mine => {
                self.question(
                    other,
                    &format!("'So we're agreed then, we should {}?' asked <1>", mine.phrase()),
                    &parties,
                    Some(thing),
                );
                self.tell_decision(other, thing, mine);
            }
            Some(theirs) => {
                debug!(actor = self.world.name(self.id), ?mine, ?theirs, "decisions conflict");
                if let Some(revolver) = self.armed_with() {
                    self.point_at(other, revolver);
                    self.address(
                        other,
                        Topic::ThreatAgree {
                            from: self.id,
                            subject: thing,
                        },
                        &format!(
                            "'I really feel *very* strongly that we should {}, <2>,' <he-1> said between clenched teeth",
                            mine.phrase()
                        ),
                        &parties,
                    );
                } else {
                    self.speak_to(
                        other,
                        &format!("'I don't think it would be a good idea to {}, <2>,' said <1>", theirs.phrase()),
                        &parties,
                        Some(thing),
                    );
                }
            }
            None => {
                self.speak_to(
                    other,
                    &format!("'I really think we should {}, <2>,' said <1>", mine.phrase()),
                    &parties,
                    Some(thing),
                );
                self.tell_decision(other, thing, mine);
            }
        }
    }

    /// `other` now believes the actor wants `decision` about `thing`.
    fn tell_decision(&mut self, other: EntityId, thing: EntityId, decision: Decision) {
        if let Some(listener) = self.world.character_mut(other) {
            listener.other_decision_about.insert(thing, decision);
        }
    }

    /// Seek, or drink, the brandy.
    fn calm_nerves(&mut self, other: EntityId, subject: EntityId) {
        let Some(brandy) = self.me.props.brandy else {
            self.speak_to(other, "'I need a moment, <2>,' said <1>", &[self.id, other, subject], None);
            return;
        };

        if self.carries(brandy) {
            self.emit("<1> poured <him-1>self a glass of <3>", &[self.id, other, brandy]);
            self.me.desired_items.remove(&brandy);
            self.me.nerves = Nerves::Calm;
            debug!(actor = self.world.name(self.id), "nerves calmed");
            self.put_down(brandy);
        } else if self.me.memories.recall(brandy).is_some() {
            self.speak_to(
                other,
                "'I really must pour myself a drink,' moaned <1>",
                &[self.id, other, subject],
                Some(brandy),
            );
            self.me.desired_items.insert(brandy);
            if self.chances.repeat_where_question.hits(self.rng) {
                self.address(
                    other,
                    Topic::WhereQuestion {
                        from: self.id,
                        subject: brandy,
                    },
                    "'Where did you say <3> was?'",
                    &[self.id, other, brandy],
                );
            }
        } else {
            self.address(
                other,
                Topic::WhereQuestion {
                    from: self.id,
                    subject: brandy,
                },
                "'Where is <3>?  I need a drink,' managed <1>",
                &[self.id, other, brandy],
            );
            self.me.desired_items.insert(brandy);
        }
    }
}
