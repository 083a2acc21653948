//! Replying to whatever was last said to the actor.
//!
//! Each reply consumes the pending topic before doing anything else, so a
//! topic is answered exactly once however the reply turns out.

use tracing::debug;

use crate::chance;
use crate::character::Actor;
use crate::topic::Topic;
use crate::types::EntityId;

impl Actor<'_> {
    /// Clear the pending topic and answer it.
    pub fn converse(&mut self, topic: Topic) {
        self.me.topic = None;
        let other = topic.originator();
        match topic {
            Topic::ThreatGiveMe { subject, .. } => self.answer_demand(other, subject),
            Topic::ThreatTellMe { subject, .. } => self.answer_interrogation(other, subject),
            Topic::ThreatAgree { subject, .. } => {
                self.speak_to(
                    other,
                    "'You make a persuasive case, <2>,' said <1> weakly",
                    &[self.id, other, subject],
                    None,
                );
                self.settle(other, subject);
            }
            Topic::Greet { .. } => self.answer_greeting(other),
            Topic::Question { subject, .. } => self.answer_question(other, subject),
            Topic::WhereQuestion { subject, .. } => self.answer_where(other, subject),
            Topic::Speech { .. } => self.answer_remark(other),
        }
    }

    fn answer_demand(&mut self, other: EntityId, subject: EntityId) {
        if self.carries(subject) {
            self.speak_to(other, "'Please don't shoot!', <1> cried", &[self.id, other, subject], None);
            self.give_to(other, subject);
        } else {
            self.speak_to(other, "'But I don't have <3>!' protested <1>", &[self.id, other, subject], None);
        }
    }

    fn answer_interrogation(&mut self, other: EntityId, subject: EntityId) {
        let Some(memory) = self.me.memories.recall(subject) else {
            self.speak_to(
                other,
                "'I have no memory of that, <2>,' <1> replied",
                &[self.id, other, subject],
                None,
            );
            return;
        };
        self.speak_to(
            other,
            "'Please don't shoot!', <1> cried, '<he-3> <is-3> in <4>'",
            &[self.id, other, subject, memory.location],
            None,
        );
        if let Some(listener) = self.world.character_mut(other) {
            listener.memories.remember(subject, memory.location);
        }
    }

    fn answer_greeting(&mut self, other: EntityId) {
        self.emit("'Hello, <2>,' replied <1>", &[self.id, other]);
        self.emit_to(other, "'Hello, <2>,' replied <1>", &[self.id, other]);

        if let Some(body) = self.me.props.dead_body {
            if let Some(memory) = self.me.memories.recall(body) {
                self.discuss(other, memory);
                return;
            }
        }

        let carried = self.world.contents(other).to_vec();
        if let Some(thing) = carried.into_iter().find(|x| self.world.traits(*x).notable) {
            self.me.memories.remember(thing, other);
            self.speak_to(
                other,
                "'I see you are carrying <indef-3>,' said <1>",
                &[self.id, other, thing],
                None,
            );
            return;
        }

        match chance::roll(self.rng, self.chances.small_talk_sides) {
            0 => self.question(
                other,
                "'Lovely weather we're having, isn't it?' asked <1>",
                &[self.id, other],
                None,
            ),
            1 => self.speak_to(other, "'I was wondering where you were,' said <1>", &[self.id, other], None),
            _ => {}
        }
    }

    fn answer_question(&mut self, other: EntityId, subject: Option<EntityId>) {
        let Some(subject) = subject else {
            self.speak_to(other, "'Perhaps, <2>,' replied <1>", &[self.id, other], None);
            return;
        };
        if self.agrees_with(other, subject) {
            self.speak_to(other, "'Yes, <2>, we are agreed,' said <1>", &[self.id, other, subject], None);
            self.settle(other, subject);
            return;
        }
        if chance::roll(self.rng, 2) == 0 {
            self.speak_to(
                other,
                "'I know nothing about <3>, <2>,' explained <1>",
                &[self.id, other, subject],
                None,
            );
        } else {
            self.speak_to(other, "'Perhaps, <2>,' replied <1>", &[self.id, other], None);
        }
    }

    fn answer_where(&mut self, other: EntityId, subject: EntityId) {
        let Some(memory) = self.me.memories.recall(subject) else {
            self.speak_to(other, "'I don't know,' <1> answered simply", &[self.id, other, subject], None);
            return;
        };
        if memory.i_hid_it_there {
            self.question(
                other,
                "'Why do you want to know where <3> is, <2>?'",
                &[self.id, other, subject],
                Some(subject),
            );
            return;
        }
        if self.carries(subject) {
            self.speak_to(other, "'I've got <3> right here, <2>'", &[self.id, other, subject], None);
            self.put_down(subject);
            return;
        }
        if self.world.traits(memory.location).animate {
            self.speak_to(
                other,
                "'I think <3> has <4>,' <1> recalled",
                &[self.id, other, memory.location, subject],
                None,
            );
        } else {
            self.speak_to(
                other,
                "'I believe it's in <3>, <2>,' <1> recalled",
                &[self.id, other, memory.location],
                None,
            );
        }
        if let Some(listener) = self.world.character_mut(other) {
            listener.memories.remember(subject, memory.location);
        }
    }

    fn answer_remark(&mut self, other: EntityId) {
        let us = [self.id, other];
        match chance::roll(self.rng, 6) {
            0 => self.emit("<1> nodded", &us),
            1 => self.emit("<1> remained silent", &us),
            2 => self.question(other, "'Do you really think so?' asked <1>", &us, None),
            3 => self.speak_to(other, "'Yes, it's a shame really,' stated <1>", &us, None),
            4 => self.speak_to(other, "'Oh, I know, I know,' said <1>", &us, None),
            _ => self.speak_to(other, "'I see, <2>, I see,' said <1>", &us, None),
        }
    }

    /// Whether both parties have reached the same decision about `subject`.
    fn agrees_with(&self, other: EntityId, subject: EntityId) -> bool {
        let mine = self.me.what_to_do_about.get(&subject);
        let theirs = self
            .world
            .character(other)
            .and_then(|c| c.what_to_do_about.get(&subject));
        mine.is_some() && mine == theirs
    }

    /// Forget the negotiation over `subject` on both sides.
    pub(crate) fn settle(&mut self, other: EntityId, subject: EntityId) {
        self.me.what_to_do_about.remove(&subject);
        self.me.other_decision_about.remove(&subject);
        if let Some(them) = self.world.character_mut(other) {
            them.what_to_do_about.remove(&subject);
            them.other_decision_about.remove(&subject);
        }
        debug!(
            actor = self.world.name(self.id),
            other = self.world.name(other),
            subject = self.world.name(subject),
            "shared decision settled"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::character::{Character, Props};
    use crate::config::Chances;
    use crate::narration::Transcript;
    use crate::topic::Topic;
    use crate::types::{Decision, EntityId, Gender, Naming, Traits};
    use crate::world::World;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Parlour {
        world: World,
        alice: EntityId,
        bob: EntityId,
        locket: EntityId,
        drawer: EntityId,
    }

    fn parlour() -> Parlour {
        let mut world = World::new();
        let parlour = world.add_location("parlour", Naming::Common);
        let alice = world
            .add_character("Alice", Gender::Female, parlour, Character::default())
            .expect("alice");
        let bob = world
            .add_character("Bob", Gender::Male, parlour, Character::default())
            .expect("bob");
        let drawer = world
            .add_item("drawer", Traits { container: true, ..Traits::NONE }, Naming::Common, parlour)
            .expect("drawer");
        let locket = world
            .add_item("locket", Traits { treasure: true, ..Traits::NONE }, Naming::Common, alice)
            .expect("locket");
        Parlour { world, alice, bob, locket, drawer }
    }

    fn reply(p: &mut Parlour, who: EntityId, topic: Topic) -> Transcript {
        if let Some(c) = p.world.character_mut(who) {
            c.topic = Some(topic);
        }
        let mut transcript = Transcript::new();
        let mut rng = StdRng::seed_from_u64(17);
        let chances = Chances::default();
        p.world
            .with_actor(who, &mut transcript, &mut rng, &chances, |a| a.live())
            .expect("acts");
        transcript
    }

    #[test]
    fn demand_for_carried_item_is_met() {
        let mut p = parlour();
        let (alice, bob, locket) = (p.alice, p.bob, p.locket);
        let t = reply(&mut p, alice, Topic::ThreatGiveMe { from: bob, subject: locket });
        assert_eq!(p.world.location_of(p.locket), Some(p.bob));
        assert!(t.contains_phrase("'Please don't shoot!', <1> cried"));
        assert!(p.world.character(p.alice).and_then(|c| c.topic).is_none());
    }

    #[test]
    fn demand_for_missing_item_is_protested() {
        let mut p = parlour();
        let (alice, bob, locket) = (p.alice, p.bob, p.locket);
        let t = reply(&mut p, bob, Topic::ThreatGiveMe { from: alice, subject: locket });
        assert_eq!(p.world.location_of(p.locket), Some(p.alice));
        assert!(t.contains_phrase("'But I don't have <3>!' protested <1>"));
    }

    #[test]
    fn interrogation_reveals_belief_to_asker() {
        let mut p = parlour();
        let (alice, bob, locket, drawer) = (p.alice, p.bob, p.locket, p.drawer);
        if let Some(a) = p.world.character_mut(alice) {
            a.memories.remember_with(locket, drawer, true);
        }
        reply(&mut p, alice, Topic::ThreatTellMe { from: bob, subject: locket });
        let told = p.world.character(p.bob).and_then(|c| c.memories.recall(p.locket));
        assert_eq!(told.map(|m| m.location), Some(p.drawer));
    }

    #[test]
    fn where_question_without_memory_is_shrugged_off() {
        let mut p = parlour();
        let (alice, bob, locket) = (p.alice, p.bob, p.locket);
        let t = reply(&mut p, bob, Topic::WhereQuestion { from: alice, subject: locket });
        assert!(t.contains_phrase("'I don't know,' <1> answered simply"));
    }

    #[test]
    fn where_question_about_carried_item_puts_it_down() {
        let mut p = parlour();
        let (alice, bob, locket) = (p.alice, p.bob, p.locket);
        if let Some(a) = p.world.character_mut(alice) {
            a.memories.remember(locket, alice);
        }
        reply(&mut p, alice, Topic::WhereQuestion { from: bob, subject: locket });
        assert_eq!(p.world.location_of(p.locket), p.world.location_of(p.alice));
    }

    #[test]
    fn where_question_passes_on_belief() {
        let mut p = parlour();
        let (alice, bob, locket, drawer) = (p.alice, p.bob, p.locket, p.drawer);
        if let Some(a) = p.world.character_mut(alice) {
            a.memories.remember(locket, drawer);
        }
        p.world.move_to(locket, drawer);
        let t = reply(&mut p, alice, Topic::WhereQuestion { from: bob, subject: locket });
        assert!(t.contains_phrase("'I believe it's in <3>, <2>,' <1> recalled"));
        let told = p.world.character(p.bob).and_then(|c| c.memories.recall(p.locket));
        assert_eq!(told.map(|m| m.location), Some(p.drawer));
    }

    #[test]
    fn agreeing_confirmation_settles_both_sides() {
        let mut p = parlour();
        let body = p.drawer;
        for id in [p.alice, p.bob] {
            if let Some(c) = p.world.character_mut(id) {
                c.what_to_do_about.insert(body, Decision::Call);
                c.other_decision_about.insert(body, Decision::Call);
            }
        }
        let (alice, bob) = (p.alice, p.bob);
        let t = reply(&mut p, alice, Topic::Question { from: bob, subject: Some(body) });
        assert!(t.contains_phrase("'Yes, <2>, we are agreed,' said <1>"));
        for id in [p.alice, p.bob] {
            let c = p.world.character(id).expect("character");
            assert!(c.what_to_do_about.is_empty());
            assert!(c.other_decision_about.is_empty());
        }
    }

    #[test]
    fn threat_agree_clears_the_contest() {
        let mut p = parlour();
        let body = p.drawer;
        if let Some(a) = p.world.character_mut(p.alice) {
            a.what_to_do_about.insert(body, Decision::Call);
            a.other_decision_about.insert(body, Decision::Dispose);
        }
        if let Some(b) = p.world.character_mut(p.bob) {
            b.what_to_do_about.insert(body, Decision::Dispose);
            b.other_decision_about.insert(body, Decision::Call);
        }
        let (alice, bob) = (p.alice, p.bob);
        reply(&mut p, alice, Topic::ThreatAgree { from: bob, subject: body });
        for id in [p.alice, p.bob] {
            let c = p.world.character(id).expect("character");
            assert!(c.what_to_do_about.get(&body).is_none());
            assert!(c.other_decision_about.get(&body).is_none());
        }
    }

    #[test]
    fn greeting_with_a_body_in_mind_turns_to_it() {
        let mut p = parlour();
        let cellar = p.world.add_location("cellar", Naming::Common);
        let body = p
            .world
            .add_item("body", Traits { horror: true, ..Traits::NONE }, Naming::Common, cellar)
            .expect("body");
        if let Some(a) = p.world.character_mut(p.alice) {
            a.props = Props {
                dead_body: Some(body),
                ..Props::default()
            };
            a.memories.remember(body, cellar);
        }
        let (alice, bob) = (p.alice, p.bob);
        let t = reply(&mut p, alice, Topic::Greet { from: bob });
        assert!(t.contains_phrase("'Hello, <2>,' replied <1>"));
        assert_eq!(t.seen_by(p.bob).count(), 1);
        // Bob knows nothing of the body, so Alice tells him.
        let pending = p.world.character(p.bob).and_then(|c| c.topic);
        assert_eq!(pending, Some(Topic::Question { from: p.alice, subject: Some(body) }));
    }
}
