//! Property-Based Tests for Swallows Core
//!
//! Uses `proptest` to check the memory-store invariants and the one-shot
//! topic rule under random inputs and random seeds.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use swallows_core::config::Chances;
use swallows_core::{Character, EntityId, Gender, MemoryStore, Naming, Topic, Traits, Transcript, World};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_id() -> impl Strategy<Value = EntityId> {
    (0u32..16).prop_map(EntityId)
}

#[derive(Debug, Clone)]
enum Op {
    Remember(EntityId, EntityId, bool),
    Forget(EntityId),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (arb_id(), arb_id(), any::<bool>()).prop_map(|(s, l, h)| Op::Remember(s, l, h)),
        1 => arb_id().prop_map(Op::Forget),
    ]
}

// ---------------------------------------------------------------------------
// Property: the last write for a subject is what is recalled
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn last_write_wins(ops in prop::collection::vec(arb_op(), 0..64)) {
        let mut store = MemoryStore::new();
        let mut model = std::collections::BTreeMap::new();
        for op in ops {
            match op {
                Op::Remember(s, l, h) => {
                    store.remember_with(s, l, h);
                    model.insert(s, (l, h));
                }
                Op::Forget(s) => {
                    store.forget(s);
                    model.remove(&s);
                }
            }
        }
        prop_assert_eq!(store.len(), model.len());
        for (subject, (location, hid)) in model {
            let memory = store.recall(subject).expect("modelled subject is remembered");
            prop_assert_eq!(memory.location, location);
            prop_assert_eq!(memory.i_hid_it_there, hid);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: remembering twice changes nothing
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn remember_is_idempotent(subject in arb_id(), location in arb_id()) {
        let mut store = MemoryStore::new();
        store.remember(subject, location);
        let once = store.clone();
        store.remember(subject, location);
        prop_assert_eq!(&store, &once);
        prop_assert_eq!(store.len(), 1);
        prop_assert!(!store.recall(subject).expect("remembered").i_hid_it_there);
    }
}

// ---------------------------------------------------------------------------
// Property: a pending topic never survives its listener's turn
// ---------------------------------------------------------------------------

fn arb_topic(from: EntityId, subject: EntityId) -> impl Strategy<Value = Topic> {
    prop_oneof![
        Just(Topic::Greet { from }),
        Just(Topic::Speech { from, subject: None }),
        Just(Topic::Question { from, subject: None }),
        Just(Topic::Question { from, subject: Some(subject) }),
        Just(Topic::WhereQuestion { from, subject }),
        Just(Topic::ThreatGiveMe { from, subject }),
        Just(Topic::ThreatTellMe { from, subject }),
        Just(Topic::ThreatAgree { from, subject }),
    ]
}

fn pair() -> (World, EntityId, EntityId, EntityId) {
    let mut world = World::new();
    let hall = world.add_location("hall", Naming::Common);
    let alice = world
        .add_character("Alice", Gender::Female, hall, Character::default())
        .expect("alice");
    let bob = world
        .add_character("Bob", Gender::Male, hall, Character::default())
        .expect("bob");
    let ring = world
        .add_item("ring", Traits { treasure: true, notable: true, ..Traits::NONE }, Naming::Common, alice)
        .expect("ring");
    (world, alice, bob, ring)
}

proptest! {
    #[test]
    fn topic_consumed_whatever_the_seed(
        seed in any::<u64>(),
        topic in arb_topic(EntityId(2), EntityId(3)),
        remembers in any::<bool>(),
    ) {
        let (mut world, alice, bob, ring) = pair();
        prop_assume!(bob == EntityId(2) && ring == EntityId(3));
        if let Some(a) = world.character_mut(alice) {
            a.topic = Some(topic);
            if remembers {
                a.memories.remember(ring, alice);
            }
        }
        let mut transcript = Transcript::new();
        let mut rng = StdRng::seed_from_u64(seed);
        world.take_turn(alice, &mut transcript, &mut rng, &Chances::default());
        prop_assert!(world.character(alice).and_then(|c| c.topic).is_none());
    }
}
