//! The narration sink: where characters' templated lines go.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// One templated line, seen from one character's viewpoint.
///
/// `phrase` holds `<N>`-style slots filled from `participants` (1-based)
/// when the line is rendered; see [`crate::grammar::render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Whose viewpoint this line belongs to.
    pub observer: EntityId,
    /// Where the observer was when it happened.
    pub location: Option<EntityId>,
    /// Template text.
    pub phrase: String,
    /// Slot fillers.
    pub participants: Vec<EntityId>,
    /// Ends with "!" instead of ".".
    pub exclamatory: bool,
}

/// Something that receives emitted lines.
pub trait Narrator {
    /// Receive one line.
    fn emit(&mut self, event: Event);
}

impl Narrator for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

/// An ordered record of everything emitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    /// Events in emission order.
    pub events: Vec<Event>,
}

impl Transcript {
    /// An empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events seen by one character.
    pub fn seen_by(&self, observer: EntityId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.observer == observer)
    }

    /// Whether any event uses exactly this template.
    #[must_use]
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        self.events.iter().any(|e| e.phrase == phrase)
    }

    /// Most recent event.
    #[must_use]
    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Serialize the raw event stream for debugging.
    ///
    /// # Errors
    /// Propagates any `serde_json` failure.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Narrator for Transcript {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(observer: u32, phrase: &str) -> Event {
        Event {
            observer: EntityId(observer),
            location: None,
            phrase: phrase.to_string(),
            participants: vec![EntityId(observer)],
            exclamatory: false,
        }
    }

    #[test]
    fn transcript_filters_by_viewpoint() {
        let mut t = Transcript::new();
        t.emit(event(1, "<1> yawned"));
        t.emit(event(2, "<1> nodded"));
        t.emit(event(1, "<1> scratched <his-1> head"));

        assert_eq!(t.seen_by(EntityId(1)).count(), 2);
        assert!(t.contains_phrase("<1> nodded"));
        assert_eq!(t.last().map(|e| e.observer), Some(EntityId(1)));
    }

    #[test]
    fn transcript_json_mentions_phrases() {
        let mut t = Transcript::new();
        t.emit(event(3, "<1> remained silent"));
        let json = t.to_json().expect("json");
        assert!(json.contains("remained silent"));
    }
}
