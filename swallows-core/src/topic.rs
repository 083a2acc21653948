//! Conversational topics: what a speaker wants from a listener.
//!
//! A topic is set on the listener when addressed and consumed exactly once
//! on the listener's next turn. The set is closed; dispatch matches it
//! exhaustively.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// A pending utterance awaiting a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topic {
    /// "Hello."
    Greet {
        /// Speaker.
        from: EntityId,
    },
    /// A remark that needs no particular answer.
    Speech {
        /// Speaker.
        from: EntityId,
        /// What it was about, if anything.
        subject: Option<EntityId>,
    },
    /// A question, possibly about something.
    Question {
        /// Speaker.
        from: EntityId,
        /// What it was about, if anything.
        subject: Option<EntityId>,
    },
    /// "Where is ...?"
    WhereQuestion {
        /// Speaker.
        from: EntityId,
        /// The thing sought.
        subject: EntityId,
    },
    /// "Give me ... or I shall shoot you."
    ThreatGiveMe {
        /// The one holding the weapon.
        from: EntityId,
        /// The thing demanded.
        subject: EntityId,
    },
    /// "Tell me where you have hidden ... or I shall shoot you."
    ThreatTellMe {
        /// The one holding the weapon.
        from: EntityId,
        /// The thing sought.
        subject: EntityId,
    },
    /// "We should do as I say about ..."
    ThreatAgree {
        /// The one holding the weapon.
        from: EntityId,
        /// The contested subject.
        subject: EntityId,
    },
}

impl Topic {
    /// Who started this exchange.
    #[must_use]
    pub fn originator(&self) -> EntityId {
        match *self {
            Self::Greet { from }
            | Self::Speech { from, .. }
            | Self::Question { from, .. }
            | Self::WhereQuestion { from, .. }
            | Self::ThreatGiveMe { from, .. }
            | Self::ThreatTellMe { from, .. }
            | Self::ThreatAgree { from, .. } => from,
        }
    }

    /// What this exchange is about, if anything.
    #[must_use]
    pub fn subject(&self) -> Option<EntityId> {
        match *self {
            Self::Greet { .. } => None,
            Self::Speech { subject, .. } | Self::Question { subject, .. } => subject,
            Self::WhereQuestion { subject, .. }
            | Self::ThreatGiveMe { subject, .. }
            | Self::ThreatTellMe { subject, .. }
            | Self::ThreatAgree { subject, .. } => Some(subject),
        }
    }

    /// Whether this is said at gunpoint.
    #[must_use]
    pub fn is_threat(&self) -> bool {
        matches!(
            self,
            Self::ThreatGiveMe { .. } | Self::ThreatTellMe { .. } | Self::ThreatAgree { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_cover_every_variant() {
        let a = EntityId(1);
        let s = EntityId(2);
        let topics = [
            (Topic::Greet { from: a }, None, false),
            (Topic::Speech { from: a, subject: None }, None, false),
            (Topic::Question { from: a, subject: Some(s) }, Some(s), false),
            (Topic::WhereQuestion { from: a, subject: s }, Some(s), false),
            (Topic::ThreatGiveMe { from: a, subject: s }, Some(s), true),
            (Topic::ThreatTellMe { from: a, subject: s }, Some(s), true),
            (Topic::ThreatAgree { from: a, subject: s }, Some(s), true),
        ];
        for (topic, subject, threat) in topics {
            assert_eq!(topic.originator(), a);
            assert_eq!(topic.subject(), subject);
            assert_eq!(topic.is_threat(), threat);
        }
    }
}
