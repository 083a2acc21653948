//! Pronouns, articles, and `<N>`-slot template rendering.
//!
//! Slots, all 1-based into the participant list:
//!
//! | Slot        | Renders as                         |
//! |-------------|------------------------------------|
//! | `<N>`       | "Alice", "the revolver"            |
//! | `<indef-N>` | "Alice", "a revolver", "an urn"    |
//! | `<he-N>`    | he / she / it                      |
//! | `<him-N>`   | him / her / it                     |
//! | `<his-N>`   | his / her / its                    |
//! | `<was-N>`   | was                                |
//! | `<is-N>`    | is                                 |

use crate::narration::Event;
use crate::types::{Gender, Naming};
use crate::world::{Entity, World};

/// The grammatical face an entity shows in prose.
pub trait Grammatical {
    /// Subject pronoun.
    fn he(&self) -> &'static str;
    /// Object pronoun.
    fn him(&self) -> &'static str;
    /// Possessive determiner.
    fn his(&self) -> &'static str;
    /// Past tense of "to be" agreeing with this entity.
    fn was(&self) -> &'static str {
        "was"
    }
    /// Present tense of "to be" agreeing with this entity.
    fn is(&self) -> &'static str {
        "is"
    }
    /// Name with a definite article, if it takes one.
    fn definite(&self) -> String;
    /// Name with an indefinite article, if it takes one.
    fn indefinite(&self) -> String;
}

impl Grammatical for Gender {
    fn he(&self) -> &'static str {
        match self {
            Self::Male => "he",
            Self::Female => "she",
            Self::Neuter => "it",
        }
    }

    fn him(&self) -> &'static str {
        match self {
            Self::Male => "him",
            Self::Female => "her",
            Self::Neuter => "it",
        }
    }

    fn his(&self) -> &'static str {
        match self {
            Self::Male => "his",
            Self::Female => "her",
            Self::Neuter => "its",
        }
    }

    fn definite(&self) -> String {
        String::new()
    }

    fn indefinite(&self) -> String {
        String::new()
    }
}

impl Grammatical for Entity {
    fn he(&self) -> &'static str {
        self.gender.he()
    }

    fn him(&self) -> &'static str {
        self.gender.him()
    }

    fn his(&self) -> &'static str {
        self.gender.his()
    }

    fn definite(&self) -> String {
        match self.naming {
            Naming::Proper => self.name.clone(),
            Naming::Common => format!("the {}", self.name),
        }
    }

    fn indefinite(&self) -> String {
        match self.naming {
            Naming::Proper => self.name.clone(),
            Naming::Common => {
                let article = match self.name.chars().next() {
                    Some(c) if "aeiouAEIOU".contains(c) => "an",
                    _ => "a",
                };
                format!("{article} {}", self.name)
            }
        }
    }
}

/// Render one event into a finished sentence.
#[must_use]
pub fn render(world: &World, event: &Event) -> String {
    let mut out = fill_slots(world, &event.phrase, &event.participants);
    capitalize_first(&mut out);
    out.push(if event.exclamatory { '!' } else { '.' });
    out
}

/// Substitute every slot in `template`. Unknown slots are kept verbatim.
#[must_use]
pub fn fill_slots(world: &World, template: &str, participants: &[crate::types::EntityId]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start..];
        let Some(end) = after.find('>') else {
            out.push_str(after);
            return out;
        };
        let slot = &after[1..end];
        match expand(world, slot, participants) {
            Some(text) => out.push_str(&text),
            None => out.push_str(&after[..=end]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

fn expand(world: &World, slot: &str, participants: &[crate::types::EntityId]) -> Option<String> {
    let (form, index) = match slot.split_once('-') {
        Some((form, n)) => (form, n),
        None => ("", slot),
    };
    let n: usize = index.parse().ok()?;
    let id = *participants.get(n.checked_sub(1)?)?;
    let entity = world.entity(id)?;
    let text = match form {
        "" => entity.definite(),
        "indef" => entity.indefinite(),
        "he" => entity.he().to_string(),
        "him" => entity.him().to_string(),
        "his" => entity.his().to_string(),
        "was" => entity.was().to_string(),
        "is" => entity.is().to_string(),
        _ => return None,
    };
    Some(text)
}

/// Upper-case the first alphabetic character, skipping leading quotes.
fn capitalize_first(s: &mut String) {
    if let Some((i, c)) = s.char_indices().find(|(_, c)| c.is_alphabetic()) {
        if c.is_lowercase() {
            let upper: String = c.to_uppercase().collect();
            s.replace_range(i..i + c.len_utf8(), &upper);
        }
    }
}
