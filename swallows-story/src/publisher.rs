//! Running the simulation and laying the result out as a novel.
//!
//! Each chapter is a fixed number of ticks. Everything the chapter's
//! viewpoint character observed is rendered into sentences, with a new
//! paragraph whenever the viewpoint changes rooms.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use swallows_core::error::Result;
use swallows_core::grammar;
use swallows_core::{EntityId, StoryConfig, Transcript, World};

use crate::setting::Setting;

/// A finished story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Novel {
    /// Title from the setting.
    pub title: String,
    /// Seed the story was generated from.
    pub seed: u64,
    /// Chapters in order. With every viewpoint narrated, each chapter
    /// number appears once per character.
    pub chapters: Vec<Chapter>,
}

/// One chapter, from one character's viewpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based chapter number.
    pub number: u32,
    /// Name of the viewpoint character.
    pub viewpoint: String,
    /// Rendered paragraphs.
    pub paragraphs: Vec<String>,
}

impl Novel {
    /// Serialize as pretty JSON.
    ///
    /// # Errors
    /// Propagates any `serde_json` failure.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Novel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        for chapter in &self.chapters {
            writeln!(f)?;
            writeln!(f, "Chapter {}", chapter.number)?;
            writeln!(f, "{}", "-".repeat(8 + chapter.number.to_string().len()))?;
            for paragraph in &chapter.paragraphs {
                writeln!(f)?;
                writeln!(f, "{paragraph}")?;
            }
        }
        Ok(())
    }
}

/// Drives a setting through the configured number of chapters.
pub struct Publisher {
    config: StoryConfig,
    setting: Setting,
}

impl Publisher {
    /// Create a publisher.
    #[must_use]
    pub fn new(config: StoryConfig, setting: Setting) -> Self {
        Self { config, setting }
    }

    /// Build the world and write the novel.
    ///
    /// # Errors
    /// Returns an error if the setting cannot be built.
    pub fn publish(&self) -> Result<Novel> {
        let mut world = self.setting.build()?;
        let publishing = &self.config.publishing;
        let seed = publishing.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let roster = world.characters();
        info!(title = %self.setting.title, seed, cast = roster.len(), "publishing");

        let mut chapters = Vec::new();
        for number in 1..=publishing.chapters {
            let mut transcript = Transcript::new();
            for _ in 0..publishing.turns_per_chapter {
                world.tick(&mut transcript, &mut rng, &self.config.chances);
            }

            let viewpoints: Vec<EntityId> = if publishing.all_viewpoints {
                roster.clone()
            } else {
                let index = usize::try_from(number - 1).unwrap_or(0) % roster.len().max(1);
                roster.get(index).copied().into_iter().collect()
            };
            for viewpoint in viewpoints {
                let paragraphs = compose(&world, &transcript, viewpoint);
                info!(
                    chapter = number,
                    viewpoint = world.name(viewpoint),
                    paragraphs = paragraphs.len(),
                    "chapter written"
                );
                chapters.push(Chapter {
                    number,
                    viewpoint: world.name(viewpoint).to_string(),
                    paragraphs,
                });
            }
        }

        Ok(Novel {
            title: self.setting.title.clone(),
            seed,
            chapters,
        })
    }
}

/// Render what `viewpoint` saw, breaking paragraphs on changes of room.
#[must_use]
pub fn compose(world: &World, transcript: &Transcript, viewpoint: EntityId) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut room = None;
    for event in transcript.seen_by(viewpoint) {
        if event.location != room && !current.is_empty() {
            paragraphs.push(current.join(" "));
            current.clear();
        }
        room = event.location;
        current.push(grammar::render(world, event));
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }
    paragraphs
}
