//! Configuration for the Swallows engine.
//!
//! Maps directly to `swallows.toml`. Every section and field has a default,
//! so an empty document is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::chance::Odds;
use crate::error::{Result, StoryError};

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// The probability table behind every random choice a character makes.
    #[serde(default)]
    pub chances: Chances,
    /// How the story is run and laid out.
    #[serde(default)]
    pub publishing: PublishingConfig,
}

impl StoryConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `StoryError::Config` if the TOML is invalid or fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| StoryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check every section for values the engine cannot roll with.
    ///
    /// # Errors
    /// Returns `StoryError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.chances.validate()
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Centralised probability constants.
///
/// The per-turn decision is a single roll of `turn_roll_sides`: rolls below
/// `hide_seek_below` hide or seek (when alone), rolls below `wander_below`
/// wander, the next five rolls pick an idle line, and anything higher
/// wanders again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chances {
    /// Remarking how nice it is to be back somewhere.
    #[serde(default = "default_nostalgia")]
    pub nostalgia: Odds,
    /// Fixating on the carried revolver when carrying no treasure.
    #[serde(default = "default_revolver_fixation")]
    pub revolver_fixation: Odds,
    /// Ignoring what one remembers about a container and searching it afresh.
    #[serde(default = "default_forget_container")]
    pub forget_container_memories: Odds,
    /// Taking a remembered item rather than just checking on it.
    #[serde(default = "default_retrieve")]
    pub retrieve_remembered: Odds,
    /// Asking again where the brandy is after moaning about it.
    #[serde(default = "default_repeat_where")]
    pub repeat_where_question: Odds,
    /// Faces of the per-turn decision die.
    #[serde(default = "default_turn_roll_sides")]
    pub turn_roll_sides: u32,
    /// Decision rolls below this hide or seek, if nobody else is about.
    #[serde(default = "default_hide_seek_below")]
    pub hide_seek_below: u32,
    /// Decision rolls below this wander.
    #[serde(default = "default_wander_below")]
    pub wander_below: u32,
    /// Faces of the small-talk die rolled after a greeting.
    #[serde(default = "default_small_talk_sides")]
    pub small_talk_sides: u32,
}

impl Default for Chances {
    fn default() -> Self {
        Self {
            nostalgia: Odds::one_in(11),
            revolver_fixation: Odds::one_in(21),
            forget_container_memories: Odds::one_in(4),
            retrieve_remembered: Odds::one_in(6),
            repeat_where_question: Odds::one_in(2),
            turn_roll_sides: 26,
            hide_seek_below: 10,
            wander_below: 20,
            small_talk_sides: 4,
        }
    }
}

impl Chances {
    /// Validate the table.
    ///
    /// # Errors
    /// Returns `StoryError::Config` if any odds or die has no faces, or the
    /// decision thresholds are out of order.
    pub fn validate(&self) -> Result<()> {
        let odds = [
            ("nostalgia", self.nostalgia),
            ("revolver_fixation", self.revolver_fixation),
            ("forget_container_memories", self.forget_container_memories),
            ("retrieve_remembered", self.retrieve_remembered),
            ("repeat_where_question", self.repeat_where_question),
        ];
        for (name, o) in odds {
            if o.one_in == 0 {
                return Err(StoryError::Config(format!(
                    "chances.{name} must be at least one in 1"
                )));
            }
        }
        if self.turn_roll_sides == 0 || self.small_talk_sides == 0 {
            return Err(StoryError::Config(
                "dice must have at least one face".to_string(),
            ));
        }
        if self.hide_seek_below > self.wander_below || self.wander_below > self.turn_roll_sides {
            return Err(StoryError::Config(format!(
                "expected hide_seek_below ({}) <= wander_below ({}) <= turn_roll_sides ({})",
                self.hide_seek_below, self.wander_below, self.turn_roll_sides
            )));
        }
        Ok(())
    }
}

/// Story running and layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishingConfig {
    /// Number of chapters.
    #[serde(default = "default_chapters")]
    pub chapters: u32,
    /// Ticks per chapter; every character takes one turn per tick.
    #[serde(default = "default_turns_per_chapter")]
    pub turns_per_chapter: u32,
    /// RNG seed. Absent means a fresh story every run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Narrate every character's viewpoint instead of one per chapter.
    #[serde(default)]
    pub all_viewpoints: bool,
}

impl Default for PublishingConfig {
    fn default() -> Self {
        Self {
            chapters: 3,
            turns_per_chapter: 20,
            seed: None,
            all_viewpoints: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_log_level() -> String { "info".to_string() }
fn default_nostalgia() -> Odds { Odds::one_in(11) }
fn default_revolver_fixation() -> Odds { Odds::one_in(21) }
fn default_forget_container() -> Odds { Odds::one_in(4) }
fn default_retrieve() -> Odds { Odds::one_in(6) }
fn default_repeat_where() -> Odds { Odds::one_in(2) }
fn default_turn_roll_sides() -> u32 { 26 }
fn default_hide_seek_below() -> u32 { 10 }
fn default_wander_below() -> u32 { 20 }
fn default_small_talk_sides() -> u32 { 4 }
fn default_chapters() -> u32 { 3 }
fn default_turns_per_chapter() -> u32 { 20 }
