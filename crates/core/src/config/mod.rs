//! Typed configuration for the controller.
//!
//! Every recognised option has a named field with a default, deserialised
//! once at startup and validated before any hardware is touched. Runtime code
//! never performs key lookups against loose dictionaries.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolgunError};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Main loop rate in ticks per second.
    #[serde(default = "default_tick_rate", alias = "refresh_rate")]
    pub tick_rate_hz: f64,
    /// Seconds without trigger input before the display is dimmed.
    #[serde(default = "default_sleep_timeout")]
    pub sleep_timeout: f64,
    /// Seconds the trigger must be held before the active tool advances.
    #[serde(default = "default_tool_change_timeout")]
    pub tool_change_timeout: f64,
    /// Vertical position of the scrolling title text, in pixels.
    #[serde(default = "default_text_scroll_y")]
    pub text_scroll_y: i32,
    /// Background used by tools that do not name their own.
    #[serde(default)]
    pub default_background: String,
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub hardware: HardwareConfig,
    /// App-level cue sounds (tool switch, equip, startup).
    #[serde(default, alias = "sounds")]
    pub cues: CueConfig,
    #[serde(default)]
    pub tools: Vec<ToolConfig>,
}

/// Output frame dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default = "default_screen_width")]
    pub width: usize,
    #[serde(default = "default_screen_height")]
    pub height: usize,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: default_screen_width(),
            height: default_screen_height(),
        }
    }
}

/// Actuator pulse durations, in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HardwareConfig {
    #[serde(default = "default_flash_duration")]
    pub flash_duration: f64,
    #[serde(default = "default_spin_duration")]
    pub spin_duration: f64,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            flash_duration: default_flash_duration(),
            spin_duration: default_spin_duration(),
        }
    }
}

/// Sound references for the three app-level cues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CueConfig {
    pub next: String,
    pub equip: String,
    pub startup: String,
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            next: "next.wav".to_string(),
            equip: "equip.wav".to_string(),
            startup: "startup.wav".to_string(),
        }
    }
}

/// Selection policy for a tool's sound list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundOrder {
    /// Advance through the list in order, wrapping at the end.
    /// `"selective"` is accepted as a legacy spelling.
    #[serde(alias = "selective")]
    Sequential,
    /// Pick a uniformly random entry on every play.
    #[default]
    Random,
}

/// Per-tool behaviour profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    pub name: String,
    /// Whether holding the trigger repeats the tool's action every tick.
    #[serde(default)]
    pub hold: bool,
    #[serde(default)]
    pub sounds: Vec<String>,
    #[serde(default)]
    pub sound_order: SoundOrder,
    /// Seconds between automatic replays while held; 0 disables auto-replay.
    #[serde(default)]
    pub sound_replay: f64,
    /// When false, starting a sound stops everything this tool is playing.
    #[serde(default = "default_true")]
    pub sound_overlap: bool,
    #[serde(default)]
    pub descriptions: Vec<String>,
    /// Background image reference; falls back to `default_background`.
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default = "default_true")]
    pub light: bool,
    #[serde(default = "default_true")]
    pub motor: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            hold: false,
            sounds: Vec::new(),
            sound_order: SoundOrder::default(),
            sound_replay: 0.0,
            sound_overlap: true,
            descriptions: Vec::new(),
            background: None,
            light: true,
            motor: true,
        }
    }
}

impl AppConfig {
    /// Reads and parses a JSON configuration file. The result still needs a
    /// [`AppConfig::validate`] pass before use.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Checks the semantic invariants the rest of the core relies on.
    /// Violations are fatal; nothing downstream re-checks these.
    pub fn validate(&self) -> Result<()> {
        if self.tools.is_empty() {
            return Err(ToolgunError::config("at least one tool must be configured"));
        }
        if self.tools.len() > crate::content::MAX_TOOLS {
            return Err(ToolgunError::config(format!(
                "{} tools configured, maximum is {}",
                self.tools.len(),
                crate::content::MAX_TOOLS
            )));
        }
        if !(self.tick_rate_hz > 0.0) {
            return Err(ToolgunError::config("tick_rate_hz must be positive"));
        }
        if !(self.sleep_timeout > 0.0) {
            return Err(ToolgunError::config("sleep_timeout must be positive"));
        }
        if !(self.tool_change_timeout > 0.0) {
            return Err(ToolgunError::config("tool_change_timeout must be positive"));
        }
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(ToolgunError::config("screen dimensions must be non-zero"));
        }
        if self.hardware.flash_duration < 0.0 || self.hardware.spin_duration < 0.0 {
            return Err(ToolgunError::config("pulse durations must be non-negative"));
        }
        for tool in &self.tools {
            if tool.name.is_empty() {
                return Err(ToolgunError::config("every tool needs a non-empty name"));
            }
            if tool.sound_replay < 0.0 {
                return Err(ToolgunError::config(format!(
                    "tool `{}` has a negative sound_replay interval",
                    tool.name
                )));
            }
        }
        Ok(())
    }
}

impl ToolConfig {
    /// Resolves the background reference, falling back to the app default.
    pub fn background_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.background.as_deref().unwrap_or(default)
    }
}

fn default_tick_rate() -> f64 {
    60.0
}

fn default_sleep_timeout() -> f64 {
    30.0
}

fn default_tool_change_timeout() -> f64 {
    1.0
}

fn default_text_scroll_y() -> i32 {
    36
}

fn default_screen_width() -> usize {
    240
}

fn default_screen_height() -> usize {
    320
}

fn default_flash_duration() -> f64 {
    0.1
}

fn default_spin_duration() -> f64 {
    0.3
}

fn default_true() -> bool {
    true
}
