//! Startup-only content loading.
//!
//! Decoding images, rasterising text, and resolving sound files happen once
//! at startup behind [`ContentLoader`]; the per-tick path only ever touches
//! the pre-rendered surfaces and resolved sound references produced here.

use crate::config::ToolConfig;
use crate::error::Result;
use crate::render::{GlyphMask, Surface};

/// Maximum number of tools loaded into memory; enforced at config validation.
pub const MAX_TOOLS: usize = 60;

/// Opaque reference to a decoded sound buffer owned by the audio backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundRef {
    id: usize,
    label: String,
}

impl SoundRef {
    pub fn new(id: usize, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Pre-rendered visual content for one tool.
#[derive(Debug, Clone)]
pub struct ToolArt {
    /// Title text raster, tinted at composite time.
    pub title: GlyphMask,
    /// Full-frame background.
    pub background: Surface,
    /// One pre-rendered panel per description string.
    pub descriptions: Vec<Surface>,
}

/// Everything a tool needs at runtime, produced once at startup.
#[derive(Debug, Clone)]
pub struct ToolContent {
    pub art: ToolArt,
    pub sounds: Vec<SoundRef>,
}

/// Produces tool content and cue sounds at startup. Implementations own the
/// image decoding, text rasterisation, and sound resolution; failures here
/// abort startup.
pub trait ContentLoader {
    fn load_tool(&mut self, config: &ToolConfig) -> Result<ToolContent>;
    fn load_cue(&mut self, reference: &str) -> Result<SoundRef>;
}
