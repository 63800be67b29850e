//! Headless simulated hardware backends.
//!
//! The real display panel, GPIO actuators, and audio mixer live outside this
//! repository; these stand-ins satisfy the same capability traits so the
//! whole core can run (and be soak-tested) on a development machine. State
//! changes are reported through `tracing` instead of wires.

use std::path::Path;
use std::time::{Duration, Instant};

use serde::Deserialize;
use toolgun_core::{
    ActuatorSink, AudioOut, ContentLoader, DisplaySink, FrameBuffer, GlyphMask, InputSource,
    Playback, Result, ScreenConfig, SoundRef, Surface, ToolArt, ToolConfig, ToolContent,
};

/// Writes frames into a shared [`FrameBuffer`] and logs backlight changes.
pub struct SimDisplay {
    buffer: FrameBuffer,
    presents: u64,
}

impl SimDisplay {
    pub fn new(buffer: FrameBuffer) -> Self {
        Self {
            buffer,
            presents: 0,
        }
    }
}

impl DisplaySink for SimDisplay {
    fn present(&mut self, frame: &Surface) {
        self.buffer.submit(frame);
        self.presents += 1;
        if self.presents % 600 == 0 {
            tracing::debug!(frames = self.presents, "display refresh");
        }
    }

    fn set_backlight(&mut self, on: bool) {
        tracing::info!(on, "backlight");
    }
}

/// Logs actuator level changes, suppressing repeats.
#[derive(Default)]
pub struct SimActuators {
    light: bool,
    motor: bool,
}

impl ActuatorSink for SimActuators {
    fn set_light(&mut self, on: bool) {
        if self.light != on {
            self.light = on;
            tracing::info!(on, "led");
        }
    }

    fn set_motor(&mut self, on: bool) {
        if self.motor != on {
            self.motor = on;
            tracing::info!(on, "motor");
        }
    }
}

/// Fake audio output: every playback "runs" for a fixed wall-clock duration.
pub struct SimAudio {
    playback_secs: f64,
}

impl SimAudio {
    pub fn new() -> Self {
        Self { playback_secs: 0.5 }
    }
}

impl AudioOut for SimAudio {
    fn play(&mut self, sound: &SoundRef) -> Box<dyn Playback> {
        tracing::debug!(sound = sound.label(), "play");
        Box::new(SimPlayback {
            deadline: Instant::now() + Duration::from_secs_f64(self.playback_secs),
            stopped: false,
        })
    }
}

struct SimPlayback {
    deadline: Instant,
    stopped: bool,
}

impl Playback for SimPlayback {
    fn is_playing(&self) -> bool {
        !self.stopped && Instant::now() < self.deadline
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

/// One scripted trigger transition.
#[derive(Debug, Deserialize)]
struct ScriptEvent {
    /// Seconds from startup.
    at: f64,
    down: bool,
}

/// Replays trigger presses from a JSON schedule
/// (`[{"at": 1.0, "down": true}, ...]`), holding the last level afterwards.
pub struct ScriptedInput {
    events: Vec<ScriptEvent>,
    cursor: usize,
    state: bool,
    started: Instant,
}

impl ScriptedInput {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut events: Vec<ScriptEvent> = serde_json::from_str(&text)?;
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(Self {
            events,
            cursor: 0,
            state: false,
            started: Instant::now(),
        })
    }
}

impl InputSource for ScriptedInput {
    fn read_trigger(&mut self) -> bool {
        let elapsed = self.started.elapsed().as_secs_f64();
        while self
            .events
            .get(self.cursor)
            .is_some_and(|event| event.at <= elapsed)
        {
            self.state = self.events[self.cursor].down;
            self.cursor += 1;
        }
        self.state
    }
}

/// An input line that is never pressed.
#[derive(Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn read_trigger(&mut self) -> bool {
        false
    }
}

/// Synthesises tool content procedurally: blocky title masks derived from the
/// tool name, hashed gradient backgrounds, and bordered description panels.
/// Real image decoding and glyph rasterisation stay outside the core.
pub struct SimContent {
    screen: ScreenConfig,
    default_background: String,
    next_sound: usize,
}

const CHAR_W: usize = 10;
const TITLE_H: usize = 14;

impl SimContent {
    pub fn new(screen: ScreenConfig, default_background: impl Into<String>) -> Self {
        Self {
            screen,
            default_background: default_background.into(),
            next_sound: 0,
        }
    }

    fn alloc_sound(&mut self, label: &str) -> SoundRef {
        let sound = SoundRef::new(self.next_sound, label);
        self.next_sound += 1;
        sound
    }

    fn title_mask(name: &str) -> GlyphMask {
        let width = CHAR_W * name.len().max(1);
        let mut alpha = vec![0u8; width * TITLE_H];
        for (i, byte) in name.bytes().enumerate() {
            for row in 1..TITLE_H - 1 {
                for col in 0..CHAR_W - 2 {
                    // Deterministic per-character pattern, glyph-ish enough
                    // for the simulator.
                    let bit = (byte as usize).wrapping_mul(row + 3).wrapping_add(col);
                    if bit % 4 != 0 {
                        alpha[row * width + i * CHAR_W + col] = 255;
                    }
                }
            }
        }
        GlyphMask::from_alpha(width, TITLE_H, alpha)
    }

    fn background(&self, reference: &str) -> Surface {
        let seed = reference
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
        let base = (seed & 0x3F3F3F) | 0x101010;
        let mut surface = Surface::new(self.screen.width, self.screen.height);
        for y in 0..self.screen.height {
            let shade = (y * 96 / self.screen.height.max(1)) as u32;
            let color = base.wrapping_add(shade << 8 | shade);
            for x in 0..self.screen.width {
                surface.set_pixel(x, y, color & 0x00FF_FFFF);
            }
        }
        surface
    }

    fn description_panel(&self) -> Surface {
        let width = self.screen.width.saturating_sub(20).max(1);
        let height = 30;
        let mut panel = Surface::filled(width, height, 0x00EE_F0C8);
        // Dark border along the bottom and right edges, as on the device.
        let border = 4.min(width);
        for x in 0..width {
            for line in 0..border {
                panel.set_pixel(x, height - 1 - line, 0);
            }
        }
        for y in 0..height {
            for line in 0..border {
                panel.set_pixel(width - 1 - line, y, 0);
            }
        }
        panel
    }
}

impl ContentLoader for SimContent {
    fn load_tool(&mut self, config: &ToolConfig) -> Result<ToolContent> {
        tracing::debug!(tool = %config.name, "synthesising tool content");
        let title = Self::title_mask(&config.name);
        let background = self.background(config.background_or(&self.default_background));
        let descriptions = config
            .descriptions
            .iter()
            .map(|_| self.description_panel())
            .collect();
        let sounds = config
            .sounds
            .iter()
            .map(|s| self.alloc_sound(s))
            .collect();
        Ok(ToolContent {
            art: ToolArt {
                title,
                background,
                descriptions,
            },
            sounds,
        })
    }

    fn load_cue(&mut self, reference: &str) -> Result<SoundRef> {
        Ok(self.alloc_sound(reference))
    }
}
