//! Per-tool runtime state: description cycling, sound policy, actuator
//! pulses, and frame composition for the active tool.

use crate::config::ToolConfig;
use crate::content::{ToolArt, ToolContent};
use crate::hal::{Actuators, AudioOut};
use crate::render::{
    self, Surface, DESCRIPTION_X, DESCRIPTION_Y, HIGHLIGHT_FADE_SECS, TITLE_HIGHLIGHT, TITLE_STEADY,
};
use crate::sound::SoundScheduler;

/// A selectable behaviour profile the device cycles through.
pub struct Tool {
    name: String,
    hold: bool,
    light: bool,
    motor: bool,
    text_y: i32,
    art: ToolArt,
    scheduler: SoundScheduler,
    description_index: usize,
    /// Present only while the post-reset yellow-highlight fade is running.
    fade_started: Option<f64>,
}

impl Tool {
    pub fn new(config: &ToolConfig, content: ToolContent, text_y: i32, now: f64) -> Self {
        let scheduler = SoundScheduler::new(
            content.sounds,
            config.sound_order,
            config.sound_replay,
            config.sound_overlap,
        );
        let mut tool = Self {
            name: config.name.clone(),
            hold: config.hold,
            light: config.light,
            motor: config.motor,
            text_y,
            art: content.art,
            scheduler,
            description_index: 0,
            fade_started: None,
        };
        tool.reset(now);
        tool
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether holding the trigger repeats this tool's action every tick.
    pub fn is_holdable(&self) -> bool {
        self.hold
    }

    pub fn description_index(&self) -> usize {
        self.description_index
    }

    /// True while the post-reset highlight fade is still blending.
    pub fn is_fading(&self) -> bool {
        self.fade_started.is_some()
    }

    pub(crate) fn scheduler(&self) -> &SoundScheduler {
        &self.scheduler
    }

    /// Returns the tool to its just-equipped state: description 0, sequential
    /// sounds restarted, highlight fade armed, playback quiesced. Runs on
    /// every tool switch for both the outgoing and incoming tool.
    pub fn reset(&mut self, now: f64) {
        self.description_index = 0;
        self.fade_started = Some(now);
        self.scheduler.reset();
    }

    /// Press-edge action: advance the description, play a sound, pulse the
    /// actuators.
    pub fn on_trigger(&mut self, now: f64, audio: &mut dyn AudioOut, actuators: &mut Actuators) {
        if !self.art.descriptions.is_empty() {
            self.description_index = (self.description_index + 1) % self.art.descriptions.len();
        }
        if self.scheduler.has_sounds() {
            self.scheduler.play(now, audio);
        }
        self.scheduler.reap();
        if self.light {
            actuators.flash(now);
        }
        if self.motor {
            actuators.spin(now);
        }
    }

    /// Runs every tick while this tool is active, holdable, and the trigger
    /// is down with no tool switch pending. Re-arms the actuator pulses so
    /// they stay engaged for the whole hold.
    pub fn on_hold_tick(&mut self, now: f64, audio: &mut dyn AudioOut, actuators: &mut Actuators) {
        if self.scheduler.replay_due(now) {
            self.scheduler.play(now, audio);
        }
        if self.light {
            actuators.flash(now);
        }
        if self.motor {
            actuators.spin(now);
        }
        self.scheduler.reap();
    }

    /// Composes this tool into `frame`: background, scrolling title with its
    /// wraparound ghost copy, and the current description panel.
    pub fn render(&mut self, frame: &mut Surface, now: f64) {
        frame.copy_from(&self.art.background);

        let title = &self.art.title;
        let x = render::scroll_x(now, title.width(), frame.width());
        let tint = match self.fade_started {
            Some(started) => {
                let t = ((now - started) / HIGHLIGHT_FADE_SECS) as f32;
                if now > started + HIGHLIGHT_FADE_SECS {
                    // Fade done; later renders use the steady colour directly.
                    self.fade_started = None;
                }
                render::lerp_color(TITLE_HIGHLIGHT, TITLE_STEADY, t)
            }
            None => TITLE_STEADY,
        };
        render::blit_mask(frame, title, x, self.text_y, tint);
        if let Some(gx) = render::ghost_x(x, title.width(), frame.width()) {
            render::blit_mask(frame, title, gx, self.text_y, tint);
        }

        if let Some(panel) = self.art.descriptions.get(self.description_index) {
            frame.blit(panel, DESCRIPTION_X, DESCRIPTION_Y);
        }
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("hold", &self.hold)
            .field("description_index", &self.description_index)
            .field("fading", &self.fade_started.is_some())
            .finish()
    }
}
