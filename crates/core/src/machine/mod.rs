//! The trigger-interpretation and timing state machine.
//!
//! One instance owns the tool list, the active-tool index, and every timer
//! in the system (trigger hold, tool-switch repeat, sleep deadline). A single
//! fixed-rate tick drives input sampling, state transitions, and rendering
//! strictly in that order; nothing here is touched concurrently.

use crate::config::AppConfig;
use crate::content::{ContentLoader, SoundRef};
use crate::error::Result;
use crate::hal::{ActuatorSink, Actuators, AudioOut, DisplaySink};
use crate::input::{TriggerEdge, TriggerInput};
use crate::render::Surface;
use crate::tool::Tool;

/// Tap-then-hold window: a hold on a holdable tool only switches tools when
/// it started within this margin plus the tool-change timeout of the
/// previous release.
const TAP_WINDOW_SECS: f64 = 0.5;

/// What a single tick did, for logging and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// A frame was composed (false while asleep).
    pub rendered: bool,
    /// The active tool's trigger action fired.
    pub triggered: bool,
    /// The active tool changed.
    pub switched_tool: bool,
    /// Sleep mode engaged this tick.
    pub entered_sleep: bool,
    /// Sleep mode was left this tick.
    pub woke: bool,
}

/// Owns all tools and interprets debounced trigger edges into trigger, hold,
/// and tool-switch events.
pub struct ToolStateMachine {
    tools: Vec<Tool>,
    current: usize,
    trigger: TriggerInput,
    /// Set when the trigger goes down, cleared on release.
    hold_started: Option<f64>,
    /// Press timestamp of the most recent completed press/release, bounding
    /// how soon after a release a hold-to-switch may fire.
    prev_press_at: f64,
    /// True after a hold switched tools, so the following release plays the
    /// equip cue instead of re-triggering the tool.
    was_changing_tool: bool,
    sleep_mode: bool,
    sleep_deadline: f64,
    sleep_timeout: f64,
    tool_change_timeout: f64,
    actuators: Actuators,
    audio: Box<dyn AudioOut>,
    display: Box<dyn DisplaySink>,
    frame: Surface,
    cue_next: SoundRef,
    cue_equip: SoundRef,
    cue_startup: SoundRef,
}

impl ToolStateMachine {
    /// Builds the machine from a validated configuration, loading all tool
    /// and cue content up front. Content is held until shutdown; nothing is
    /// loaded lazily on the tick path.
    pub fn new(
        config: &AppConfig,
        loader: &mut dyn ContentLoader,
        audio: Box<dyn AudioOut>,
        display: Box<dyn DisplaySink>,
        actuator_sink: Box<dyn ActuatorSink>,
        now: f64,
    ) -> Result<Self> {
        config.validate()?;

        let cue_next = loader.load_cue(&config.cues.next)?;
        let cue_equip = loader.load_cue(&config.cues.equip)?;
        let cue_startup = loader.load_cue(&config.cues.startup)?;

        let mut tools = Vec::with_capacity(config.tools.len());
        for tool_config in &config.tools {
            tracing::debug!(tool = %tool_config.name, "loading tool content");
            let content = loader.load_tool(tool_config)?;
            tools.push(Tool::new(tool_config, content, config.text_scroll_y, now));
        }
        tracing::info!(tools = tools.len(), "tool content loaded");

        Ok(Self {
            tools,
            current: 0,
            trigger: TriggerInput::new(),
            hold_started: None,
            prev_press_at: 0.0,
            was_changing_tool: false,
            sleep_mode: false,
            sleep_deadline: now + config.sleep_timeout,
            sleep_timeout: config.sleep_timeout,
            tool_change_timeout: config.tool_change_timeout,
            actuators: Actuators::new(actuator_sink, &config.hardware),
            audio,
            display,
            frame: Surface::new(config.screen.width, config.screen.height),
            cue_next,
            cue_equip,
            cue_startup,
        })
    }

    pub fn current_tool_index(&self) -> usize {
        self.current
    }

    pub fn active_tool(&self) -> &Tool {
        &self.tools[self.current]
    }

    pub fn is_asleep(&self) -> bool {
        self.sleep_mode
    }

    /// Plays the startup cue.
    pub fn play_startup(&mut self) {
        let _ = self.audio.play(&self.cue_startup);
    }

    /// Runs one tick: compose, sample the trigger, interpret, expire pulses,
    /// present.
    pub fn tick(&mut self, now: f64, raw_trigger: bool) -> TickReport {
        let mut report = TickReport::default();

        if !self.sleep_mode {
            self.tools[self.current].render(&mut self.frame, now);
            report.rendered = true;
        }

        match self.trigger.sample(raw_trigger) {
            TriggerEdge::Pressed => {
                let tool = &mut self.tools[self.current];
                tool.on_trigger(now, &mut *self.audio, &mut self.actuators);
                self.hold_started = Some(now);
                report.triggered = true;
                self.on_edge(now, &mut report);
            }
            TriggerEdge::Released => {
                if let Some(pressed_at) = self.hold_started.take() {
                    self.prev_press_at = pressed_at;
                }
                if self.was_changing_tool {
                    self.was_changing_tool = false;
                    let _ = self.audio.play(&self.cue_equip);
                }
                self.on_edge(now, &mut report);
            }
            TriggerEdge::NoChange if self.trigger.is_down() => {
                if self.tools[self.current].is_holdable() && !self.was_changing_tool {
                    let tool = &mut self.tools[self.current];
                    tool.on_hold_tick(now, &mut *self.audio, &mut self.actuators);
                    // Hold-to-switch: only within the tap window of the
                    // previous release, so an idle hold keeps firing the tool
                    // instead of cycling through the belt.
                    if now - self.prev_press_at < TAP_WINDOW_SECS + self.tool_change_timeout
                        && matches!(self.hold_started, Some(t) if now > t + self.tool_change_timeout)
                    {
                        self.hold_started = Some(now);
                        self.next_tool(now);
                        report.switched_tool = true;
                    }
                } else if matches!(self.hold_started, Some(t) if now > t + self.tool_change_timeout)
                {
                    // Non-holding tool (or a switch already under way):
                    // advance once per elapsed timeout while held.
                    self.hold_started = Some(now);
                    self.next_tool(now);
                    report.switched_tool = true;
                }
            }
            TriggerEdge::NoChange => {}
        }

        if now > self.sleep_deadline && !self.sleep_mode {
            tracing::info!("no user input, entering sleep mode");
            self.sleep_mode = true;
            self.display.set_backlight(false);
            report.entered_sleep = true;
        }

        self.actuators.update(now);

        if report.rendered && !self.sleep_mode {
            self.display.present(&self.frame);
        }
        report
    }

    /// Resets the outgoing tool, advances with wrap, resets the incoming
    /// tool, and plays the next-item cue.
    fn next_tool(&mut self, now: f64) {
        self.tools[self.current].reset(now);
        self.current = (self.current + 1) % self.tools.len();
        self.tools[self.current].reset(now);
        self.was_changing_tool = true;
        let _ = self.audio.play(&self.cue_next);
        tracing::info!(tool = %self.tools[self.current].name(), "switched tool");
    }

    /// Common edge bookkeeping: any edge defers sleep and wakes the display.
    fn on_edge(&mut self, now: f64, report: &mut TickReport) {
        self.sleep_deadline = now + self.sleep_timeout;
        if self.sleep_mode {
            tracing::info!("exiting sleep mode");
            self.sleep_mode = false;
            self.display.set_backlight(true);
            report.woke = true;
        }
    }
}
