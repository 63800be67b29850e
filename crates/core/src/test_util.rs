//! Shared fakes for exercising the core against virtual time.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::ToolConfig;
use crate::content::{ContentLoader, SoundRef, ToolArt, ToolContent};
use crate::error::Result;
use crate::hal::{ActuatorSink, AudioOut, DisplaySink, Playback};
use crate::render::{GlyphMask, Surface};

/// Fill colour of stub description panels, so renders can be probed.
pub(crate) const PANEL_COLOR: u32 = 0x00EE_F0C8;

struct FakePlayback {
    alive: Rc<Cell<bool>>,
}

impl Playback for FakePlayback {
    fn is_playing(&self) -> bool {
        self.alive.get()
    }

    fn stop(&mut self) {
        self.alive.set(false);
    }
}

#[derive(Default)]
struct AudioLogInner {
    plays: Vec<usize>,
    handles: Vec<Rc<Cell<bool>>>,
}

/// Shared view over everything a [`FakeAudio`] has been asked to play.
#[derive(Clone, Default)]
pub(crate) struct AudioLog {
    inner: Rc<RefCell<AudioLogInner>>,
}

impl AudioLog {
    pub fn plays(&self) -> Vec<usize> {
        self.inner.borrow().plays.clone()
    }

    pub fn play_count(&self) -> usize {
        self.inner.borrow().plays.len()
    }

    pub fn live_count(&self) -> usize {
        self.inner.borrow().handles.iter().filter(|h| h.get()).count()
    }

    /// Marks every started playback as finished.
    pub fn finish_all(&self) {
        for handle in &self.inner.borrow().handles {
            handle.set(false);
        }
    }
}

pub(crate) struct FakeAudio {
    log: AudioLog,
}

impl FakeAudio {
    pub fn new() -> (Self, AudioLog) {
        let log = AudioLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl AudioOut for FakeAudio {
    fn play(&mut self, sound: &SoundRef) -> Box<dyn Playback> {
        let alive = Rc::new(Cell::new(true));
        let mut inner = self.log.inner.borrow_mut();
        inner.plays.push(sound.id());
        inner.handles.push(alive.clone());
        Box::new(FakePlayback { alive })
    }
}

#[derive(Default)]
struct DisplayLogInner {
    presents: usize,
    backlight: Vec<bool>,
}

#[derive(Clone, Default)]
pub(crate) struct DisplayLog {
    inner: Rc<RefCell<DisplayLogInner>>,
}

impl DisplayLog {
    pub fn present_count(&self) -> usize {
        self.inner.borrow().presents
    }

    pub fn backlight_calls(&self) -> Vec<bool> {
        self.inner.borrow().backlight.clone()
    }
}

pub(crate) struct FakeDisplay {
    log: DisplayLog,
}

impl FakeDisplay {
    pub fn new() -> (Self, DisplayLog) {
        let log = DisplayLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl DisplaySink for FakeDisplay {
    fn present(&mut self, _frame: &Surface) {
        self.log.inner.borrow_mut().presents += 1;
    }

    fn set_backlight(&mut self, on: bool) {
        self.log.inner.borrow_mut().backlight.push(on);
    }
}

#[derive(Default)]
struct ActuatorLogInner {
    light: bool,
    motor: bool,
    light_on_count: usize,
}

#[derive(Clone, Default)]
pub(crate) struct ActuatorLog {
    inner: Rc<RefCell<ActuatorLogInner>>,
}

impl ActuatorLog {
    pub fn light_is_on(&self) -> bool {
        self.inner.borrow().light
    }

    pub fn motor_is_on(&self) -> bool {
        self.inner.borrow().motor
    }

    /// Number of `set_light(true)` commands observed.
    pub fn light_on_count(&self) -> usize {
        self.inner.borrow().light_on_count
    }
}

pub(crate) struct FakeActuators {
    log: ActuatorLog,
}

impl FakeActuators {
    pub fn new() -> (Self, ActuatorLog) {
        let log = ActuatorLog::default();
        (Self { log: log.clone() }, log)
    }
}

impl ActuatorSink for FakeActuators {
    fn set_light(&mut self, on: bool) {
        let mut inner = self.log.inner.borrow_mut();
        inner.light = on;
        if on {
            inner.light_on_count += 1;
        }
    }

    fn set_motor(&mut self, on: bool) {
        self.log.inner.borrow_mut().motor = on;
    }
}

/// Content loader that synthesises placeholder art and numbered sound refs.
pub(crate) struct StubLoader {
    width: usize,
    height: usize,
    next_sound: usize,
}

impl StubLoader {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            next_sound: 0,
        }
    }

    fn alloc(&mut self, label: &str) -> SoundRef {
        let sound = SoundRef::new(self.next_sound, label);
        self.next_sound += 1;
        sound
    }
}

impl ContentLoader for StubLoader {
    fn load_tool(&mut self, config: &ToolConfig) -> Result<ToolContent> {
        let title = GlyphMask::solid(8 * config.name.len().max(1), 12);
        let background = Surface::filled(self.width, self.height, 0x0010_1018);
        let descriptions = config
            .descriptions
            .iter()
            .map(|_| Surface::filled(self.width - 20, 30, PANEL_COLOR))
            .collect();
        let sounds = config.sounds.iter().map(|s| self.alloc(s)).collect();
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
        Ok(self.alloc(reference))
    }
}
