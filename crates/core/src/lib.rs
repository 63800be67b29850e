//! Core library for the toolgun prop controller.
//!
//! The crate owns the trigger-interpretation state machine, the per-tool
//! timing and sound policy, and the frame-composition pipeline. Hardware is
//! abstracted behind the capability traits in [`hal`]; the application crate
//! injects concrete backends (real panel/GPIO drivers or the headless
//! simulator) at startup and the core never inspects which one is active.

pub mod clock;
pub mod config;
pub mod content;
pub mod error;
pub mod hal;
pub mod input;
pub mod machine;
pub mod render;
pub mod sound;
pub mod tool;

#[cfg(test)]
pub(crate) mod test_util;

pub use clock::{Clock, Pacer};
pub use config::{AppConfig, CueConfig, HardwareConfig, ScreenConfig, SoundOrder, ToolConfig};
pub use content::{ContentLoader, SoundRef, ToolArt, ToolContent, MAX_TOOLS};
pub use error::{Result, ToolgunError};
pub use hal::{ActuatorSink, Actuators, AudioOut, DisplaySink, FrameBuffer, InputSource, Playback};
pub use input::{TriggerEdge, TriggerInput};
pub use machine::{TickReport, ToolStateMachine};
pub use render::{GlyphMask, Surface};
pub use sound::SoundScheduler;
pub use tool::Tool;
