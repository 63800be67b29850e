//! Capability interfaces to the hardware boundary.
//!
//! The core is constructed with boxed implementations of these traits and
//! never branches on which backend is behind them; the real panel/GPIO
//! drivers and the headless simulator satisfy the same contracts.

use std::sync::{Arc, Mutex};

use crate::config::HardwareConfig;
use crate::content::SoundRef;
use crate::render::Surface;

/// Receives finished frames and backlight commands.
pub trait DisplaySink {
    fn present(&mut self, frame: &Surface);
    fn set_backlight(&mut self, on: bool);
}

/// Level-driven indicator light and vibration motor outputs. Pulse timing is
/// tracked by the core ([`Actuators`]), not by the sink.
pub trait ActuatorSink {
    fn set_light(&mut self, on: bool);
    fn set_motor(&mut self, on: bool);
}

/// The single physical trigger line, sampled once per tick.
pub trait InputSource {
    fn read_trigger(&mut self) -> bool;
}

/// Starts playback of a loaded sound.
pub trait AudioOut {
    fn play(&mut self, sound: &SoundRef) -> Box<dyn Playback>;
}

/// A running playback. Dropping the handle detaches it without stopping the
/// sound; only [`Playback::stop`] cuts it short.
pub trait Playback {
    fn is_playing(&self) -> bool;
    fn stop(&mut self);
}

/// Drives the actuator sink with timed pulses.
///
/// `flash`/`spin` turn the output on and stamp an end-time; calling them
/// again while a pulse is active re-arms the end-time, so a held trigger
/// keeps the actuator engaged continuously. `update` must run every tick to
/// expire pulses.
pub struct Actuators {
    sink: Box<dyn ActuatorSink>,
    flash_duration: f64,
    spin_duration: f64,
    light_until: Option<f64>,
    motor_until: Option<f64>,
}

impl Actuators {
    pub fn new(sink: Box<dyn ActuatorSink>, hardware: &HardwareConfig) -> Self {
        Self {
            sink,
            flash_duration: hardware.flash_duration,
            spin_duration: hardware.spin_duration,
            light_until: None,
            motor_until: None,
        }
    }

    /// Lights the indicator for the configured flash duration.
    pub fn flash(&mut self, now: f64) {
        self.sink.set_light(true);
        self.light_until = Some(now + self.flash_duration);
    }

    /// Spins the motor for the configured spin duration.
    pub fn spin(&mut self, now: f64) {
        self.sink.set_motor(true);
        self.motor_until = Some(now + self.spin_duration);
    }

    /// Expires pulses whose end-time has passed.
    pub fn update(&mut self, now: f64) {
        if matches!(self.light_until, Some(t) if now > t) {
            self.light_until = None;
            self.sink.set_light(false);
        }
        if matches!(self.motor_until, Some(t) if now > t) {
            self.motor_until = None;
            self.sink.set_motor(false);
        }
    }
}

/// Double-buffer handoff between the composing tick and an optional
/// decoupled refresh path. The refresh side only ever sees completed frames.
#[derive(Clone)]
pub struct FrameBuffer {
    shared: Arc<Mutex<Surface>>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Surface::new(width, height))),
        }
    }

    /// Publishes a completed frame.
    pub fn submit(&self, frame: &Surface) {
        // A poisoned buffer still holds a valid frame.
        let mut back = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        back.copy_from(frame);
    }

    /// Copies out the most recently published frame.
    pub fn snapshot(&self) -> Surface {
        self.shared
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::FakeActuators;

    fn actuators(log: &mut Option<crate::test_util::ActuatorLog>) -> Actuators {
        let (sink, l) = FakeActuators::new();
        *log = Some(l);
        Actuators::new(
            Box::new(sink),
            &HardwareConfig {
                flash_duration: 0.1,
                spin_duration: 0.3,
            },
        )
    }

    #[test]
    fn pulses_expire_after_their_duration() {
        let mut log = None;
        let mut act = actuators(&mut log);
        let log = log.unwrap();

        act.flash(0.0);
        act.spin(0.0);
        act.update(0.05);
        assert!(log.light_is_on() && log.motor_is_on());

        act.update(0.15);
        assert!(!log.light_is_on());
        assert!(log.motor_is_on(), "motor pulse is longer than the flash");

        act.update(0.35);
        assert!(!log.motor_is_on());
    }

    #[test]
    fn rearming_extends_the_pulse() {
        let mut log = None;
        let mut act = actuators(&mut log);
        let log = log.unwrap();

        act.flash(0.0);
        act.update(0.08);
        act.flash(0.08);
        act.update(0.15);
        assert!(log.light_is_on(), "re-arm moved the end-time to 0.18");
        act.update(0.2);
        assert!(!log.light_is_on());
    }

    #[test]
    fn frame_buffer_round_trips_the_latest_frame() {
        let buffer = FrameBuffer::new(4, 4);
        let frame = Surface::filled(4, 4, 0x123456);
        buffer.submit(&frame);
        assert_eq!(buffer.snapshot(), frame);
    }
}
