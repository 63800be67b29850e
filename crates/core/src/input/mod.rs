//! Trigger edge detection.
//!
//! The physical signal is assumed pre-conditioned; this is a plain edge
//! comparison against the previously stored state, sampled once per tick.

/// Result of sampling the trigger line for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEdge {
    NoChange,
    Pressed,
    Released,
}

/// Stores the last observed trigger state and reports edges.
#[derive(Debug, Default)]
pub struct TriggerInput {
    down: bool,
}

impl TriggerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares the raw reading with the stored state, updating it on change.
    pub fn sample(&mut self, raw: bool) -> TriggerEdge {
        if raw == self.down {
            return TriggerEdge::NoChange;
        }
        self.down = raw;
        if raw {
            TriggerEdge::Pressed
        } else {
            TriggerEdge::Released
        }
    }

    /// Last debounced state.
    pub fn is_down(&self) -> bool {
        self.down
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_edges_once_per_transition() {
        let mut input = TriggerInput::new();
        assert_eq!(input.sample(false), TriggerEdge::NoChange);
        assert_eq!(input.sample(true), TriggerEdge::Pressed);
        assert!(input.is_down());
        assert_eq!(input.sample(true), TriggerEdge::NoChange);
        assert_eq!(input.sample(false), TriggerEdge::Released);
        assert!(!input.is_down());
        assert_eq!(input.sample(false), TriggerEdge::NoChange);
    }
}
