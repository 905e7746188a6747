//! Gesture phase state machine
//!
//! A single continuous gesture reaches the nested scroll hooks as a strict
//! sequence: pre-scroll (zero or more, interleaved with post-scroll), then
//! pre-fling, then post-fling. Coordinators track where they are in that
//! sequence so they can tell a new gesture from the tail of the previous one.
//!
//! States are plain enums implementing [`StateTransitions`]; the
//! [`PhaseMachine`] wraps one and keeps a short transition history for
//! debugging.

use smallvec::SmallVec;

use crate::events::EventId;

/// Number of transitions retained in [`PhaseMachine::history`]
const HISTORY_LIMIT: usize = 8;

/// Trait for state enums driven by [`EventId`]s
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + std::fmt::Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// Where a coordinator is inside one continuous gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    /// No gesture in progress
    #[default]
    Idle,
    /// User input (finger or wheel) is producing scroll deltas
    Dragging,
    /// Input ended with velocity; fling deltas may still arrive
    Flinging,
    /// Leftover velocity is being resolved and the header is snapping
    Settling,
}

impl GesturePhase {
    /// Whether an animation driven by this gesture may still be running
    pub fn is_animating(&self) -> bool {
        matches!(self, GesturePhase::Flinging | GesturePhase::Settling)
    }
}

impl StateTransitions for GesturePhase {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use crate::events::event_types::*;
        match (self, event) {
            (GesturePhase::Idle, DRAG_SCROLL) => Some(GesturePhase::Dragging),
            (GesturePhase::Idle, FLING_SCROLL) => Some(GesturePhase::Flinging),
            (GesturePhase::Idle | GesturePhase::Dragging, PRE_FLING) => {
                Some(GesturePhase::Flinging)
            }
            (
                GesturePhase::Idle | GesturePhase::Dragging | GesturePhase::Flinging,
                POST_FLING,
            ) => Some(GesturePhase::Settling),
            // A new touch while momentum or snapping is running takes over
            (GesturePhase::Flinging | GesturePhase::Settling, DRAG_SCROLL) => {
                Some(GesturePhase::Dragging)
            }
            (GesturePhase::Settling, SETTLED) => Some(GesturePhase::Idle),
            _ => None,
        }
    }
}

/// A state machine instance over a [`StateTransitions`] state type
#[derive(Clone, Debug)]
pub struct PhaseMachine<S: StateTransitions> {
    current: S,
    /// Most recent transitions, oldest first
    history: SmallVec<[(S, EventId, S); HISTORY_LIMIT]>,
}

impl<S: StateTransitions> PhaseMachine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: SmallVec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventId) -> Option<S> {
        let from = self.current;
        let to = from.on_event(event)?;

        self.current = to;
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((from, event, to));

        tracing::trace!("phase {:?} --{}--> {:?}", from, event, to);
        Some(to)
    }

    /// Recent transitions, oldest first
    pub fn history(&self) -> &[(S, EventId, S)] {
        &self.history
    }

    /// Force the machine back to a state without recording a transition
    pub fn reset(&mut self, state: S) {
        self.current = state;
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for PhaseMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_types::*;

    #[test]
    fn test_full_gesture_sequence() {
        let mut phase = PhaseMachine::new(GesturePhase::Idle);

        assert_eq!(phase.send(DRAG_SCROLL), Some(GesturePhase::Dragging));
        // Further drags stay in Dragging
        assert_eq!(phase.send(DRAG_SCROLL), None);
        assert!(phase.is_in(GesturePhase::Dragging));

        assert_eq!(phase.send(PRE_FLING), Some(GesturePhase::Flinging));
        // Fling deltas keep the fling phase
        assert_eq!(phase.send(FLING_SCROLL), None);
        assert_eq!(phase.send(POST_FLING), Some(GesturePhase::Settling));
        assert_eq!(phase.send(SETTLED), Some(GesturePhase::Idle));
    }

    #[test]
    fn test_drag_interrupts_fling() {
        let mut phase = PhaseMachine::new(GesturePhase::Idle);
        phase.send(DRAG_SCROLL);
        phase.send(PRE_FLING);
        assert!(phase.current().is_animating());

        assert_eq!(phase.send(DRAG_SCROLL), Some(GesturePhase::Dragging));
        assert!(!phase.current().is_animating());
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut phase = PhaseMachine::new(GesturePhase::Idle);

        assert!(!phase.can_send(SETTLED));
        assert_eq!(phase.send(SETTLED), None);
        assert_eq!(phase.current(), GesturePhase::Idle);
        assert!(phase.history().is_empty());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut phase = PhaseMachine::new(GesturePhase::Idle);
        for _ in 0..10 {
            phase.send(DRAG_SCROLL);
            phase.send(PRE_FLING);
            phase.send(POST_FLING);
            phase.send(SETTLED);
        }

        let history = phase.history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(
            history[HISTORY_LIMIT - 1],
            (GesturePhase::Settling, SETTLED, GesturePhase::Idle)
        );
    }

    #[test]
    fn test_reset_clears_history() {
        let mut phase = PhaseMachine::new(GesturePhase::Idle);
        phase.send(DRAG_SCROLL);
        phase.reset(GesturePhase::Idle);

        assert!(phase.is_in(GesturePhase::Idle));
        assert!(phase.history().is_empty());
    }
}
