//! Motion state machine driving the hero's animation state.
//!
//! The physics step reports what happened as [`MotionEvent`]s and this module
//! alone decides the resulting [`MotionState`]. After collision resolution a
//! `Settled` event lands a jumping hero and drops a grounded, idle hero back
//! to `Standing`, so the state never sticks on `Jumping` or `Walking`.

use crate::body::KinematicBody;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    #[default]
    Standing,
    Walking,
    Jumping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// A jump impulse was applied this frame.
    Jumped,
    /// A horizontal intent was applied while grounded.
    Walked,
    /// Collision resolution finished for the frame.
    Settled { grounded: bool, moving: bool },
}

impl MotionState {
    pub fn next(self, event: MotionEvent) -> MotionState {
        match event {
            MotionEvent::Jumped => MotionState::Jumping,
            MotionEvent::Walked => MotionState::Walking,
            // Airborne: keep whatever got us here (a jump, or walking off a ledge).
            MotionEvent::Settled {
                grounded: false, ..
            } => self,
            MotionEvent::Settled {
                grounded: true,
                moving: true,
            } => MotionState::Walking,
            MotionEvent::Settled {
                grounded: true,
                moving: false,
            } => MotionState::Standing,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Standing => "standing",
            Self::Walking => "walking",
            Self::Jumping => "jumping",
        }
    }
}

impl std::fmt::Display for MotionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Feed `event` to the body's state machine. State time restarts whenever the
/// state actually changes so animations start from their first frame.
pub fn apply(body: &mut KinematicBody, event: MotionEvent) {
    let next = body.state.next(event);
    if next != body.state {
        log::trace!("motion: {} -> {} ({:?})", body.state, next, event);
        body.state = next;
        body.state_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn settled(grounded: bool, moving: bool) -> MotionEvent {
        MotionEvent::Settled { grounded, moving }
    }

    #[test]
    fn jump_enters_jumping_from_any_state() {
        assert_eq!(MotionState::Standing.next(MotionEvent::Jumped), MotionState::Jumping);
        assert_eq!(MotionState::Walking.next(MotionEvent::Jumped), MotionState::Jumping);
    }

    #[test]
    fn landing_leaves_jumping() {
        assert_eq!(MotionState::Jumping.next(settled(true, false)), MotionState::Standing);
        assert_eq!(MotionState::Jumping.next(settled(true, true)), MotionState::Walking);
    }

    #[test]
    fn airborne_keeps_current_state() {
        assert_eq!(MotionState::Jumping.next(settled(false, true)), MotionState::Jumping);
        assert_eq!(MotionState::Walking.next(settled(false, false)), MotionState::Walking);
    }

    #[test]
    fn grounded_idle_returns_to_standing() {
        assert_eq!(MotionState::Walking.next(settled(true, false)), MotionState::Standing);
    }

    #[test]
    fn apply_resets_state_time_only_on_change() {
        let mut body = KinematicBody::new(Vec2::ZERO, 1.0, 1.0);
        body.state_time = 1.5;
        apply(&mut body, settled(true, false));
        assert_eq!(body.state, MotionState::Standing);
        assert_eq!(body.state_time, 1.5);

        apply(&mut body, MotionEvent::Walked);
        assert_eq!(body.state, MotionState::Walking);
        assert_eq!(body.state_time, 0.0);
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(format!("{}", MotionState::Jumping), "jumping");
    }
}
