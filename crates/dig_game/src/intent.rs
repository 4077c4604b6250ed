use dig_core::input::{InputState, Key};

const JUMP_KEYS: &[Key] = &[Key::Space, Key::Up, Key::Q];
const LEFT_KEYS: &[Key] = &[Key::Left, Key::A];
const RIGHT_KEYS: &[Key] = &[Key::Right, Key::D];

/// Touch bands as fractions of screen width, inclusive on both ends.
const LEFT_BAND: (f32, f32) = (0.0, 0.25);
const RIGHT_BAND: (f32, f32) = (0.25, 0.5);
const JUMP_BAND: (f32, f32) = (0.75, 1.0);

/// What the player wants the hero to do this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

impl Intents {
    #[cfg(test)]
    pub const NONE: Intents = Intents {
        move_left: false,
        move_right: false,
        jump: false,
    };

    pub fn moving(self) -> bool {
        self.move_left || self.move_right
    }
}

/// Translate the current input snapshot into intents.
///
/// Jump is gated on `grounded` so holding the jump key in the air does
/// nothing. Left and right are independent; holding both is allowed and the
/// accelerations cancel.
pub fn map_intents(input: &InputState, grounded: bool) -> Intents {
    let touched = |(start, end): (f32, f32)| input.touched_in(start, end);

    Intents {
        move_left: input.any_held(LEFT_KEYS) || touched(LEFT_BAND),
        move_right: input.any_held(RIGHT_KEYS) || touched(RIGHT_BAND),
        jump: grounded && (input.any_held(JUMP_KEYS) || touched(JUMP_BAND)),
    }
}
