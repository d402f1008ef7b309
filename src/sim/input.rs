//! Input sampling
//!
//! Host-agnostic: the platform layer forwards key codes and pointer positions
//! here, and the player reads a movement vector plus a consume-once drag delta.

use glam::Vec2;

/// Directions the keyboard can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

const ACTION_COUNT: usize = 4;

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
        }
    }

    /// Map a DOM `KeyboardEvent.code` to an action (arrows and WASD)
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(InputAction::MoveUp),
            "ArrowDown" | "KeyS" => Some(InputAction::MoveDown),
            "ArrowLeft" | "KeyA" => Some(InputAction::MoveLeft),
            "ArrowRight" | "KeyD" => Some(InputAction::MoveRight),
            _ => None,
        }
    }
}

/// What a touch started on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Playfield or any non-interactive element
    Playfield,
    /// Button, input, link (or inside a button): belongs to the UI
    Interactive,
}

impl PointerTarget {
    /// Classify by element tag name; `inside_button` covers nested button content
    pub fn from_tag(tag_name: &str, inside_button: bool) -> Self {
        if inside_button {
            return PointerTarget::Interactive;
        }
        match tag_name.to_ascii_uppercase().as_str() {
            "BUTTON" | "INPUT" | "A" => PointerTarget::Interactive,
            _ => PointerTarget::Playfield,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct DragState {
    active: bool,
    last: Vec2,
    /// Displacement accumulated since the last consume
    delta: Vec2,
}

/// Keyboard state plus accumulated drag
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    keys: [bool; ACTION_COUNT],
    drag: DragState,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_action(&mut self, action: InputAction, is_down: bool) {
        self.keys[action.index()] = is_down;
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.keys[action.index()]
    }

    /// Returns true if the key code was a movement key
    pub fn key_down(&mut self, code: &str) -> bool {
        match InputAction::from_key_code(code) {
            Some(action) => {
                self.set_action(action, true);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        match InputAction::from_key_code(code) {
            Some(action) => {
                self.set_action(action, false);
                true
            }
            None => false,
        }
    }

    /// Begin a drag. Returns false (and ignores the touch) for UI targets so the
    /// host leaves the event alone.
    pub fn drag_start(&mut self, pos: Vec2, target: PointerTarget) -> bool {
        if target == PointerTarget::Interactive {
            return false;
        }
        self.drag = DragState {
            active: true,
            last: pos,
            delta: Vec2::ZERO,
        };
        true
    }

    /// Accumulate movement; ignored unless a drag is active
    pub fn drag_move(&mut self, pos: Vec2) -> bool {
        if !self.drag.active {
            return false;
        }
        self.drag.delta += pos - self.drag.last;
        self.drag.last = pos;
        true
    }

    pub fn drag_end(&mut self) {
        self.drag = DragState::default();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    /// Unit (or zero) vector from held keys; screen y points down
    pub fn movement_vector(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.is_down(InputAction::MoveUp) {
            v.y -= 1.0;
        }
        if self.is_down(InputAction::MoveDown) {
            v.y += 1.0;
        }
        if self.is_down(InputAction::MoveLeft) {
            v.x -= 1.0;
        }
        if self.is_down(InputAction::MoveRight) {
            v.x += 1.0;
        }
        v.normalize_or_zero()
    }

    /// Drag displacement since the previous call; resets the accumulator
    pub fn consume_drag_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.drag.delta)
    }

    /// Drop all held keys and any drag (restart / focus loss)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
