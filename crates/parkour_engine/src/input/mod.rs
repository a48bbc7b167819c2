//! Input management system
//!
//! Window events are folded into an [`InputManager`]. Once per frame the
//! frame loop pulls an [`InputSnapshot`] from any [`InputSource`], which holds
//! the movement keys currently down and the mouse motion since the previous
//! snapshot.

use std::collections::{HashSet, VecDeque};

use bitflags::bitflags;

bitflags! {
    /// Movement intents derived from the keys held this frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MovementKeys: u8 {
        /// Walk along the view direction
        const FORWARD = 1 << 0;
        /// Walk away from the view direction
        const BACK = 1 << 1;
        /// Strafe left
        const LEFT = 1 << 2;
        /// Strafe right
        const RIGHT = 1 << 3;
        /// Jump (only acts while grounded)
        const JUMP = 1 << 4;
        /// Move faster
        const SPRINT = 1 << 5;
    }
}

impl Default for MovementKeys {
    fn default() -> Self {
        Self::empty()
    }
}

/// Input state for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Movement keys held
    pub keys: MovementKeys,
    /// Mouse motion in pixels since the previous snapshot, `(dx, dy)`
    pub mouse_delta: (f32, f32),
}

impl InputSnapshot {
    /// Snapshot with only keys held
    pub fn keys(keys: MovementKeys) -> Self {
        Self {
            keys,
            mouse_delta: (0.0, 0.0),
        }
    }

    /// Snapshot with only mouse motion
    pub fn mouse(dx: f32, dy: f32) -> Self {
        Self {
            keys: MovementKeys::empty(),
            mouse_delta: (dx, dy),
        }
    }

    /// +1 walking forward, -1 backward, 0 when both or neither are held
    pub fn forward_axis(&self) -> f32 {
        axis(self.keys, MovementKeys::FORWARD, MovementKeys::BACK)
    }

    /// +1 strafing left, -1 right
    pub fn strafe_axis(&self) -> f32 {
        axis(self.keys, MovementKeys::LEFT, MovementKeys::RIGHT)
    }
}

fn axis(keys: MovementKeys, positive: MovementKeys, negative: MovementKeys) -> f32 {
    match (keys.contains(positive), keys.contains(negative)) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Anything that can report the current input state once per frame
pub trait InputSource {
    /// Current key state plus mouse motion accumulated since the last call
    fn snapshot(&mut self) -> InputSnapshot;
}

/// Input manager fed by window events
#[derive(Debug, Default)]
pub struct InputManager {
    keys_down: HashSet<KeyCode>,
    last_mouse: Option<(f64, f64)>,
    mouse_delta: (f64, f64),
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Handle mouse movement to an absolute cursor position
    ///
    /// The first position only anchors tracking and produces no motion.
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.last_mouse {
            self.mouse_delta.0 += x - last_x;
            self.mouse_delta.1 += y - last_y;
        }
        self.last_mouse = Some((x, y));
    }

    /// Forget the cursor anchor, e.g. after the window lost focus
    pub fn reset_mouse(&mut self) {
        self.last_mouse = None;
        self.mouse_delta = (0.0, 0.0);
    }

    /// Release everything, e.g. after the window lost focus
    pub fn clear(&mut self) {
        self.keys_down.clear();
        self.reset_mouse();
    }

    /// Whether `key` is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Movement intents for the keys held right now
    pub fn movement_keys(&self) -> MovementKeys {
        self.keys_down
            .iter()
            .fold(MovementKeys::empty(), |keys, key| keys | key.movement())
    }
}

impl InputSource for InputManager {
    #[allow(clippy::cast_possible_truncation)]
    fn snapshot(&mut self) -> InputSnapshot {
        let (dx, dy) = std::mem::take(&mut self.mouse_delta);
        InputSnapshot {
            keys: self.movement_keys(),
            mouse_delta: (dx as f32, dy as f32),
        }
    }
}

/// Replays a fixed sequence of snapshots, one per frame
///
/// Once the script runs out it reports idle input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    /// Script from per-frame snapshots
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append `snapshot` for `frames` consecutive frames
    pub fn hold(mut self, snapshot: InputSnapshot, frames: usize) -> Self {
        self.frames.extend(std::iter::repeat(snapshot).take(frames));
        self
    }

    /// Frames left in the script
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn snapshot(&mut self) -> InputSnapshot {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl KeyCode {
    /// Movement intent bound to this key
    pub fn movement(self) -> MovementKeys {
        match self {
            Self::W | Self::Up => MovementKeys::FORWARD,
            Self::S | Self::Down => MovementKeys::BACK,
            Self::A | Self::Left => MovementKeys::LEFT,
            Self::D | Self::Right => MovementKeys::RIGHT,
            Self::Space => MovementKeys::JUMP,
            Self::LeftShift | Self::RightShift => MovementKeys::SPRINT,
            Self::Escape => MovementKeys::empty(),
        }
    }
}
