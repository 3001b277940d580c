//! Keyboard-style camera translation.

use std::str::FromStr;

use glint_renderer::{Camera, DVec3};

/// One of the six translation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl Movement {
    /// Map a WASD/QE key to a movement.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Movement::Forward),
            's' => Some(Movement::Back),
            'a' => Some(Movement::Left),
            'd' => Some(Movement::Right),
            'e' => Some(Movement::Up),
            'q' => Some(Movement::Down),
            _ => None,
        }
    }
}

/// Turns key presses into camera translations of a fixed step.
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    pub speed: f64,
}

impl CameraController {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }

    /// Translation for `movement` in the camera's own basis.
    pub fn velocity(&self, camera: &Camera, movement: Movement) -> DVec3 {
        let axis = match movement {
            Movement::Forward => camera.direction(),
            Movement::Back => -camera.direction(),
            Movement::Right => camera.right(),
            Movement::Left => -camera.right(),
            Movement::Up => camera.up(),
            Movement::Down => -camera.up(),
        };
        axis * self.speed
    }

    /// Move the camera. The caller must report the frame as moved.
    pub fn apply(&self, camera: &mut Camera, movement: Movement) {
        let velocity = self.velocity(camera, movement);
        camera.translate(velocity);
    }
}

/// A key press scheduled before a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub frame: u32,
    pub movement: Movement,
}

impl FromStr for KeyPress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (frame, key) = s
            .split_once(':')
            .ok_or_else(|| format!("expected FRAME:KEY, got '{s}'"))?;

        let frame = frame
            .trim()
            .parse()
            .map_err(|e| format!("invalid frame '{frame}': {e}"))?;

        let mut chars = key.trim().chars();
        let movement = match (chars.next(), chars.next()) {
            (Some(c), None) => Movement::from_key(c),
            _ => None,
        }
        .ok_or_else(|| format!("unknown key '{key}', expected one of w a s d q e"))?;

        Ok(Self { frame, movement })
    }
}
