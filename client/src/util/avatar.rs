//! Avatar pose and expression model for the voice page.
//!
//! SYSTEM CONTEXT
//! ==============
//! `avatar_canvas` draws a small robot on a 2D canvas every animation frame.
//! Everything it needs per frame comes from [`pose`], a pure function of the
//! elapsed time, the current [`AvatarMode`], and the current [`Expression`],
//! so the motion can be tested without a browser.
//!
//! DESIGN
//! ======
//! Idle motion is a slow bob and sway with pulsing eyes. Speaking replaces it
//! with a faster bob, arm swings, and a pulsing mouth. Listening keeps the
//! idle motion and adds a head tilt plus blinking antenna tips.

#[cfg(test)]
#[path = "avatar_test.rs"]
mod avatar_test;

use std::f64::consts::PI;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AvatarMode {
    #[default]
    Idle,
    Listening,
    Speaking,
}

impl AvatarMode {
    /// Speaking wins over listening, listening over idle.
    pub fn from_flags(listening: bool, speaking: bool) -> Self {
        if speaking {
            Self::Speaking
        } else if listening {
            Self::Listening
        } else {
            Self::Idle
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Siap membantu",
            Self::Listening => "Mendengarkan",
            Self::Speaking => "Berbicara",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Expression {
    #[default]
    Normal,
    Happy,
    Sad,
    Angry,
}

const HAPPY_WORDS: [&str; 3] = ["senang", "bahagia", "gembira"];
const SAD_WORDS: [&str; 2] = ["sedih", "kecewa"];
const ANGRY_WORDS: [&str; 2] = ["marah", "kesal"];

impl Expression {
    /// Pick an expression from keywords in `text`; first match wins in the
    /// order happy, sad, angry.
    pub fn detect(text: &str) -> Self {
        let lower = text.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));
        if has(&HAPPY_WORDS) {
            Self::Happy
        } else if has(&SAD_WORDS) {
            Self::Sad
        } else if has(&ANGRY_WORDS) {
            Self::Angry
        } else {
            Self::Normal
        }
    }

    /// `(eye, mouth)` colors as `0xRRGGBB`.
    pub fn palette(self) -> (u32, u32) {
        match self {
            Self::Happy => (0x00ff66, 0x00ff66),
            Self::Sad => (0x0066ff, 0x0066ff),
            Self::Angry => (0xff0000, 0xff0000),
            Self::Normal => (0x48ffda, 0xff9aa2),
        }
    }
}

/// Per-frame animation parameters. Offsets are in body-height units,
/// rotations in radians, intensities in `0.0..=1.5`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub bob: f64,
    pub sway: f64,
    pub tilt: f64,
    pub body_pitch: f64,
    pub left_antenna: f64,
    pub right_antenna: f64,
    pub eye_glow: f64,
    pub mouth_scale: f64,
    pub left_arm: f64,
    pub right_arm: f64,
    pub left_tip_glow: f64,
    pub right_tip_glow: f64,
}

pub fn pose(t: f64, mode: AvatarMode, expression: Expression) -> Pose {
    let mut p = Pose { mouth_scale: 1.0, left_tip_glow: 0.1, right_tip_glow: 0.1, ..Pose::default() };

    if mode == AvatarMode::Speaking {
        p.bob = (t * 3.2).sin() * 0.12;
        p.sway = (t * 1.6).sin() * 0.12;
        p.body_pitch = (t * 2.8).sin() * 0.05;
        p.mouth_scale = 1.0 + (t * 9.0).sin().abs() * 0.5;
        p.left_arm = (t * 4.0).sin() * 0.18;
        p.right_arm = (t * 4.0 + PI).sin() * 0.18;
        let base = if expression == Expression::Angry { 0.95 } else { 0.6 };
        p.eye_glow = base + (t * 6.0).sin() * 0.35;
        return p;
    }

    p.bob = (t * 1.2).sin() * 0.1;
    p.sway = (t * 0.12).sin() * 0.04;
    p.left_antenna = (t * 2.0).sin() * 0.08;
    p.right_antenna = (t * 2.0 + PI).sin() * 0.08;
    p.eye_glow = 0.35 + (t * 2.4).sin() * 0.18;

    if mode == AvatarMode::Listening {
        p.tilt = (t * 1.6).sin() * 0.04;
        p.left_tip_glow = (t * 8.0).sin().abs() * 0.9 + 0.1;
        p.right_tip_glow = (t * 8.0).cos().abs() * 0.9 + 0.1;
    }
    p
}
