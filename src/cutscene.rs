//! Text sequences: the opening cutscene before the first level and the
//! reflection that plays on the ending screen.

use crate::tuning::*;

// ── Opening ─────────────────────────────────────────────────────────────────

const OPENING_LINES: [&str; 5] = [
    "Since ancient times the world was guarded by the Lightkeepers...",
    "But now that light has nearly gone out.",
    "Three Spirit Gems lie scattered, watched over by dark forces.",
    "Only one remains who can restore the balance...",
    "ELION, the last Lightkeeper.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    FadeIn,
    Hold,
    FadeOut,
}

/// Shows each line in turn: fade in, hold, fade out.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningCutscene {
    index: usize,
    /// 0..=255, advanced at `CUTSCENE_FADE_SPEED` per second.
    alpha: f32,
    phase: FadePhase,
    hold: f32,
    finished: bool,
}

impl OpeningCutscene {
    pub fn new() -> Self {
        Self { index: 0, alpha: 0.0, phase: FadePhase::FadeIn, hold: 0.0, finished: false }
    }

    pub fn update(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        match self.phase {
            FadePhase::FadeIn => {
                self.alpha += CUTSCENE_FADE_SPEED * dt;
                if self.alpha >= 255.0 {
                    self.alpha = 255.0;
                    self.phase = FadePhase::Hold;
                    self.hold = 0.0;
                }
            }
            FadePhase::Hold => {
                self.hold += dt;
                if self.hold >= CUTSCENE_HOLD_SECS {
                    self.phase = FadePhase::FadeOut;
                }
            }
            FadePhase::FadeOut => {
                self.alpha -= CUTSCENE_FADE_SPEED * dt;
                if self.alpha <= 0.0 {
                    self.alpha = 0.0;
                    self.index += 1;
                    if self.index >= OPENING_LINES.len() {
                        self.finished = true;
                    } else {
                        self.phase = FadePhase::FadeIn;
                    }
                }
            }
        }
    }

    pub fn skip(&mut self) {
        self.finished = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    pub fn line(&self) -> Option<&'static str> {
        if self.finished { None } else { OPENING_LINES.get(self.index).copied() }
    }

    /// Text opacity in `0.0..=1.0`.
    pub fn alpha(&self) -> f32 {
        self.alpha / 255.0
    }
}

impl Default for OpeningCutscene {
    fn default() -> Self {
        Self::new()
    }
}

// ── Ending reflection ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStyle {
    Black,
    FadeIn,
    Hold,
    FadeOut,
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub secs: f32,
    pub style: StageStyle,
    pub text: &'static str,
}

const fn stage(secs: f32, style: StageStyle, text: &'static str) -> Stage {
    Stage { secs, style, text }
}

const JOURNEY: &str = "Elion's journey was never only about light...";
const GUARD: &str = "Elion learned to guard the power within.";
const INHERIT: &str = "To carry the strength of those who came before...";
const ACT: &str = "And to act as each moment asks.";
const CONCEPTS: &str = "Encapsulation. Inheritance. Polymorphism.";
const SIGNATURE: &str = "~ The Last Lightkeeper ~";

use StageStyle::{Black, FadeIn, FadeOut, Final, Hold};

pub const ENDING_STAGES: [Stage; 19] = [
    stage(1.0, Black, ""),
    stage(2.0, FadeIn, JOURNEY),
    stage(1.5, Hold, JOURNEY),
    stage(1.0, FadeOut, JOURNEY),
    stage(1.0, FadeIn, GUARD),
    stage(1.5, Hold, GUARD),
    stage(1.0, FadeOut, GUARD),
    stage(1.0, FadeIn, INHERIT),
    stage(1.5, Hold, INHERIT),
    stage(1.0, FadeOut, INHERIT),
    stage(1.0, FadeIn, ACT),
    stage(2.0, Hold, ACT),
    stage(1.0, FadeOut, ACT),
    stage(1.0, FadeIn, CONCEPTS),
    stage(3.0, Hold, CONCEPTS),
    stage(1.0, FadeOut, CONCEPTS),
    stage(1.0, FadeIn, SIGNATURE),
    stage(3.0, Hold, SIGNATURE),
    stage(2.0, Final, SIGNATURE),
];

/// Timed stages of closing text with a rising light beam behind them.
#[derive(Debug, Clone, PartialEq)]
pub struct EndingReflection {
    stage: usize,
    timer: f32,
    beam: f32,
}

impl EndingReflection {
    pub fn new() -> Self {
        Self { stage: 0, timer: 0.0, beam: 0.0 }
    }

    pub fn update(&mut self, dt: f32) {
        self.beam = (self.beam + dt * 0.3).min(1.0);
        let Some(current) = ENDING_STAGES.get(self.stage) else { return };
        self.timer += dt;
        if self.timer >= current.secs {
            self.timer = 0.0;
            self.stage += 1;
        }
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn is_finished(&self) -> bool {
        self.stage >= ENDING_STAGES.len()
    }

    /// Confirm may leave once the sequence is over or in its closing stages.
    pub fn can_dismiss(&self) -> bool {
        self.is_finished() || self.stage >= ENDING_STAGES.len() - ENDING_DISMISS_TAIL
    }

    /// The second ending cue belongs after this point.
    pub fn past_second_cue(&self) -> bool {
        self.stage > ENDING_SECOND_CUE_STAGE
    }

    pub fn text(&self) -> &'static str {
        ENDING_STAGES.get(self.stage).map_or(SIGNATURE, |s| s.text)
    }

    /// Text opacity in `0.0..=1.0` for the current stage.
    pub fn alpha(&self) -> f32 {
        let Some(current) = ENDING_STAGES.get(self.stage) else { return 1.0 };
        let t = if current.secs > 0.0 { (self.timer / current.secs).clamp(0.0, 1.0) } else { 1.0 };
        match current.style {
            Black => 0.0,
            FadeIn => t,
            Hold | Final => 1.0,
            FadeOut => 1.0 - t,
        }
    }

    /// Height of the light beam as a fraction of the screen.
    pub fn beam(&self) -> f32 {
        self.beam
    }
}

impl Default for EndingReflection {
    fn default() -> Self {
        Self::new()
    }
}
