/// Stage of the ADSR state machine.
///
/// Stages only move forward (Idle → Attack → Decay → Sustain → Release → Idle),
/// except that a new note-on re-enters Attack from wherever the envelope is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Linear ADSR envelope advanced one sample at a time.
///
/// Times are in seconds and converted to per-sample steps on every advance, so
/// both the times and the sample rate may change mid-note.
#[derive(Clone, Debug)]
pub struct EnvelopeGenerator {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    stage: EnvelopeStage,
    level: f32,
    release_start_level: f32,
}

impl EnvelopeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_params(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        self.attack = attack;
        self.decay = decay;
        self.sustain = sustain;
        self.release = release;
    }

    pub fn trigger(&mut self) {
        self.stage = EnvelopeStage::Attack;
    }

    pub fn release(&mut self) {
        if self.stage == EnvelopeStage::Idle {
            return;
        }
        self.stage = EnvelopeStage::Release;
        self.release_start_level = self.level;
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_finished(&self) -> bool {
        self.stage == EnvelopeStage::Idle
    }

    /// Moves the envelope forward by one sample at `sample_rate`.
    pub fn advance(&mut self, sample_rate: f32) {
        match self.stage {
            EnvelopeStage::Idle => {}
            EnvelopeStage::Attack => {
                let next = self.level + step(1.0, self.attack, sample_rate);
                if next >= 1.0 || next <= self.level {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                } else {
                    self.level = next;
                }
            }
            EnvelopeStage::Decay => {
                let next = self.level - step(1.0 - self.sustain, self.decay, sample_rate);
                // a step below the float spacing near 1.0 would never arrive
                if next <= self.sustain || next >= self.level {
                    self.level = self.sustain;
                    self.stage = EnvelopeStage::Sustain;
                } else {
                    self.level = next;
                }
            }
            EnvelopeStage::Sustain => {
                self.level = self.sustain;
            }
            EnvelopeStage::Release => {
                let next = self.level - step(self.release_start_level, self.release, sample_rate);
                if next <= 0.0 || next >= self.level {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                } else {
                    self.level = next;
                }
            }
        }
    }
}

/// Per-sample increment covering `distance` over `seconds`. A zero-length
/// segment covers the whole distance in one step.
fn step(distance: f32, seconds: f32, sample_rate: f32) -> f32 {
    let samples = seconds * sample_rate;
    if samples <= 1.0 {
        distance.max(f32::EPSILON)
    } else {
        distance / samples
    }
}

impl Default for EnvelopeGenerator {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.7,
            release: 0.2,
            stage: EnvelopeStage::Idle,
            level: 0.0,
            release_start_level: 0.0,
        }
    }
}
