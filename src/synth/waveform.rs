use crate::synth::prelude::{NoiseSource, PI};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    SawtoothSmooth,
    Triangle,
    Noise,
}

impl Waveform {
    pub const ALL: [Waveform; 6] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::SawtoothSmooth,
        Waveform::Triangle,
        Waveform::Noise,
    ];

    /// Maps a float host parameter onto a waveform, rounding to the nearest
    /// index and clamping into range.
    pub fn from_param(value: f32) -> Self {
        let max = (Self::ALL.len() - 1) as f32;
        let idx = if value.is_finite() {
            value.round().clamp(0.0, max) as usize
        } else {
            0
        };
        Self::ALL[idx]
    }

    pub fn as_param(self) -> f32 {
        self.index() as f32
    }

    pub fn index(self) -> usize {
        match self {
            Waveform::Sine => 0,
            Waveform::Square => 1,
            Waveform::Sawtooth => 2,
            Waveform::SawtoothSmooth => 3,
            Waveform::Triangle => 4,
            Waveform::Noise => 5,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Waveform::Noise => Waveform::Sine,
            Waveform::Sine => Waveform::Square,
            Waveform::Square => Waveform::Sawtooth,
            Waveform::Sawtooth => Waveform::SawtoothSmooth,
            Waveform::SawtoothSmooth => Waveform::Triangle,
            Waveform::Triangle => Waveform::Noise,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Waveform::Noise => Waveform::Triangle,
            Waveform::Sine => Waveform::Noise,
            Waveform::Square => Waveform::Sine,
            Waveform::Sawtooth => Waveform::Square,
            Waveform::SawtoothSmooth => Waveform::Sawtooth,
            Waveform::Triangle => Waveform::SawtoothSmooth,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WaveformGenerator {
    pub waveform: Waveform,
    noise: NoiseSource,
}

impl WaveformGenerator {
    pub fn new(waveform: Waveform, seed: u64) -> Self {
        Self {
            waveform,
            noise: NoiseSource::seeded(seed),
        }
    }

    /// Evaluates the waveform at `phase` radians. Output is within [-1, 1].
    // TODO: Square and Sawtooth alias badly at high pitches, a PolyBLEP
    // correction would fix it.
    pub fn evaluate(&mut self, phase: f32) -> f32 {
        match self.waveform {
            Waveform::Sine => phase.sin(),
            Waveform::Square => {
                if phase.sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => {
                let cycles = phase / (2.0 * PI);
                2.0 * (cycles - (cycles + 0.5).floor())
            }
            Waveform::SawtoothSmooth => 0.75 * phase.sin() / (1.25 + phase.cos()),
            Waveform::Triangle => (2.0 / PI) * (phase.sin()).asin(),
            Waveform::Noise => self.noise.random_range(-1.0, 1.0),
        }
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    pub fn get_waveform(&self) -> Waveform {
        self.waveform
    }
}
