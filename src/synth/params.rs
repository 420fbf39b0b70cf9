use std::ops::RangeInclusive;

/// Returned by parameter getters for an out-of-range operator or parameter
/// index, so a host polling arbitrary indices gets a recognisable value.
pub const PARAM_SENTINEL: f32 = -9999.9;

pub const PARAM_COUNT: usize = 9;

/// The indexed parameter bag of an [`Operator`](super::operator::Operator).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorParam {
    Attack,
    Decay,
    Sustain,
    Release,
    Ratio,
    Detune,
    Level,
    ModDepth,
    Waveform,
}

impl OperatorParam {
    pub const ALL: [OperatorParam; PARAM_COUNT] = [
        OperatorParam::Attack,
        OperatorParam::Decay,
        OperatorParam::Sustain,
        OperatorParam::Release,
        OperatorParam::Ratio,
        OperatorParam::Detune,
        OperatorParam::Level,
        OperatorParam::ModDepth,
        OperatorParam::Waveform,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            OperatorParam::Attack => "Attack",
            OperatorParam::Decay => "Decay",
            OperatorParam::Sustain => "Sustain",
            OperatorParam::Release => "Release",
            OperatorParam::Ratio => "Ratio",
            OperatorParam::Detune => "Detune",
            OperatorParam::Level => "Level",
            OperatorParam::ModDepth => "Mod Depth",
            OperatorParam::Waveform => "Waveform",
        }
    }

    /// Name with its unit, e.g. `Attack (s)`, for host parameter lists.
    pub fn label(self) -> String {
        match self.unit() {
            "" => self.name().to_string(),
            unit => format!("{} ({})", self.name(), unit),
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            OperatorParam::Attack | OperatorParam::Decay | OperatorParam::Release => "s",
            OperatorParam::Detune => "Hz",
            OperatorParam::ModDepth => "rad",
            _ => "",
        }
    }

    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            OperatorParam::Attack | OperatorParam::Decay | OperatorParam::Release => 0.0..=10.0,
            OperatorParam::Sustain | OperatorParam::Level => 0.0..=1.0,
            OperatorParam::Ratio => 0.0..=32.0,
            OperatorParam::Detune => -100.0..=100.0,
            OperatorParam::ModDepth => 0.0..=16.0,
            OperatorParam::Waveform => 0.0..=5.0,
        }
    }

    pub fn default_value(self) -> f32 {
        match self {
            OperatorParam::Attack => 0.01,
            OperatorParam::Decay => 0.1,
            OperatorParam::Sustain => 0.7,
            OperatorParam::Release => 0.2,
            OperatorParam::Ratio => 1.0,
            OperatorParam::Detune => 0.0,
            OperatorParam::Level => 1.0,
            OperatorParam::ModDepth => 1.0,
            OperatorParam::Waveform => 0.0,
        }
    }

    /// Clamps `value` into this parameter's range. NaN falls back to the default.
    pub fn clamp(self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default_value();
        }
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }
}
