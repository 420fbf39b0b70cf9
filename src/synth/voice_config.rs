/// What a note-on does to a running oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RetriggerPolicy {
    /// Reset the phase to zero on every note-on.
    #[default]
    Hard,
    /// Keep the running phase, only the frequency and envelope change.
    Legato,
}

/// Configuration parameters for a voice.
/// The host overrides `sample_rate` once it knows the real one.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VoiceConfig {
    pub sample_rate: f32,
    pub retrigger: RetriggerPolicy,
    pub arrangement: usize,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0, // placeholder until the host calls set_sample_rate
            retrigger: RetriggerPolicy::Hard,
            arrangement: 0,
        }
    }
}
