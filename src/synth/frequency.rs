use crate::synth::prelude::OnceLock;

pub const NOTE_COUNT: usize = 128;

/// MIDI note number to frequency in Hz.
///
/// Owned outside the voice; a [`Voice`](super::voice::Voice) only borrows it.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyTable([f32; NOTE_COUNT]);

impl FrequencyTable {
    pub fn new(frequencies: [f32; NOTE_COUNT]) -> Self {
        Self(frequencies)
    }

    /// Twelve-tone equal temperament with note 69 (A4) at `a4` Hz.
    pub fn equal_tempered(a4: f32) -> Self {
        let mut frequencies = [0.0; NOTE_COUNT];
        for (note, freq) in frequencies.iter_mut().enumerate() {
            *freq = a4 * 2.0_f32.powf((note as f32 - 69.0) / 12.0);
        }
        Self(frequencies)
    }

    /// Shared equal-tempered table at A4 = 440 Hz, built on first use.
    pub fn standard() -> &'static FrequencyTable {
        static STANDARD: OnceLock<FrequencyTable> = OnceLock::new();
        STANDARD.get_or_init(|| FrequencyTable::equal_tempered(440.0))
    }

    pub fn get(&self, note: u8) -> Option<f32> {
        self.0.get(note as usize).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}
