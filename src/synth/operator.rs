use super::envelope::{EnvelopeGenerator, EnvelopeStage};
use super::error::SynthError;
use super::params::{OperatorParam, PARAM_SENTINEL};
use super::voice_config::RetriggerPolicy;
use super::waveform::{Waveform, WaveformGenerator};
use crate::synth::prelude::TAU;

/// Most modulation inputs a single operator accepts.
pub const MAX_INPUTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CycleDirection {
    Forward,
    Backward,
}

/// Per-sample output cache. Fresh between `sample` and the next `advance`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CacheState {
    Stale,
    Fresh(f32),
}

/// One oscillator + envelope unit of a voice.
///
/// Modulation inputs are indices into the owning voice's operator array. The
/// voice pulls them recursively and hands the summed result to [`sample`].
///
/// [`sample`]: Operator::sample
#[derive(Clone, Debug)]
pub struct Operator {
    index: usize,
    pub waveform_generator: WaveformGenerator,
    pub envelope: EnvelopeGenerator,
    frequency_ratio: f32, // Ratio relative to the voice's base frequency
    detune: f32,          // Fixed offset in Hz, added after the ratio
    gain: f32,            // Output level of this operator
    modulation_depth: f32, // Radians of phase offset per unit of input
    base_frequency: f32,
    phase: f32, // In cycles, wrapped to [0, 1)
    sample_rate: f32,
    retrigger: RetriggerPolicy,
    inputs: Vec<usize>,
    cache: CacheState,
}

impl Operator {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            waveform_generator: WaveformGenerator::new(Waveform::Sine, index as u64 + 1),
            envelope: EnvelopeGenerator::new(),
            frequency_ratio: OperatorParam::Ratio.default_value(),
            detune: OperatorParam::Detune.default_value(),
            gain: OperatorParam::Level.default_value(),
            modulation_depth: OperatorParam::ModDepth.default_value(),
            base_frequency: 0.0,
            phase: 0.0,
            sample_rate: 48000.0,
            retrigger: RetriggerPolicy::default(),
            inputs: Vec::with_capacity(MAX_INPUTS),
            cache: CacheState::Stale,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if let Err(e) = self.try_set_sample_rate(sample_rate) {
            log::trace!("operator {}: {}", self.index, e);
        }
    }

    pub fn try_set_sample_rate(&mut self, sample_rate: f32) -> Result<(), SynthError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SynthError::InvalidSampleRate(sample_rate));
        }
        self.sample_rate = sample_rate;
        Ok(())
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn set_retrigger(&mut self, retrigger: RetriggerPolicy) {
        self.retrigger = retrigger;
    }

    pub fn retrigger(&self) -> RetriggerPolicy {
        self.retrigger
    }

    pub fn note_on(&mut self, frequency: f32) {
        if let Err(e) = self.try_note_on(frequency) {
            log::trace!("operator {}: {}", self.index, e);
        }
    }

    pub fn try_note_on(&mut self, frequency: f32) -> Result<(), SynthError> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(SynthError::InvalidFrequency(frequency));
        }
        if self.retrigger == RetriggerPolicy::Hard {
            self.phase = 0.0;
        }
        self.base_frequency = frequency;
        self.envelope.trigger();
        Ok(())
    }

    pub fn note_off(&mut self) {
        self.envelope.release();
    }

    pub fn is_playing(&self) -> bool {
        !self.envelope.is_finished()
    }

    pub fn envelope_stage(&self) -> EnvelopeStage {
        self.envelope.stage()
    }

    pub fn base_frequency(&self) -> f32 {
        self.base_frequency
    }

    /// Oscillator frequency in Hz: ratio of the note frequency plus detune.
    pub fn frequency(&self) -> f32 {
        self.base_frequency * self.frequency_ratio + self.detune
    }

    /// Current phase in cycles, within [0, 1).
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn add_input(&mut self, source: usize) {
        if source == self.index || self.inputs.contains(&source) || self.inputs.len() >= MAX_INPUTS
        {
            log::trace!("operator {}: ignoring input {}", self.index, source);
            return;
        }
        self.inputs.push(source);
    }

    pub fn reset_inputs(&mut self) {
        self.inputs.clear();
    }

    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    pub fn cache(&self) -> CacheState {
        self.cache
    }

    pub fn cached(&self) -> Option<f32> {
        match self.cache {
            CacheState::Fresh(value) => Some(value),
            CacheState::Stale => None,
        }
    }

    /// Output for the current sample given the summed output of the inputs.
    ///
    /// Computed once per sample; later calls before [`advance`] return the
    /// cached value and ignore `modulation`.
    ///
    /// [`advance`]: Operator::advance
    pub fn sample(&mut self, modulation: f32) -> f32 {
        if let CacheState::Fresh(value) = self.cache {
            return value;
        }
        let value = if self.envelope.is_finished() {
            0.0
        } else {
            let phase = TAU * self.phase + self.modulation_depth * modulation;
            self.waveform_generator.evaluate(phase) * self.envelope.level() * self.gain
        };
        self.cache = CacheState::Fresh(value);
        value
    }

    /// Steps the envelope and phase by one sample and invalidates the cache.
    pub fn advance(&mut self) {
        self.envelope.advance(self.sample_rate);
        self.phase += self.frequency() / self.sample_rate;
        self.phase = self.phase.rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for tiny negative phases
        if self.phase >= 1.0 {
            self.phase = 0.0;
        }
        self.cache = CacheState::Stale;
    }

    pub fn param(&self, index: usize) -> f32 {
        self.try_param(index).unwrap_or(PARAM_SENTINEL)
    }

    pub fn try_param(&self, index: usize) -> Result<f32, SynthError> {
        let param = OperatorParam::from_index(index).ok_or(SynthError::ParamOutOfRange(index))?;
        Ok(self.get(param))
    }

    pub fn set_param(&mut self, index: usize, value: f32) {
        if let Err(e) = self.try_set_param(index, value) {
            log::trace!("operator {}: {}", self.index, e);
        }
    }

    pub fn try_set_param(&mut self, index: usize, value: f32) -> Result<(), SynthError> {
        let param = OperatorParam::from_index(index).ok_or(SynthError::ParamOutOfRange(index))?;
        self.set(param, value);
        Ok(())
    }

    pub fn get(&self, param: OperatorParam) -> f32 {
        match param {
            OperatorParam::Attack => self.envelope.attack,
            OperatorParam::Decay => self.envelope.decay,
            OperatorParam::Sustain => self.envelope.sustain,
            OperatorParam::Release => self.envelope.release,
            OperatorParam::Ratio => self.frequency_ratio,
            OperatorParam::Detune => self.detune,
            OperatorParam::Level => self.gain,
            OperatorParam::ModDepth => self.modulation_depth,
            OperatorParam::Waveform => self.waveform_generator.get_waveform().as_param(),
        }
    }

    /// Sets `param`, clamped into its declared range.
    pub fn set(&mut self, param: OperatorParam, value: f32) {
        let value = param.clamp(value);
        let env = &self.envelope;
        let (attack, decay, sustain, release) = (env.attack, env.decay, env.sustain, env.release);
        match param {
            OperatorParam::Attack => self.envelope.set_params(value, decay, sustain, release),
            OperatorParam::Decay => self.envelope.set_params(attack, value, sustain, release),
            OperatorParam::Sustain => self.envelope.set_params(attack, decay, value, release),
            OperatorParam::Release => self.envelope.set_params(attack, decay, sustain, value),
            OperatorParam::Ratio => self.frequency_ratio = value,
            OperatorParam::Detune => self.detune = value,
            OperatorParam::Level => self.gain = value,
            OperatorParam::ModDepth => self.modulation_depth = value,
            OperatorParam::Waveform => self
                .waveform_generator
                .set_waveform(Waveform::from_param(value)),
        }
    }

    pub fn cycle_waveform(&mut self, direction: CycleDirection) {
        let current = self.waveform_generator.get_waveform();
        let next = match direction {
            CycleDirection::Forward => current.next(),
            CycleDirection::Backward => current.previous(),
        };
        log::debug!("operator {}: waveform {:?} -> {:?}", self.index, current, next);
        self.waveform_generator.set_waveform(next);
    }
}
