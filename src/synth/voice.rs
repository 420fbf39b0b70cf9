use super::algorithm::{self, OPERATOR_COUNT};
use super::error::SynthError;
use super::event::ControlEvent;
use super::frequency::FrequencyTable;
use super::operator::{CacheState, CycleDirection, Operator};
use super::params::PARAM_SENTINEL;
use super::voice_config::{RetriggerPolicy, VoiceConfig};

/// A single monophonic FM voice: four operators wired into one of the fixed
/// arrangements.
///
/// Per sample the host either calls [`evaluate`](Voice::evaluate), or the two
/// halves separately: [`sample`](Voice::sample) pulls the slot operators (and,
/// recursively, their modulators) and [`advance`](Voice::advance) steps every
/// operator. The arrangement must not change between the two.
pub struct Voice<'t> {
    operators: [Operator; OPERATOR_COUNT],
    slots: Vec<usize>,
    arrangement: usize,
    note: Option<u8>,
    sample_rate: f32,
    frequency_table: &'t FrequencyTable,
}

impl<'t> Voice<'t> {
    pub fn new(frequency_table: &'t FrequencyTable) -> Self {
        Self::with_config(frequency_table, &VoiceConfig::default())
    }

    pub fn with_config(frequency_table: &'t FrequencyTable, config: &VoiceConfig) -> Self {
        let mut voice = Self {
            operators: std::array::from_fn(Operator::new),
            slots: Vec::with_capacity(OPERATOR_COUNT),
            arrangement: 0,
            note: None,
            sample_rate: VoiceConfig::default().sample_rate,
            frequency_table,
        };
        voice.set_sample_rate(config.sample_rate);
        voice.set_retrigger(config.retrigger);
        let arrangement = if config.arrangement < algorithm::num_arrangements() {
            config.arrangement
        } else {
            log::warn!(
                "Voice: configured arrangement {} out of range, using 0",
                config.arrangement
            );
            0
        };
        voice.wire(arrangement);
        voice
    }

    /// Applies `config` to a running voice. The note state is kept.
    pub fn configure(&mut self, config: &VoiceConfig) {
        self.set_sample_rate(config.sample_rate);
        self.set_retrigger(config.retrigger);
        self.set_operator_arrangement(config.arrangement);
    }

    /// Computes this sample's output: the slot values, averaged when there is
    /// more than one slot. Repeated calls before [`advance`](Voice::advance)
    /// return the same value.
    pub fn sample(&mut self) -> f32 {
        let mut out = 0.0;
        for &slot in &self.slots {
            out += sample_operator(&mut self.operators, slot);
        }
        if self.slots.len() > 1 {
            out / self.slots.len() as f32
        } else {
            out
        }
    }

    /// Steps every operator, slot or not, and clears the per-sample caches.
    pub fn advance(&mut self) {
        for op in self.operators.iter_mut() {
            op.advance();
        }
    }

    /// One full sample: [`sample`](Voice::sample) then [`advance`](Voice::advance).
    ///
    /// Nominally within [-1, 1] while operator levels stay at or below 1; the
    /// output is not clamped.
    pub fn evaluate(&mut self) -> f32 {
        let out = self.sample();
        self.advance();
        out
    }

    /// Fills `output` with consecutive samples.
    pub fn render(&mut self, output: &mut [f32]) {
        for sample in output.iter_mut() {
            *sample = self.evaluate();
        }
    }

    pub fn note_on(&mut self, note: i32) {
        if let Err(e) = self.try_note_on(note) {
            log::trace!("Voice: {}", e);
        }
    }

    pub fn try_note_on(&mut self, note: i32) -> Result<(), SynthError> {
        let note = u8::try_from(note)
            .ok()
            .filter(|&n| n <= 127)
            .ok_or(SynthError::NoteOutOfRange(note))?;
        let frequency = self
            .frequency_table
            .get(note)
            .ok_or(SynthError::NoteOutOfRange(note as i32))?;
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(SynthError::InvalidFrequency(frequency));
        }
        self.note = Some(note);
        for op in self.operators.iter_mut() {
            op.note_on(frequency);
        }
        log::debug!("Voice: note on {} ({:.2} Hz)", note, frequency);
        Ok(())
    }

    pub fn note_off(&mut self) {
        if let Some(note) = self.note.take() {
            log::debug!("Voice: note off {}", note);
        }
        for op in self.operators.iter_mut() {
            op.note_off();
        }
    }

    /// The sounding note, `None` once released.
    pub fn note(&self) -> Option<u8> {
        self.note
    }

    /// True while any slot operator is still sounding.
    pub fn is_playing(&self) -> bool {
        self.slots.iter().any(|&slot| self.operators[slot].is_playing())
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            log::trace!("Voice: {}", SynthError::InvalidSampleRate(sample_rate));
            return;
        }
        self.sample_rate = sample_rate;
        for op in self.operators.iter_mut() {
            op.set_sample_rate(sample_rate);
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn set_retrigger(&mut self, retrigger: RetriggerPolicy) {
        for op in self.operators.iter_mut() {
            op.set_retrigger(retrigger);
        }
    }

    pub fn set_operator_arrangement(&mut self, arrangement: usize) {
        if let Err(e) = self.try_set_operator_arrangement(arrangement) {
            log::trace!("Voice: {}", e);
        }
    }

    pub fn try_set_operator_arrangement(&mut self, arrangement: usize) -> Result<(), SynthError> {
        if arrangement >= algorithm::num_arrangements() {
            return Err(SynthError::ArrangementOutOfRange(arrangement));
        }
        if arrangement != self.arrangement {
            self.wire(arrangement);
        }
        Ok(())
    }

    /// Clears all slots and inputs, then wires `arrangement` from the catalogue.
    fn wire(&mut self, arrangement: usize) {
        let Some(layout) = algorithm::arrangement(arrangement) else {
            return;
        };
        debug_assert!(
            self.operators.iter().all(|op| op.cache() == CacheState::Stale),
            "operator arrangement changed between sample() and advance()"
        );

        self.slots.clear();
        for op in self.operators.iter_mut() {
            op.reset_inputs();
        }

        self.slots.extend_from_slice(layout.slots);
        for connection in layout.connections {
            debug_assert!(connection.source < connection.target);
            self.operators[connection.target].add_input(connection.source);
        }
        self.arrangement = arrangement;
        log::debug!(
            "Voice: operator arrangement {} ({})",
            arrangement,
            layout.description
        );
    }

    /// Applies a host control. Waveform cycling acts on every operator.
    pub fn handle_control(&mut self, event: &ControlEvent) {
        match *event {
            ControlEvent::CycleWaveform { direction } => {
                for op in self.operators.iter_mut() {
                    op.cycle_waveform(direction);
                }
            }
            ControlEvent::CycleArrangement { direction } => {
                let count = algorithm::num_arrangements();
                let next = match direction {
                    CycleDirection::Forward => (self.arrangement + 1) % count,
                    CycleDirection::Backward => (self.arrangement + count - 1) % count,
                };
                self.set_operator_arrangement(next);
            }
            ControlEvent::SelectArrangement(arrangement) => {
                self.set_operator_arrangement(arrangement);
            }
        }
    }

    pub fn operator_arrangement(&self) -> usize {
        self.arrangement
    }

    pub fn num_operator_arrangements(&self) -> usize {
        algorithm::num_arrangements()
    }

    /// Human-readable wiring for the host UI, empty for an unknown index.
    pub fn operator_arrangement_description(&self, arrangement: usize) -> &'static str {
        algorithm::description(arrangement)
    }

    /// Indices of the operators summed into the output.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn num_operators(&self) -> usize {
        self.operators.len()
    }

    pub fn operator(&self, index: usize) -> Option<&Operator> {
        self.operators.get(index)
    }

    pub fn operator_mut(&mut self, index: usize) -> Option<&mut Operator> {
        self.operators.get_mut(index)
    }

    pub fn set_operator_param(&mut self, op: usize, param: usize, value: f32) {
        if let Err(e) = self.try_set_operator_param(op, param, value) {
            log::trace!("Voice: {}", e);
        }
    }

    pub fn try_set_operator_param(
        &mut self,
        op: usize,
        param: usize,
        value: f32,
    ) -> Result<(), SynthError> {
        self.operators
            .get_mut(op)
            .ok_or(SynthError::OperatorOutOfRange(op))?
            .try_set_param(param, value)
    }

    /// Parameter value, or [`PARAM_SENTINEL`] for an unknown operator or
    /// parameter index.
    pub fn operator_param(&self, op: usize, param: usize) -> f32 {
        self.try_operator_param(op, param).unwrap_or(PARAM_SENTINEL)
    }

    pub fn try_operator_param(&self, op: usize, param: usize) -> Result<f32, SynthError> {
        self.operators
            .get(op)
            .ok_or(SynthError::OperatorOutOfRange(op))?
            .try_param(param)
    }
}

/// Pulls operator `index` for the current sample, evaluating its inputs first.
/// Cached operators short-circuit, so a modulator shared by several consumers
/// is computed once.
fn sample_operator(operators: &mut [Operator], index: usize) -> f32 {
    if let Some(value) = operators[index].cached() {
        return value;
    }
    let mut modulation = 0.0;
    for i in 0..operators[index].inputs().len() {
        let source = operators[index].inputs()[i];
        modulation += sample_operator(operators, source);
    }
    operators[index].sample(modulation)
}
