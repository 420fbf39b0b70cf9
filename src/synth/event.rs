use super::error::SynthError;
use super::operator::CycleDirection;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteEvent {
    pub note_number: u8,
    pub is_on: bool,
}

impl NoteEvent {
    pub fn new(note_number: u8, is_on: bool) -> Result<Self, SynthError> {
        if note_number > 127 {
            return Err(SynthError::NoteOutOfRange(note_number as i32));
        }
        Ok(Self { note_number, is_on })
    }
}

/// Host controls that are not notes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlEvent {
    CycleWaveform { direction: CycleDirection },
    CycleArrangement { direction: CycleDirection },
    SelectArrangement(usize),
}
