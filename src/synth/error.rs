use std::fmt;

/// Rejected input at the voice/operator boundary.
///
/// The host-facing methods swallow these (no-op or sentinel); the `try_*`
/// variants hand them back to callers that want to know.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SynthError {
    NoteOutOfRange(i32),
    OperatorOutOfRange(usize),
    ParamOutOfRange(usize),
    ArrangementOutOfRange(usize),
    InvalidFrequency(f32),
    InvalidSampleRate(f32),
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoteOutOfRange(note) => write!(f, "note {} outside 0..=127", note),
            Self::OperatorOutOfRange(op) => write!(f, "operator index {} out of bounds", op),
            Self::ParamOutOfRange(param) => write!(f, "parameter index {} out of bounds", param),
            Self::ArrangementOutOfRange(idx) => {
                write!(f, "operator arrangement {} out of bounds", idx)
            }
            Self::InvalidFrequency(freq) => write!(f, "invalid note frequency {} Hz", freq),
            Self::InvalidSampleRate(sr) => write!(f, "invalid sample rate {}", sr),
        }
    }
}

impl std::error::Error for SynthError {}
