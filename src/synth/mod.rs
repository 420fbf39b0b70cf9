pub mod algorithm;
pub mod envelope;
pub mod error;
pub mod event;
pub mod frequency;
pub mod operator;
pub mod params;
pub mod prelude;
pub mod voice;
pub mod voice_config;
pub mod waveform;

pub use algorithm::{Arrangement, ARRANGEMENTS, OPERATOR_COUNT};
pub use error::SynthError;
pub use event::{ControlEvent, NoteEvent};
pub use frequency::FrequencyTable;
pub use operator::Operator;
pub use params::{OperatorParam, PARAM_COUNT, PARAM_SENTINEL};
pub use voice::Voice;
pub use voice_config::{RetriggerPolicy, VoiceConfig};
pub use waveform::Waveform;
