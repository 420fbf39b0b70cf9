use crate::audio::{AudioBackend, CpalBackend};
use crate::input::{KeyboardHandler, MidiHandler};
use crate::synth::{ControlEvent, FrequencyTable, NoteEvent, Voice, VoiceConfig};
use std::sync::mpsc::channel;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Native runtime for desktop/CPAL backends.
///
/// Drives one monophonic voice. Events arrive over channels and are drained at
/// the start of every audio callback, so the voice is only touched from there.
pub struct NativeSynth {
    voice: Voice<'static>,
    note_receiver: Receiver<NoteEvent>,
    control_receiver: Receiver<ControlEvent>,
}

impl NativeSynth {
    pub fn new(note_receiver: Receiver<NoteEvent>, control_receiver: Receiver<ControlEvent>) -> Self {
        Self::with_config(note_receiver, control_receiver, &VoiceConfig::default())
    }

    pub fn with_config(
        note_receiver: Receiver<NoteEvent>,
        control_receiver: Receiver<ControlEvent>,
        config: &VoiceConfig,
    ) -> Self {
        Self {
            voice: Voice::with_config(FrequencyTable::standard(), config),
            note_receiver,
            control_receiver,
        }
    }

    pub fn process(&mut self, output: &mut [f32], sample_rate: f32) {
        if sample_rate != self.voice.sample_rate() {
            self.voice.set_sample_rate(sample_rate);
        }
        self.process_note_events();
        self.process_control_events();
        self.voice.render(output);
    }

    fn process_note_events(&mut self) {
        while let Ok(event) = self.note_receiver.try_recv() {
            if event.is_on {
                self.voice.note_on(event.note_number as i32);
            } else if self.voice.note() == Some(event.note_number) {
                // only release the note that is actually sounding
                self.voice.note_off();
            }
        }
    }

    fn process_control_events(&mut self) {
        while let Ok(event) = self.control_receiver.try_recv() {
            self.voice.handle_control(&event);
        }
    }

    pub fn voice(&self) -> &Voice<'static> {
        &self.voice
    }
}

pub fn start() {
    let (note_tx, note_rx) = channel();
    let (control_tx, control_rx) = channel();

    let synth = Arc::new(Mutex::new(NativeSynth::new(note_rx, control_rx)));

    let mut audio_backend = CpalBackend::new(synth.clone());
    audio_backend.start();

    let mut keyboard_handler = KeyboardHandler::new(note_tx.clone(), control_tx.clone());
    let mut midi_handler = MidiHandler::new(note_tx, control_tx);

    loop {
        keyboard_handler.update();
        midi_handler.update();
        std::thread::sleep(Duration::from_millis(5));
    }
}
