use crate::console;
use crate::synth::operator::CycleDirection;
use crate::synth::{ControlEvent, NoteEvent};
use midir::{MidiInput, MidiInputConnection, MidiInputPort};
use std::error::Error;
use std::sync::mpsc::Sender;
use std::sync::mpsc::{self, Receiver};

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;
const CONTROL_CHANGE: u8 = 0xB0;
const PROGRAM_CHANGE: u8 = 0xC0;
/// General purpose button controllers, used to step through arrangements.
const CC_PREVIOUS_ARRANGEMENT: u8 = 80;
const CC_NEXT_ARRANGEMENT: u8 = 81;

pub struct MidiHandler {
    /// Holds the connection to keep it alive
    #[allow(dead_code)]
    connection: Option<MidiInputConnection<()>>,
    receiver: Option<Receiver<Vec<u8>>>,
    note_sender: Sender<NoteEvent>,
    control_sender: Sender<ControlEvent>,
}

/// What a single MIDI message means to the voice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MidiMessage {
    Note(NoteEvent),
    Control(ControlEvent),
}

impl MidiHandler {
    pub fn new(note_sender: Sender<NoteEvent>, control_sender: Sender<ControlEvent>) -> Self {
        match Self::try_new(note_sender.clone(), control_sender.clone()) {
            Ok(handler) => handler,
            Err(e) => {
                log::warn!(
                    "Failed to initialize MIDI: {}. MIDI functionality will be disabled.",
                    e
                );
                Self {
                    connection: None,
                    receiver: None,
                    note_sender,
                    control_sender,
                }
            }
        }
    }

    fn try_new(
        note_sender: Sender<NoteEvent>,
        control_sender: Sender<ControlEvent>,
    ) -> Result<Self, Box<dyn Error>> {
        let midi_in = MidiInput::new("fourop input")?;
        let port = Self::select_input_port(&midi_in)?;
        let port_name = midi_in.port_name(&port)?;

        let (sender, receiver) = mpsc::channel();

        let connection = midi_in.connect(
            &port,
            "midir-read-input",
            move |_, message, _| {
                let _ = sender.send(message.to_vec());
            },
            (),
        )?;

        log::info!("Opened MIDI port: {}", port_name);

        Ok(Self {
            connection: Some(connection),
            receiver: Some(receiver),
            note_sender,
            control_sender,
        })
    }

    fn select_input_port(midi_in: &MidiInput) -> Result<MidiInputPort, Box<dyn Error>> {
        let in_ports = midi_in.ports();
        if in_ports.is_empty() {
            return Err("No MIDI input ports found".into());
        }

        let names = in_ports
            .iter()
            .map(|port| midi_in.port_name(port))
            .collect::<Result<Vec<_>, _>>()?;
        let choice = console::choose("MIDI input", &names)?;

        Ok(in_ports[choice].clone())
    }

    /// Decodes one raw message. Channel is ignored; anything the voice has no
    /// use for yields `None`.
    pub fn parse(message: &[u8]) -> Option<MidiMessage> {
        let (&status, data) = message.split_first()?;
        let data1 = *data.first()?;
        match status & 0xF0 {
            NOTE_ON => {
                let velocity = *data.get(1)?;
                // note-on at velocity 0 is a note-off
                NoteEvent::new(data1, velocity > 0)
                    .ok()
                    .map(MidiMessage::Note)
            }
            NOTE_OFF => NoteEvent::new(data1, false)
                .ok()
                .map(MidiMessage::Note),
            PROGRAM_CHANGE => Some(MidiMessage::Control(ControlEvent::SelectArrangement(
                data1 as usize,
            ))),
            CONTROL_CHANGE => {
                let value = *data.get(1)?;
                if value == 0 {
                    return None;
                }
                let direction = match data1 {
                    CC_PREVIOUS_ARRANGEMENT => CycleDirection::Backward,
                    CC_NEXT_ARRANGEMENT => CycleDirection::Forward,
                    _ => return None,
                };
                Some(MidiMessage::Control(ControlEvent::CycleArrangement {
                    direction,
                }))
            }
            _ => None,
        }
    }

    pub fn update(&mut self) {
        let Some(receiver) = &self.receiver else {
            return;
        };
        while let Ok(message) = receiver.try_recv() {
            let sent = match Self::parse(&message) {
                Some(MidiMessage::Note(event)) => self.note_sender.send(event).is_ok(),
                Some(MidiMessage::Control(event)) => self.control_sender.send(event).is_ok(),
                None => continue,
            };
            if !sent {
                log::error!("Failed to forward MIDI message {:02X?}", message);
            }
        }
    }
}
