use crate::synth::operator::CycleDirection;
use crate::synth::{ControlEvent, NoteEvent};
use device_query::{DeviceQuery, DeviceState, Keycode};
use std::collections::HashMap;
use std::sync::mpsc::Sender;

/// Computer keyboard as a one-octave-and-a-bit piano plus arrangement and
/// waveform controls.
pub struct KeyboardHandler {
    device_state: DeviceState,
    key_states: HashMap<Keycode, bool>,
    key_to_note: HashMap<Keycode, u8>,
    control_keys: HashMap<Keycode, bool>,
    note_sender: Sender<NoteEvent>,
    control_sender: Sender<ControlEvent>,
}

impl KeyboardHandler {
    pub fn new(note_sender: Sender<NoteEvent>, control_sender: Sender<ControlEvent>) -> Self {
        let device_state = DeviceState::new();

        let key_to_note: HashMap<Keycode, u8> = [
            // Bottom row - natural notes
            (Keycode::A, 57),         // A3
            (Keycode::S, 59),         // B3
            (Keycode::D, 60),         // C4
            (Keycode::F, 62),         // D4
            (Keycode::G, 64),         // E4
            (Keycode::H, 65),         // F4
            (Keycode::J, 67),         // G4
            (Keycode::K, 69),         // A4
            (Keycode::L, 71),         // B4
            (Keycode::Semicolon, 72), // C5
            // Top row - sharps
            (Keycode::W, 58), // A#3
            (Keycode::R, 61), // C#4
            (Keycode::T, 63), // D#4
            (Keycode::U, 66), // F#4
            (Keycode::I, 68), // G#4
            (Keycode::O, 70), // A#4
        ]
        .into_iter()
        .collect();

        let key_states = key_to_note.keys().map(|key| (*key, false)).collect();
        let control_keys = Self::control_map()
            .iter()
            .map(|(key, _)| (*key, false))
            .collect();

        Self {
            device_state,
            key_states,
            key_to_note,
            control_keys,
            note_sender,
            control_sender,
        }
    }

    fn control_map() -> [(Keycode, ControlEvent); 4] {
        [
            (
                Keycode::Comma,
                ControlEvent::CycleArrangement {
                    direction: CycleDirection::Backward,
                },
            ),
            (
                Keycode::Dot,
                ControlEvent::CycleArrangement {
                    direction: CycleDirection::Forward,
                },
            ),
            (
                Keycode::LeftBracket,
                ControlEvent::CycleWaveform {
                    direction: CycleDirection::Backward,
                },
            ),
            (
                Keycode::RightBracket,
                ControlEvent::CycleWaveform {
                    direction: CycleDirection::Forward,
                },
            ),
        ]
    }

    pub fn update(&mut self) {
        let keys: Vec<Keycode> = self.device_state.get_keys();

        for (key, note) in &self.key_to_note {
            let is_pressed = keys.contains(key);
            let was_pressed = self.key_states.get(key).copied().unwrap_or(false);
            if is_pressed == was_pressed {
                continue;
            }

            log::debug!(
                "Key '{:?}' {} - note {}",
                key,
                if is_pressed { "pressed" } else { "released" },
                note
            );
            if let Ok(event) = NoteEvent::new(*note, is_pressed) {
                if let Err(e) = self.note_sender.send(event) {
                    log::error!("Error sending note event: {}", e);
                }
            }
            self.key_states.insert(*key, is_pressed);
        }

        for (key, event) in Self::control_map() {
            let is_pressed = keys.contains(&key);
            let was_pressed = self.control_keys.get(&key).copied().unwrap_or(false);

            if is_pressed && !was_pressed {
                log::info!("Control key '{:?}': {:?}", key, event);
                if let Err(e) = self.control_sender.send(event) {
                    log::error!("Error sending control event: {}", e);
                }
            }

            self.control_keys.insert(key, is_pressed);
        }
    }
}
