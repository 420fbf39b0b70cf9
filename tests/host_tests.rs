#![cfg(all(feature = "native", not(target_arch = "wasm32")))]

use fourop::console;
use fourop::input::{MidiHandler, MidiMessage};
use fourop::runtime::NativeSynth;
use fourop::synth::operator::CycleDirection;
use fourop::synth::{ControlEvent, NoteEvent};
use std::sync::mpsc::channel;

#[test]
fn midi_note_messages_decode() {
    assert_eq!(
        MidiHandler::parse(&[0x90, 60, 100]),
        Some(MidiMessage::Note(NoteEvent {
            note_number: 60,
            is_on: true,
        }))
    );
    // channel 3, velocity zero
    assert_eq!(
        MidiHandler::parse(&[0x93, 60, 0]),
        Some(MidiMessage::Note(NoteEvent {
            note_number: 60,
            is_on: false,
        }))
    );
    assert_eq!(
        MidiHandler::parse(&[0x80, 61, 64]),
        Some(MidiMessage::Note(NoteEvent {
            note_number: 61,
            is_on: false,
        }))
    );
}

#[test]
fn midi_controls_decode() {
    assert_eq!(
        MidiHandler::parse(&[0xC0, 4]),
        Some(MidiMessage::Control(ControlEvent::SelectArrangement(4)))
    );
    assert_eq!(
        MidiHandler::parse(&[0xB0, 81, 127]),
        Some(MidiMessage::Control(ControlEvent::CycleArrangement {
            direction: CycleDirection::Forward,
        }))
    );
    assert_eq!(MidiHandler::parse(&[0xB0, 81, 0]), None);
    assert_eq!(MidiHandler::parse(&[0xB0, 7, 100]), None);
}

#[test]
fn malformed_midi_is_ignored() {
    assert_eq!(MidiHandler::parse(&[]), None);
    assert_eq!(MidiHandler::parse(&[0x90]), None);
    assert_eq!(MidiHandler::parse(&[0x90, 60]), None);
    assert_eq!(MidiHandler::parse(&[0x90, 200, 100]), None);
    assert_eq!(MidiHandler::parse(&[0xE0, 0, 64]), None);
}

#[test]
fn native_synth_only_releases_the_sounding_note() {
    let (note_tx, note_rx) = channel();
    let (control_tx, control_rx) = channel();
    let mut synth = NativeSynth::new(note_rx, control_rx);
    let mut buffer = [0.0; 64];

    note_tx
        .send(NoteEvent::new(60, true).unwrap())
        .unwrap();
    note_tx
        .send(NoteEvent::new(64, true).unwrap())
        .unwrap();
    note_tx
        .send(NoteEvent::new(60, false).unwrap())
        .unwrap();
    synth.process(&mut buffer, 44100.0);

    assert_eq!(synth.voice().note(), Some(64));
    assert_eq!(synth.voice().sample_rate(), 44100.0);
    assert!(buffer.iter().any(|s| *s != 0.0));

    note_tx
        .send(NoteEvent::new(64, false).unwrap())
        .unwrap();
    control_tx.send(ControlEvent::SelectArrangement(7)).unwrap();
    synth.process(&mut buffer, 44100.0);

    assert_eq!(synth.voice().note(), None);
    assert_eq!(synth.voice().operator_arrangement(), 7);
}

#[test]
fn console_choice_needs_options() {
    assert!(console::choose("output device", &[]).is_err());
    // a single option is taken without asking
    let only = vec!["default:CARD=PCH".to_string()];
    assert_eq!(console::choose("output device", &only).unwrap(), 0);
}
