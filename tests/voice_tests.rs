use fourop::synth::envelope::EnvelopeStage;
use fourop::synth::operator::CycleDirection;
use fourop::synth::prelude::TAU;
use fourop::synth::{
    ControlEvent, FrequencyTable, OperatorParam, RetriggerPolicy, Voice, VoiceConfig, Waveform,
    PARAM_SENTINEL,
};

const SAMPLE_RATE: f32 = 48000.0;

/// Every operator at full level from the first advance on: zero attack,
/// sustain 1.
fn instant_envelopes(voice: &mut Voice) {
    for op in 0..voice.num_operators() {
        voice.set_operator_param(op, OperatorParam::Attack.index(), 0.0);
        voice.set_operator_param(op, OperatorParam::Sustain.index(), 1.0);
    }
}

#[test]
fn sample_is_idempotent_until_advance() {
    let mut voice = Voice::new(FrequencyTable::standard());
    voice.set_operator_arrangement(5);
    voice.note_on(60);
    for _ in 0..100 {
        voice.evaluate();
    }

    let first = voice.sample();
    let second = voice.sample();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn advance_moves_the_output() {
    let mut voice = Voice::new(FrequencyTable::standard());
    voice.note_on(60);

    let before = voice.sample();
    voice.advance();
    let after = voice.sample();
    assert_ne!(before, after);
}

#[test]
fn invalid_notes_leave_note_unchanged() {
    let mut voice = Voice::new(FrequencyTable::standard());
    voice.note_on(-1);
    assert_eq!(voice.note(), None);

    voice.note_on(60);
    voice.note_on(-1);
    voice.note_on(128);
    voice.note_on(i32::MAX);
    assert_eq!(voice.note(), Some(60));
    assert!(voice.try_note_on(128).is_err());
}

#[test]
fn release_eventually_silences_the_voice() {
    let mut voice = Voice::new(FrequencyTable::standard());
    voice.note_on(60);
    assert!(voice.is_playing());
    for _ in 0..2000 {
        voice.evaluate();
    }

    voice.note_off();
    assert_eq!(voice.note(), None);
    assert!(voice.is_playing());

    // default release is 0.2 s
    let limit = SAMPLE_RATE as usize;
    let mut cycles = 0;
    while voice.is_playing() && cycles < limit {
        voice.evaluate();
        cycles += 1;
    }
    assert!(!voice.is_playing(), "still playing after {} samples", cycles);
    assert_eq!(voice.evaluate(), 0.0);
}

#[test]
fn out_of_range_operator_param_returns_sentinel() {
    let mut voice = Voice::new(FrequencyTable::standard());
    assert_eq!(voice.operator_param(4, 0), PARAM_SENTINEL);
    assert_eq!(voice.operator_param(usize::MAX, 0), PARAM_SENTINEL);
    assert_eq!(voice.operator_param(0, 99), PARAM_SENTINEL);

    voice.set_operator_param(4, 0, 1.0);
    voice.set_operator_param(0, 99, 1.0);
    assert_eq!(
        voice.operator_param(0, OperatorParam::Attack.index()),
        OperatorParam::Attack.default_value()
    );
}

#[test]
fn operator_params_round_trip_through_the_voice() {
    let mut voice = Voice::new(FrequencyTable::standard());
    voice.set_operator_param(2, OperatorParam::Ratio.index(), 3.5);
    assert_eq!(voice.operator_param(2, OperatorParam::Ratio.index()), 3.5);
    assert_eq!(
        voice.operator_param(1, OperatorParam::Ratio.index()),
        OperatorParam::Ratio.default_value()
    );
}

#[test]
fn two_slot_output_is_the_mean_of_hand_computed_slots() {
    let table = FrequencyTable::new([440.0; 128]);
    let mut voice = Voice::new(&table);
    voice.set_operator_arrangement(4);
    instant_envelopes(&mut voice);
    voice.note_on(69);
    // first advance takes every envelope to full level
    voice.advance();

    let phase = TAU * (440.0_f32 / SAMPLE_RATE);
    let op0 = phase.sin();
    let op1 = (phase + op0).sin();
    let op2 = phase.sin();
    let op3 = (phase + op2).sin();
    let expected = (op3 + op1) / 2.0;

    let out = voice.sample();
    assert!((out - expected).abs() < 1e-6, "{} != {}", out, expected);
}

#[test]
fn single_slot_output_is_not_scaled() {
    let table = FrequencyTable::new([440.0; 128]);
    let mut voice = Voice::new(&table);
    voice.set_operator_arrangement(9);
    instant_envelopes(&mut voice);
    voice.note_on(10);
    voice.advance();

    let expected = (TAU * (440.0_f32 / SAMPLE_RATE)).sin();
    assert!((voice.sample() - expected).abs() < 1e-6);
}

#[test]
fn shared_modulator_is_evaluated_once_per_sample() {
    let mut voice = Voice::new(FrequencyTable::standard());
    voice.set_operator_arrangement(5);
    voice.set_operator_param(0, OperatorParam::Waveform.index(), Waveform::Noise.as_param());
    instant_envelopes(&mut voice);
    voice.note_on(60);
    voice.advance();

    // op 0 is noise: if it were drawn more than once per sample, the three
    // identical carriers would see different modulation
    let out = voice.sample();
    let modulator = voice.operator(0).unwrap().cached().unwrap();
    let carriers: Vec<f32> = (1..4)
        .map(|i| voice.operator(i).unwrap().cached().unwrap())
        .collect();
    assert_eq!(carriers[0].to_bits(), carriers[1].to_bits());
    assert_eq!(carriers[1].to_bits(), carriers[2].to_bits());
    assert!((out - carriers[0]).abs() < 1e-6);
    assert!(modulator.abs() <= 1.0);
}

#[test]
fn non_slot_operators_advance_too() {
    let mut voice = Voice::new(FrequencyTable::standard());
    voice.set_operator_arrangement(9);
    voice.note_on(60);
    voice.evaluate();
    assert!(voice.operator(3).unwrap().phase() > 0.0);
}

#[test]
fn is_playing_only_considers_slots() {
    let mut voice = Voice::new(FrequencyTable::standard());
    voice.set_operator_arrangement(9);
    // op 0 releases instantly, the unused ops take ten seconds
    voice.set_operator_param(0, OperatorParam::Release.index(), 0.0);
    for op in 1..4 {
        voice.set_operator_param(op, OperatorParam::Release.index(), 10.0);
    }
    voice.note_on(60);
    voice.evaluate();
    voice.note_off();
    voice.evaluate();

    assert!(!voice.is_playing());
    assert!(voice.operator(1).unwrap().is_playing());
}

#[test]
fn sample_rate_reaches_every_operator() {
    let mut voice = Voice::new(FrequencyTable::standard());
    assert_eq!(voice.sample_rate(), 48000.0);
    voice.set_sample_rate(44100.0);
    voice.set_sample_rate(0.0);
    voice.set_sample_rate(f32::NAN);
    assert_eq!(voice.sample_rate(), 44100.0);
    for op in 0..4 {
        assert_eq!(voice.operator(op).unwrap().sample_rate(), 44100.0);
    }
}

#[test]
fn config_sets_initial_state() {
    let config = VoiceConfig {
        sample_rate: 96000.0,
        retrigger: RetriggerPolicy::Legato,
        arrangement: 7,
    };
    let voice = Voice::with_config(FrequencyTable::standard(), &config);
    assert_eq!(voice.sample_rate(), 96000.0);
    assert_eq!(voice.operator_arrangement(), 7);
    assert_eq!(voice.slots(), &[0, 1, 2, 3]);
    assert_eq!(
        voice.operator(2).unwrap().retrigger(),
        RetriggerPolicy::Legato
    );

    let bad = VoiceConfig {
        arrangement: 12,
        ..VoiceConfig::default()
    };
    let voice = Voice::with_config(FrequencyTable::standard(), &bad);
    assert_eq!(voice.operator_arrangement(), 0);
}

#[test]
fn control_events_cycle_arrangement_and_waveform() {
    let mut voice = Voice::new(FrequencyTable::standard());
    voice.handle_control(&ControlEvent::CycleArrangement {
        direction: CycleDirection::Backward,
    });
    assert_eq!(voice.operator_arrangement(), 9);
    voice.handle_control(&ControlEvent::CycleArrangement {
        direction: CycleDirection::Forward,
    });
    assert_eq!(voice.operator_arrangement(), 0);

    voice.handle_control(&ControlEvent::SelectArrangement(6));
    assert_eq!(voice.operator_arrangement(), 6);
    voice.handle_control(&ControlEvent::SelectArrangement(60));
    assert_eq!(voice.operator_arrangement(), 6);

    voice.handle_control(&ControlEvent::CycleWaveform {
        direction: CycleDirection::Forward,
    });
    for op in 0..4 {
        assert_eq!(
            voice.operator_param(op, OperatorParam::Waveform.index()),
            Waveform::Square.as_param()
        );
    }
}

#[test]
fn render_fills_the_buffer() {
    let mut voice = Voice::new(FrequencyTable::standard());
    voice.note_on(69);
    let mut buffer = [0.0; 256];
    voice.render(&mut buffer);
    assert!(buffer.iter().any(|s| *s != 0.0));
    assert!(buffer.iter().all(|s| s.abs() <= 1.0));
}

#[test]
fn output_stays_nominal_across_arrangements() {
    let table = FrequencyTable::standard();
    for arrangement in 0..10 {
        let mut voice = Voice::new(table);
        voice.set_operator_arrangement(arrangement);
        voice.note_on(57);
        let mut buffer = [0.0; 1024];
        voice.render(&mut buffer);
        assert!(
            buffer.iter().all(|s| s.is_finite() && s.abs() <= 1.0),
            "arrangement {}",
            arrangement
        );
    }
}

#[test]
fn sample_rate_change_mid_note_is_continuous() {
    let table = FrequencyTable::new([440.0; 128]);
    let mut voice = Voice::new(&table);
    voice.set_operator_arrangement(9);
    instant_envelopes(&mut voice);
    voice.note_on(69);
    for _ in 0..100 {
        voice.evaluate();
    }
    let op = voice.operator(0).unwrap();
    assert_eq!(op.envelope_stage(), EnvelopeStage::Sustain);
    let level_before = op.envelope.level();
    let phase_before = op.phase();

    voice.set_sample_rate(96000.0);
    voice.evaluate();

    let op = voice.operator(0).unwrap();
    assert!((op.envelope.level() - level_before).abs() < 1e-6);
    assert!((0.0..1.0).contains(&op.phase()));
    let step = (op.phase() - phase_before).rem_euclid(1.0);
    assert!((step - 440.0 / 96000.0).abs() < 1e-5, "step {}", step);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "arrangement changed between sample() and advance()")]
fn rewiring_between_sample_and_advance_is_caught() {
    let mut voice = Voice::new(FrequencyTable::standard());
    voice.note_on(60);
    voice.sample();
    voice.set_operator_arrangement(7);
}
