use crate::synth::{FrequencyTable, OperatorParam, Voice, VoiceConfig};
use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

/// WASM voice runtime (no threads, no channels, direct API)
#[wasm_bindgen]
pub struct WasmVoice {
    voice: Voice<'static>,
    temp_buffer: Vec<f32>,
}

#[wasm_bindgen]
impl WasmVoice {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmVoice {
        web_sys::console::log_1(&"fourop: voice created".into());
        WasmVoice {
            voice: Voice::new(FrequencyTable::standard()),
            temp_buffer: Vec::new(),
        }
    }

    /// Render audio buffer into a JS-friendly Float32Array
    #[wasm_bindgen]
    pub fn render(&mut self, length: usize, sample_rate: f32) -> Float32Array {
        if self.temp_buffer.len() != length {
            self.temp_buffer = vec![0.0; length];
        }
        if sample_rate != self.voice.sample_rate() {
            self.voice.set_sample_rate(sample_rate);
        }
        self.voice.render(&mut self.temp_buffer);

        Float32Array::from(self.temp_buffer.as_slice())
    }

    /// Accepts a partial `VoiceConfig` object; missing fields take defaults.
    #[wasm_bindgen]
    pub fn configure(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: VoiceConfig = serde_wasm_bindgen::from_value(config)?;
        self.voice.configure(&config);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn note_on(&mut self, note: i32) {
        self.voice.note_on(note);
    }

    /// Releases the voice if `note` is the one sounding.
    #[wasm_bindgen]
    pub fn note_off(&mut self, note: i32) {
        if self.voice.note().map(i32::from) == Some(note) {
            self.voice.note_off();
        }
    }

    #[wasm_bindgen]
    pub fn is_playing(&self) -> bool {
        self.voice.is_playing()
    }

    #[wasm_bindgen]
    pub fn set_operator_arrangement(&mut self, arrangement: usize) {
        self.voice.set_operator_arrangement(arrangement);
    }

    #[wasm_bindgen]
    pub fn operator_arrangement(&self) -> usize {
        self.voice.operator_arrangement()
    }

    #[wasm_bindgen]
    pub fn num_operator_arrangements(&self) -> usize {
        self.voice.num_operator_arrangements()
    }

    #[wasm_bindgen]
    pub fn operator_arrangement_description(&self, arrangement: usize) -> String {
        self.voice
            .operator_arrangement_description(arrangement)
            .to_string()
    }

    #[wasm_bindgen]
    pub fn set_operator_param(&mut self, op: usize, param: usize, value: f32) {
        self.voice.set_operator_param(op, param, value);
    }

    /// Display label for a parameter index, empty when out of range.
    #[wasm_bindgen]
    pub fn operator_param_label(&self, param: usize) -> String {
        OperatorParam::from_index(param)
            .map(OperatorParam::label)
            .unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn operator_param(&self, op: usize, param: usize) -> f32 {
        self.voice.operator_param(op, param)
    }
}

impl Default for WasmVoice {
    fn default() -> Self {
        Self::new()
    }
}
