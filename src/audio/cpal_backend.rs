use crate::audio::AudioBackend;
use crate::console;
use crate::runtime::NativeSynth;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};
use std::sync::{Arc, Mutex};

/// Frames rendered per callback when the device lets us choose.
const PREFERRED_BUFFER_FRAMES: u32 = 256;

pub struct CpalBackend {
    /// Holds the stream to keep it playing
    #[allow(dead_code)]
    stream: Option<Stream>,
    synth: Arc<Mutex<NativeSynth>>,
}

impl CpalBackend {
    pub fn new(synth: Arc<Mutex<NativeSynth>>) -> Self {
        Self {
            stream: None,
            synth,
        }
    }

    fn select_output_device(
        &self,
        host: &cpal::Host,
    ) -> Result<cpal::Device, Box<dyn std::error::Error>> {
        if cfg!(target_os = "linux") {
            self.select_linux_output_device(host)
        } else {
            host.default_output_device()
                .ok_or_else(|| "No output device available".into())
        }
    }

    fn select_linux_output_device(
        &self,
        host: &cpal::Host,
    ) -> Result<cpal::Device, Box<dyn std::error::Error>> {
        let mut device_names = Vec::new();

        for device in host.devices()? {
            let name = device.name().unwrap_or_default();
            let lower = name.to_lowercase();
            if lower.starts_with("default:") || lower.contains("pipewire") {
                device_names.push(name);
            }
        }

        if device_names.is_empty() {
            return host
                .default_output_device()
                .ok_or_else(|| "No output device available".into());
        }

        let choice = console::choose("output device", &device_names)?;
        let selected_name = &device_names[choice];

        host.devices()?
            .find(|d| d.name().map(|n| n == *selected_name).unwrap_or(false))
            .ok_or_else(|| "Selected output device not found".into())
    }

    fn build_stream(&mut self) -> Result<Stream, Box<dyn std::error::Error>> {
        let host = cpal::default_host();
        let device = self.select_output_device(&host)?;
        log::info!("Selected device: {}", device.name().unwrap_or_default());

        let supported_config = device.default_output_config()?;
        let mut stream_config: cpal::StreamConfig = supported_config.clone().into();
        stream_config.buffer_size = cpal::BufferSize::Fixed(PREFERRED_BUFFER_FRAMES);

        let sample_rate = stream_config.sample_rate.0 as f32;
        let channels = stream_config.channels as usize;
        log::info!("Output: {} Hz, {} channel(s)", sample_rate, channels);

        let synth = self.synth.clone();
        // Grown only if the device hands us a bigger callback than expected
        let mut buffer = vec![0.0; PREFERRED_BUFFER_FRAMES as usize];

        let stream = match supported_config.sample_format() {
            SampleFormat::F32 => device.build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let frames = data.len() / channels;
                    if buffer.len() < frames {
                        buffer.resize(frames, 0.0);
                    }
                    let mono = &mut buffer[..frames];
                    match synth.lock() {
                        Ok(mut synth) => synth.process(mono, sample_rate),
                        Err(_) => mono.fill(0.0),
                    }

                    for (frame, sample) in data.chunks_mut(channels).zip(mono.iter()) {
                        frame.fill(*sample);
                    }
                },
                |err| log::error!("Stream error: {}", err),
                None,
            )?,
            other => return Err(format!("Unsupported sample format {:?}", other).into()),
        };

        Ok(stream)
    }
}

impl AudioBackend for CpalBackend {
    fn start(&mut self) {
        match self.build_stream() {
            Ok(stream) => {
                if let Err(e) = stream.play() {
                    log::error!("Failed to start stream: {}", e);
                    return;
                }
                self.stream = Some(stream);
            }
            Err(e) => log::error!("Failed to open audio output: {}", e),
        }
    }
}
