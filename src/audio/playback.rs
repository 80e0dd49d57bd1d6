use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::thread;
use std::time::Duration;

use crate::sched::AudioSink;
use crate::signal::Signal;

/// One-shot mono playback of a signal through the default output device.
/// `start` hands the buffer to a dedicated thread and returns immediately;
/// the stream is kept alive there until the buffer has played out.
pub struct AudioPlayer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioPlayer {
    pub fn from_signal(signal: &Signal) -> Self {
        Self {
            samples: signal.samples.clone(),
            sample_rate: signal.sample_rate,
        }
    }
}

impl AudioSink for AudioPlayer {
    fn start(self) -> Result<()> {
        thread::spawn(move || {
            if let Err(err) = play_buffer(self.samples, self.sample_rate) {
                log::error!("Audio playback error: {err:#}");
            }
        });
        Ok(())
    }
}

fn play_buffer(samples: Vec<f32>, sample_rate: u32) -> Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .context("No audio output device found")?;

    let config = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    log::info!(
        "Playback: {} @ {}Hz",
        device.name().unwrap_or_else(|_| "Unknown".to_string()),
        sample_rate
    );

    let duration = Duration::from_secs_f64(samples.len() as f64 / sample_rate as f64);
    let mut pos = 0usize;

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for out in data.iter_mut() {
                    *out = samples.get(pos).copied().unwrap_or(0.0);
                    pos = pos.saturating_add(1);
                }
            },
            |err| log::error!("Audio stream error: {err}"),
            None,
        )
        .context("Failed to build audio stream")?;

    stream.play().context("Failed to start audio stream")?;

    // Keep the stream alive until the buffer has drained.
    thread::sleep(duration + Duration::from_millis(250));
    Ok(())
}
