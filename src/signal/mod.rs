mod gen;
mod mix;

pub use gen::{concat, major_chord, sampling_rate, set_sampling_rate, sine};
pub use mix::{mix, normalize};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("sampling rate used before being configured")]
    Configuration,

    #[error("cannot combine signals of lengths {left} and {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("cannot combine signals sampled at {left}Hz and {right}Hz")]
    SampleRateMismatch { left: u32, right: u32 },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// A finite sampled waveform. Immutable once produced; operations that
/// transform a signal return a new one.
#[derive(Clone, Debug)]
pub struct Signal {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Signal {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
    }

    /// First `n` samples as a new signal (the whole signal if shorter).
    pub fn prefix(&self, n: usize) -> Signal {
        Signal {
            samples: self.samples[..n.min(self.samples.len())].to_vec(),
            sample_rate: self.sample_rate,
        }
    }

    /// Element-wise sum of equal-length signals sharing one sample rate.
    pub fn sum(signals: &[Signal]) -> Result<Signal, SignalError> {
        let first = signals.first().ok_or_else(|| {
            SignalError::InvalidParameter("cannot sum an empty set of signals".into())
        })?;

        let mut samples = first.samples.clone();
        for sig in &signals[1..] {
            if sig.sample_rate != first.sample_rate {
                return Err(SignalError::SampleRateMismatch {
                    left: first.sample_rate,
                    right: sig.sample_rate,
                });
            }
            if sig.len() != samples.len() {
                return Err(SignalError::LengthMismatch {
                    left: samples.len(),
                    right: sig.len(),
                });
            }
            for (acc, s) in samples.iter_mut().zip(&sig.samples) {
                *acc += s;
            }
        }

        Ok(Signal {
            samples,
            sample_rate: first.sample_rate,
        })
    }
}
