use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::window::Window;
use crate::signal::{Signal, SignalError};

/// One spectral slice: the engine's shared frequency axis plus the magnitude
/// spectrum of a single analysis frame.
#[derive(Clone, Debug)]
pub struct SpectralFrame {
    pub frequencies: Arc<[f32]>,
    pub magnitudes: Vec<f32>,
}

/// Lazy short-time Fourier transform over a mono signal.
///
/// The signal is cut into consecutive non-overlapping frames of `fft_size`
/// samples (hop = fft_size); the trailing partial frame is zero-padded. Each
/// pull windows one frame, transforms it, and yields the magnitudes of the
/// first `fft_size/2 + 1` bins scaled by the fixed constant `2 / fft_size`,
/// so magnitudes are comparable across FFT sizes. A consumed engine cannot be
/// rewound; build a fresh one to re-analyze the same signal.
pub struct Spectrogram {
    samples: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    frequencies: Arc<[f32]>,
    fft_size: usize,
    sample_rate: u32,
    scale: f32,
    pos: usize,
}

impl Spectrogram {
    pub fn new(signal: &Signal, fft_size: usize, window: Window) -> Result<Self, SignalError> {
        if fft_size == 0 {
            return Err(SignalError::InvalidParameter(
                "fft size must be positive".into(),
            ));
        }
        if signal.sample_rate == 0 {
            return Err(SignalError::InvalidParameter(
                "sample rate must be positive".into(),
            ));
        }

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(fft_size);

        // Bin k sits at k * rate / fft_size; one axis shared by every frame.
        let bin_width = signal.sample_rate as f32 / fft_size as f32;
        let frequencies: Arc<[f32]> = (0..=fft_size / 2)
            .map(|k| k as f32 * bin_width)
            .collect::<Vec<_>>()
            .into();

        Ok(Self {
            samples: signal.samples.clone(),
            fft,
            window: window.coefficients(fft_size),
            frequencies,
            fft_size,
            sample_rate: signal.sample_rate,
            scale: 2.0 / fft_size as f32,
            pos: 0,
        })
    }

    /// The frequency axis, identical for every frame of this engine.
    pub fn frequencies(&self) -> Arc<[f32]> {
        Arc::clone(&self.frequencies)
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frames not yet consumed: ceil(remaining / fft_size).
    pub fn frames_remaining(&self) -> usize {
        (self.samples.len() - self.pos).div_ceil(self.fft_size)
    }

    /// Pull the next spectral frame, or `None` once the signal is exhausted.
    pub fn next_frame(&mut self) -> Option<SpectralFrame> {
        if self.pos >= self.samples.len() {
            return None;
        }

        let end = (self.pos + self.fft_size).min(self.samples.len());
        let frame = &self.samples[self.pos..end];
        self.pos = end;

        let mut buffer: Vec<Complex<f32>> = frame
            .iter()
            .zip(&self.window)
            .map(|(&s, &w)| Complex::new(s * w, 0.0))
            .collect();
        // Zero-pad the trailing short frame to fft_size.
        buffer.resize(self.fft_size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        let magnitudes = buffer[..=self.fft_size / 2]
            .iter()
            .map(|c| c.norm() * self.scale)
            .collect();

        Some(SpectralFrame {
            frequencies: Arc::clone(&self.frequencies),
            magnitudes,
        })
    }
}

impl Iterator for Spectrogram {
    type Item = SpectralFrame;

    fn next(&mut self) -> Option<SpectralFrame> {
        self.next_frame()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.frames_remaining();
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn tone(freq: f32, rate: u32, len: usize) -> Signal {
        let samples = (0..len)
            .map(|i| (TAU * freq * i as f32 / rate as f32).sin())
            .collect();
        Signal::new(samples, rate)
    }

    #[test]
    fn pure_tone_peaks_at_nearest_bin() {
        let rate = 8000;
        let fft_size = 1024;
        let freq = 440.0;
        let sig = tone(freq, rate, fft_size);

        let mut spec = Spectrogram::new(&sig, fft_size, Window::Hann).unwrap();
        let frame = spec.next_frame().unwrap();

        let peak_bin = frame
            .magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();

        let bin_width = rate as f32 / fft_size as f32;
        let peak_freq = frame.frequencies[peak_bin];
        assert!(
            (peak_freq - freq).abs() <= bin_width,
            "peak at {peak_freq}Hz, expected within {bin_width}Hz of {freq}Hz"
        );
    }

    #[test]
    fn frequency_axis_is_identical_across_frames() {
        let sig = tone(440.0, 8000, 4096);
        let spec = Spectrogram::new(&sig, 512, Window::Hann).unwrap();
        let axis = spec.frequencies();

        let frames: Vec<SpectralFrame> = spec.collect();
        assert_eq!(frames.len(), 8);
        for frame in &frames {
            assert!(Arc::ptr_eq(&frame.frequencies, &axis));
        }
        assert_eq!(axis.len(), 512 / 2 + 1);
        assert_eq!(axis[1], 8000.0 / 512.0);
    }

    #[test]
    fn frame_count_is_ceil_of_length_over_fft_size() {
        let sig = Signal::new(vec![1.0; 1000], 8000);
        let spec = Spectrogram::new(&sig, 256, Window::Hann).unwrap();
        assert_eq!(spec.frames_remaining(), 4); // 3 full + 1 padded
        assert_eq!(spec.count(), 4);
    }

    #[test]
    fn short_signal_yields_one_padded_frame() {
        let sig = Signal::new(vec![0.5; 100], 8000);
        let mut spec = Spectrogram::new(&sig, 256, Window::Hann).unwrap();
        let frame = spec.next_frame().unwrap();
        assert_eq!(frame.magnitudes.len(), 256 / 2 + 1);
        assert!(spec.next_frame().is_none());
    }

    #[test]
    fn empty_signal_yields_empty_sequence() {
        let sig = Signal::new(Vec::new(), 8000);
        let mut spec = Spectrogram::new(&sig, 256, Window::Hann).unwrap();
        assert_eq!(spec.frames_remaining(), 0);
        assert!(spec.next_frame().is_none());
    }

    #[test]
    fn zero_fft_size_is_rejected() {
        let sig = Signal::new(vec![0.0; 16], 8000);
        assert!(Spectrogram::new(&sig, 0, Window::Hann).is_err());
    }
}
