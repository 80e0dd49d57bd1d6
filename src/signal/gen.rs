use std::f32::consts::TAU;
use std::sync::OnceLock;

use super::{Signal, SignalError};

static SAMPLING_RATE: OnceLock<u32> = OnceLock::new();

/// Configure the process-wide generator sampling rate. Must be called before
/// any generation; a second call with the same rate is a no-op, a different
/// rate is rejected.
pub fn set_sampling_rate(rate: u32) -> Result<(), SignalError> {
    if rate == 0 {
        return Err(SignalError::InvalidParameter(
            "sampling rate must be positive".into(),
        ));
    }
    let current = *SAMPLING_RATE.get_or_init(|| rate);
    if current != rate {
        return Err(SignalError::SampleRateMismatch {
            left: current,
            right: rate,
        });
    }
    Ok(())
}

pub fn sampling_rate() -> Result<u32, SignalError> {
    SAMPLING_RATE.get().copied().ok_or(SignalError::Configuration)
}

/// Pure tone: `amplitude * sin(2π·frequency·t)` for `duration` seconds at the
/// configured sampling rate. Amplitude is not clamped here; normalization is
/// the mixer's job.
pub fn sine(frequency: f32, amplitude: f32, duration: f32) -> Result<Signal, SignalError> {
    if frequency <= 0.0 {
        return Err(SignalError::InvalidParameter(format!(
            "frequency must be positive, got {frequency}"
        )));
    }
    if duration <= 0.0 {
        return Err(SignalError::InvalidParameter(format!(
            "duration must be positive, got {duration}"
        )));
    }

    let rate = sampling_rate()?;
    let num_samples = (duration * rate as f32) as usize;
    let samples = (0..num_samples)
        .map(|i| amplitude * (TAU * frequency * i as f32 / rate as f32).sin())
        .collect();

    Ok(Signal::new(samples, rate))
}

/// The four partials of a just-intonation major chord: root, third (5/4),
/// fifth (3/2), octave (2x), each at unit amplitude.
pub fn major_chord(root_freq: f32, duration: f32) -> Result<[Signal; 4], SignalError> {
    Ok([
        sine(root_freq, 1.0, duration)?,
        sine(root_freq * 5.0 / 4.0, 1.0, duration)?,
        sine(root_freq * 3.0 / 2.0, 1.0, duration)?,
        sine(root_freq * 2.0, 1.0, duration)?,
    ])
}

/// Join signals end to end. All parts must share one sample rate.
pub fn concat(parts: &[Signal]) -> Result<Signal, SignalError> {
    let first = parts.first().ok_or_else(|| {
        SignalError::InvalidParameter("cannot concatenate an empty set of signals".into())
    })?;

    let mut samples = Vec::with_capacity(parts.iter().map(Signal::len).sum());
    for part in parts {
        if part.sample_rate != first.sample_rate {
            return Err(SignalError::SampleRateMismatch {
                left: first.sample_rate,
                right: part.sample_rate,
            });
        }
        samples.extend_from_slice(&part.samples);
    }

    Ok(Signal::new(samples, first.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 44100;

    fn configure() {
        set_sampling_rate(RATE).unwrap();
    }

    #[test]
    fn sine_has_expected_length() {
        configure();
        let tone = sine(440.0, 1.0, 2.0).unwrap();
        assert_eq!(tone.len(), (2.0 * RATE as f32) as usize);
        assert_eq!(tone.sample_rate, RATE);
    }

    #[test]
    fn sine_rejects_non_positive_parameters() {
        configure();
        assert!(matches!(
            sine(-100.0, 1.0, 1.0),
            Err(SignalError::InvalidParameter(_))
        ));
        assert!(matches!(
            sine(440.0, 1.0, 0.0),
            Err(SignalError::InvalidParameter(_))
        ));
    }

    #[test]
    fn reconfiguring_with_same_rate_is_idempotent() {
        configure();
        assert!(set_sampling_rate(RATE).is_ok());
        assert!(set_sampling_rate(RATE + 1).is_err());
    }

    #[test]
    fn sum_rejects_unequal_lengths() {
        configure();
        let a = sine(220.0, 1.0, 1.0).unwrap();
        let b = sine(220.0, 1.0, 0.5).unwrap();
        assert!(matches!(
            Signal::sum(&[a, b]),
            Err(SignalError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn concat_joins_prefixes() {
        configure();
        let chord = major_chord(220.0, 2.0).unwrap();
        let halves: Vec<Signal> = chord.iter().map(|n| n.prefix(n.len() / 2)).collect();
        let arpeggio = concat(&halves).unwrap();
        assert_eq!(arpeggio.len(), halves.iter().map(Signal::len).sum::<usize>());
    }
}
