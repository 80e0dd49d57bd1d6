use super::{Signal, SignalError};

/// Scale a signal so its peak absolute sample equals `target_peak`. An
/// all-zero signal is returned unchanged rather than divided by zero.
pub fn normalize(signal: &Signal, target_peak: f32) -> Result<Signal, SignalError> {
    if target_peak <= 0.0 || target_peak > 1.0 {
        return Err(SignalError::InvalidParameter(format!(
            "target peak must be in (0, 1], got {target_peak}"
        )));
    }

    let peak = signal.peak();
    if peak == 0.0 {
        return Ok(signal.clone());
    }

    let scale = target_peak / peak;
    Ok(Signal::new(
        signal.samples.iter().map(|s| s * scale).collect(),
        signal.sample_rate,
    ))
}

/// Sum equal-length signals element-wise and normalize the result to
/// `target_peak`. Used both to collapse multi-channel recordings to mono and
/// to blend synthesized tones into a chord.
pub fn mix(signals: &[Signal], target_peak: f32) -> Result<Signal, SignalError> {
    let summed = Signal::sum(signals)?;
    normalize(&summed, target_peak)
}
