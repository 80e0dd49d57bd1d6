use anyhow::{Context, Result};
use std::path::Path;

use crate::signal::Signal;

/// Write a mono signal as a 16-bit PCM WAV file.
pub fn save_wav(signal: &Signal, path: &Path) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {}", path.display()))?;

    for &sample in &signal.samples {
        let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(quantized)?;
    }

    writer
        .finalize()
        .with_context(|| format!("Failed to finalize WAV file: {}", path.display()))?;

    log::info!(
        "Wrote {} ({} samples, {}Hz, {:.1}s)",
        path.display(),
        signal.len(),
        signal.sample_rate,
        signal.duration_secs()
    );
    Ok(())
}
