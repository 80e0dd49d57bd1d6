use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sonoscope", about = "Tone synthesis and playback-synced spectrogram viewer")]
pub struct Cli {
    /// Input recording (WAV, FLAC, MP3)
    pub input: Option<PathBuf>,

    /// Directory for synthesized WAV output
    #[arg(short, long, default_value = "output")]
    pub output_dir: PathBuf,

    /// FFT size (frame length and hop, in samples)
    #[arg(long, default_value_t = 4096)]
    pub fft_size: usize,

    /// Analysis window name
    #[arg(long, default_value = "hann")]
    pub window: String,

    /// Sampling rate for tone generation (Hz)
    #[arg(long, default_value_t = 44100)]
    pub sample_rate: u32,

    /// Peak amplitude after mixing/normalization (0-1]
    #[arg(long, default_value_t = 0.89)]
    pub target_peak: f32,

    /// Root frequency of the synthesized chord (Hz)
    #[arg(long, default_value_t = 220.0)]
    pub root_freq: f32,

    /// Duration of each synthesized note (seconds)
    #[arg(long, default_value_t = 2.0)]
    pub note_duration: f32,

    /// Start playback and frame delivery immediately instead of waiting for ENTER
    #[arg(long)]
    pub autostart: bool,

    /// Config file path (default: auto-detect sonoscope.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
