use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audio: AudioConfig,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_target_peak")]
    pub target_peak: f32,
    #[serde(default = "default_window")]
    pub window: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            fft_size: default_fft_size(),
            sample_rate: default_sample_rate(),
            target_peak: default_target_peak(),
            window: default_window(),
        }
    }
}

fn default_fft_size() -> usize { 4096 }
fn default_sample_rate() -> u32 { 44100 }
fn default_target_peak() -> f32 { 0.89 }
fn default_window() -> String { "hann".into() }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}
