use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use sonoscope::audio::decode::decode_audio;
use sonoscope::audio::encode::save_wav;
use sonoscope::audio::playback::AudioPlayer;
use sonoscope::cli::Cli;
use sonoscope::config;
use sonoscope::dsp::{Spectrogram, Window};
use sonoscope::sched::{spawn_playback_task, FrameScheduler, RenderSink, StartTrigger, Tick};
use sonoscope::signal::{self, Signal};

/// Stand-in renderer: logs the dominant bin of each delivered frame.
struct ConsoleSink {
    frame: usize,
}

impl RenderSink for ConsoleSink {
    fn update(&mut self, frequencies: &[f32], magnitudes: &[f32]) {
        if let Some((bin, mag)) = magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        {
            log::info!(
                "frame {:>4}: peak {:.1}Hz (magnitude {:.4})",
                self.frame,
                frequencies[bin],
                mag
            );
        }
        self.frame += 1;
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect sonoscope.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("sonoscope.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("sonoscope").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.fft_size == 4096 { cli.fft_size = cfg.audio.fft_size; }
            if cli.sample_rate == 44100 { cli.sample_rate = cfg.audio.sample_rate; }
            if cli.target_peak == 0.89 { cli.target_peak = cfg.audio.target_peak; }
            if cli.window == "hann" { cli.window = cfg.audio.window; }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    std::fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", cli.output_dir.display())
    })?;

    signal::set_sampling_rate(cli.sample_rate)?;

    // Just-intonation major chord (root, third, fifth, octave), played as a
    // block chord and as an arpeggio of half-length notes.
    log::info!(
        "Synthesizing major chord at {}Hz, {}s per note",
        cli.root_freq,
        cli.note_duration
    );
    let notes = signal::major_chord(cli.root_freq, cli.note_duration)?;
    let block_chord = signal::mix(&notes, cli.target_peak)?;
    let halves: Vec<Signal> = notes.iter().map(|n| n.prefix(n.len() / 2)).collect();
    let arpeggio = signal::normalize(&signal::concat(&halves)?, cli.target_peak)?;

    save_wav(&block_chord, &cli.output_dir.join("major_chord.wav"))?;
    save_wav(&arpeggio, &cli.output_dir.join("major_chord_arpeggio.wav"))?;

    let Some(ref input) = cli.input else {
        log::info!("No input recording given; synthesized output only.");
        return Ok(());
    };
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    // Recording -> mono analysis signal -> lazy spectrogram.
    let recording = decode_audio(input)?;
    let mono = signal::mix(&recording.channel_signals(), cli.target_peak)?;
    let window: Window = cli.window.parse()?;
    let spectrogram = Spectrogram::new(&mono, cli.fft_size, window)?;

    let trigger = Arc::new(StartTrigger::new());
    let mut scheduler = FrameScheduler::new(spectrogram, Arc::clone(&trigger));
    log::info!(
        "Frame interval: {:.1}ms ({} samples @ {}Hz)",
        scheduler.interval().as_secs_f64() * 1000.0,
        cli.fft_size,
        mono.sample_rate
    );

    // Audio start and frame delivery are both gated on the one trigger; each
    // observer discovers the transition independently.
    let playback = spawn_playback_task(Arc::clone(&trigger), AudioPlayer::from_signal(&mono));

    if cli.autostart {
        trigger.set();
    } else {
        log::info!("Press ENTER to start");
        let trigger = Arc::clone(&trigger);
        thread::spawn(move || {
            let mut line = String::new();
            let _ = std::io::stdin().read_line(&mut line);
            trigger.set();
        });
    }

    let mut sink = ConsoleSink { frame: 0 };
    loop {
        match scheduler.tick(&mut sink) {
            Tick::Idle => thread::sleep(Duration::from_millis(10)),
            Tick::Delivered => {}
            Tick::Exhausted => break,
        }
    }

    playback
        .join()
        .map_err(|_| anyhow::anyhow!("Playback task panicked"))?;

    log::info!("Done");
    Ok(())
}
