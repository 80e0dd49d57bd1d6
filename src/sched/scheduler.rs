use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::trigger::StartTrigger;
use crate::dsp::Spectrogram;

/// External renderer seam: receives one (frequency axis, magnitude axis) pair
/// per delivery. Axis scaling and redraw are the renderer's concern.
pub trait RenderSink {
    fn update(&mut self, frequencies: &[f32], magnitudes: &[f32]);
}

/// Outcome of one scheduler tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Start trigger not yet fired; no frame consumed.
    Idle,
    /// One frame delivered to the sink.
    Delivered,
    /// Sequence exhausted; empty axes delivered. Normal terminal state.
    Exhausted,
}

/// Paces spectral-frame delivery to the audio hop rate.
///
/// Each tick delivers at most one frame, and deliveries are kept at least
/// `1000 * fft_size / sample_rate` ms apart, measured delivery start to
/// delivery start. An overrun skips the wait instead of compounding delay;
/// frames are never dropped to catch up.
pub struct FrameScheduler {
    spectrogram: Spectrogram,
    trigger: Arc<StartTrigger>,
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl FrameScheduler {
    pub fn new(spectrogram: Spectrogram, trigger: Arc<StartTrigger>) -> Self {
        let interval = Duration::from_secs_f64(
            spectrogram.fft_size() as f64 / spectrogram.sample_rate() as f64,
        );
        Self {
            spectrogram,
            trigger,
            interval,
            next_deadline: None,
        }
    }

    /// Minimum time between two deliveries.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Drive one tick: idle until the start trigger fires, then deliver one
    /// frame per tick at the configured pace.
    pub fn tick(&mut self, sink: &mut dyn RenderSink) -> Tick {
        if !self.trigger.is_set() {
            return Tick::Idle;
        }

        if let Some(deadline) = self.next_deadline {
            let now = Instant::now();
            if now < deadline {
                thread::sleep(deadline - now);
            }
        }

        // Deadline anchored at delivery start, not at the previous deadline:
        // a slow delivery shifts the schedule instead of compounding.
        self.next_deadline = Some(Instant::now() + self.interval);

        match self.spectrogram.next_frame() {
            Some(frame) => {
                sink.update(&frame.frequencies, &frame.magnitudes);
                Tick::Delivered
            }
            None => {
                sink.update(&[], &[]);
                Tick::Exhausted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::Window;
    use crate::signal::Signal;

    struct RecordingSink {
        deliveries: Vec<(usize, Instant)>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self { deliveries: Vec::new() }
        }
    }

    impl RenderSink for RecordingSink {
        fn update(&mut self, _frequencies: &[f32], magnitudes: &[f32]) {
            self.deliveries.push((magnitudes.len(), Instant::now()));
        }
    }

    fn scheduler(num_samples: usize, fft_size: usize, rate: u32) -> (FrameScheduler, Arc<StartTrigger>) {
        let sig = Signal::new(vec![0.25; num_samples], rate);
        let spec = Spectrogram::new(&sig, fft_size, Window::Hann).unwrap();
        let trigger = Arc::new(StartTrigger::new());
        (FrameScheduler::new(spec, Arc::clone(&trigger)), trigger)
    }

    #[test]
    fn idles_until_trigger_fires() {
        let (mut sched, trigger) = scheduler(512, 256, 8000);
        let mut sink = RecordingSink::new();

        assert_eq!(sched.tick(&mut sink), Tick::Idle);
        assert_eq!(sched.tick(&mut sink), Tick::Idle);
        assert!(sink.deliveries.is_empty());

        trigger.set();
        assert_eq!(sched.tick(&mut sink), Tick::Delivered);
        assert_eq!(sink.deliveries.len(), 1);
    }

    #[test]
    fn deliveries_respect_minimum_interval() {
        // 256 samples @ 8kHz per frame -> 32ms interval.
        let (mut sched, trigger) = scheduler(4 * 256, 256, 8000);
        trigger.set();
        let mut sink = RecordingSink::new();

        while sched.tick(&mut sink) == Tick::Delivered {}

        let times: Vec<Instant> = sink.deliveries.iter().map(|d| d.1).collect();
        assert_eq!(sink.deliveries.len(), 5); // 4 frames + terminal empty delivery
        for pair in times.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(
                gap >= sched.interval() - Duration::from_millis(1),
                "frames delivered {gap:?} apart, interval {:?}",
                sched.interval()
            );
        }
    }

    #[test]
    fn exhaustion_delivers_empty_axes() {
        let (mut sched, trigger) = scheduler(256, 256, 8000);
        trigger.set();
        let mut sink = RecordingSink::new();

        assert_eq!(sched.tick(&mut sink), Tick::Delivered);
        assert_eq!(sched.tick(&mut sink), Tick::Exhausted);
        assert_eq!(sched.tick(&mut sink), Tick::Exhausted);

        assert_eq!(sink.deliveries[0].0, 256 / 2 + 1);
        assert_eq!(sink.deliveries[1].0, 0);
        assert_eq!(sink.deliveries[2].0, 0);
    }
}
