use std::sync::Arc;
use std::thread;

use anyhow::Result;

use super::trigger::StartTrigger;

/// Fire-and-forget playback seam: `start` launches audio output without
/// blocking and consumes the sink, so playback can begin at most once.
pub trait AudioSink: Send + 'static {
    fn start(self) -> Result<()>;
}

/// Spawn the playback synchronizer: a thread that blocks on the shared start
/// trigger, issues exactly one playback start, and terminates. The frame
/// scheduler observes the same trigger independently, so audio and visuals
/// are both released by the one transition without either blocking the other.
pub fn spawn_playback_task<S: AudioSink>(
    trigger: Arc<StartTrigger>,
    sink: S,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        trigger.wait();
        if let Err(err) = sink.start() {
            log::error!("Playback failed to start: {err:#}");
        }
    })
}
