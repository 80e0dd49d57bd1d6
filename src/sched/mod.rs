mod scheduler;
mod sync;
mod trigger;

pub use scheduler::{FrameScheduler, RenderSink, Tick};
pub use sync::{spawn_playback_task, AudioSink};
pub use trigger::StartTrigger;
