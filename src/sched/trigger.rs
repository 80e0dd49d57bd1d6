use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// One-shot start latch: written once by a single external actor, observed by
/// the frame scheduler (non-blocking check) and the playback synchronizer
/// (blocking wait). Never reset.
#[derive(Default)]
pub struct StartTrigger {
    fired: Mutex<bool>,
    cvar: Condvar,
}

impl StartTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release all observers. Idempotent; there is no way back to unset.
    pub fn set(&self) {
        let mut fired = self.fired.lock().unwrap();
        *fired = true;
        self.cvar.notify_all();
    }

    pub fn is_set(&self) -> bool {
        *self.fired.lock().unwrap()
    }

    /// Block until the trigger fires.
    pub fn wait(&self) {
        let mut fired = self.fired.lock().unwrap();
        while !*fired {
            fired = self.cvar.wait(fired).unwrap();
        }
    }

    /// Block until the trigger fires or `timeout` elapses; true if fired.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let fired = self.fired.lock().unwrap();
        let (fired, _) = self
            .cvar
            .wait_timeout_while(fired, timeout, |fired| !*fired)
            .unwrap();
        *fired
    }
}
