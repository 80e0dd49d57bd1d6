pub mod audio;
pub mod cli;
pub mod config;
pub mod dsp;
pub mod sched;
pub mod signal;
