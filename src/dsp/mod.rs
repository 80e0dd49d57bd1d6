mod spectrogram;
mod window;

pub use spectrogram::{SpectralFrame, Spectrogram};
pub use window::Window;
