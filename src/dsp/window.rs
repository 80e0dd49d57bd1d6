use std::f32::consts::PI;
use std::str::FromStr;

use crate::signal::SignalError;

/// Analysis window applied to each frame before the transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Window {
    Hann,
}

impl Window {
    /// Window coefficients for a frame of `len` samples.
    pub fn coefficients(&self, len: usize) -> Vec<f32> {
        if len < 2 {
            return vec![1.0; len];
        }
        match self {
            Window::Hann => (0..len)
                .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / (len - 1) as f32).cos()))
                .collect(),
        }
    }
}

impl FromStr for Window {
    type Err = SignalError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "hann" | "hanning" => Ok(Window::Hann),
            other => Err(SignalError::InvalidParameter(format!(
                "unknown window: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hann_is_zero_at_edges_and_one_at_center() {
        let w = Window::Hann.coefficients(1024);
        assert_eq!(w.len(), 1024);
        assert!(w[0].abs() < 0.01);
        assert!(w[1023].abs() < 0.01);
        assert!((w[512] - 1.0).abs() < 0.01);
    }

    #[test]
    fn parses_known_names_only() {
        assert_eq!("hann".parse::<Window>().unwrap(), Window::Hann);
        assert_eq!("Hanning".parse::<Window>().unwrap(), Window::Hann);
        assert!("blackman".parse::<Window>().is_err());
    }
}
