//! Pitch detection from a byte-magnitude spectrum.
//!
//! The detector picks the loudest bin, accepts it only when it is both loud
//! enough and inside the playable band, and otherwise coasts: the last
//! confident frequency decays geometrically toward zero so the bird eases
//! out of whistling instead of dropping on a single missed frame.

use crate::error::InputError;
use crate::{Params, Settings};

/// A polled source of frequency-domain magnitudes (0-255 per bin)
pub trait SpectrumSource {
    fn sample_rate(&self) -> f32;

    fn fft_size(&self) -> usize;

    fn bin_count(&self) -> usize {
        self.fft_size() / 2
    }

    /// Copy the latest magnitudes into `bins`.
    ///
    /// Returns `false` when no fresh snapshot is available; must not block.
    fn read_magnitudes(&mut self, bins: &mut [u8]) -> bool;
}

/// Convert a bin index to Hz
pub fn bin_to_hz(index: usize, sample_rate: f32, fft_size: usize) -> f32 {
    index as f32 * sample_rate / (fft_size as f32 * 2.0)
}

/// Peak-bin pitch estimator with decay fallback
#[derive(Debug, Clone, Default)]
pub struct PitchDetector {
    current: f32,
    bins: Vec<u8>,
}

impl PitchDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last reported estimate (confident or decayed)
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0.0;
    }

    /// Reduce one magnitude snapshot to a frequency estimate
    pub fn detect(
        &mut self,
        magnitudes: &[u8],
        sample_rate: f32,
        fft_size: usize,
        settings: &Settings,
    ) -> f32 {
        let mut peak = 0u8;
        let mut peak_index = 0usize;
        for (i, &magnitude) in magnitudes.iter().enumerate() {
            if magnitude > peak {
                peak = magnitude;
                peak_index = i;
            }
        }

        let frequency = bin_to_hz(peak_index, sample_rate, fft_size);
        if settings.in_range(frequency) && peak > Params::NOISE_FLOOR {
            self.current = frequency;
            return frequency;
        }

        self.coast()
    }

    /// Poll `source` once; a stale read counts as a rejected sample
    pub fn sample<S: SpectrumSource + ?Sized>(&mut self, source: &mut S, settings: &Settings) -> f32 {
        let mut bins = std::mem::take(&mut self.bins);
        bins.resize(source.bin_count(), 0);

        let estimate = if source.read_magnitudes(&mut bins) {
            self.detect(&bins, source.sample_rate(), source.fft_size(), settings)
        } else {
            self.coast()
        };

        self.bins = bins;
        estimate
    }

    fn coast(&mut self) -> f32 {
        self.current *= Params::DECAY;
        self.current
    }
}

/// Microphone access state
#[derive(Debug)]
pub enum Access<S> {
    /// Access not yet requested or still awaiting the user's answer
    Pending,
    Ready(S),
    Denied(InputError),
}

/// Two-phase audio input: acquire access, then poll once per frame.
///
/// Sampling before access is granted fails closed and reports silence.
#[derive(Debug)]
pub struct AudioInput<S> {
    access: Access<S>,
    detector: PitchDetector,
}

impl<S> Default for AudioInput<S> {
    fn default() -> Self {
        Self {
            access: Access::Pending,
            detector: PitchDetector::new(),
        }
    }
}

impl<S: SpectrumSource> AudioInput<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access(&self) -> &Access<S> {
        &self.access
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.access, Access::Ready(_))
    }

    /// Record the outcome of an access request
    pub fn resolve(&mut self, result: Result<S, InputError>) -> Result<(), InputError> {
        match result {
            Ok(source) => {
                log::info!(
                    "Audio input ready: {} Hz, FFT size {}",
                    source.sample_rate(),
                    source.fft_size()
                );
                self.detector.reset();
                self.access = Access::Ready(source);
                Ok(())
            }
            Err(err) => {
                log::warn!("Audio input unavailable: {}", err);
                self.access = Access::Denied(err.clone());
                Err(err)
            }
        }
    }

    /// One frequency estimate for this frame; 0.0 unless access was granted
    pub fn sample(&mut self, settings: &Settings) -> f32 {
        match &mut self.access {
            Access::Ready(source) => self.detector.sample(source, settings),
            Access::Pending | Access::Denied(_) => 0.0,
        }
    }

    /// Release the source, returning it so the host can close the device
    pub fn stop(&mut self) -> Option<S> {
        self.detector.reset();
        match std::mem::replace(&mut self.access, Access::Pending) {
            Access::Ready(source) => Some(source),
            _ => None,
        }
    }
}
