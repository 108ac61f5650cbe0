// src/core/dsp/power.rs
//
// Spectral power meter: real-input FFT plus subband power integration,
// with an optional equalizer mask applied in the frequency domain.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Measures signal power inside a normalized frequency band.
///
/// The transform length is fixed at construction. Band edges are given as
/// a normalized centre frequency and bandwidth in cycles per sample
/// (Nyquist = 0.5).
pub struct SpectralPowerMeter {
    fft: Arc<dyn Fft<f32>>,
    sig_len: usize,
    spectrum: Vec<Complex<f32>>,
    eq_mask: Vec<f32>,
    eq_enabled: bool,
}

impl SpectralPowerMeter {
    pub fn new(sig_len: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            fft: planner.plan_fft_forward(sig_len),
            sig_len,
            spectrum: vec![Complex::new(0.0, 0.0); sig_len],
            eq_mask: vec![1.0; sig_len],
            eq_enabled: false,
        }
    }

    /// Copy a caller-supplied equalizer mask into internal storage.
    /// Entries beyond the transform length are ignored.
    pub fn set_equalizer(&mut self, mask: &[f32]) {
        let n = mask.len().min(self.sig_len);
        self.eq_mask[..n].copy_from_slice(&mask[..n]);
    }

    /// Multiply the spectrum by the mask during power integration
    pub fn enable_equalizer(&mut self) {
        self.eq_enabled = true;
    }

    /// Integrate raw spectrum power
    pub fn disable_equalizer(&mut self) {
        self.eq_enabled = false;
    }

    /// Power of `signal` summed over the bins in `[fc - bw/2, fc + bw/2)`.
    ///
    /// A signal shorter than the transform length is zero-padded. If the
    /// band collapses to a single bin boundary, it is widened to span at
    /// least one bin.
    pub fn calc_power(&mut self, signal: &[f32], fc: f32, bw: f32) -> f32 {
        let lo_bin = self.freq_to_bin(fc - bw / 2.0);
        let mut hi_bin = self.freq_to_bin(fc + bw / 2.0);
        if lo_bin == hi_bin {
            hi_bin = lo_bin + 1;
        }

        for (n, slot) in self.spectrum.iter_mut().enumerate() {
            *slot = Complex::new(signal.get(n).copied().unwrap_or(0.0), 0.0);
        }
        self.fft.process(&mut self.spectrum);

        self.bin_power(lo_bin, hi_bin)
    }

    fn bin_power(&self, lo_bin: usize, hi_bin: usize) -> f32 {
        let mut pwr = 0.0f32;
        if self.eq_enabled {
            for n in lo_bin..hi_bin {
                let re = self.spectrum[n].re * self.eq_mask[n];
                let im = self.spectrum[n].im * self.eq_mask[n];
                pwr += re * re + im * im;
            }
        } else {
            for n in lo_bin..hi_bin {
                pwr += self.spectrum[n].norm_sqr();
            }
        }
        pwr
    }

    /// Map a normalized frequency to a bin index: floor(f * N) mod N.
    /// The modulo wraps bands that touch or cross Nyquist.
    fn freq_to_bin(&self, fc: f32) -> usize {
        let bin = (fc * self.sig_len as f32).floor() as i64;
        bin.rem_euclid(self.sig_len as i64) as usize
    }
}
