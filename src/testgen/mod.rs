// src/testgen/mod.rs
//
// Raw PCM test-signal synthesis for the test suites: deterministic signal
// sources plus an encoder from normalized samples to raw bytes in any
// decodable (format, endianness). No external tools involved.

use std::f64::consts::PI;
use std::fs;
use std::io;
use std::path::Path;

use crate::detection::{Endianness, FormatClass, SampleFormat};

/// Fraction of integer full scale used when encoding test tones
const TONE_LEVEL: f64 = 0.6;

/// Mono sine wave, amplitude in [0, 1]
pub fn sine(freq: f64, rate: u32, amplitude: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| amplitude * (2.0 * PI * freq * n as f64 / rate as f64).sin())
        .collect()
}

/// Interleaved stereo with an independent tone per channel
pub fn two_tone_stereo(freq_l: f64, freq_r: f64, rate: u32, amplitude: f64, frames: usize) -> Vec<f64> {
    let mut samples = Vec::with_capacity(frames * 2);
    for n in 0..frames {
        let t = n as f64 / rate as f64;
        samples.push(amplitude * (2.0 * PI * freq_l * t).sin());
        samples.push(amplitude * (2.0 * PI * freq_r * t).sin());
    }
    samples
}

/// White noise from a fixed xorshift state, low-passed by a moving average
/// of `taps` samples. A tap count of 8 places the first null at a quarter
/// of Nyquist.
pub fn lowpass_noise(seed: u64, taps: usize, len: usize) -> Vec<f64> {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        // Map to [-1, 1)
        (state >> 11) as f64 / (1u64 << 52) as f64 - 1.0
    };

    let raw: Vec<f64> = (0..len + taps).map(|_| next()).collect();
    raw.windows(taps)
        .take(len)
        .map(|w| w.iter().sum::<f64>() / taps as f64)
        .collect()
}

/// Speech-shaped source: a few low harmonics under a slow amplitude
/// envelope, with pauses
pub fn speechlike(rate: u32, amplitude: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let t = n as f64 / rate as f64;
            // Syllable-rate envelope around 4 Hz, gated to create pauses
            let envelope = (2.0 * PI * 4.0 * t).sin().max(0.0);
            let voiced = (2.0 * PI * 140.0 * t).sin()
                + 0.5 * (2.0 * PI * 280.0 * t).sin()
                + 0.25 * (2.0 * PI * 560.0 * t).sin();
            amplitude * envelope * voiced / 1.75
        })
        .collect()
}

/// Encode normalized samples as raw bytes in the given class.
///
/// Integer formats are scaled to 60 % of full scale and unsigned formats
/// are offset to their mid-point bias; float formats are stored unscaled.
pub fn encode(samples: &[f64], class: FormatClass) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * class.format.width());
    for &sample in samples {
        push_sample(&mut bytes, sample, class);
    }
    bytes
}

fn push_sample(out: &mut Vec<u8>, sample: f64, class: FormatClass) {
    let s = sample.clamp(-1.0, 1.0) * TONE_LEVEL;
    let le = class.endian == Endianness::Little;

    match class.format {
        SampleFormat::Int8 => {
            out.push(((s * i8::MAX as f64).round() as i8) as u8);
        }
        SampleFormat::Uint8 => {
            out.push((128.0 + s * i8::MAX as f64).round() as u8);
        }
        SampleFormat::Int16 => {
            extend_ordered(out, le, ((s * i16::MAX as f64).round() as i16).to_le_bytes());
        }
        SampleFormat::Uint16 => {
            extend_ordered(
                out,
                le,
                ((32768.0 + s * i16::MAX as f64).round() as u16).to_le_bytes(),
            );
        }
        SampleFormat::Int32 => {
            extend_ordered(out, le, ((s * i32::MAX as f64).round() as i32).to_le_bytes());
        }
        SampleFormat::Uint32 => {
            extend_ordered(
                out,
                le,
                ((2147483648.0 + s * i32::MAX as f64).round() as u32).to_le_bytes(),
            );
        }
        SampleFormat::Float32 => {
            // Floats carry the sample unscaled
            extend_ordered(out, le, (sample.clamp(-1.0, 1.0) as f32).to_le_bytes());
        }
        SampleFormat::Float64 => {
            extend_ordered(out, le, sample.clamp(-1.0, 1.0).to_le_bytes());
        }
    }
}

/// Append little-endian sample bytes, reversed for big-endian targets
fn extend_ordered<const N: usize>(out: &mut Vec<u8>, le: bool, bytes: [u8; N]) {
    if le {
        out.extend_from_slice(&bytes);
    } else {
        let mut swapped = bytes;
        swapped.reverse();
        out.extend_from_slice(&swapped);
    }
}

/// Write encoded bytes to `path`, preceded by `prefix_zeros` silence bytes
pub fn write_raw_file<P: AsRef<Path>>(path: P, prefix_zeros: usize, bytes: &[u8]) -> io::Result<()> {
    let mut data = vec![0u8; prefix_zeros];
    data.extend_from_slice(bytes);
    fs::write(path, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_is_bounded_and_periodic() {
        let rate = 44100;
        let signal = sine(100.0, rate, 1.0, rate as usize);

        assert!(signal.iter().all(|s| s.abs() <= 1.0));
        // 100 Hz at 44.1 kHz repeats every 441 samples
        assert!((signal[0] - signal[441]).abs() < 1e-9);
    }

    #[test]
    fn test_two_tone_stereo_interleaving() {
        let samples = two_tone_stereo(1000.0, 2000.0, 44100, 0.9, 128);
        assert_eq!(samples.len(), 256);
        // Both channels start at a zero crossing
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[1], 0.0);
    }

    #[test]
    fn test_lowpass_noise_is_deterministic() {
        let a = lowpass_noise(42, 8, 1000);
        let b = lowpass_noise(42, 8, 1000);
        assert_eq!(a, b);

        let c = lowpass_noise(43, 8, 1000);
        assert_ne!(a, c);
    }

    #[test]
    fn test_encode_widths() {
        let samples = [0.0, 0.5, -0.5];
        for format in [
            SampleFormat::Int8,
            SampleFormat::Uint8,
            SampleFormat::Int16,
            SampleFormat::Uint16,
            SampleFormat::Int32,
            SampleFormat::Uint32,
            SampleFormat::Float32,
            SampleFormat::Float64,
        ] {
            let class = FormatClass::new(format, Endianness::Little);
            let bytes = encode(&samples, class);
            assert_eq!(bytes.len(), samples.len() * format.width());
        }
    }

    #[test]
    fn test_encode_unsigned_bias() {
        let class = FormatClass::new(SampleFormat::Uint8, Endianness::Little);
        let bytes = encode(&[0.0], class);
        assert_eq!(bytes, vec![128]);
    }

    #[test]
    fn test_encode_endianness_mirrors_bytes() {
        let le = encode(&[0.5], FormatClass::new(SampleFormat::Int16, Endianness::Little));
        let be = encode(&[0.5], FormatClass::new(SampleFormat::Int16, Endianness::Big));
        assert_eq!(le[0], be[1]);
        assert_eq!(le[1], be[0]);
        assert_ne!(le, be);
    }

    #[test]
    fn test_float_encoding_roundtrips() {
        let class = FormatClass::new(SampleFormat::Float32, Endianness::Little);
        let bytes = encode(&[0.25], class);
        assert_eq!(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), 0.25);
    }
}
