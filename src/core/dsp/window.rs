// src/core/dsp/window.rs
//
// Prototype window, dither equalizer mask, and the polyphase fold that
// decimates integrated windows before spectral measurement.

use std::f32::consts::PI;

use super::stats::add_assign;

/// Sinc lobe spanning two periods across the buffer, tapered by a Hann
/// window to push the sidelobes further down.
///
/// The sinc argument hits zero at the midpoint of odd-length windows; the
/// limit value 1 is substituted there.
pub fn sinc_window(len: usize) -> Vec<f32> {
    let m = (len - 1) as f32;
    (0..len)
        .map(|n| {
            let x = ((4.0 * PI) / m) * n as f32 - 2.0 * PI;
            let sinc = if x.abs() < f32::EPSILON { 1.0 } else { x.sin() / x };
            sinc * 0.5 * (1.0 - ((2.0 * PI * n as f32) / m).cos())
        })
        .collect()
}

/// Piecewise-linear attenuation mask over normalized frequency, mirrored
/// about the spectrum midpoint.
///
/// Flat at 1 below `f1`, ramping down to the linear equivalent of
/// `-atten_db` between `f1` and `f2`, flat above `f2`. This knocks down the
/// band where audio-editor dither noise concentrates, so quantization noise
/// cannot masquerade as a low-pass signal shape.
pub fn equalizer_mask(len: usize, f1: f32, f2: f32, atten_db: f32) -> Vec<f32> {
    let mut mask = vec![1.0f32; len];
    let a = 10.0f32.powf(-atten_db / 20.0);
    let slope = (a - 1.0) / (f2 - f1);

    for n in 0..len / 2 {
        let f = n as f32 / len as f32;

        mask[n] = if f < f1 {
            1.0
        } else if f < f2 {
            slope * (f - f1) + 1.0
        } else {
            a
        };

        // Mirror to the second half of the spectrum
        mask[len - n - 1] = mask[n];
    }

    mask
}

/// Multiply `x` by the prototype window in place, then sum its `p`
/// consecutive sub-blocks into `y`, decimating by `p`.
///
/// The fold carries no `1/p` normalization; absolute power levels shift by
/// `p^2` but the classifier only consumes power ratios.
pub fn polyphase_fold(x: &mut [f32], y: &mut [f32], win: &[f32], p: usize) {
    let outlen = x.len() / p;

    for (xs, &w) in x.iter_mut().zip(win.iter()) {
        *xs *= w;
    }

    let out = &mut y[..outlen];
    out.fill(0.0);
    for block in 0..p {
        add_assign(out, &x[block * outlen..(block + 1) * outlen]);
    }
}
