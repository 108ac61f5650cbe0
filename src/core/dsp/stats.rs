// src/core/dsp/stats.rs
//
// Small numeric kernels shared by the preprocessing chain.

/// Arithmetic mean
pub fn mean(data: &[f32]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f32>() / data.len() as f32
}

/// L2 norm: the square root of the sum of squares, with no division by the
/// length. The band-power thresholds downstream are tuned against this
/// scale, so it must not be replaced by a true root-mean-square.
pub fn l2_norm(data: &[f32]) -> f32 {
    data.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Index and value of the largest element.
///
/// NaN entries never win the comparison, so a degenerate candidate cannot
/// be selected over a finite one. An empty or all-NaN slice yields index 0.
pub fn argmax(data: &[f32]) -> (usize, f32) {
    let mut max = f32::MIN;
    let mut idx = 0usize;
    for (n, &v) in data.iter().enumerate() {
        if v > max {
            max = v;
            idx = n;
        }
    }
    (idx, max)
}

/// Element-wise in-place addition of `other` into `acc`
pub fn add_assign(acc: &mut [f32], other: &[f32]) {
    for (a, b) in acc.iter_mut().zip(other.iter()) {
        *a += b;
    }
}

/// Subtract a scalar from every element
pub fn sub_scalar(data: &mut [f32], value: f32) {
    for x in data.iter_mut() {
        *x -= value;
    }
}

/// Divide every element by a scalar
pub fn div_scalar(data: &mut [f32], value: f32) {
    for x in data.iter_mut() {
        *x /= value;
    }
}
