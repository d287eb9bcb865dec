//! Core operations for the forward pass.

use rayon::prelude::*;

/// Matrix-vector multiplication: xout = x @ w.T (w is row-major flattened).
#[inline]
pub fn matmul(xout: &mut [f32], x: &[f32], w: &[f32]) {
    let in_dim = x.len();
    let out_dim = xout.len();
    for i in 0..out_dim {
        let off = i * in_dim;
        let mut val = 0.0f32;
        for j in 0..in_dim {
            val += w[off + j] * x[j];
        }
        xout[i] = val;
    }
}

/// Matrix-vector multiplication parallelized over output rows. Used for the
/// vocabulary-sized output projection, where out_dim dominates.
#[inline]
pub fn matmul_par(xout: &mut [f32], x: &[f32], w: &[f32]) {
    let in_dim = x.len();
    xout.par_iter_mut().enumerate().for_each(|(i, out)| {
        let off = i * in_dim;
        let mut val = 0.0f32;
        for j in 0..in_dim {
            val += w[off + j] * x[j];
        }
        *out = val;
    });
}

/// Element-wise accumulation: a += b. Used to apply bias vectors.
#[inline]
pub fn accum(a: &mut [f32], b: &[f32]) {
    for (ai, bi) in a.iter_mut().zip(b.iter()) {
        *ai += *bi;
    }
}

/// Tanh activation in-place.
#[inline]
pub fn tanh_inplace(x: &mut [f32]) {
    for xi in x.iter_mut() {
        *xi = xi.tanh();
    }
}

/// Softmax in-place.
#[inline]
pub fn softmax(x: &mut [f32]) {
    if x.is_empty() {
        return;
    }
    let max_val = x.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0f32;
    for xi in x.iter_mut() {
        *xi = (*xi - max_val).exp();
        sum += *xi;
    }
    for xi in x.iter_mut() {
        *xi /= sum;
    }
}

/// Returns the index of the maximum element; the first maximum wins on ties,
/// so greedy decoding stays deterministic. Returns 0 for an empty slice.
#[inline]
pub fn argmax(x: &[f32]) -> usize {
    let mut max_idx = 0;
    let mut max_val = f32::NEG_INFINITY;
    for (i, &v) in x.iter().enumerate() {
        if v > max_val {
            max_val = v;
            max_idx = i;
        }
    }
    max_idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_is_a_distribution() {
        let mut x = vec![1.0, 2.0, 3.0, 4.0];
        softmax(&mut x);
        let sum: f32 = x.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        // monotone: larger logits keep larger probabilities
        assert!(x[3] > x[2] && x[2] > x[1] && x[1] > x[0]);
    }

    #[test]
    fn argmax_first_max_wins() {
        assert_eq!(argmax(&[0.1, 0.5, 0.5, 0.2]), 1);
        assert_eq!(argmax(&[0.9]), 0);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn matmul_variants_agree() {
        // 3x2 weight, row-major
        let w = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let x = [1.0, -1.0];
        let mut serial = [0.0f32; 3];
        let mut parallel = [0.0f32; 3];
        matmul(&mut serial, &x, &w);
        matmul_par(&mut parallel, &x, &w);
        assert_eq!(serial, [-1.0, -1.0, -1.0]);
        assert_eq!(serial, parallel);
    }
}
