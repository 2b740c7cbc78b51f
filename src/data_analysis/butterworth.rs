// src/data_analysis/butterworth.rs

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::FilterDesignError;

// The digital design assumes a sample rate of 2 so that cutoffs are normalized to Nyquist.
const DESIGN_FS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    LowPass,
    HighPass,
}

/// Transfer function coefficients, `a[0] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

/// Designs a digital Butterworth filter.
///
/// Poles of the analog prototype are scaled to the pre-warped cutoff, mapped to the
/// z-plane with the bilinear transform and expanded into polynomial coefficients.
/// `cutoff` is normalized to the Nyquist frequency.
pub fn butter(
    order: usize,
    cutoff: f64,
    kind: FilterKind,
) -> Result<FilterCoefficients, FilterDesignError> {
    if order == 0 {
        return Err(FilterDesignError::ZeroOrder);
    }
    if !(cutoff > 0.0 && cutoff < 1.0) {
        return Err(FilterDesignError::InvalidCutoff(cutoff));
    }

    // Analog prototype: poles on the unit circle in the left half-plane, no zeros.
    let n = order as i64;
    let prototype_poles: Vec<Complex64> = (0..order)
        .map(|i| {
            let m = (-n + 1 + 2 * i as i64) as f64;
            -Complex64::from_polar(1.0, PI * m / (2.0 * order as f64))
        })
        .collect();

    let warped = 2.0 * DESIGN_FS * (PI * cutoff / DESIGN_FS).tan();

    let (zeros, poles, gain) = match kind {
        FilterKind::LowPass => {
            let poles: Vec<Complex64> = prototype_poles.iter().map(|p| *p * warped).collect();
            (Vec::new(), poles, warped.powi(order as i32))
        }
        FilterKind::HighPass => {
            let neg_prod: Complex64 = prototype_poles.iter().map(|p| -*p).product();
            let poles: Vec<Complex64> = prototype_poles.iter().map(|p| warped / *p).collect();
            (vec![Complex64::new(0.0, 0.0); order], poles, (1.0 / neg_prod).re)
        }
    };

    let (zeros, poles, gain) = bilinear_zpk(&zeros, &poles, gain);

    let b = poly(&zeros).iter().map(|c| c.re * gain).collect();
    let a = poly(&poles).iter().map(|c| c.re).collect();
    Ok(FilterCoefficients { b, a })
}

/// Maps analog zeros/poles/gain to the z-plane. Zeros at infinity land on z = -1.
fn bilinear_zpk(
    zeros: &[Complex64],
    poles: &[Complex64],
    gain: f64,
) -> (Vec<Complex64>, Vec<Complex64>, f64) {
    let fs2 = 2.0 * DESIGN_FS;
    let to_z = |s: &Complex64| (fs2 + *s) / (fs2 - *s);

    let mut z_zeros: Vec<Complex64> = zeros.iter().map(to_z).collect();
    z_zeros.resize(poles.len().max(zeros.len()), Complex64::new(-1.0, 0.0));
    let z_poles = poles.iter().map(to_z).collect();

    let num: Complex64 = zeros.iter().map(|z| fs2 - *z).product();
    let den: Complex64 = poles.iter().map(|p| fs2 - *p).product();
    (z_zeros, z_poles, gain * (num / den).re)
}

/// Expands roots into monic polynomial coefficients, highest power first.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for root in roots {
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (i, c) in coeffs.iter().enumerate() {
            next[i] += *c;
            next[i + 1] -= *c * *root;
        }
        coeffs = next;
    }
    coeffs
}

/// Pads `b` and `a` to a common length and normalizes so that `a[0] == 1`.
fn normalized(coeffs: &FilterCoefficients) -> (Vec<f64>, Vec<f64>) {
    let len = coeffs.a.len().max(coeffs.b.len());
    let a0 = coeffs.a.first().copied().unwrap_or(1.0);
    let mut b: Vec<f64> = coeffs.b.iter().map(|v| v / a0).collect();
    let mut a: Vec<f64> = coeffs.a.iter().map(|v| v / a0).collect();
    b.resize(len, 0.0);
    a.resize(len, 0.0);
    (b, a)
}

/// Initial state of the transposed direct form II filter that corresponds to the
/// steady state of a unit step input.
pub fn lfilter_zi(coeffs: &FilterCoefficients) -> Vec<f64> {
    let (b, a) = normalized(coeffs);
    let n = a.len();
    if n < 2 {
        return Vec::new();
    }
    let dc_gain = b.iter().sum::<f64>() / a.iter().sum::<f64>();

    let mut zi = vec![0.0; n - 1];
    let mut acc = 0.0;
    for k in (0..n - 1).rev() {
        acc += b[k + 1] - a[k + 1] * dc_gain;
        zi[k] = acc;
    }
    zi
}

/// Filters `x` with a transposed direct form II structure starting from state `zi`.
pub fn lfilter(coeffs: &FilterCoefficients, x: &[f64], zi: &[f64]) -> Vec<f64> {
    let (b, a) = normalized(coeffs);
    let n = a.len();
    if n < 2 {
        let gain = b.first().copied().unwrap_or(0.0);
        return x.iter().map(|v| v * gain).collect();
    }

    let mut state = vec![0.0; n - 1];
    for (s, z) in state.iter_mut().zip(zi.iter()) {
        *s = *z;
    }

    let mut y = Vec::with_capacity(x.len());
    for &xi in x {
        let yi = b[0] * xi + state[0];
        for k in 0..n - 2 {
            state[k] = b[k + 1] * xi + state[k + 1] - a[k + 1] * yi;
        }
        state[n - 2] = b[n - 1] * xi - a[n - 1] * yi;
        y.push(yi);
    }
    y
}

/// Runs the filter with its state primed to the steady state of the first sample,
/// which avoids the start-up transient of a zero initial state.
pub fn filter_with_initial_steady_state(coeffs: &FilterCoefficients, x: &[f64]) -> Vec<f64> {
    let Some(&first) = x.first() else {
        return Vec::new();
    };
    let zi: Vec<f64> = lfilter_zi(coeffs).iter().map(|z| z * first).collect();
    lfilter(coeffs, x, &zi)
}


// src/data_analysis/butterworth.rs
