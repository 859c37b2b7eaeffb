//! Standard normal distribution functions.
//!
//! This module provides:
//! - `erf_approx`: Rational-exponential approximation of the error function
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! Every price, Greek and solver tolerance in this crate is calibrated against
//! this particular approximation (absolute CDF error ≲ 1e-7), so the
//! coefficients and evaluation order are fixed.

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Coefficients a1..a10 of the exponent polynomial in t.
///
/// Numerical Recipes in Fortran 77 (2nd ed.), section 6.2, `erfcc`.
const ERF_COEFFICIENTS: [f64; 10] = [
    -1.265_512_23,
    1.000_023_68,
    0.374_091_96,
    0.096_784_18,
    -0.186_288_06,
    0.278_868_07,
    -1.135_203_98,
    1.488_515_87,
    -0.822_152_23,
    0.170_872_77,
];

/// τ(x) = t·exp(−x² + a1 + a2·t + … + a10·t⁹), with t = 1/(1 + |x|/2).
///
/// Terms are summed left to right and each tⁱ is an independent `powf`,
/// not a running product.
#[inline]
fn tau<T: Float>(x: T) -> T {
    let one = T::one();
    let half = T::from(0.5).unwrap();

    let t = one / (one + half * x.abs());

    let mut exponent = -(x * x) + T::from(ERF_COEFFICIENTS[0]).unwrap();
    for (i, &a) in ERF_COEFFICIENTS.iter().enumerate().skip(1) {
        exponent = exponent + T::from(a).unwrap() * t.powf(T::from(i).unwrap());
    }

    t * exponent.exp()
}

/// Error function approximation.
///
/// Odd-symmetric: `erf(x) = 1 − τ(x)` for `x ≥ 0` and `τ(x) − 1` for `x < 0`.
///
/// # Examples
/// ```
/// use optoprice_models::analytical::distributions::erf_approx;
///
/// assert!(erf_approx(0.0_f64).abs() < 1e-7);
/// assert!((erf_approx(1.0_f64) - 0.8427007929).abs() < 1e-7);
/// assert!((erf_approx(-1.0_f64) + erf_approx(1.0_f64)).abs() < 1e-15);
/// ```
#[inline]
pub fn erf_approx<T: Float>(x: T) -> T {
    if x < T::zero() {
        tau(x) - T::one()
    } else {
        T::one() - tau(x)
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= z) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// N(z) = (1 + erf(z / √2)) / 2
///
/// # Arguments
/// * `z` - Input value
///
/// # Returns
/// The probability P(X <= z) for standard normal X, in range [0, 1].
///
/// # Examples
/// ```
/// use optoprice_models::analytical::distributions::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0_f64);
/// assert!((cdf_0 - 0.5).abs() < 1e-7);
///
/// let cdf_neg = norm_cdf(-3.0_f64);
/// assert!(cdf_neg < 0.01);
///
/// let cdf_pos = norm_cdf(3.0_f64);
/// assert!(cdf_pos > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(z: T) -> T {
    let one = T::one();
    let two = T::from(2.0).unwrap();
    let sqrt_2 = T::from(SQRT_2).unwrap();

    (one + erf_approx(z / sqrt_2)) / two
}

/// Standard normal probability density function.
///
/// # Mathematical Definition
/// φ(x) = exp(−x² / 2) / √(2π)
///
/// # Examples
/// ```
/// use optoprice_models::analytical::distributions::norm_pdf;
///
/// // φ(0) = 1 / sqrt(2π) ≈ 0.3989
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
///
/// // φ(1) = exp(-0.5) / sqrt(2π) ≈ 0.2420
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();

    frac_1_sqrt_2pi * (-half * x * x).exp()
}
