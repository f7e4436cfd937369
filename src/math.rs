use std::{cmp, f64::consts::PI};

/// Relative tolerance of [approx_eq]. Coordinates that went through a couple of
/// transforms (projection, rotation, rescaling) differ from their "true" value
/// by a few ulps; anything within this band compares equal.
pub const EPSILON: f64 = 1e-9;

/// Absolute floor for [approx_eq], so values around zero do not need to match bit for bit
pub const EPSILON_ABS: f64 = 1e-12;

#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= EPSILON_ABS || diff <= EPSILON * a.abs().max(b.abs())
}

/// Total order on `f64` which treats [approx_eq] values as equal and orders NaN last
#[inline]
pub fn approx_cmp(a: f64, b: f64) -> cmp::Ordering {
    if approx_eq(a, b) {
        cmp::Ordering::Equal
    } else {
        a.partial_cmp(&b).unwrap_or_else(|| {
            match (a.is_nan(), b.is_nan()) {
                (true, false) => cmp::Ordering::Greater,
                (false, true) => cmp::Ordering::Less,
                _ => cmp::Ordering::Equal,
            }
        })
    }
}

/// Maps an angle into `[0, 2π)`
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle % (2.0 * PI);
    if a < 0.0 {
        a + 2.0 * PI
    } else {
        a
    }
}

/// `n + ln(n)`, the per-node weight of the tree split cost. Zero for empty ranges.
#[inline]
pub fn count_weight(n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        let nf = n as f64;
        nf + nf.ln()
    }
}

/// Smallest power of ten exponent `k` such that `extent * 10^k` has at most `digits` integer digits
pub fn decimal_exponent(extent: f64, digits: u32) -> i32 {
    debug_assert!(extent > 0.0);
    let magnitude = extent.log10().floor() as i32 + 1;
    digits as i32 - magnitude
}
