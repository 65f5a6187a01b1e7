/*

    Declare numeric types used throughout this repo, and the
    textual number formatting expected by the constraint files.

    WARNING: Offsets and normals are written with C++ iostream
    default formatting (%g with a given precision), so do not
    replace fmt_stream_float with Rust's Display.

    @date: 18 Oct, 2026
*/

use bevy_math::DVec3;
pub type Float = f64; // WARNING: If you want to change it to f32, don't forget to update Vector3
pub type Vector3 = DVec3;

/// Default iostream precision (significant digits)
pub const STREAM_PRECISION: usize = 6;

pub fn approx_zero(x: Float) -> bool {
    x.abs() < 1e-8
}

pub fn approx_eq(a: Float, b: Float, eps: Float) -> bool {
    // Relative for large magnitudes, absolute near zero
    (a - b).abs() <= eps * a.abs().max(b.abs()).max(1.0)
}

/// Format a float the way `std::ostream << double` does with the
/// given precision: shortest of fixed/scientific (%g), trailing zeros
/// removed, signed zero kept.
pub fn fmt_stream_float(x: Float, precision: usize) -> String {
    if x.is_nan() {
        return String::from("nan");
    }
    if x.is_infinite() {
        return if x > 0.0 { String::from("inf") } else { String::from("-inf") };
    }
    if x == 0.0 {
        return if x.is_sign_negative() { String::from("-0") } else { String::from("0") };
    }

    // %g treats precision 0 as 1
    let precision = precision.max(1);

    // Let the scientific formatter do the rounding, then read back the exponent
    let sci = format!("{:.*e}", precision - 1, x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= precision as i32 {
        let mantissa = strip_trailing_zeros(mantissa);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        let fixed = format!("{:.*}", decimals, x);
        strip_trailing_zeros(&fixed).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}
