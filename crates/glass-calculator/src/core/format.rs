//! Number parsing and formatting
//!
//! Two formatting rules exist. [`NumberFormat::format`] canonicalizes
//! computed values (results, toggled signs, percentages) and rounds to six
//! fractional digits. [`NumberFormat::format_display`] is applied only when
//! the display is drawn: it keeps whatever the user typed, including an
//! unterminated decimal point, and only rounds beyond eight digits.

use serde::{Deserialize, Serialize};

/// Formatting thresholds shared by the state machine and the display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Maximum fractional digits kept in computed values
    pub result_precision: usize,
    /// Maximum fractional digits shown on screen before rounding
    pub display_precision: usize,
    /// Magnitude at which values switch to exponential notation
    pub exponential_threshold: f64,
    /// Fractional digits of the exponential mantissa
    pub exponential_digits: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            result_precision: Self::DEFAULT_RESULT_PRECISION,
            display_precision: Self::DEFAULT_DISPLAY_PRECISION,
            exponential_threshold: Self::DEFAULT_EXPONENTIAL_THRESHOLD,
            exponential_digits: Self::DEFAULT_EXPONENTIAL_DIGITS,
        }
    }
}

impl NumberFormat {
    /// Default fractional digits for computed values
    pub const DEFAULT_RESULT_PRECISION: usize = 6;
    /// Default fractional digits for the on-screen display
    pub const DEFAULT_DISPLAY_PRECISION: usize = 8;
    /// Default magnitude for exponential notation
    pub const DEFAULT_EXPONENTIAL_THRESHOLD: f64 = 1e9;
    /// Default mantissa digits in exponential notation
    pub const DEFAULT_EXPONENTIAL_DIGITS: usize = 4;

    /// Formats a computed value into its canonical display string
    #[must_use]
    pub fn format(&self, n: f64) -> String {
        if !n.is_finite() {
            return "0".to_string();
        }
        if n.abs() >= self.exponential_threshold {
            return to_exponential(n, self.exponential_digits);
        }

        let plain = shortest(n);
        match plain.split_once('.') {
            Some((_, fraction)) if fraction.len() > self.result_precision => {
                strip_trailing_zeros(&to_fixed(n, self.result_precision))
            }
            _ => plain,
        }
    }

    /// Formats the stored display string for rendering
    ///
    /// Unparseable text renders as `"0"`; the stored string is untouched.
    #[must_use]
    pub fn format_display(&self, text: &str) -> String {
        let Some(n) = parse_number(text) else {
            return "0".to_string();
        };

        // Mid-entry: keep the dangling decimal point the user just typed
        if text.ends_with('.') {
            return text.to_string();
        }

        if n.abs() >= self.exponential_threshold {
            return to_exponential(n, self.exponential_digits);
        }

        match text.split_once('.') {
            Some((_, fraction)) if fraction.len() > self.display_precision => {
                strip_trailing_zeros(&to_fixed(n, self.display_precision))
            }
            _ => text.to_string(),
        }
    }
}

/// Formats a computed value with the default thresholds
#[must_use]
pub fn format_number(n: f64) -> String {
    NumberFormat::default().format(n)
}

/// Formats a display string with the default thresholds
#[must_use]
pub fn format_display(text: &str) -> String {
    NumberFormat::default().format_display(text)
}

/// Parses the longest numeric prefix of `text`
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Trailing garbage is ignored, so `"5."` parses as `5`
/// and `"1.2e+9x"` as `1.2e9`. Returns `None` when no digits lead the text
/// or the value is not finite.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let bytes = text.trim_start().as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &bytes[int_start..pos];

    let mut frac_digits: &[u8] = &[];
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &bytes[frac_start..end];
        pos = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent: &[u8] = &[];
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut end = pos + 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exponent = &bytes[pos + 1..end];
        }
    }

    let mut normalized = String::with_capacity(pos + 4);
    if negative {
        normalized.push('-');
    }
    if int_digits.is_empty() {
        normalized.push('0');
    } else {
        normalized.push_str(std::str::from_utf8(int_digits).ok()?);
    }
    if !frac_digits.is_empty() {
        normalized.push('.');
        normalized.push_str(std::str::from_utf8(frac_digits).ok()?);
    }
    if !exponent.is_empty() {
        normalized.push('e');
        normalized.push_str(std::str::from_utf8(exponent).ok()?);
    }

    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Shortest round-trip decimal, with negative zero printed as `"0"`
fn shortest(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{n}")
}

/// Fixed-point notation with `prec` fractional digits
///
/// Exact ties round away from zero (`0.0078125` → `"0.007813"`); all other
/// values round to nearest.
fn to_fixed(n: f64, prec: usize) -> String {
    // Every finite f64 has an exact decimal expansion within 1074 fractional digits
    let exact = format!("{:.1074}", n.abs());
    let Some((int, frac)) = exact.split_once('.') else {
        return format!("{n:.prec$}");
    };
    if prec >= frac.len() {
        return format!("{n:.prec$}");
    }
    let (kept, rest) = frac.split_at(prec);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{n:.prec$}");
    }

    let mut digits: Vec<u8> = int.bytes().chain(kept.bytes()).collect();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let int_len = digits.len() - prec;
    let mut fixed = String::with_capacity(digits.len() + 2);
    if n.is_sign_negative() {
        fixed.push('-');
    }
    fixed.extend(digits[..int_len].iter().map(|&b| char::from(b)));
    if prec > 0 {
        fixed.push('.');
        fixed.extend(digits[int_len..].iter().map(|&b| char::from(b)));
    }
    fixed
}

/// Exponential notation with an explicit exponent sign (`1.2346e+9`)
fn to_exponential(n: f64, digits: usize) -> String {
    let raw = format!("{n:.digits$e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
        None => raw,
    }
}

/// Removes trailing fractional zeros and a dangling decimal point
fn strip_trailing_zeros(fixed: &str) -> String {
    if !fixed.contains('.') {
        return fixed.to_string();
    }
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
