//! G-code command model
//!
//! Every machine instruction a generator can emit is a case of [`Command`].
//! Commands render themselves to a single line of text, optionally followed
//! by a `;` comment. A toolpath is an ordered list of [`ToolpathLine`]s,
//! which adds free-standing comment lines and blank separators to commands.

mod command;

pub use command::{Command, FeedMove, GcodeInstruction, RapidMove, ToolpathLine};

/// Decimal places used for every Y word of a motion command.
pub const Y_PRECISION: usize = 4;

/// Decimal places kept before a value is rendered in its shortest form.
const NATURAL_PRECISION: i32 = 6;

/// Format a value in its natural decimal representation.
///
/// Integral values print without a fractional part (`5`, `8000`) and
/// fractional values print in their shortest form (`1.5`, `-0.2`).
/// The value is rounded to six decimal places first so that binary
/// floating point noise does not leak into the program text.
pub fn format_natural(value: f64) -> String {
    let multiplier = 10_f64.powi(NATURAL_PRECISION);
    let rounded = (value * multiplier).round() / multiplier;
    let rounded = if rounded.is_finite() { rounded } else { value };

    // Avoid emitting "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Decimal places a value is cut to before it is rounded for fixed output.
const GUARD_PRECISION: usize = 9;

/// Format a value with a fixed number of decimal places.
///
/// The value is first written out to nine decimals, which settles binary
/// floating point noise on the decimal the caller meant. That decimal is
/// then rounded half-to-even, so `5.87375` prints as `5.8738` and
/// `3.01625` as `3.0162`.
pub fn format_fixed(value: f64, precision: usize) -> String {
    if !value.is_finite() || precision >= GUARD_PRECISION {
        return format!("{:.prec$}", value, prec = precision);
    }

    let guarded = format!("{:.prec$}", value.abs(), prec = GUARD_PRECISION);
    let Some((whole, fraction)) = guarded.split_once('.') else {
        return format!("{:.prec$}", value, prec = precision);
    };
    let (kept, dropped) = fraction.split_at(precision);

    let mut digits: Vec<u8> = whole.bytes().chain(kept.bytes()).map(|b| b - b'0').collect();
    let round_up = match dropped.as_bytes().split_first() {
        Some((b'5', rest)) if rest.iter().all(|&b| b == b'0') => {
            digits.last().is_some_and(|d| d % 2 == 1)
        }
        Some((&first, _)) => first >= b'5',
        None => false,
    };

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let split = digits.len() - precision;
    let mut text = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        text.push('-');
    }
    text.extend(digits[..split].iter().map(|d| char::from(b'0' + d)));
    if precision > 0 {
        text.push('.');
        text.extend(digits[split..].iter().map(|d| char::from(b'0' + d)));
    }
    text
}
