use std::fmt;

/// Exponents beyond this are printed in scientific form rather than
/// padded with zeros.
const MAX_PLAIN_EXPONENT: usize = 64;

/// A borrowed arbitrary-precision decimal: `unscaled × 10^(-scale)`.
///
/// `unscaled` is the big-endian two's-complement magnitude exactly as it
/// sits in the value's payload. Nothing is parsed until asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decimal<'a> {
    scale: i32,
    unscaled: &'a [u8],
}

impl<'a> Decimal<'a> {
    pub fn new(scale: i32, unscaled: &'a [u8]) -> Self {
        Self { scale, unscaled }
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// The unscaled varint bytes, borrowed from the payload.
    pub fn unscaled(&self) -> &'a [u8] {
        self.unscaled
    }

    /// The unscaled value as an `i128`, if it fits.
    pub fn unscaled_i128(&self) -> Option<i128> {
        varint_to_i128(self.unscaled)
    }
}

impl fmt::Display for Decimal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = varint_to_string(self.unscaled);
        let (sign, digits) = match digits.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", digits.as_str()),
        };
        let exponent = self.scale.unsigned_abs() as usize;

        if self.scale <= 0 {
            if digits == "0" {
                return f.write_str("0");
            }
            if exponent > MAX_PLAIN_EXPONENT {
                return write!(f, "{sign}{digits}E+{exponent}");
            }
            return write!(f, "{sign}{digits}{}", "0".repeat(exponent));
        }

        if exponent > digits.len() + MAX_PLAIN_EXPONENT {
            return write!(f, "{sign}{digits}E-{exponent}");
        }
        if exponent >= digits.len() {
            let zeros = "0".repeat(exponent - digits.len());
            return write!(f, "{sign}0.{zeros}{digits}");
        }
        let (whole, frac) = digits.split_at(digits.len() - exponent);
        write!(f, "{sign}{whole}.{frac}")
    }
}

/// Interpret big-endian two's-complement bytes as an `i128`.
///
/// Empty input is zero. Returns `None` when the value needs more than
/// 16 bytes.
pub fn varint_to_i128(bytes: &[u8]) -> Option<i128> {
    let Some(&first) = bytes.first() else {
        return Some(0);
    };
    if bytes.len() > 16 {
        return None;
    }
    let fill = if first & 0x80 == 0 { 0x00 } else { 0xFF };
    let mut buf = [fill; 16];
    buf[16 - bytes.len()..].copy_from_slice(bytes);
    Some(i128::from_be_bytes(buf))
}

/// Render big-endian two's-complement bytes of any length in base 10.
///
/// Used for `varint` values and the unscaled part of decimals, which have
/// no width limit.
pub fn varint_to_string(bytes: &[u8]) -> String {
    if let Some(small) = varint_to_i128(bytes) {
        return small.to_string();
    }

    let negative = bytes[0] & 0x80 != 0;
    let mut magnitude = bytes.to_vec();
    if negative {
        // Two's complement negate: invert, then add one from the low end.
        for b in &mut magnitude {
            *b = !*b;
        }
        for b in magnitude.iter_mut().rev() {
            let (sum, carry) = b.overflowing_add(1);
            *b = sum;
            if !carry {
                break;
            }
        }
    }

    // Schoolbook long division by 10, most significant byte first.
    let mut digits = Vec::new();
    while magnitude.iter().any(|&b| b != 0) {
        let mut rem = 0u32;
        for b in &mut magnitude {
            let cur = (rem << 8) | u32::from(*b);
            *b = (cur / 10) as u8;
            rem = cur % 10;
        }
        digits.push(b'0' + rem as u8);
    }

    let mut out = String::with_capacity(digits.len() + 1);
    if negative {
        out.push('-');
    }
    out.extend(digits.iter().rev().map(|&d| char::from(d)));
    out
}
