//! Fixed-width registers.
//!
//! A [`Register`] is a fixed-length bit string, the unit every engine step
//! reads and writes. Its width never changes implicitly: arithmetic keeps the
//! width of its primary operand, and the only width changes are the explicit
//! [`Register::zero_extend`], [`Register::concat`] and [`Register::split`]
//! used around operand loading and shifts.
//!
//! # Bit Order
//!
//! Bits are indexed the way they are written: index 0 is the most significant
//! (sign) bit, index `width - 1` is the least significant bit.
//!
//! ```text
//! "1011"   bit(0) = 1 (sign)   bit(3) = 1 (lsb)
//! ```
//!
//! # Example
//!
//! ```
//! use regtrace::register::Register;
//!
//! let q: Register = "0111".parse().unwrap();
//! assert_eq!(q.width(), 4);
//! assert!(q.lsb());
//! assert!(!q.msb());
//! assert_eq!(q.to_string(), "0111");
//! ```

use core::fmt;
use core::str::FromStr;

use crate::arith;
use crate::error::OperandError;


/// Widest register the storage word can hold.
pub const MAX_WIDTH: u8 = 16;

/// A fixed-width two's-complement register.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    value: u16,
    width: u8,
}

impl Register {
    /// All-zero register of `width` bits.
    ///
    /// # Panics
    ///
    /// Panics if `width` is 0 or greater than [`MAX_WIDTH`].
    #[inline]
    #[must_use]
    pub const fn zero(width: u8) -> Self {
        Self::new(0, width)
    }

    /// Register of `width` bits holding the low bits of `value`.
    ///
    /// Bits above `width` are discarded, which is the register's modular
    /// wraparound.
    ///
    /// # Panics
    ///
    /// Panics if `width` is 0 or greater than [`MAX_WIDTH`].
    #[inline]
    #[must_use]
    pub const fn new(value: u16, width: u8) -> Self {
        assert!(width >= 1 && width <= MAX_WIDTH, "register width out of range");
        Self {
            value: value & Self::mask_for(width),
            width,
        }
    }

    /// Parses a bit string whose length must be exactly `width`.
    ///
    /// # Errors
    ///
    /// [`OperandError::Width`] when the length differs, plus every error of
    /// [`Register::parse_bits`].
    ///
    /// ```
    /// use regtrace::register::Register;
    /// use regtrace::OperandError;
    ///
    /// assert!(Register::from_bits("1101", 4).is_ok());
    /// assert_eq!(
    ///     Register::from_bits("101", 4),
    ///     Err(OperandError::Width { expected: 4, actual: 3 })
    /// );
    /// ```
    pub fn from_bits(bits: &str, width: u8) -> Result<Self, OperandError> {
        let register = Self::parse_bits(bits)?;
        if register.width != width {
            return Err(OperandError::Width {
                expected: width,
                actual: register.width as usize,
            });
        }
        Ok(register)
    }

    /// Parses a bit string and zero-fills it on the left up to `width`.
    ///
    /// Zero-filling does not sign-extend: `"101"` padded to 4 bits is
    /// `0101`, not `1101`. Strings longer than `width` are rejected.
    ///
    /// # Errors
    ///
    /// [`OperandError::Width`] when the string is longer than `width`, plus
    /// every error of [`Register::parse_bits`].
    pub fn from_bits_padded(bits: &str, width: u8) -> Result<Self, OperandError> {
        let register = Self::parse_bits(bits)?;
        if register.width > width {
            return Err(OperandError::Width {
                expected: width,
                actual: register.width as usize,
            });
        }
        Ok(register.zero_extend(width))
    }

    /// Parses a bit string; the width is the string length.
    ///
    /// # Errors
    ///
    /// - [`OperandError::Empty`] for `""`
    /// - [`OperandError::InvalidDigit`] for anything other than `0`/`1`
    /// - [`OperandError::TooWide`] beyond [`MAX_WIDTH`] bits
    pub fn parse_bits(bits: &str) -> Result<Self, OperandError> {
        let len = bits.chars().count();
        if len == 0 {
            return Err(OperandError::Empty);
        }
        if len > MAX_WIDTH as usize {
            return Err(OperandError::TooWide {
                requested: len,
                max: MAX_WIDTH,
            });
        }
        let mut value = 0u16;
        for (position, digit) in bits.chars().enumerate() {
            let bit = match digit {
                '0' => 0,
                '1' => 1,
                _ => return Err(OperandError::InvalidDigit { digit, position }),
            };
            value = (value << 1) | bit;
        }
        Ok(Self::new(value, len as u8))
    }

    /// Encodes a signed decimal in `width`-bit two's complement.
    ///
    /// ```
    /// use regtrace::register::Register;
    ///
    /// assert_eq!(Register::from_signed(-3, 4).unwrap().to_string(), "1101");
    /// assert_eq!(Register::from_signed(7, 4).unwrap().to_string(), "0111");
    /// assert!(Register::from_signed(8, 4).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// [`OperandError::OutOfRange`] when `value` is outside
    /// `-2^(width-1) ..= 2^(width-1) - 1`.
    pub fn from_signed(value: i32, width: u8) -> Result<Self, OperandError> {
        Self::check_width(width)?;
        let min = -(1i32 << (width - 1));
        let max = (1i32 << (width - 1)) - 1;
        if value < min || value > max {
            return Err(OperandError::OutOfRange { value, width });
        }
        // Negative values wrap to 2^width + value once masked.
        Ok(Self::new(value as u16, width))
    }

    /// Encodes an unsigned decimal in `width` bits.
    ///
    /// # Errors
    ///
    /// [`OperandError::OutOfRange`] when `value` is negative or needs more
    /// than `width` bits.
    pub fn from_unsigned(value: i32, width: u8) -> Result<Self, OperandError> {
        Self::check_width(width)?;
        if value < 0 || value > i32::from(Self::mask_for(width)) {
            return Err(OperandError::OutOfRange { value, width });
        }
        Ok(Self::new(value as u16, width))
    }

    /// Number of bits.
    #[inline]
    #[must_use]
    pub const fn width(self) -> u8 {
        self.width
    }

    /// The bits read as an unsigned integer.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u16 {
        self.value
    }

    /// The bits read as a two's-complement integer.
    #[inline]
    #[must_use]
    pub fn to_signed(self) -> i16 {
        arith::to_signed_decimal(self)
    }

    /// Bit at `index`, counting from the most significant bit.
    ///
    /// # Panics
    ///
    /// Panics if `index >= width`.
    #[inline]
    #[must_use]
    pub fn bit(self, index: u8) -> bool {
        assert!(index < self.width, "bit index {index} out of range");
        (self.value >> (self.width - 1 - index)) & 1 == 1
    }

    /// The sign bit.
    #[inline]
    #[must_use]
    pub fn msb(self) -> bool {
        self.bit(0)
    }

    /// The least significant bit.
    #[inline]
    #[must_use]
    pub const fn lsb(self) -> bool {
        self.value & 1 == 1
    }

    /// True when the sign bit is set.
    #[inline]
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.msb()
    }

    /// True when every bit is clear.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Same register with the least significant bit replaced.
    #[inline]
    #[must_use]
    pub const fn with_lsb(self, bit: bool) -> Self {
        Self {
            value: (self.value & !1) | bit as u16,
            width: self.width,
        }
    }

    /// Widens to `width` bits, filling the new high bits with zeros.
    ///
    /// # Panics
    ///
    /// Panics if `width` is narrower than the register or above [`MAX_WIDTH`].
    #[must_use]
    pub const fn zero_extend(self, width: u8) -> Self {
        assert!(width >= self.width, "zero_extend cannot narrow a register");
        Self::new(self.value, width)
    }

    /// `self ‖ low`: `self` becomes the high bits.
    ///
    /// # Panics
    ///
    /// Panics if the combined width exceeds [`MAX_WIDTH`].
    #[must_use]
    pub const fn concat(self, low: Self) -> Self {
        let width = self.width + low.width;
        assert!(width <= MAX_WIDTH, "concatenated register too wide");
        Self::new((self.value << low.width as u32) | low.value, width)
    }

    /// Splits into `(high, low)` where `high` has `high_width` bits.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < high_width < width`.
    #[must_use]
    pub const fn split(self, high_width: u8) -> (Self, Self) {
        assert!(
            high_width > 0 && high_width < self.width,
            "split point out of range"
        );
        let low_width = self.width - high_width;
        (
            Self::new(self.value >> low_width as u32, high_width),
            Self::new(self.value, low_width),
        )
    }

    /// Mask with the low `width` bits set.
    #[inline]
    pub(crate) const fn mask_for(width: u8) -> u16 {
        if width >= 16 {
            u16::MAX
        } else {
            (1u16 << width as u32) - 1
        }
    }

    /// Mask covering this register.
    #[inline]
    pub(crate) const fn mask(self) -> u16 {
        Self::mask_for(self.width)
    }

    fn check_width(width: u8) -> Result<(), OperandError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(OperandError::TooWide {
                requested: width as usize,
                max: MAX_WIDTH,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..self.width {
            f.write_str(if self.bit(index) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register({self})")
    }
}

impl FromStr for Register {
    type Err = OperandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_bits(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Register {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Register {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = String::deserialize(deserializer)?;
        Self::parse_bits(&bits).map_err(serde::de::Error::custom)
    }
}
