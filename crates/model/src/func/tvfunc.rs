//! Truth tables.

use std::fmt;

use bitvec::prelude::*;

/// Largest supported input count; a table has `2^n` entries.
pub const MAX_TV_INPUTS: usize = 20;

/// A complete truth table over `input_num` variables.
///
/// Entry `k` holds the function value for the assignment where variable `i`
/// takes bit `i` of `k`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TvFunc {
    input_num: usize,
    bits: BitVec<u64, Lsb0>,
}

impl TvFunc {
    /// The constant-0 function over `input_num` variables.
    ///
    /// # Panics
    ///
    /// If `input_num` exceeds [`MAX_TV_INPUTS`].
    pub fn zero(input_num: usize) -> Self {
        assert!(input_num <= MAX_TV_INPUTS, "tvfunc: too many inputs");
        Self {
            input_num,
            bits: bitvec![u64, Lsb0; 0; 1 << input_num],
        }
    }

    /// Builds a table by evaluating `f` on every assignment.
    pub fn from_fn(input_num: usize, mut f: impl FnMut(&[bool]) -> bool) -> Self {
        let mut tv = Self::zero(input_num);
        let mut assign = vec![false; input_num];
        for k in 0..tv.bits.len() {
            for (i, v) in assign.iter_mut().enumerate() {
                *v = (k >> i) & 1 == 1;
            }
            tv.bits.set(k, f(&assign));
        }
        tv
    }

    /// Parses a hexadecimal table, most significant nibble first.
    ///
    /// Tables with fewer than four entries still take one hex digit.
    pub fn from_hex(input_num: usize, hex: &str) -> Option<Self> {
        if input_num > MAX_TV_INPUTS {
            return None;
        }
        let size = 1usize << input_num;
        let digits = size.div_ceil(4);
        if hex.len() != digits {
            return None;
        }
        let mut tv = Self::zero(input_num);
        for (pos, c) in hex.chars().rev().enumerate() {
            let nibble = c.to_digit(16)?;
            for b in 0..4 {
                let k = pos * 4 + b;
                let bit = (nibble >> b) & 1 == 1;
                if k < size {
                    tv.bits.set(k, bit);
                } else if bit {
                    return None;
                }
            }
        }
        Some(tv)
    }

    /// Parses a binary table of `2^n` characters, highest assignment first.
    ///
    /// The input count is taken from the length.
    pub fn from_binary(s: &str) -> Option<Self> {
        let size = s.len();
        if !size.is_power_of_two() {
            return None;
        }
        let input_num = size.trailing_zeros() as usize;
        if input_num > MAX_TV_INPUTS {
            return None;
        }
        let mut tv = Self::zero(input_num);
        for (k, c) in s.bytes().rev().enumerate() {
            match c {
                b'0' => {}
                b'1' => tv.bits.set(k, true),
                _ => return None,
            }
        }
        Some(tv)
    }

    /// Number of variables.
    pub fn input_num(&self) -> usize {
        self.input_num
    }

    /// Value at assignment index `k`.
    pub fn value(&self, k: usize) -> bool {
        self.bits[k]
    }

    /// Evaluates the function.
    pub fn eval(&self, inputs: &[bool]) -> bool {
        let k = inputs
            .iter()
            .enumerate()
            .fold(0usize, |k, (i, &v)| k | ((v as usize) << i));
        self.bits[k]
    }

    /// Number of assignments mapped to 1.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }
}

impl fmt::Display for TvFunc {
    /// Hexadecimal, most significant nibble first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.bits.len();
        let digits = size.div_ceil(4);
        for pos in (0..digits).rev() {
            let mut nibble = 0u32;
            for b in 0..4 {
                let k = pos * 4 + b;
                if k < size && self.bits[k] {
                    nibble |= 1 << b;
                }
            }
            write!(f, "{nibble:x}")?;
        }
        Ok(())
    }
}
