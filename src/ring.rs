//! Elements of the ring F2[x]/(x^r - 1).
//!
//! A ring element is a bit vector of `R_PADDED` bits stored as little-endian `u64`
//! words: bit `i` of the polynomial is bit `i % 64` of word `i / 64`. Bits at positions
//! `>= r` are padding and are always zero.
//!
//! Both element types hold secret material. They are zeroizable, compare in constant
//! time, and their `Debug` output does not show the contents.

use core::fmt;

use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::{
    ParameterSet,
    error::Error,
    param::{DblPadRWords, PadRWords},
};

/// A polynomial in F2[x]/(x^r - 1), padded to `R_PADDED` bits
pub struct PadR<P: ParameterSet>(pub(crate) PadRWords<P>);

/// An unreduced product of two ring elements, `2 * R_PADDED` bits
pub struct DblPadR<P: ParameterSet>(pub(crate) DblPadRWords<P>);

impl<P: ParameterSet> PadR<P> {
    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self(PadRWords::<P>::default())
    }

    /// The multiplicative identity, the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self::monomial(0)
    }

    /// The monomial `x^(i mod r)`.
    #[must_use]
    pub fn monomial(i: usize) -> Self {
        let i = i % P::R_BITS;
        let mut e = Self::zero();
        e.0[i / 64] = 1u64 << (i % 64);
        e
    }

    /// Parses the little-endian encoding of exactly `R_BYTES` bytes.
    ///
    /// Fails if the length is wrong or if any bit at position `>= r` is set.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != P::R_BYTES {
            return Err(Error::InvalidLength {
                expected: P::R_BYTES,
                actual: bytes.len(),
            });
        }

        let mut e = Self::zero();
        for (i, &b) in bytes.iter().enumerate() {
            e.0[i / 8] |= u64::from(b) << (8 * (i % 8));
        }

        let overflow = bytes[P::R_BYTES - 1] & !P::LAST_R_BYTE_MASK;
        if bool::from(overflow.ct_eq(&0)) {
            Ok(e)
        } else {
            e.zeroize();
            Err(Error::NonZeroPadding)
        }
    }

    /// Writes the little-endian encoding into `out`, which must hold exactly `R_BYTES`
    /// bytes.
    pub fn write_le_bytes(&self, out: &mut [u8]) -> Result<(), Error> {
        if out.len() != P::R_BYTES {
            return Err(Error::InvalidLength {
                expected: P::R_BYTES,
                actual: out.len(),
            });
        }
        for (i, b) in out.iter_mut().enumerate() {
            *b = (self.0[i / 8] >> (8 * (i % 8))) as u8;
        }
        Ok(())
    }

    /// Coefficient of `x^i`. `i` is public.
    #[must_use]
    pub fn bit(&self, i: usize) -> bool {
        debug_assert!(i < P::R_BITS, "bit index beyond r");
        (self.0[i / 64] >> (i % 64)) & 1 == 1
    }

    /// Hamming weight.
    #[must_use]
    pub fn weight(&self) -> u32 {
        self.0.iter().map(|w| w.count_ones()).sum()
    }

    /// Ring addition, which over F2 is XOR.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut c = Self::zero();
        for ((c, a), b) in c.0.iter_mut().zip(self.0.iter()).zip(other.0.iter()) {
            *c = a ^ b;
        }
        c
    }

    /// The backing words, `R_PADDED_QWORDS` of them.
    #[must_use]
    pub fn as_words(&self) -> &[u64] {
        self.0.as_slice()
    }

    pub(crate) fn as_words_mut(&mut self) -> &mut [u64] {
        self.0.as_mut_slice()
    }

    /// Overwrites `self` with `other` in place.
    pub(crate) fn copy_from(&mut self, other: &Self) {
        self.0.copy_from_slice(&other.0);
    }
}

impl<P: ParameterSet> DblPadR<P> {
    /// The backing words, `2 * R_PADDED_QWORDS` of them.
    #[must_use]
    pub fn as_words(&self) -> &[u64] {
        self.0.as_slice()
    }

    pub(crate) fn as_words_mut(&mut self) -> &mut [u64] {
        self.0.as_mut_slice()
    }
}

impl<P: ParameterSet> Default for PadR<P> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: ParameterSet> Default for DblPadR<P> {
    fn default() -> Self {
        Self(DblPadRWords::<P>::default())
    }
}

impl<P: ParameterSet> Clone for PadR<P> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<P: ParameterSet> Zeroize for PadR<P> {
    fn zeroize(&mut self) {
        self.0.as_mut_slice().zeroize();
    }
}

impl<P: ParameterSet> Zeroize for DblPadR<P> {
    fn zeroize(&mut self) {
        self.0.as_mut_slice().zeroize();
    }
}

impl<P: ParameterSet> ConstantTimeEq for PadR<P> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_slice().ct_eq(other.0.as_slice())
    }
}

impl<P: ParameterSet> PartialEq for PadR<P> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<P: ParameterSet> Eq for PadR<P> {}

impl<P: ParameterSet> fmt::Debug for PadR<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PadR")
            .field("level", &P::LEVEL)
            .finish_non_exhaustive()
    }
}

impl<P: ParameterSet> fmt::Debug for DblPadR<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DblPadR")
            .field("level", &P::LEVEL)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level11::Level11Params;
    use crate::level12::Level12Params;
    use crate::test_util::{TestRng, random_element};
    use std::vec;

    type R773 = PadR<Level11Params>;

    #[test]
    fn one_and_monomials() {
        let one = R773::one();
        assert!(one.bit(0));
        assert_eq!(one.weight(), 1);

        let x = R773::monomial(1);
        assert!(x.bit(1));
        assert_eq!(x.weight(), 1);

        // x^r = 1
        assert_eq!(R773::monomial(773), one);
        assert!(R773::monomial(772).bit(772));
    }

    #[test]
    fn add_is_xor() {
        let mut rng = TestRng::new();
        let a = random_element::<Level11Params>(&mut rng);
        let b = random_element::<Level11Params>(&mut rng);
        let zero = R773::zero();

        assert_eq!(a.add(&zero), a);
        assert_eq!(a.add(&a), zero);
        assert_eq!(a.add(&b), b.add(&a));
    }

    #[test]
    fn byte_encoding_round_trips() {
        let mut rng = TestRng::new();
        let a = random_element::<Level12Params>(&mut rng);

        let mut bytes = vec![0u8; Level12Params::R_BYTES];
        a.write_le_bytes(&mut bytes).expect("exact length");
        let b = PadR::<Level12Params>::from_le_bytes(&bytes).expect("valid encoding");
        assert_eq!(a, b);
    }

    #[test]
    fn byte_encoding_is_little_endian() {
        let mut bytes = vec![0u8; Level11Params::R_BYTES];
        bytes[0] = 0x02;
        bytes[1] = 0x01;
        let e = R773::from_le_bytes(&bytes).expect("valid encoding");
        assert!(e.bit(1));
        assert!(e.bit(8));
        assert_eq!(e.weight(), 2);
        assert_eq!(e.as_words()[0], 0x0102);
    }

    #[test]
    fn from_le_bytes_rejects_wrong_length() {
        let bytes = vec![0u8; Level11Params::R_BYTES + 1];
        assert_eq!(
            R773::from_le_bytes(&bytes),
            Err(Error::InvalidLength {
                expected: 97,
                actual: 98
            })
        );

        let mut out = vec![0u8; 3];
        assert!(R773::one().write_le_bytes(&mut out).is_err());
    }

    #[test]
    fn from_le_bytes_rejects_bits_beyond_r() {
        let mut bytes = vec![0u8; Level11Params::R_BYTES];
        // bit 773 = bit 5 of byte 96
        bytes[96] = 1 << 5;
        assert_eq!(R773::from_le_bytes(&bytes), Err(Error::NonZeroPadding));

        bytes[96] = 1 << 4;
        let e = R773::from_le_bytes(&bytes).expect("bit 772 is in range");
        assert!(e.bit(772));
    }

    #[test]
    fn zeroize_clears_every_word() {
        let mut rng = TestRng::new();
        let mut a = random_element::<Level11Params>(&mut rng);
        a.zeroize();
        assert!(a.as_words().iter().all(|&w| w == 0));

        let mut d = DblPadR::<Level11Params>::default();
        d.as_words_mut().fill(u64::MAX);
        d.zeroize();
        assert!(d.as_words().iter().all(|&w| w == 0));
    }

    #[test]
    fn constant_time_eq() {
        let mut rng = TestRng::new();
        let a = random_element::<Level11Params>(&mut rng);
        let mut b = a.clone();
        assert!(bool::from(a.ct_eq(&b)));
        b.as_words_mut()[5] ^= 1 << 7;
        assert!(!bool::from(a.ct_eq(&b)));
    }
}
