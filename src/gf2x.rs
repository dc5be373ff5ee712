//! Arithmetic in F2[x]/(x^r - 1): squaring, reduction, multiplication and k-squaring.
//!
//! The inversion engine only sees these four operations through the [`Gf2x`] trait, so
//! a different backend (a wider SIMD word, a hardware carry-less multiply) can be
//! dropped in without touching the addition chain. [`PortableGf2x`] is the default
//! backend and uses nothing but integer arithmetic.
//!
//! Critical: every operand may be secret. No branch and no memory index may depend on
//! operand bits; only `r` and the k-squaring parameter `l` are public.

use core::marker::PhantomData;

use zeroize::{Zeroize, Zeroizing};

use crate::{
    ParameterSet,
    param::MulScratchWords,
    ring::{DblPadR, PadR},
};

/// Field primitives bound to a parameter set.
pub trait Gf2x<P: ParameterSet> {
    /// Largest `k` for which `f^(2^k)` is computed with `k` squarings rather than one
    /// k-squaring. Both paths give the same result; this only moves the crossover.
    const K_SQR_THRESHOLD: usize = 64;

    /// `c = a^2`, unreduced.
    fn sqr(&self, c: &mut DblPadR<P>, a: &PadR<P>);

    /// `c = a mod (x^r - 1)`
    fn red(&self, c: &mut PadR<P>, a: &DblPadR<P>);

    /// `c = a * b mod (x^r - 1)`
    fn mul(&self, c: &mut PadR<P>, a: &PadR<P>, b: &PadR<P>);

    /// `c = a^(2^k) mod (x^r - 1)` where `l = (2^k)^-1 mod r`.
    fn k_sqr(&self, c: &mut PadR<P>, a: &PadR<P>, l: usize);

    /// `a = a * b mod (x^r - 1)`
    fn mul_assign(&self, a: &mut PadR<P>, b: &PadR<P>) {
        let mut c = Zeroizing::new(PadR::<P>::zero());
        self.mul(&mut c, a, b);
        a.copy_from(&c);
    }
}

/// Portable constant-time backend. Stateless; construct one per call or share freely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PortableGf2x<P: ParameterSet>(PhantomData<P>);

impl<P: ParameterSet> PortableGf2x<P> {
    /// Binds the primitives to `P`.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<P: ParameterSet> Gf2x<P> for PortableGf2x<P> {
    fn sqr(&self, c: &mut DblPadR<P>, a: &PadR<P>) {
        let c = c.as_words_mut();
        for (i, &w) in a.as_words().iter().enumerate() {
            c[2 * i] = spread_bits(w as u32);
            c[2 * i + 1] = spread_bits((w >> 32) as u32);
        }
    }

    /// Folds bits `[r, 2r)` back onto `[0, r)` since `x^r = 1`, then clears padding.
    fn red(&self, c: &mut PadR<P>, a: &DblPadR<P>) {
        let a = a.as_words();
        let c = c.as_words_mut();
        let r_qwords = P::R_QWORDS;
        let lead = (P::R_BITS % 64) as u32;
        debug_assert!(lead != 0, "r is odd, so it never fills its last word");

        for i in 0..r_qwords {
            let low = a[i + r_qwords - 1] >> lead;
            let high = a[i + r_qwords] << (64 - lead);
            c[i] = a[i] ^ low ^ high;
        }

        c[r_qwords - 1] &= P::LAST_R_QWORD_MASK;
        c[r_qwords..].fill(0);
    }

    fn mul(&self, c: &mut PadR<P>, a: &PadR<P>, b: &PadR<P>) {
        let mut prod = Zeroizing::new(DblPadR::<P>::default());
        let mut scratch = Zeroizing::new(MulScratch::<P>::default());

        karatsuba(
            prod.as_words_mut(),
            a.as_words(),
            b.as_words(),
            scratch.0.as_mut_slice(),
        );
        self.red(c, &prod);
    }

    /// Observation 1 of the Drucker-Gueron-Kostic paper: `a^(2^k)` has coefficient
    /// `a[(i * l) mod r]` at position `i`. The read index walks a sequence fixed by the
    /// public `l`, so the access pattern leaks nothing about `a`.
    fn k_sqr(&self, c: &mut PadR<P>, a: &PadR<P>, l: usize) {
        let r = P::R_BITS;
        debug_assert!(l < r, "l must be reduced mod r");

        let a = a.as_words();
        let c = c.as_words_mut();
        c.fill(0);

        let mut idx = 0;
        for i in 0..r {
            let bit = (a[idx / 64] >> (idx % 64)) & 1;
            c[i / 64] |= bit << (i % 64);
            idx += l;
            if idx >= r {
                idx -= r;
            }
        }
    }
}

/// `c = a * b mod (x^r - 1)` with the portable backend.
///
/// This is the multiplication key generation needs next to the inverse (`h = h1 * h0^-1`).
#[must_use]
pub fn gf2x_mod_mul<P: ParameterSet>(a: &PadR<P>, b: &PadR<P>) -> PadR<P> {
    let mut c = PadR::<P>::zero();
    PortableGf2x::<P>::new().mul(&mut c, a, b);
    c
}

/// Karatsuba scratch for one multiplication.
struct MulScratch<P: ParameterSet>(MulScratchWords<P>);

impl<P: ParameterSet> Default for MulScratch<P> {
    fn default() -> Self {
        Self(MulScratchWords::<P>::default())
    }
}

impl<P: ParameterSet> Zeroize for MulScratch<P> {
    fn zeroize(&mut self) {
        self.0.as_mut_slice().zeroize();
    }
}

/// Below this many words Karatsuba stops recursing.
const KARATSUBA_BASE_QWORDS: usize = 16;

/// Spreads the 32 bits of `x` over the even bit positions of a `u64`.
///
/// Over F2 squaring has no cross terms, so this is the square of a 32-bit polynomial.
#[inline]
fn spread_bits(x: u32) -> u64 {
    let mut x = u64::from(x);
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

/// Carry-less multiplication truncated to the low 64 bits.
///
/// Integer multiplication of operands with three zero bits between every kept bit:
/// every partial sum in a kept position counts at most 15 products below bit 64, so
/// carries never reach the next kept position of the same residue class.
/// Ref: BearSSL `ghash_ctmul64.c`, <https://www.bearssl.org/constanttime.html#ghash-for-gcm>
#[inline]
fn bmul64(x: u64, y: u64) -> u64 {
    const M0: u64 = 0x1111_1111_1111_1111;
    const M1: u64 = 0x2222_2222_2222_2222;
    const M2: u64 = 0x4444_4444_4444_4444;
    const M3: u64 = 0x8888_8888_8888_8888;

    let (x0, x1, x2, x3) = (x & M0, x & M1, x & M2, x & M3);
    let (y0, y1, y2, y3) = (y & M0, y & M1, y & M2, y & M3);

    let z0 = x0.wrapping_mul(y0) ^ x1.wrapping_mul(y3) ^ x2.wrapping_mul(y2) ^ x3.wrapping_mul(y1);
    let z1 = x0.wrapping_mul(y1) ^ x1.wrapping_mul(y0) ^ x2.wrapping_mul(y3) ^ x3.wrapping_mul(y2);
    let z2 = x0.wrapping_mul(y2) ^ x1.wrapping_mul(y1) ^ x2.wrapping_mul(y0) ^ x3.wrapping_mul(y3);
    let z3 = x0.wrapping_mul(y3) ^ x1.wrapping_mul(y2) ^ x2.wrapping_mul(y1) ^ x3.wrapping_mul(y0);

    (z0 & M0) | (z1 & M1) | (z2 & M2) | (z3 & M3)
}

/// Carry-less multiply of two 64-bit binary polynomials.
///
/// Returns `(lo, hi)` where the 128-bit product is `(hi << 64) | lo`. The high half is
/// the low half of the bit-reversed product, reversed back.
#[inline]
fn clmul64(a: u64, b: u64) -> (u64, u64) {
    let lo = bmul64(a, b);
    let hi = bmul64(a.reverse_bits(), b.reverse_bits()).reverse_bits() >> 1;
    (lo, hi)
}

/// `c = a * b` over F2[x], `c` twice as long as `a` and `b`.
fn schoolbook(c: &mut [u64], a: &[u64], b: &[u64]) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(c.len(), 2 * a.len());

    c.fill(0);
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            let (lo, hi) = clmul64(ai, bj);
            c[i + j] ^= lo;
            c[i + j + 1] ^= hi;
        }
    }
}

/// `c = a * b` over F2[x] by recursive Karatsuba on halves.
///
/// `scratch` must hold at least `4 * a.len()` words. The recursion shape depends only on
/// the operand length.
fn karatsuba(c: &mut [u64], a: &[u64], b: &[u64], scratch: &mut [u64]) {
    let n = a.len();
    debug_assert_eq!(b.len(), n);
    debug_assert_eq!(c.len(), 2 * n);

    if n <= KARATSUBA_BASE_QWORDS || n % 2 != 0 {
        schoolbook(c, a, b);
        return;
    }

    let h = n / 2;
    let (z, rest) = scratch.split_at_mut(2 * n);

    // c = a0*b0 | a1*b1
    {
        let (lo, hi) = c.split_at_mut(n);
        karatsuba(lo, &a[..h], &b[..h], rest);
        karatsuba(hi, &a[h..], &b[h..], rest);
    }

    // mid = (a0 + a1)(b0 + b1) - a0*b0 - a1*b1
    let (sums, mid) = z.split_at_mut(n);
    let (a_sum, b_sum) = sums.split_at_mut(h);
    for i in 0..h {
        a_sum[i] = a[i] ^ a[h + i];
        b_sum[i] = b[i] ^ b[h + i];
    }
    karatsuba(mid, a_sum, b_sum, rest);
    for i in 0..n {
        mid[i] ^= c[i] ^ c[n + i];
    }

    for i in 0..n {
        c[h + i] ^= mid[i];
    }
}
