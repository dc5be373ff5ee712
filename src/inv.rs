//! Inversion in F2[x]/(x^r - 1).
//!
//! Ref: N. Drucker, S. Gueron, D. Kostic, "Fast polynomial inversion for post quantum
//! QC-MDPC cryptography", <https://eprint.iacr.org/2020/298.pdf>, Algorithm 2.
//!
//! Computes `a^(2^(r-1) - 2)`, which is `a^-1` for every unit `a`. The exponent is
//! walked with the two ladders of [`crate::chain`]:
//!
//! ```text
//! f = a, t = a
//! for i in 1..MAX_I:
//!     f = f * f^(2^exp0_k[i-1])          // f = a^(2^(2^i) - 1)
//!     if exp1_k[i] != 0:
//!         t = t * f^(2^exp1_k[i])        // t = a^(2^((r-2) mod 2^(i+1)) - 1)
//! return t^2
//! ```
//!
//! Every branch depends on the table, hence on `r`, never on `a`. A non-invertible `a`
//! is not detected: the output is then meaningless, but no branch is taken on it.
//!
//! Critical: `f`, `g`, `t` and the double-width buffer hold powers of the secret `a`.
//! They live in an [`InvScratch`] that is wiped on every exit from the engine.

use core::ops::{Deref, DerefMut};

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::{
    ParameterSet,
    gf2x::{Gf2x, PortableGf2x},
    ring::{DblPadR, PadR},
};

/// Working state of one inversion.
pub struct InvScratch<P: ParameterSet> {
    pub(crate) f: PadR<P>,
    pub(crate) g: PadR<P>,
    pub(crate) t: PadR<P>,
    pub(crate) sec_buf: DblPadR<P>,
}

impl<P: ParameterSet> InvScratch<P> {
    /// True iff every buffer reads as zero. Reads every word regardless of contents.
    #[must_use]
    pub fn is_wiped(&self) -> bool {
        let any_set = [&self.f, &self.g, &self.t]
            .into_iter()
            .flat_map(|e| e.as_words())
            .chain(self.sec_buf.as_words())
            .fold(0u64, |acc, &w| acc | w);
        any_set.ct_eq(&0).into()
    }
}

impl<P: ParameterSet> Default for InvScratch<P> {
    fn default() -> Self {
        Self {
            f: PadR::zero(),
            g: PadR::zero(),
            t: PadR::zero(),
            sec_buf: DblPadR::default(),
        }
    }
}

impl<P: ParameterSet> Zeroize for InvScratch<P> {
    fn zeroize(&mut self) {
        self.f.zeroize();
        self.g.zeroize();
        self.t.zeroize();
        self.sec_buf.zeroize();
    }
}

/// Borrows a buffer and zeroizes it when dropped, on return and on unwind alike.
struct WipeOnDrop<'a, Z: Zeroize>(&'a mut Z);

impl<Z: Zeroize> Deref for WipeOnDrop<'_, Z> {
    type Target = Z;

    fn deref(&self) -> &Z {
        self.0
    }
}

impl<Z: Zeroize> DerefMut for WipeOnDrop<'_, Z> {
    fn deref_mut(&mut self) -> &mut Z {
        self.0
    }
}

impl<Z: Zeroize> Drop for WipeOnDrop<'_, Z> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// `a = a^2 mod (x^r - 1)`
#[inline]
fn sqr_in_place<P: ParameterSet, C: Gf2x<P>>(ctx: &C, a: &mut PadR<P>, sec_buf: &mut DblPadR<P>) {
    ctx.sqr(sec_buf, a);
    ctx.red(a, sec_buf);
}

/// `c = a^(2^num_sqrs)` by repeated squaring
#[inline]
fn repeated_squaring<P: ParameterSet, C: Gf2x<P>>(
    ctx: &C,
    c: &mut PadR<P>,
    a: &PadR<P>,
    num_sqrs: usize,
    sec_buf: &mut DblPadR<P>,
) {
    c.copy_from(a);
    for _ in 0..num_sqrs {
        sqr_in_place(ctx, c, sec_buf);
    }
}

/// `c = a^(2^k)`, by `k` squarings up to the backend's threshold and by one k-squaring
/// with `l = (2^k)^-1 mod r` above it.
#[inline]
fn exp_pow2<P: ParameterSet, C: Gf2x<P>>(
    ctx: &C,
    c: &mut PadR<P>,
    a: &PadR<P>,
    k: usize,
    l: usize,
    sec_buf: &mut DblPadR<P>,
) {
    if k <= C::K_SQR_THRESHOLD {
        repeated_squaring(ctx, c, a, k, sec_buf);
    } else {
        ctx.k_sqr(c, a, l);
    }
}

/// `a^-1 mod (x^r - 1)` using the backend `ctx` and caller-provided working state.
///
/// `scratch` is zeroized before this returns, whatever its contents were on entry.
pub fn gf2x_mod_inv_with<P: ParameterSet, C: Gf2x<P>>(
    ctx: &C,
    scratch: &mut InvScratch<P>,
    a: &PadR<P>,
) -> PadR<P> {
    let chain = P::CHAIN;
    let mut scratch = WipeOnDrop(scratch);
    let InvScratch { f, g, t, sec_buf } = &mut *scratch;

    // Steps 2 and 3
    f.copy_from(a);
    t.copy_from(a);

    for i in 1..chain.max_i() {
        // Step 5, exponentiation 0: g = f^(2^(2^(i-1)))
        let (k0, l0) = (chain.exp0_k[i - 1] as usize, chain.exp0_l[i - 1] as usize);
        exp_pow2(ctx, g, f, k0, l0, sec_buf);

        // Step 6: f = f * g
        ctx.mul_assign(f, g);

        if chain.exp1_k[i] != 0 {
            // Step 8, exponentiation 1: g = f^(2^((r-2) mod 2^i))
            let (k1, l1) = (chain.exp1_k[i] as usize, chain.exp1_l[i] as usize);
            exp_pow2(ctx, g, f, k1, l1, sec_buf);

            // Step 9: t = t * g
            ctx.mul_assign(t, g);
        }
    }

    // Step 10: c = t^2
    sqr_in_place(ctx, t, sec_buf);
    let mut c = PadR::<P>::zero();
    c.copy_from(t);
    c
}

/// `a^-1 mod (x^r - 1)` with the portable backend.
///
/// `a` must be a unit (odd weight, not the all-ones vector); otherwise the result is
/// unspecified. No check is made, since it would branch on `a`.
#[must_use]
pub fn gf2x_mod_inv<P: ParameterSet>(a: &PadR<P>) -> PadR<P> {
    let ctx = PortableGf2x::<P>::new();
    let mut scratch = Zeroizing::new(InvScratch::<P>::default());
    gf2x_mod_inv_with(&ctx, &mut *scratch, a)
}

impl<P: ParameterSet> PadR<P> {
    /// Multiplicative inverse, see [`gf2x_mod_inv`].
    #[must_use]
    pub fn invert(&self) -> Self {
        gf2x_mod_inv(self)
    }
}
