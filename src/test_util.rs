use rand_chacha::rand_core::{RngCore, SeedableRng};

use crate::{ParameterSet, ring::PadR};

/// Deterministic tiny RNG for repeatable tests
pub struct TestRng {
    rng: rand_chacha::ChaCha8Rng,
}
impl TestRng {
    pub fn new() -> Self {
        let rng = rand_chacha::ChaCha8Rng::seed_from_u64(0xdead_beef);
        Self { rng }
    }
    pub fn with_seed(seed: u64) -> Self {
        let rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        Self { rng }
    }
    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

impl Default for TestRng {
    fn default() -> Self {
        Self::new()
    }
}

use std::vec;
use std::vec::Vec;

/// Uniformly random ring element with zero padding.
pub fn random_element<P: ParameterSet>(rng: &mut TestRng) -> PadR<P> {
    let mut e = PadR::<P>::zero();
    let words = e.as_words_mut();
    for w in words[..P::R_QWORDS].iter_mut() {
        *w = rng.next_u64();
    }
    words[P::R_QWORDS - 1] &= P::LAST_R_QWORD_MASK;
    e
}

/// Random unit of the ring.
///
/// x^r - 1 = (x - 1) * Phi_r(x) with Phi_r irreducible when 2 is primitive mod r, so an
/// element is invertible iff it has odd weight and is not Phi_r (the all-ones vector).
pub fn random_invertible<P: ParameterSet>(rng: &mut TestRng) -> PadR<P> {
    loop {
        let mut e = random_element::<P>(rng);
        if e.weight() % 2 == 0 {
            e.as_words_mut()[0] ^= 1;
        }
        if e.weight() as usize != P::R_BITS {
            return e;
        }
    }
}

/// Inverse in F2[x]/(x^r - 1) by the extended Euclidean algorithm on plain bit
/// vectors. Independent of the addition chain and of every backend, and not constant
/// time; an oracle only.
pub fn euclid_inverse<P: ParameterSet>(a: &PadR<P>) -> Option<PadR<P>> {
    let r = P::R_BITS;
    let words = r / 64 + 2;

    // x^r + 1
    let mut r0 = vec![0u64; words];
    r0[0] = 1;
    r0[r / 64] |= 1 << (r % 64);
    let mut r1 = vec![0u64; words];
    r1[..P::R_QWORDS].copy_from_slice(&a.as_words()[..P::R_QWORDS]);

    // invariant: s_i * a = r_i (mod x^r + 1)
    let mut s0 = vec![0u64; words];
    let mut s1 = vec![0u64; words];
    s1[0] = 1;

    while let Some(d1) = degree(&r1) {
        while let Some(d0) = degree(&r0) {
            if d0 < d1 {
                break;
            }
            xor_shifted(&mut r0, &r1, d0 - d1);
            xor_shifted(&mut s0, &s1, d0 - d1);
        }
        core::mem::swap(&mut r0, &mut r1);
        core::mem::swap(&mut s0, &mut s1);
    }

    // r0 = gcd(a, x^r + 1)
    if degree(&r0) != Some(0) {
        return None;
    }

    let mut inv = PadR::<P>::zero();
    let out = inv.as_words_mut();
    for i in 0..s0.len() * 64 {
        if (s0[i / 64] >> (i % 64)) & 1 == 1 {
            let j = i % r;
            out[j / 64] ^= 1 << (j % 64);
        }
    }
    Some(inv)
}

fn degree(p: &[u64]) -> Option<usize> {
    p.iter()
        .enumerate()
        .rev()
        .find(|(_, w)| **w != 0)
        .map(|(i, w)| 64 * i + 63 - w.leading_zeros() as usize)
}

/// `dst ^= src * x^shift`, growing `dst` if needed
fn xor_shifted(dst: &mut Vec<u64>, src: &[u64], shift: usize) {
    let (word_shift, bit_shift) = (shift / 64, shift % 64);
    let needed = src.len() + word_shift + 1;
    if dst.len() < needed {
        dst.resize(needed, 0);
    }
    for (i, &w) in src.iter().enumerate() {
        if w == 0 {
            continue;
        }
        dst[i + word_shift] ^= w << bit_shift;
        if bit_shift != 0 {
            dst[i + word_shift + 1] ^= w >> (64 - bit_shift);
        }
    }
}
