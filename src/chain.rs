//! Addition-chain tables for inversion in F2[x]/(x^r - 1).
//!
//! Inversion raises `a` to `2^(r-1) - 2` (Fermat in the group of units, which has
//! order `2^(r-1) - 1` when 2 is primitive mod the prime `r`). The exponent is walked
//! with two ladders of exponentiations of the form `f^(2^k)`:
//!
//! - exp0 computes `f^(2^(2^(i-1)))` for `0 < i < MAX_I`, unconditionally.
//! - exp1 computes `f^(2^((r-2) mod 2^i))`, only when bit `i` of `r - 2` is set.
//!   A zero `exp1_k[i]` means the step is skipped.
//!
//! Every `f^(2^k)` can either be `k` squarings or one k-squaring, which is a bit
//! permutation parameterised by `l = (2^k)^-1 mod r`. The `l` values are shipped next to
//! the `k` values so nothing is computed at run time.
//!
//! Ref: N. Drucker, S. Gueron, D. Kostic, "Fast polynomial inversion for post quantum
//! QC-MDPC cryptography", <https://eprint.iacr.org/2020/298.pdf>, Algorithm 2 and
//! Observation 1.
//!
//! The tables were generated offline with:
//!
//! ```text
//! max_i  = floor(log2(r - 2)) + 1
//! exp0_k = [2^i for i in 0..max_i]
//! exp0_l = [inverse_mod(2^k mod r, r) for k in exp0_k]
//! exp1_k = [(r - 2) mod 2^i if bit i of (r - 2) else 0 for i in 0..max_i]
//! exp1_l = [inverse_mod(2^k mod r, r) if k != 0 else 0 for k in exp1_k]
//! ```
//!
//! and are checked against that relationship at compile time, see
//! [`InvChain::matches`] and the assertions in `param.rs`.

/// Exponent and permutation parameters of the two inversion ladders for one `r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvChain {
    /// exponentiation 0: `k` of `f^(2^k)`, always `2^i`
    pub exp0_k: &'static [u32],
    /// exponentiation 0: `(2^k)^-1 mod r`
    pub exp0_l: &'static [u32],
    /// exponentiation 1: `k` of `f^(2^k)`, zero when the step is skipped
    pub exp1_k: &'static [u32],
    /// exponentiation 1: `(2^k)^-1 mod r`, zero when the step is skipped
    pub exp1_l: &'static [u32],
}

impl InvChain {
    /// Number of ladder entries, `floor(log2(r - 2)) + 1`.
    #[inline]
    #[must_use]
    pub const fn max_i(&self) -> usize {
        self.exp0_k.len()
    }

    /// True iff all four ladders are exactly the ones derived from `r`.
    ///
    /// This is the build-time check for a shipped table: a mismatch silently produces
    /// a wrong inverse, so it has to be ruled out before anything runs.
    #[must_use]
    pub const fn matches(&self, r: u32) -> bool {
        let n = max_i(r);
        if self.exp0_k.len() != n
            || self.exp0_l.len() != n
            || self.exp1_k.len() != n
            || self.exp1_l.len() != n
        {
            return false;
        }

        let r_minus_2 = r - 2;
        let mut i = 0;
        while i < n {
            let k0 = 1u32 << i;
            if self.exp0_k[i] != k0 || !is_inverse_of_pow2(self.exp0_l[i], k0, r) {
                return false;
            }

            let k1 = if (r_minus_2 >> i) & 1 == 1 {
                r_minus_2 & (k0 - 1)
            } else {
                0
            };
            if self.exp1_k[i] != k1 {
                return false;
            }
            if k1 == 0 {
                if self.exp1_l[i] != 0 {
                    return false;
                }
            } else if !is_inverse_of_pow2(self.exp1_l[i], k1, r) {
                return false;
            }
            i += 1;
        }
        true
    }
}

/// `floor(log2(r - 2)) + 1`, the bit length of `r - 2`.
#[must_use]
pub const fn max_i(r: u32) -> usize {
    assert!(r > 2, "r must exceed 2");
    (u32::BITS - (r - 2).leading_zeros()) as usize
}

/// `2^k mod r`, square-and-multiply.
#[must_use]
pub const fn pow2_mod(k: u32, r: u32) -> u32 {
    let m = r as u64;
    let mut base = 2 % m;
    let mut acc = 1 % m;
    let mut e = k;
    while e != 0 {
        if e & 1 == 1 {
            acc = acc * base % m;
        }
        base = base * base % m;
        e >>= 1;
    }
    acc as u32
}

/// Multiplicative inverse of `a` modulo `r`, or `None` when `gcd(a, r) != 1`.
#[must_use]
pub const fn inverse_mod(a: u32, r: u32) -> Option<u32> {
    let (mut old_r, mut cur_r) = ((a % r) as i64, r as i64);
    let (mut old_s, mut cur_s) = (1i64, 0i64);
    while cur_r != 0 {
        let q = old_r / cur_r;
        let next_r = old_r - q * cur_r;
        old_r = cur_r;
        cur_r = next_r;
        let next_s = old_s - q * cur_s;
        old_s = cur_s;
        cur_s = next_s;
    }
    if old_r != 1 {
        return None;
    }
    Some(old_s.rem_euclid(r as i64) as u32)
}

const fn is_inverse_of_pow2(l: u32, k: u32, r: u32) -> bool {
    match inverse_mod(pow2_mod(k, r), r) {
        Some(inv) => inv == l,
        None => false,
    }
}

// One table per supported r. Levels 0 and 15 share r = 2053.

/// r = 773
pub(crate) const CHAIN_R773: InvChain = InvChain {
    exp0_k: &[1, 2, 4, 8, 16, 32, 64, 128, 256, 512],
    exp0_l: &[387, 580, 145, 154, 526, 715, 272, 549, 704, 123],
    exp1_k: &[0, 1, 0, 0, 0, 0, 0, 0, 3, 259],
    exp1_l: &[0, 387, 0, 0, 0, 0, 0, 0, 290, 88],
};

/// r = 1019
pub(crate) const CHAIN_R1019: InvChain = InvChain {
    exp0_k: &[1, 2, 4, 8, 16, 32, 64, 128, 256, 512],
    exp0_l: &[510, 255, 828, 816, 449, 858, 446, 211, 704, 382],
    exp1_k: &[0, 0, 0, 1, 9, 25, 57, 121, 249, 505],
    exp1_l: &[0, 0, 0, 510, 408, 791, 24, 514, 440, 1003],
};

/// r = 1283
pub(crate) const CHAIN_R1283: InvChain = InvChain {
    exp0_k: &[1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024],
    exp0_l: &[642, 321, 401, 426, 573, 1164, 48, 1021, 645, 333, 551],
    exp1_k: &[0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 257],
    exp1_l: &[0, 0, 0, 0, 0, 0, 0, 0, 642, 0, 964],
};

/// r = 2029
pub(crate) const CHAIN_R2029: InvChain = InvChain {
    exp0_k: &[1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024],
    exp0_l: &[
        1015, 1522, 1395, 214, 1158, 1824, 1445, 184, 1392, 1998, 961,
    ],
    exp1_k: &[0, 1, 0, 3, 0, 11, 43, 107, 235, 491, 1003],
    exp1_l: &[0, 1015, 0, 761, 0, 534, 96, 748, 1689, 1506, 2010],
};

/// r = 2053
pub(crate) const CHAIN_R2053: InvChain = InvChain {
    exp0_k: &[1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048],
    exp0_l: &[
        1027, 1540, 385, 409, 988, 969, 740, 1502, 1810, 1565, 2049, 16,
    ],
    exp1_k: &[0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3],
    exp1_l: &[0, 1027, 0, 0, 0, 0, 0, 0, 0, 0, 0, 770],
};

/// r = 2069
pub(crate) const CHAIN_R2069: InvChain = InvChain {
    exp0_k: &[1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048],
    exp0_l: &[
        1035, 1552, 388, 1576, 976, 836, 1643, 1473, 1417, 959, 1045, 1662,
    ],
    exp1_k: &[0, 1, 0, 0, 3, 0, 0, 0, 0, 0, 0, 19],
    exp1_l: &[0, 1035, 0, 0, 776, 0, 0, 0, 0, 0, 0, 122],
};

/// r = 4021
pub(crate) const CHAIN_R4021: InvChain = InvChain {
    exp0_k: &[1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048],
    exp0_l: &[
        2011, 3016, 754, 1555, 1404, 926, 1003, 759, 1078, 15, 225, 2373,
    ],
    exp1_k: &[0, 1, 0, 0, 3, 19, 0, 51, 179, 435, 947, 1971],
    exp1_l: &[0, 2011, 0, 0, 1508, 2186, 0, 1673, 3192, 3021, 1084, 2640],
};

/// r = 4099
pub(crate) const CHAIN_R4099: InvChain = InvChain {
    exp0_k: &[1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096],
    exp0_l: &[
        2050, 1025, 1281, 1361, 3672, 1973, 2778, 2966, 702, 924, 1184, 4097, 4,
    ],
    exp1_k: &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    exp1_l: &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2050],
};

/// r = 7109
pub(crate) const CHAIN_R7109: InvChain = InvChain {
    exp0_k: &[1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096],
    exp0_l: &[
        3555, 5332, 1333, 6748, 2359, 5643, 2238, 3908, 2332, 6948, 4594, 5324, 1393,
    ],
    exp1_k: &[0, 1, 0, 0, 0, 0, 3, 67, 195, 451, 0, 963, 3011],
    exp1_l: &[0, 3555, 0, 0, 0, 0, 2666, 2057, 5586, 2864, 0, 981, 4838],
};

/// r = 12323
pub(crate) const CHAIN_R12323: InvChain = InvChain {
    exp0_k: &[
        1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192,
    ],
    exp0_l: &[
        6162, 3081, 3851, 5632, 22, 484, 119, 1838, 1742, 3106, 10650, 1608, 10157, 8816,
    ],
    exp1_k: &[0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 33, 4129],
    exp1_l: &[0, 0, 0, 0, 0, 6162, 0, 0, 0, 0, 0, 0, 242, 5717],
};

/// r = 24659
pub(crate) const CHAIN_R24659: InvChain = InvChain {
    exp0_k: &[
        1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384,
    ],
    exp0_l: &[
        12330, 6165, 7706, 3564, 2711, 1139, 15053, 1258, 4388, 20524, 9538, 6393, 10486, 1715,
        6804,
    ],
    exp1_k: &[0, 0, 0, 0, 1, 0, 17, 0, 0, 0, 0, 0, 0, 81, 8273],
    exp1_l: &[0, 0, 0, 0, 12330, 0, 13685, 0, 0, 0, 0, 0, 0, 23678, 19056],
};
