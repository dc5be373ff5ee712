use core::fmt::Debug;

use hybrid_array::{Array, ArraySize};

use crate::{
    chain::{
        CHAIN_R773, CHAIN_R1019, CHAIN_R1283, CHAIN_R2029, CHAIN_R2053, CHAIN_R2069, CHAIN_R4021,
        CHAIN_R4099, CHAIN_R7109, CHAIN_R12323, CHAIN_R24659, InvChain,
    },
    error::Error,
};

/// Number of circulant blocks in a BIKE key, `n0`
pub const N0: usize = 2;

/// Exclusive upper bound on `r`: k-squaring and reduction index arithmetic is sized for
/// `r < 2^15`.
pub const MAX_R_BITS: u32 = 1 << 15;

/// The public constants of one BIKE security level.
///
/// `d`, `t` and the threshold coefficients belong to the decoder and are only carried
/// here so that a single bundle describes a level. Inversion reads `r_bits`,
/// `block_bits` and `chain`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelParams {
    /// block length `r`, a prime for which 2 is primitive
    pub r_bits: u32,
    /// column weight `d` of each circulant block
    pub d: u32,
    /// error weight `t`
    pub t: u32,
    /// granularity the ring element storage is padded to
    pub block_bits: u32,
    /// constant term of the BGF decoder threshold
    pub threshold_coeff0: f64,
    /// syndrome-weight slope of the BGF decoder threshold
    pub threshold_coeff1: f64,
    /// floor of the BGF decoder threshold
    pub threshold_min: u32,
    /// number of random indices drawn when sampling the error vector in constant time
    pub max_rand_indices_t: u32,
    /// inversion addition chain for `r_bits`
    pub chain: InvChain,
}

impl LevelParams {
    /// `ceil(r / 8)`
    #[must_use]
    pub const fn r_bytes(&self) -> usize {
        (self.r_bits as usize).div_ceil(8)
    }

    /// `ceil(r / 64)`
    #[must_use]
    pub const fn r_qwords(&self) -> usize {
        (self.r_bits as usize).div_ceil(64)
    }

    /// `r` rounded up to a multiple of `block_bits`
    #[must_use]
    pub const fn r_padded(&self) -> usize {
        (self.r_bits as usize).div_ceil(self.block_bits as usize) * self.block_bits as usize
    }

    /// Words backing one ring element.
    #[must_use]
    pub const fn r_padded_qwords(&self) -> usize {
        self.r_padded() / 64
    }

    /// Code length `n = n0 * r`
    #[must_use]
    pub const fn n_bits(&self) -> usize {
        N0 * self.r_bits as usize
    }

    /// Number of meaningful bits in the last of the `r_qwords` words
    #[must_use]
    pub const fn last_r_qword_lead(&self) -> u32 {
        self.r_bits & 63
    }

    /// Mask of the meaningful bits in the last of the `r_qwords` words
    #[must_use]
    pub const fn last_r_qword_mask(&self) -> u64 {
        match self.last_r_qword_lead() {
            0 => u64::MAX,
            lead => (1u64 << lead) - 1,
        }
    }

    /// Mask of the meaningful bits in the last of the `r_bytes` bytes
    #[must_use]
    pub const fn last_r_byte_mask(&self) -> u8 {
        match self.r_bits & 7 {
            0 => u8::MAX,
            lead => (1u8 << lead) - 1,
        }
    }
}

/// Closed set of supported BIKE parameter sets.
///
/// Levels 1 and 3 are the BIKE round-4 parameters. The remaining levels are reduced
/// parameter sets kept for experimentation with smaller `r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SecurityLevel {
    /// r = 2053, t = 42
    Level0,
    /// BIKE level 1, r = 12323
    Level1,
    /// BIKE level 3, r = 24659
    Level3,
    /// r = 7109
    Level10,
    /// r = 773
    Level11,
    /// r = 1019
    Level12,
    /// r = 1283
    Level13,
    /// r = 2029
    Level14,
    /// r = 2053, t = 55
    Level15,
    /// r = 2069
    Level16,
    /// r = 4021
    Level17,
    /// r = 4099
    Level18,
}

impl SecurityLevel {
    /// Every supported level, in declaration order.
    pub const ALL: [SecurityLevel; 12] = [
        Self::Level0,
        Self::Level1,
        Self::Level3,
        Self::Level10,
        Self::Level11,
        Self::Level12,
        Self::Level13,
        Self::Level14,
        Self::Level15,
        Self::Level16,
        Self::Level17,
        Self::Level18,
    ];

    /// The immutable parameter bundle of this level.
    #[must_use]
    pub const fn params(self) -> LevelParams {
        match self {
            Self::Level0 => LEVEL0,
            Self::Level1 => LEVEL1,
            Self::Level3 => LEVEL3,
            Self::Level10 => LEVEL10,
            Self::Level11 => LEVEL11,
            Self::Level12 => LEVEL12,
            Self::Level13 => LEVEL13,
            Self::Level14 => LEVEL14,
            Self::Level15 => LEVEL15,
            Self::Level16 => LEVEL16,
            Self::Level17 => LEVEL17,
            Self::Level18 => LEVEL18,
        }
    }

    /// Block length `r` of this level.
    #[must_use]
    pub const fn r_bits(self) -> u32 {
        self.params().r_bits
    }
}

impl TryFrom<u32> for SecurityLevel {
    type Error = Error;

    /// Looks a level up by `r`. Levels 0 and 15 share `r = 2053`; level 0 is returned.
    fn try_from(r_bits: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|level| level.r_bits() == r_bits)
            .ok_or(Error::UnsupportedR(r_bits))
    }
}

const LEVEL0: LevelParams = LevelParams {
    r_bits: 2053,
    d: 23,
    t: 42,
    block_bits: 4096,
    threshold_coeff0: 5.9823,
    threshold_coeff1: 0.0176796,
    threshold_min: 12,
    max_rand_indices_t: 271,
    chain: CHAIN_R2053,
};

const LEVEL1: LevelParams = LevelParams {
    r_bits: 12323,
    d: 71,
    t: 134,
    block_bits: 16384,
    threshold_coeff0: 13.530,
    threshold_coeff1: 0.0069722,
    threshold_min: 36,
    max_rand_indices_t: 271,
    chain: CHAIN_R12323,
};

const LEVEL3: LevelParams = LevelParams {
    r_bits: 24659,
    d: 103,
    t: 199,
    block_bits: 32768,
    threshold_coeff0: 15.2588,
    threshold_coeff1: 0.005265,
    threshold_min: 52,
    max_rand_indices_t: 373,
    chain: CHAIN_R24659,
};

const LEVEL10: LevelParams = LevelParams {
    r_bits: 7109,
    d: 41,
    t: 42,
    block_bits: 8192,
    threshold_coeff0: 13.530,
    threshold_coeff1: 0.0069722,
    threshold_min: 21,
    max_rand_indices_t: 271,
    chain: CHAIN_R7109,
};

const LEVEL11: LevelParams = LevelParams {
    r_bits: 773,
    d: 9,
    t: 34,
    block_bits: 1024,
    threshold_coeff0: 3.98287671232877,
    threshold_coeff1: 0.0171232876712329,
    threshold_min: 5,
    max_rand_indices_t: 271,
    chain: CHAIN_R773,
};

const LEVEL12: LevelParams = LevelParams {
    r_bits: 1019,
    d: 13,
    t: 39,
    block_bits: 1024,
    threshold_coeff0: 5.98516949152542,
    threshold_coeff1: 0.0148305084745763,
    threshold_min: 7,
    max_rand_indices_t: 271,
    chain: CHAIN_R1019,
};

const LEVEL13: LevelParams = LevelParams {
    r_bits: 1283,
    d: 15,
    t: 43,
    block_bits: 2048,
    threshold_coeff0: 5.98664440734558,
    threshold_coeff1: 0.0133555926544240,
    threshold_min: 8,
    max_rand_indices_t: 271,
    chain: CHAIN_R1283,
};

const LEVEL14: LevelParams = LevelParams {
    r_bits: 2029,
    d: 21,
    t: 54,
    block_bits: 2048,
    threshold_coeff0: 6.98743961352657,
    threshold_coeff1: 0.0125603864734300,
    threshold_min: 11,
    max_rand_indices_t: 271,
    chain: CHAIN_R2029,
};

const LEVEL15: LevelParams = LevelParams {
    r_bits: 2053,
    d: 23,
    t: 55,
    block_bits: 4096,
    threshold_coeff0: 7.98765432098765,
    threshold_coeff1: 0.0123456790123457,
    threshold_min: 12,
    max_rand_indices_t: 271,
    chain: CHAIN_R2053,
};

const LEVEL16: LevelParams = LevelParams {
    r_bits: 2069,
    d: 23,
    t: 55,
    block_bits: 4096,
    threshold_coeff0: 7.98679577464789,
    threshold_coeff1: 0.0132042253521127,
    threshold_min: 12,
    max_rand_indices_t: 271,
    chain: CHAIN_R2069,
};

const LEVEL17: LevelParams = LevelParams {
    r_bits: 4021,
    d: 35,
    t: 76,
    block_bits: 4096,
    threshold_coeff0: 8.98932536293766,
    threshold_coeff1: 0.0106746370623399,
    threshold_min: 18,
    max_rand_indices_t: 271,
    chain: CHAIN_R4021,
};

const LEVEL18: LevelParams = LevelParams {
    r_bits: 4099,
    d: 35,
    t: 77,
    block_bits: 8192,
    threshold_coeff0: 8.98948254101809,
    threshold_coeff1: 0.0105174589819100,
    threshold_min: 18,
    max_rand_indices_t: 271,
    chain: CHAIN_R4099,
};

// A level whose table does not belong to its r, or whose r is out of range, fails the build.
const _: () = {
    let mut i = 0;
    while i < SecurityLevel::ALL.len() {
        let p = SecurityLevel::ALL[i].params();
        assert!(p.r_bits < MAX_R_BITS, "r too large for inversion");
        assert!(p.r_bits % 2 == 1, "r must be an odd prime");
        assert!(
            p.block_bits % 64 == 0,
            "block_bits must be a whole number of words"
        );
        assert!(p.r_padded() >= p.r_bits as usize);
        assert!(
            p.chain.matches(p.r_bits),
            "addition chain does not match r"
        );
        i += 1;
    }
};

/// BIKE parameter set trait, one implementation per [`SecurityLevel`].
///
/// Everything an inversion needs is a compile-time constant of the implementing type, so
/// the branches taken inside the engine depend only on the parameter set.
pub trait ParameterSet: Default + Clone + Copy + Debug + PartialEq + Eq + 'static {
    /// The level this type stands for
    const LEVEL: SecurityLevel;

    /// Constants of [`Self::LEVEL`]
    const PARAMS: LevelParams = Self::LEVEL.params();

    /// block length `r`
    const R_BITS: usize = Self::PARAMS.r_bits as usize;

    /// `ceil(r / 8)`, the size of an encoded ring element
    const R_BYTES: usize = Self::PARAMS.r_bytes();

    /// `ceil(r / 64)`, words holding meaningful bits
    const R_QWORDS: usize = Self::PARAMS.r_qwords();

    /// words backing a ring element, including padding
    const R_PADDED_QWORDS: usize = Self::PARAMS.r_padded_qwords();

    /// mask of the meaningful bits of word `R_QWORDS - 1`
    const LAST_R_QWORD_MASK: u64 = Self::PARAMS.last_r_qword_mask();

    /// mask of the meaningful bits of byte `R_BYTES - 1`
    const LAST_R_BYTE_MASK: u8 = Self::PARAMS.last_r_byte_mask();

    /// inversion addition chain for `r`
    const CHAIN: InvChain = Self::PARAMS.chain;

    /// `R_PADDED / 64`
    type RPaddedQwords: ArraySize;

    /// `2 * R_PADDED / 64`, holds an unreduced product
    type DblRPaddedQwords: ArraySize;

    /// `4 * R_PADDED / 64`, Karatsuba scratch for one multiplication
    type MulScratchQwords: ArraySize;
}

/// Words of a ring element
pub type PadRWords<P> = Array<u64, <P as ParameterSet>::RPaddedQwords>;

/// Words of an unreduced product
pub type DblPadRWords<P> = Array<u64, <P as ParameterSet>::DblRPaddedQwords>;

/// Words of multiplication scratch
pub type MulScratchWords<P> = Array<u64, <P as ParameterSet>::MulScratchQwords>;
