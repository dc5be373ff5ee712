#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//!
//! # Security Warning
//!
//! **DO NOT USE THIS LIBRARY IN PRODUCTION.**
//!
//! This is an educational implementation for learning and experimentation.
//! It has not been audited and provides no security guarantees.
//!
//! # Usage
//!
//! ```
//! use bikinv::{PadR, gf2x_mod_inv, gf2x_mod_mul};
//! use bikinv::level11::Level11Params;
//!
//! // 1 + x + x^2, odd weight and not all-ones, so a unit
//! let mut bytes = [0u8; 97];
//! bytes[0] = 0b111;
//! let a = PadR::<Level11Params>::from_le_bytes(&bytes).unwrap();
//!
//! let a_inv = gf2x_mod_inv(&a);
//! assert_eq!(gf2x_mod_mul(&a, &a_inv), PadR::one());
//! ```

#[cfg(test)]
mod test_util;

/// Addition chains
pub mod chain;

/// Crate errors
pub mod error;

/// Field primitives
mod gf2x;

/// Inversion engine
mod inv;

/// Parameter sets
mod param;

/// Ring elements
mod ring;

#[cfg(test)]
extern crate std;

pub use chain::InvChain;
pub use error::Error;
pub use gf2x::{Gf2x, PortableGf2x, gf2x_mod_mul};
pub use inv::{InvScratch, gf2x_mod_inv, gf2x_mod_inv_with};
pub use param::{
    DblPadRWords, LevelParams, MAX_R_BITS, MulScratchWords, N0, PadRWords, ParameterSet,
    SecurityLevel,
};
pub use ring::{DblPadR, PadR};

/// Declares the public module and zero-sized [`ParameterSet`] of one level.
///
/// The three sizes are `R_PADDED / 64`, twice that, and four times that. A mismatch
/// with the level's `block_bits` fails the build.
macro_rules! parameter_set {
    ($(#[$doc:meta])* $module:ident, $name:ident, $level:ident, $words:ident, $dbl:ident, $scratch:ident) => {
        $(#[$doc])*
        pub mod $module {
            use super::{ParameterSet, SecurityLevel};
            use hybrid_array::typenum::{$dbl, $scratch, $words, Unsigned};

            #[doc = concat!("[`SecurityLevel::", stringify!($level), "`] parameter set implementation")]
            #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
            pub struct $name;

            impl ParameterSet for $name {
                const LEVEL: SecurityLevel = SecurityLevel::$level;

                type RPaddedQwords = $words;
                type DblRPaddedQwords = $dbl;
                type MulScratchQwords = $scratch;
            }

            const _: () = {
                let qwords = <$name as ParameterSet>::R_PADDED_QWORDS;
                assert!(<$words as Unsigned>::USIZE == qwords);
                assert!(<$dbl as Unsigned>::USIZE == 2 * qwords);
                assert!(<$scratch as Unsigned>::USIZE == 4 * qwords);
            };
        }
    };
}

parameter_set!(
    /// Reduced parameter set, r = 2053, t = 42
    level0, Level0Params, Level0, U64, U128, U256
);
parameter_set!(
    /// BIKE level 1 (NIST Security Level 1), r = 12323
    level1, Level1Params, Level1, U256, U512, U1024
);
parameter_set!(
    /// BIKE level 3 (NIST Security Level 3), r = 24659
    level3, Level3Params, Level3, U512, U1024, U2048
);
parameter_set!(
    /// Reduced parameter set, r = 7109
    level10, Level10Params, Level10, U128, U256, U512
);
parameter_set!(
    /// Reduced parameter set, r = 773
    level11, Level11Params, Level11, U16, U32, U64
);
parameter_set!(
    /// Reduced parameter set, r = 1019
    level12, Level12Params, Level12, U16, U32, U64
);
parameter_set!(
    /// Reduced parameter set, r = 1283
    level13, Level13Params, Level13, U32, U64, U128
);
parameter_set!(
    /// Reduced parameter set, r = 2029
    level14, Level14Params, Level14, U32, U64, U128
);
parameter_set!(
    /// Reduced parameter set, r = 2053, t = 55
    level15, Level15Params, Level15, U64, U128, U256
);
parameter_set!(
    /// Reduced parameter set, r = 2069
    level16, Level16Params, Level16, U64, U128, U256
);
parameter_set!(
    /// Reduced parameter set, r = 4021
    level17, Level17Params, Level17, U64, U128, U256
);
parameter_set!(
    /// Reduced parameter set, r = 4099
    level18, Level18Params, Level18, U128, U256, U512
);
