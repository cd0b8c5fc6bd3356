// Copyright (c) 2018-2022 The Botho Foundation

//! A canonical-encoding wrapper around a curve scalar, used for the
//! challenge and response fields of signatures.

use super::{Error, Scalar};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A curve scalar carried inside a signature.
///
/// Constructing one from bytes enforces the canonical little-endian
/// encoding, so a decoded signature can never smuggle an unreduced scalar
/// into the challenge chain.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct CurveScalar {
    /// The wrapped scalar
    pub scalar: Scalar,
}

impl CurveScalar {
    /// Sample a uniformly random scalar.
    pub fn from_random<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self {
            scalar: Scalar::random(rng),
        }
    }

    /// The canonical 32-byte encoding.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.scalar.as_bytes()
    }
}

impl From<Scalar> for CurveScalar {
    fn from(scalar: Scalar) -> Self {
        Self { scalar }
    }
}

impl AsRef<[u8; 32]> for CurveScalar {
    fn as_ref(&self) -> &[u8; 32] {
        self.as_bytes()
    }
}

impl TryFrom<&[u8]> for CurveScalar {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; 32] = src
            .try_into()
            .map_err(|_e| Error::LengthMismatch(src.len(), 32))?;
        Option::<Scalar>::from(Scalar::from_canonical_bytes(bytes))
            .map(Self::from)
            .ok_or(Error::InvalidCurveScalar)
    }
}

impl ConstantTimeEq for CurveScalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.scalar.ct_eq(&other.scalar)
    }
}
