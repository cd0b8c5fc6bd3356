// Copyright (c) 2018-2022 The Botho Foundation

//! Compressed public keys for ring members and eighth-scale commitments.

use super::{EdwardsPoint, Error};
use core::fmt;
use curve25519_dalek::edwards::CompressedEdwardsY;
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A compressed Edwards point in its 32-byte canonical encoding.
///
/// Used for the stealth addresses, amount commitments and concealing points
/// of ring members, and for the eighth-scale commitment encodings a
/// verifier receives.
#[derive(Clone, Copy, Eq, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PublicKey {
    /// The compressed curve point
    pub point: CompressedEdwardsY,
}

impl PublicKey {
    /// View the underlying encoding as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.point.as_bytes()
    }

    /// Decompress to a curve point.
    ///
    /// No subgroup check is performed here; callers that need a
    /// prime-order point multiply by the cofactor or check torsion
    /// themselves.
    pub fn decompress(&self) -> Result<EdwardsPoint, Error> {
        self.point.decompress().ok_or(Error::InvalidCurvePoint)
    }
}

impl From<&EdwardsPoint> for PublicKey {
    fn from(point: &EdwardsPoint) -> Self {
        Self {
            point: point.compress(),
        }
    }
}

impl From<[u8; 32]> for PublicKey {
    fn from(src: [u8; 32]) -> Self {
        Self {
            point: CompressedEdwardsY(src),
        }
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Error> {
        let point =
            CompressedEdwardsY::from_slice(src).map_err(|_e| Error::LengthMismatch(src.len(), 32))?;
        Ok(Self { point })
    }
}

impl AsRef<[u8; 32]> for PublicKey {
    fn as_ref(&self) -> &[u8; 32] {
        self.as_bytes()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(")?;
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
