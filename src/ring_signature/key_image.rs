// Copyright (c) 2018-2025 The Botho Foundation

use super::{hash_to_point, inv_eight, EdwardsPoint, Error, PublicKey, Scalar};
use alloc::vec::Vec;
use core::fmt;
use curve25519_dalek::edwards::CompressedEdwardsY;
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The "image" of a stealth-address secret `x`: `I = x * Hp(P)`, where `P`
/// is the stealth address `x` controls.
///
/// The image is deterministic in `(x, P)`, so any two signatures spending
/// the same output carry the same value — the scheme's linking tag.
///
/// The same type carries the auxiliary per-layer key images (`K1`, `K2`,
/// `K3`) that signatures embed at eighth scale; see [`KeyImage::div8`].
#[derive(Clone, Copy, Eq, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct KeyImage {
    /// The curve point corresponding to the key image
    pub point: CompressedEdwardsY,
}

impl KeyImage {
    /// Compute the key image `secret * Hp(stealth_address)`.
    pub fn new(secret: &Scalar, stealth_address: &PublicKey) -> Self {
        let point = secret * hash_to_point(stealth_address);
        Self {
            point: point.compress(),
        }
    }

    /// Build the eighth-scale auxiliary key image `(1/8 * secret) * base`,
    /// returning it together with the full-scale point a verifier
    /// reconstructs by multiplying the stored encoding by 8.
    pub fn div8(secret: &Scalar, base: &EdwardsPoint) -> (Self, EdwardsPoint) {
        let eighth = (inv_eight() * secret) * base;
        let image = Self {
            point: eighth.compress(),
        };
        (image, eighth.mul_by_cofactor())
    }

    /// View the underlying encoding as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.point.as_bytes()
    }

    /// Copies `self` into a new Vec.
    pub fn to_vec(&self) -> Vec<u8> {
        self.point.as_bytes().to_vec()
    }

    /// Decompress to a curve point. Subgroup membership is the caller's
    /// concern: verifiers check torsion on linking tags and clear the
    /// cofactor on auxiliary images.
    pub fn decompress(&self) -> Result<EdwardsPoint, Error> {
        self.point.decompress().ok_or(Error::InvalidKeyImage)
    }
}

impl From<[u8; 32]> for KeyImage {
    fn from(src: [u8; 32]) -> Self {
        Self {
            point: CompressedEdwardsY(src),
        }
    }
}

impl TryFrom<&[u8]> for KeyImage {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Error> {
        let point =
            CompressedEdwardsY::from_slice(src).map_err(|_e| Error::LengthMismatch(src.len(), 32))?;
        Ok(Self { point })
    }
}

impl AsRef<[u8; 32]> for KeyImage {
    fn as_ref(&self) -> &[u8; 32] {
        self.as_bytes()
    }
}

impl fmt::Debug for KeyImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyImage(")?;
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for KeyImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
