// Copyright (c) 2018-2025 The Botho Foundation

//! Group-level primitives shared by the CLSAG schemes: the generators, the
//! hash-to-point map, and the wrapper types used in signatures.

#![allow(non_snake_case)]

pub use curve25519_dalek::{edwards::EdwardsPoint, scalar::Scalar};

mod clsag_gg;
mod clsag_ggxg;
mod curve_scalar;
mod error;
mod key_image;
mod public_key;
mod transcript;

pub use self::{
    clsag_gg::{ClsagGG, RingMember},
    clsag_ggxg::{ClsagGGXG, ExtendedRingMember},
    curve_scalar::CurveScalar,
    error::Error,
    key_image::KeyImage,
    public_key::PublicKey,
    transcript::Transcript,
};

use crate::domain_separators::{HASH_TO_POINT_DOMAIN_TAG, X_GENERATOR_DOMAIN_TAG};
use blake2::{Blake2b512, Digest};
use curve25519_dalek::{
    constants::{ED25519_BASEPOINT_COMPRESSED, ED25519_BASEPOINT_POINT},
    edwards::CompressedEdwardsY,
    traits::IsIdentity,
};

/// The primary generator `G`, used by every `G`-side layer and by the
/// amount commitments' blinding terms.
pub const G: EdwardsPoint = ED25519_BASEPOINT_POINT;

/// The scalar constant `1/8 mod ℓ`, used to produce eighth-scale ("div8")
/// point encodings. A point stored at eighth scale is unambiguously placed
/// in the prime-order subgroup once a consumer multiplies it back by 8.
pub fn inv_eight() -> Scalar {
    Scalar::from(8u8).invert()
}

/// The secondary generator `X`, used by the GGXG scheme's layer 2.
///
/// `X` is derived by hashing the encoded basepoint under its own domain
/// tag, so no one knows a discrete-log relation between `X` and `G`.
pub fn generator_x() -> EdwardsPoint {
    let mut hasher = Blake2b512::new();
    hasher.update(X_GENERATOR_DOMAIN_TAG);
    hasher.update(ED25519_BASEPOINT_COMPRESSED.as_bytes());
    digest_to_point(hasher.finalize().into())
}

/// Hashes a public key to a point of the prime-order subgroup.
///
/// This is the key-image base map: a signer's linking tag is
/// `x * hash_to_point(P)` for stealth address `P` and secret `x`.
pub fn hash_to_point(public_key: &PublicKey) -> EdwardsPoint {
    let mut hasher = Blake2b512::new();
    hasher.update(HASH_TO_POINT_DOMAIN_TAG);
    hasher.update(public_key.as_bytes());
    digest_to_point(hasher.finalize().into())
}

// Maps a digest to a non-identity point of the prime-order subgroup:
// interpret the leading 32 bytes as a compressed point, re-hash until
// decompression succeeds, then clear the cofactor.
fn digest_to_point(digest: [u8; 64]) -> EdwardsPoint {
    let mut digest = digest;
    loop {
        let mut candidate = [0u8; 32];
        candidate.copy_from_slice(&digest[..32]);
        if let Some(point) = CompressedEdwardsY(candidate).decompress() {
            let point = point.mul_by_cofactor();
            if !point.is_identity() {
                return point;
            }
        }
        let mut hasher = Blake2b512::new();
        hasher.update(digest);
        digest = hasher.finalize().into();
    }
}
