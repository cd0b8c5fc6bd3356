// Copyright (c) 2018-2025 The Botho Foundation

//! The transcript absorbed by every CLSAG hash derivation.

use super::{EdwardsPoint, KeyImage, PublicKey, Scalar};
use alloc::vec::Vec;
use blake2::{digest::consts::U32, Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// A linear absorb-then-squeeze transcript over 32-byte items.
///
/// Each squeeze hashes exactly the items absorbed since the previous
/// squeeze and drains them, leaving the transcript ready for the next
/// segment. One transcript therefore serves a whole signing or
/// verification call: the input segment, then one segment per aggregation
/// coefficient, then one per challenge round.
pub struct Transcript {
    pending: Vec<u8>,
}

impl Transcript {
    /// Create a transcript with room reserved for `items` 32-byte items.
    pub fn with_item_capacity(items: usize) -> Self {
        Self {
            pending: Vec::with_capacity(items * 32),
        }
    }

    fn add_bytes(&mut self, bytes: &[u8; 32]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Absorb a scalar's canonical encoding.
    pub fn add_scalar(&mut self, scalar: &Scalar) {
        self.add_bytes(scalar.as_bytes());
    }

    /// Absorb a point's compressed encoding.
    pub fn add_point(&mut self, point: &EdwardsPoint) {
        self.add_bytes(&point.compress().to_bytes());
    }

    /// Absorb a public key's raw 32 bytes.
    pub fn add_pub_key(&mut self, key: &PublicKey) {
        self.add_bytes(key.as_bytes());
    }

    /// Absorb a key image's raw 32 bytes.
    pub fn add_key_image(&mut self, key_image: &KeyImage) {
        self.add_bytes(key_image.as_bytes());
    }

    /// Absorb an opaque 32-byte digest.
    pub fn add_hash(&mut self, hash: &[u8; 32]) {
        self.add_bytes(hash);
    }

    /// Absorb a 32-byte domain-separation tag.
    pub fn add_tag(&mut self, tag: &[u8; 32]) {
        self.add_bytes(tag);
    }

    /// Squeeze the pending segment into an unreduced 32-byte digest.
    pub fn squeeze_hash(&mut self) -> [u8; 32] {
        let digest = Blake2b256::digest(&self.pending);
        self.pending.clear();
        digest.into()
    }

    /// Squeeze the pending segment into a scalar (the digest reduced
    /// modulo the group order).
    pub fn squeeze_scalar(&mut self) -> Scalar {
        Scalar::from_bytes_mod_order(self.squeeze_hash())
    }

    /// Derive one layer's aggregation coefficient:
    /// `μ = reduce(H(tag ‖ input_hash))`.
    pub fn aggregation_coefficient(&mut self, tag: &[u8; 32], input_hash: &[u8; 32]) -> Scalar {
        self.add_tag(tag);
        self.add_hash(input_hash);
        self.squeeze_scalar()
    }
}
