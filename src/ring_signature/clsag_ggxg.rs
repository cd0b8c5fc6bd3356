// Copyright (c) 2018-2025 The Botho Foundation

//! CLSAG-GGXG: the four-layer ring signature over the generators `G` and
//! `X`.
//!
//! Layers 0, 1 and 3 live over `G` and bind the stealth-address key, the
//! amount-commitment balance and the concealing-point relation; layer 2
//! lives over `X` and binds the extended-commitment balance
//! `T - A - Q = x * X`. The `G`-side layers share one response per ring
//! member and the `X`-side layer gets its own, so a signature carries two
//! response vectors.

use alloc::vec::Vec;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    domain_separators::{
        CLSAG_GGXG_CHALLENGE_DOMAIN_TAG, CLSAG_GGXG_LAYER_0_DOMAIN_TAG,
        CLSAG_GGXG_LAYER_1_DOMAIN_TAG, CLSAG_GGXG_LAYER_2_DOMAIN_TAG,
        CLSAG_GGXG_LAYER_3_DOMAIN_TAG,
    },
    ring_signature::{
        generator_x, hash_to_point, inv_eight, CurveScalar, EdwardsPoint, Error, KeyImage,
        PublicKey, Scalar, Transcript, G,
    },
};

/// One ring member's public data, extended with the concealing point used
/// by layer 3.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ExtendedRingMember {
    /// The one-time output key a signer may control.
    pub stealth_address: PublicKey,

    /// The output's amount commitment, stored at eighth scale.
    pub amount_commitment: PublicKey,

    /// The output's concealing point, stored at eighth scale.
    pub concealing_point: PublicKey,
}

/// CLSAG-GGXG signature for a ring of extended members.
#[derive(Clone, Debug, Eq, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ClsagGGXG {
    /// The initial challenge `c[0]`.
    pub c_zero: CurveScalar,

    /// `G`-side responses; one per ring member, shared by layers 0, 1, 3.
    pub g_responses: Vec<CurveScalar>,

    /// `X`-side responses; one per ring member, for layer 2.
    pub x_responses: Vec<CurveScalar>,

    /// Auxiliary key image `K1 = f * Hp(P)` for the commitment layer,
    /// stored at eighth scale.
    pub commitment_key_image: KeyImage,

    /// Auxiliary key image `K2 = x * Hp(P)` for the `X`-side extension
    /// layer, stored at eighth scale.
    pub extension_key_image: KeyImage,

    /// Auxiliary key image `K3 = q * Hp(P)` for the concealing layer,
    /// stored at eighth scale.
    pub concealing_key_image: KeyImage,
}

impl ClsagGGXG {
    /// Sign a ring of extended members.
    ///
    /// # Arguments
    /// * `message` - Message to be signed.
    /// * `ring` - The ring of candidate members.
    /// * `pseudo_output_commitment` - Pseudo-output amount commitment, at
    ///   full scale.
    /// * `extended_commitment` - Extended amount commitment `T`, at full
    ///   scale.
    /// * `key_image` - The linking tag `stealth_secret * Hp(P)`.
    /// * `stealth_secret` - Layer 0: the real member's one-time secret key.
    /// * `commitment_secret` - Layer 1: `f` with
    ///   `8 * amount_commitment - pseudo_output_commitment = f * G`.
    /// * `extension_secret` - Layer 2: `x` with
    ///   `T - 8 * amount_commitment - 8 * concealing_point = x * X`.
    /// * `concealing_secret` - Layer 3: `q` with
    ///   `8 * concealing_point = q * G`.
    /// * `secret_index` - The index in the ring of the real member.
    /// * `rng` - Cryptographic RNG.
    #[allow(clippy::too_many_arguments)]
    pub fn sign<R: CryptoRngCore>(
        message: &[u8; 32],
        ring: &[ExtendedRingMember],
        pseudo_output_commitment: &EdwardsPoint,
        extended_commitment: &EdwardsPoint,
        key_image: &KeyImage,
        stealth_secret: &Scalar,
        commitment_secret: &Scalar,
        extension_secret: &Scalar,
        concealing_secret: &Scalar,
        secret_index: usize,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let ring_size = ring.len();

        if ring_size == 0 {
            return Err(Error::EmptyRing);
        }
        if secret_index >= ring_size {
            return Err(Error::IndexOutOfBounds);
        }

        let ki_base = hash_to_point(&ring[secret_index].stealth_address);
        let ki_point = key_image.decompress()?;
        if stealth_secret * ki_base != ki_point {
            return Err(Error::KeyImageMismatch);
        }

        // Per-layer auxiliary key images, embedded at eighth scale.
        let (commitment_key_image, K1) = KeyImage::div8(commitment_secret, &ki_base);
        let (extension_key_image, K2) = KeyImage::div8(extension_secret, &ki_base);
        let (concealing_key_image, K3) = KeyImage::div8(concealing_secret, &ki_base);

        let (mut transcript, input_hash, mu) = input_transcript(
            message,
            ring,
            &PublicKey::from(&(inv_eight() * pseudo_output_commitment)),
            &PublicKey::from(&(inv_eight() * extended_commitment)),
            key_image,
        );

        let (g_aggregate_keys, x_aggregate_keys) =
            aggregate_ring_keys(ring, pseudo_output_commitment, extended_commitment, &mu)?;

        // G side carries layers 0, 1 and 3; the X side carries layer 2
        // alone, so K2 stays off the G-side key image.
        let mut g_aggregate_secret =
            mu[0] * stealth_secret + mu[1] * commitment_secret + mu[3] * concealing_secret;
        let mut x_aggregate_secret = mu[2] * extension_secret;
        let g_aggregate_key_image = mu[0] * ki_point + mu[1] * K1 + mu[3] * K3;
        let x_aggregate_key_image = mu[2] * K2;

        let X = generator_x();

        // Commit to the real member with independent nonces per side.
        let mut alpha_g = Scalar::random(rng);
        let mut alpha_x = Scalar::random(rng);
        let mut c_prev = round_challenge(
            &mut transcript,
            &input_hash,
            &(alpha_g * G),
            &(alpha_g * ki_base),
            &(alpha_x * X),
            &(alpha_x * ki_base),
        );

        let mut g_responses: Vec<CurveScalar> = (0..ring_size)
            .map(|_| CurveScalar::from_random(rng))
            .collect();
        let mut x_responses: Vec<CurveScalar> = (0..ring_size)
            .map(|_| CurveScalar::from_random(rng))
            .collect();

        let mut c_zero = CurveScalar::default();
        for i in (1..ring_size).map(|j| (secret_index + j) % ring_size) {
            if i == 0 {
                c_zero = CurveScalar::from(c_prev);
            }
            let Hp_i = hash_to_point(&ring[i].stealth_address);
            c_prev = round_challenge(
                &mut transcript,
                &input_hash,
                &(g_responses[i].scalar * G + c_prev * g_aggregate_keys[i]),
                &(g_responses[i].scalar * Hp_i + c_prev * g_aggregate_key_image),
                &(x_responses[i].scalar * X + c_prev * x_aggregate_keys[i]),
                &(x_responses[i].scalar * Hp_i + c_prev * x_aggregate_key_image),
            );
        }
        if secret_index == 0 {
            c_zero = CurveScalar::from(c_prev);
        }

        // Close the ring on both sides.
        g_responses[secret_index] = CurveScalar::from(alpha_g - c_prev * g_aggregate_secret);
        x_responses[secret_index] = CurveScalar::from(alpha_x - c_prev * x_aggregate_secret);

        alpha_g.zeroize();
        alpha_x.zeroize();
        g_aggregate_secret.zeroize();
        x_aggregate_secret.zeroize();

        Ok(ClsagGGXG {
            c_zero,
            g_responses,
            x_responses,
            commitment_key_image,
            extension_key_image,
            concealing_key_image,
        })
    }

    /// Verify a CLSAG-GGXG signature.
    ///
    /// # Arguments
    /// * `message` - Message that was signed.
    /// * `ring` - The ring of candidate members.
    /// * `pseudo_output_commitment` - The pseudo-output amount commitment
    ///   in its eighth-scale encoding.
    /// * `extended_commitment` - The extended amount commitment `T` in its
    ///   eighth-scale encoding.
    /// * `key_image` - The linking tag the signature spends.
    pub fn verify(
        &self,
        message: &[u8; 32],
        ring: &[ExtendedRingMember],
        pseudo_output_commitment: &PublicKey,
        extended_commitment: &PublicKey,
        key_image: &KeyImage,
    ) -> Result<(), Error> {
        let ring_size = ring.len();

        if ring_size == 0 {
            return Err(Error::EmptyRing);
        }
        if self.g_responses.len() != ring_size {
            return Err(Error::LengthMismatch(self.g_responses.len(), ring_size));
        }
        if self.x_responses.len() != ring_size {
            return Err(Error::LengthMismatch(self.x_responses.len(), ring_size));
        }

        let ki_point = key_image.decompress()?;
        if !ki_point.is_torsion_free() {
            return Err(Error::InvalidKeyImage);
        }

        let pseudo_point = pseudo_output_commitment.decompress()?.mul_by_cofactor();
        let extended_point = extended_commitment.decompress()?.mul_by_cofactor();

        let (mut transcript, input_hash, mu) = input_transcript(
            message,
            ring,
            pseudo_output_commitment,
            extended_commitment,
            key_image,
        );

        let (g_aggregate_keys, x_aggregate_keys) =
            aggregate_ring_keys(ring, &pseudo_point, &extended_point, &mu)?;

        let K1 = self.commitment_key_image.decompress()?.mul_by_cofactor();
        let K2 = self.extension_key_image.decompress()?.mul_by_cofactor();
        let K3 = self.concealing_key_image.decompress()?.mul_by_cofactor();
        let g_aggregate_key_image = mu[0] * ki_point + mu[1] * K1 + mu[3] * K3;
        let x_aggregate_key_image = mu[2] * K2;

        let X = generator_x();

        let mut c_prev = self.c_zero.scalar;
        for (i, member) in ring.iter().enumerate() {
            let Hp_i = hash_to_point(&member.stealth_address);
            c_prev = round_challenge(
                &mut transcript,
                &input_hash,
                &(self.g_responses[i].scalar * G + c_prev * g_aggregate_keys[i]),
                &(self.g_responses[i].scalar * Hp_i + c_prev * g_aggregate_key_image),
                &(self.x_responses[i].scalar * X + c_prev * x_aggregate_keys[i]),
                &(self.x_responses[i].scalar * Hp_i + c_prev * x_aggregate_key_image),
            );
        }

        if c_prev == self.c_zero.scalar {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }
}

/// The input segment shared by signer and verifier: message, ring, the
/// eighth-scale pseudo-output and extended commitments, and the key image.
/// Returns the transcript, the unreduced input hash, and the four
/// aggregation coefficients.
fn input_transcript(
    message: &[u8; 32],
    ring: &[ExtendedRingMember],
    pseudo_output_commitment: &PublicKey,
    extended_commitment: &PublicKey,
    key_image: &KeyImage,
) -> (Transcript, [u8; 32], [Scalar; 4]) {
    let mut transcript = Transcript::with_item_capacity(4 + 3 * ring.len());
    transcript.add_hash(message);
    for member in ring {
        transcript.add_pub_key(&member.stealth_address);
        transcript.add_pub_key(&member.amount_commitment);
        transcript.add_pub_key(&member.concealing_point);
    }
    transcript.add_pub_key(pseudo_output_commitment);
    transcript.add_pub_key(extended_commitment);
    transcript.add_key_image(key_image);
    let input_hash = transcript.squeeze_hash();

    let mu = [
        transcript.aggregation_coefficient(CLSAG_GGXG_LAYER_0_DOMAIN_TAG, &input_hash),
        transcript.aggregation_coefficient(CLSAG_GGXG_LAYER_1_DOMAIN_TAG, &input_hash),
        transcript.aggregation_coefficient(CLSAG_GGXG_LAYER_2_DOMAIN_TAG, &input_hash),
        transcript.aggregation_coefficient(CLSAG_GGXG_LAYER_3_DOMAIN_TAG, &input_hash),
    ];

    (transcript, input_hash, mu)
}

/// Aggregate public keys for both sides:
/// `Wg[i] = μ₀ * P[i] + μ₁ * (A[i] - C') + μ₃ * Q[i]` and
/// `Wx[i] = μ₂ * (T - A[i] - Q[i])`, with `A[i]`, `Q[i]` the ring
/// commitments brought to full scale.
fn aggregate_ring_keys(
    ring: &[ExtendedRingMember],
    pseudo_output_commitment: &EdwardsPoint,
    extended_commitment: &EdwardsPoint,
    mu: &[Scalar; 4],
) -> Result<(Vec<EdwardsPoint>, Vec<EdwardsPoint>), Error> {
    let mut g_keys = Vec::with_capacity(ring.len());
    let mut x_keys = Vec::with_capacity(ring.len());
    for member in ring {
        let stealth_address = member.stealth_address.decompress()?;
        let A_i = member.amount_commitment.decompress()?.mul_by_cofactor();
        let Q_i = member.concealing_point.decompress()?.mul_by_cofactor();
        g_keys.push(
            mu[0] * stealth_address
                + mu[1] * (A_i - pseudo_output_commitment)
                + mu[3] * Q_i,
        );
        x_keys.push(mu[2] * (extended_commitment - A_i - Q_i));
    }
    Ok((g_keys, x_keys))
}

/// One challenge-chain round over the four per-member commitments:
/// `c = H(tag ‖ input_hash ‖ Lg ‖ Rg ‖ Lx ‖ Rx)`.
fn round_challenge(
    transcript: &mut Transcript,
    input_hash: &[u8; 32],
    Lg: &EdwardsPoint,
    Rg: &EdwardsPoint,
    Lx: &EdwardsPoint,
    Rx: &EdwardsPoint,
) -> Scalar {
    transcript.add_tag(CLSAG_GGXG_CHALLENGE_DOMAIN_TAG);
    transcript.add_hash(input_hash);
    transcript.add_point(Lg);
    transcript.add_point(Rg);
    transcript.add_point(Lx);
    transcript.add_point(Rx);
    transcript.squeeze_scalar()
}
