// Copyright (c) 2018-2025 The Botho Foundation

//! CLSAG-GG: the two-layer ring signature over the basepoint `G`.
//!
//! Layer 0 proves knowledge of the secret key behind one ring member's
//! stealth address; layer 1 proves that the pseudo-output amount commitment
//! balances against that member's amount commitment. Both Schnorr relations
//! are collapsed into a single ring argument by the hash-derived
//! coefficients `μ₀`, `μ₁`.
//!
//! Reference: "Concise Linkable Ring Signatures and Forgery Against
//! Adversarial Keys" <https://eprint.iacr.org/2019/654>

use alloc::vec::Vec;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    domain_separators::{
        CLSAG_GG_CHALLENGE_DOMAIN_TAG, CLSAG_GG_LAYER_0_DOMAIN_TAG, CLSAG_GG_LAYER_1_DOMAIN_TAG,
    },
    ring_signature::{
        hash_to_point, inv_eight, CurveScalar, EdwardsPoint, Error, KeyImage, PublicKey, Scalar,
        Transcript, G,
    },
};

/// One ring member's public data.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct RingMember {
    /// The one-time output key a signer may control.
    pub stealth_address: PublicKey,

    /// The output's amount commitment, stored at eighth scale.
    pub amount_commitment: PublicKey,
}

/// CLSAG-GG signature for a ring of stealth addresses and amount
/// commitments.
#[derive(Clone, Debug, Eq, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ClsagGG {
    /// The initial challenge `c[0]`.
    pub c_zero: CurveScalar,

    /// Responses `r[0], ..., r[ring_size - 1]`; one per ring member.
    pub responses: Vec<CurveScalar>,

    /// Auxiliary key image `K1 = f * Hp(P)` for the commitment layer,
    /// stored at eighth scale.
    pub commitment_key_image: KeyImage,
}

impl ClsagGG {
    /// Sign a ring of stealth addresses and amount commitments.
    ///
    /// # Arguments
    /// * `message` - Message to be signed.
    /// * `ring` - The ring of candidate members.
    /// * `pseudo_output_commitment` - Pseudo-output amount commitment, at
    ///   full scale.
    /// * `key_image` - The linking tag `stealth_secret * Hp(P)` for the
    ///   real member's stealth address `P`.
    /// * `stealth_secret` - The real member's one-time secret key.
    /// * `commitment_secret` - The blinding difference `f` with
    ///   `8 * amount_commitment - pseudo_output_commitment = f * G`.
    /// * `secret_index` - The index in the ring of the real member.
    /// * `rng` - Cryptographic RNG.
    pub fn sign<R: CryptoRngCore>(
        message: &[u8; 32],
        ring: &[RingMember],
        pseudo_output_commitment: &EdwardsPoint,
        key_image: &KeyImage,
        stealth_secret: &Scalar,
        commitment_secret: &Scalar,
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

        // The linking-tag base is bound to the real member's stealth
        // address; the supplied key image must be consistent with it.
        let ki_base = hash_to_point(&ring[secret_index].stealth_address);
        let ki_point = key_image.decompress()?;
        if stealth_secret * ki_base != ki_point {
            return Err(Error::KeyImageMismatch);
        }

        // Auxiliary key image for the commitment layer, embedded in the
        // signature at eighth scale.
        let (commitment_key_image, K1) = KeyImage::div8(commitment_secret, &ki_base);

        let (mut transcript, input_hash, mu_0, mu_1) = input_transcript(
            message,
            ring,
            &PublicKey::from(&(inv_eight() * pseudo_output_commitment)),
            key_image,
        );

        let aggregate_keys =
            aggregate_ring_keys(ring, pseudo_output_commitment, &mu_0, &mu_1)?;
        let mut aggregate_secret = mu_0 * stealth_secret + mu_1 * commitment_secret;
        let aggregate_key_image = mu_0 * ki_point + mu_1 * K1;

        // Commit to the real member with a fresh nonce; this seeds
        // c[secret_index + 1].
        let mut alpha = Scalar::random(rng);
        let mut c_prev = round_challenge(
            &mut transcript,
            &input_hash,
            &(alpha * G),
            &(alpha * ki_base),
        );

        let mut responses: Vec<CurveScalar> = (0..ring_size)
            .map(|_| CurveScalar::from_random(rng))
            .collect();

        // Walk the ring from secret_index + 1 back around to secret_index,
        // recording c[0] when we pass position 0.
        let mut c_zero = CurveScalar::default();
        for i in (1..ring_size).map(|j| (secret_index + j) % ring_size) {
            if i == 0 {
                c_zero = CurveScalar::from(c_prev);
            }
            let L = responses[i].scalar * G + c_prev * aggregate_keys[i];
            let R = responses[i].scalar * hash_to_point(&ring[i].stealth_address)
                + c_prev * aggregate_key_image;
            c_prev = round_challenge(&mut transcript, &input_hash, &L, &R);
        }
        if secret_index == 0 {
            c_zero = CurveScalar::from(c_prev);
        }

        // Close the ring. Scalar arithmetic is constant-time in the secret
        // operands.
        responses[secret_index] = CurveScalar::from(alpha - c_prev * aggregate_secret);

        alpha.zeroize();
        aggregate_secret.zeroize();

        Ok(ClsagGG {
            c_zero,
            responses,
            commitment_key_image,
        })
    }

    /// Verify a CLSAG-GG signature.
    ///
    /// # Arguments
    /// * `message` - Message that was signed.
    /// * `ring` - The ring of candidate members.
    /// * `pseudo_output_commitment` - The pseudo-output amount commitment
    ///   in its eighth-scale encoding.
    /// * `key_image` - The linking tag the signature spends.
    pub fn verify(
        &self,
        message: &[u8; 32],
        ring: &[RingMember],
        pseudo_output_commitment: &PublicKey,
        key_image: &KeyImage,
    ) -> Result<(), Error> {
        let ring_size = ring.len();

        if ring_size == 0 {
            return Err(Error::EmptyRing);
        }
        if self.responses.len() != ring_size {
            return Err(Error::LengthMismatch(self.responses.len(), ring_size));
        }

        // The linking tag must land in the main subgroup before any ring
        // work happens.
        let ki_point = key_image.decompress()?;
        if !ki_point.is_torsion_free() {
            return Err(Error::InvalidKeyImage);
        }

        let pseudo_point = pseudo_output_commitment.decompress()?.mul_by_cofactor();

        let (mut transcript, input_hash, mu_0, mu_1) =
            input_transcript(message, ring, pseudo_output_commitment, key_image);

        let aggregate_keys = aggregate_ring_keys(ring, &pseudo_point, &mu_0, &mu_1)?;
        let K1 = self.commitment_key_image.decompress()?.mul_by_cofactor();
        let aggregate_key_image = mu_0 * ki_point + mu_1 * K1;

        let mut c_prev = self.c_zero.scalar;
        for (i, member) in ring.iter().enumerate() {
            let L = self.responses[i].scalar * G + c_prev * aggregate_keys[i];
            let R = self.responses[i].scalar * hash_to_point(&member.stealth_address)
                + c_prev * aggregate_key_image;
            c_prev = round_challenge(&mut transcript, &input_hash, &L, &R);
        }

        // The chain must close back onto c[0].
        if c_prev == self.c_zero.scalar {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }
}

/// The input segment shared by signer and verifier: message, ring, the
/// eighth-scale pseudo-output commitment, and the key image. Returns the
/// transcript (reused for the challenge chain), the unreduced input hash,
/// and the two aggregation coefficients.
fn input_transcript(
    message: &[u8; 32],
    ring: &[RingMember],
    pseudo_output_commitment: &PublicKey,
    key_image: &KeyImage,
) -> (Transcript, [u8; 32], Scalar, Scalar) {
    let mut transcript = Transcript::with_item_capacity(3 + 2 * ring.len());
    transcript.add_hash(message);
    for member in ring {
        transcript.add_pub_key(&member.stealth_address);
        transcript.add_pub_key(&member.amount_commitment);
    }
    transcript.add_pub_key(pseudo_output_commitment);
    transcript.add_key_image(key_image);
    let input_hash = transcript.squeeze_hash();

    let mu_0 = transcript.aggregation_coefficient(CLSAG_GG_LAYER_0_DOMAIN_TAG, &input_hash);
    let mu_1 = transcript.aggregation_coefficient(CLSAG_GG_LAYER_1_DOMAIN_TAG, &input_hash);

    (transcript, input_hash, mu_0, mu_1)
}

/// Aggregate public keys `W[i] = μ₀ * P[i] + μ₁ * (8 * A[i] - C')`, with
/// the commitments brought to full scale by clearing the cofactor.
fn aggregate_ring_keys(
    ring: &[RingMember],
    pseudo_output_commitment: &EdwardsPoint,
    mu_0: &Scalar,
    mu_1: &Scalar,
) -> Result<Vec<EdwardsPoint>, Error> {
    let mut keys = Vec::with_capacity(ring.len());
    for member in ring {
        let stealth_address = member.stealth_address.decompress()?;
        let amount_commitment = member.amount_commitment.decompress()?.mul_by_cofactor();
        keys.push(mu_0 * stealth_address + mu_1 * (amount_commitment - pseudo_output_commitment));
    }
    Ok(keys)
}

/// One challenge-chain round: `c = H(tag ‖ input_hash ‖ L ‖ R)`.
fn round_challenge(
    transcript: &mut Transcript,
    input_hash: &[u8; 32],
    L: &EdwardsPoint,
    R: &EdwardsPoint,
) -> Scalar {
    transcript.add_tag(CLSAG_GG_CHALLENGE_DOMAIN_TAG);
    transcript.add_hash(input_hash);
    transcript.add_point(L);
    transcript.add_point(R);
    transcript.squeeze_scalar()
}

#[cfg(test)]
mod clsag_gg_tests {
    use super::*;
    use curve25519_dalek::constants::EIGHT_TORSION;
    use proptest::prelude::*;
    use rand_chacha::ChaCha20Rng;
    use rand_core::{RngCore, SeedableRng};

    #[derive(Clone)]
    struct ClsagGGTestParams {
        message: [u8; 32],
        ring: Vec<RingMember>,
        secret_index: usize,
        stealth_secret: Scalar,
        commitment_secret: Scalar,
        pseudo_output_commitment: EdwardsPoint,
        key_image: KeyImage,
    }

    impl ClsagGGTestParams {
        fn random<R: CryptoRngCore>(num_mixins: usize, rng: &mut R) -> Self {
            let secret_index = rng.next_u64() as usize % (num_mixins + 1);
            Self::random_at(num_mixins, secret_index, rng)
        }

        fn random_at<R: CryptoRngCore>(
            num_mixins: usize,
            secret_index: usize,
            rng: &mut R,
        ) -> Self {
            let mut message = [0u8; 32];
            rng.fill_bytes(&mut message);

            let mut ring: Vec<RingMember> = Vec::new();
            for _ in 0..num_mixins {
                ring.push(RingMember {
                    stealth_address: PublicKey::from(&(Scalar::random(rng) * G)),
                    amount_commitment: PublicKey::from(&(Scalar::random(rng) * G)),
                });
            }

            // The real member: a stealth address the signer controls, and
            // an amount commitment whose difference from the pseudo-output
            // commitment is signed on G.
            let stealth_secret = Scalar::random(rng);
            let commitment_secret = Scalar::random(rng);
            let stealth_address = PublicKey::from(&(stealth_secret * G));
            let amount_commitment_full = Scalar::random(rng) * G;
            let pseudo_output_commitment =
                amount_commitment_full - commitment_secret * G;

            ring.insert(
                secret_index,
                RingMember {
                    stealth_address,
                    amount_commitment: PublicKey::from(
                        &(inv_eight() * amount_commitment_full),
                    ),
                },
            );
            assert_eq!(ring.len(), num_mixins + 1);

            let key_image = KeyImage::new(&stealth_secret, &stealth_address);

            Self {
                message,
                ring,
                secret_index,
                stealth_secret,
                commitment_secret,
                pseudo_output_commitment,
                key_image,
            }
        }

        fn sign<R: CryptoRngCore>(&self, rng: &mut R) -> Result<ClsagGG, Error> {
            ClsagGG::sign(
                &self.message,
                &self.ring,
                &self.pseudo_output_commitment,
                &self.key_image,
                &self.stealth_secret,
                &self.commitment_secret,
                self.secret_index,
                rng,
            )
        }

        /// The eighth-scale encoding the verifier receives.
        fn pseudo_output_encoding(&self) -> PublicKey {
            PublicKey::from(&(inv_eight() * self.pseudo_output_commitment))
        }

        fn verify(&self, signature: &ClsagGG) -> Result<(), Error> {
            signature.verify(
                &self.message,
                &self.ring,
                &self.pseudo_output_encoding(),
                &self.key_image,
            )
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(6))]

        #[test]
        fn test_signature_has_one_response_per_member(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng = ChaCha20Rng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();

            assert_eq!(signature.responses.len(), num_mixins + 1);
            for r in &signature.responses {
                assert_ne!(r.scalar, Scalar::ZERO);
            }
        }

        #[test]
        fn test_verify_accepts_valid_signatures(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng = ChaCha20Rng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();

            assert!(params.verify(&signature).is_ok());
        }

        #[test]
        fn test_verify_rejects_modified_message(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng = ChaCha20Rng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();

            let mut wrong_message = params.message;
            wrong_message[0] ^= 1;

            match signature.verify(
                &wrong_message,
                &params.ring,
                &params.pseudo_output_encoding(),
                &params.key_image,
            ) {
                Err(Error::InvalidSignature) => {}
                _ => panic!("Should reject modified message"),
            }
        }

        #[test]
        fn test_verify_rejects_modified_ring(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng = ChaCha20Rng::from_seed(seed);
            let mut params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();

            // Replace a mixin's stealth address.
            let index = (params.secret_index + 1) % params.ring.len();
            params.ring[index].stealth_address =
                PublicKey::from(&(Scalar::random(&mut rng) * G));

            match params.verify(&signature) {
                Err(Error::InvalidSignature) => {}
                _ => panic!("Should reject modified ring"),
            }
        }

        #[test]
        fn test_verify_rejects_modified_key_image(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng = ChaCha20Rng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();

            let wrong_secret = Scalar::random(&mut rng);
            let wrong_key_image = KeyImage::new(
                &wrong_secret,
                &params.ring[params.secret_index].stealth_address,
            );

            match signature.verify(
                &params.message,
                &params.ring,
                &params.pseudo_output_encoding(),
                &wrong_key_image,
            ) {
                Err(Error::InvalidSignature) => {}
                _ => panic!("Should reject modified key image"),
            }
        }

        #[test]
        fn test_verify_rejects_wrong_pseudo_output(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng = ChaCha20Rng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();

            let wrong_pseudo = PublicKey::from(&(Scalar::random(&mut rng) * G));

            match signature.verify(
                &params.message,
                &params.ring,
                &wrong_pseudo,
                &params.key_image,
            ) {
                Err(Error::InvalidSignature) => {}
                _ => panic!("Should reject wrong pseudo-output commitment"),
            }
        }

        #[test]
        fn test_verify_rejects_wrong_response_count(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng = ChaCha20Rng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();

            {
                let mut too_few = signature.clone();
                too_few.responses.pop();
                match params.verify(&too_few) {
                    Err(Error::LengthMismatch(_, _)) => {}
                    _ => panic!("Should reject too few responses"),
                }
            }

            {
                let mut too_many = signature;
                too_many.responses.push(CurveScalar::from_random(&mut rng));
                match params.verify(&too_many) {
                    Err(Error::LengthMismatch(_, _)) => {}
                    _ => panic!("Should reject too many responses"),
                }
            }
        }

        #[test]
        fn test_embedded_key_image_is_eighth_scale(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng = ChaCha20Rng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();

            let ki_base = hash_to_point(&params.ring[params.secret_index].stealth_address);
            assert_eq!(
                signature
                    .commitment_key_image
                    .decompress()
                    .unwrap()
                    .mul_by_cofactor(),
                params.commitment_secret * ki_base
            );
        }
    }

    #[test]
    fn test_sign_rejects_empty_ring() {
        let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
        let params = ClsagGGTestParams::random(2, &mut rng);

        let result = ClsagGG::sign(
            &params.message,
            &[],
            &params.pseudo_output_commitment,
            &params.key_image,
            &params.stealth_secret,
            &params.commitment_secret,
            0,
            &mut rng,
        );
        assert_eq!(result, Err(Error::EmptyRing));
    }

    #[test]
    fn test_sign_rejects_out_of_bounds_index() {
        let mut rng = ChaCha20Rng::from_seed([6u8; 32]);
        let mut params = ClsagGGTestParams::random(4, &mut rng);
        params.secret_index = params.ring.len();

        assert_eq!(params.sign(&mut rng), Err(Error::IndexOutOfBounds));
    }

    #[test]
    fn test_sign_rejects_mismatched_key_image() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        let mut params = ClsagGGTestParams::random(4, &mut rng);
        params.key_image = KeyImage::new(
            &Scalar::random(&mut rng),
            &params.ring[params.secret_index].stealth_address,
        );

        assert_eq!(params.sign(&mut rng), Err(Error::KeyImageMismatch));
    }

    /// Trivial one-member ring: no fake challenges are walked, and the
    /// recorded challenge still closes the chain.
    #[test]
    fn test_single_member_ring_roundtrip() {
        let mut rng = ChaCha20Rng::from_seed([8u8; 32]);
        let params = ClsagGGTestParams::random_at(0, 0, &mut rng);

        let signature = params.sign(&mut rng).unwrap();
        assert!(params.verify(&signature).is_ok());

        // A single bit of drift in c[0] breaks the chain.
        let mut tampered = signature;
        tampered.c_zero = CurveScalar::from(tampered.c_zero.scalar + Scalar::ONE);
        assert_eq!(params.verify(&tampered), Err(Error::InvalidSignature));
    }

    /// Three-member ring with the signer in the middle; swapping two
    /// mixins invalidates the input hash.
    #[test]
    fn test_three_member_ring_rejects_swapped_members() {
        let mut rng = ChaCha20Rng::from_seed([9u8; 32]);
        let mut params = ClsagGGTestParams::random_at(2, 1, &mut rng);

        let signature = params.sign(&mut rng).unwrap();
        assert!(params.verify(&signature).is_ok());

        params.ring.swap(0, 2);
        assert_eq!(params.verify(&signature), Err(Error::InvalidSignature));
    }

    /// Signer at the end of the ring; bumping the closing response breaks
    /// verification.
    #[test]
    fn test_signer_at_ring_end_rejects_bumped_response() {
        let mut rng = ChaCha20Rng::from_seed([10u8; 32]);
        let params = ClsagGGTestParams::random_at(4, 4, &mut rng);

        let signature = params.sign(&mut rng).unwrap();
        assert!(params.verify(&signature).is_ok());

        let mut tampered = signature;
        tampered.responses[4] =
            CurveScalar::from(tampered.responses[4].scalar + Scalar::ONE);
        assert_eq!(params.verify(&tampered), Err(Error::InvalidSignature));
    }

    #[test]
    fn test_large_ring_roundtrip() {
        let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
        let params = ClsagGGTestParams::random_at(127, 63, &mut rng);

        let signature = params.sign(&mut rng).unwrap();
        assert!(params.verify(&signature).is_ok());
    }

    /// Two signatures by the same stealth secret over the same stealth
    /// address share their linking tag, whatever the surrounding ring and
    /// commitment secrets look like.
    #[test]
    fn test_signatures_by_same_secret_are_linkable() {
        let mut rng = ChaCha20Rng::from_seed([12u8; 32]);
        let params1 = ClsagGGTestParams::random_at(3, 1, &mut rng);

        let mut params2 = ClsagGGTestParams::random_at(5, 4, &mut rng);
        params2.stealth_secret = params1.stealth_secret;
        params2.ring[4].stealth_address = params1.ring[1].stealth_address;
        params2.key_image = KeyImage::new(
            &params2.stealth_secret,
            &params2.ring[4].stealth_address,
        );

        let signature1 = params1.sign(&mut rng).unwrap();
        let signature2 = params2.sign(&mut rng).unwrap();

        assert!(params1.verify(&signature1).is_ok());
        assert!(params2.verify(&signature2).is_ok());
        assert_eq!(params1.key_image, params2.key_image);
    }

    /// A key image outside the main subgroup is rejected before the ring
    /// walk.
    #[test]
    fn test_verify_rejects_torsioned_key_image() {
        let mut rng = ChaCha20Rng::from_seed([13u8; 32]);
        let params = ClsagGGTestParams::random_at(3, 2, &mut rng);

        let signature = params.sign(&mut rng).unwrap();

        let torsioned = KeyImage {
            point: (params.key_image.decompress().unwrap() + EIGHT_TORSION[1]).compress(),
        };
        assert_eq!(
            signature.verify(
                &params.message,
                &params.ring,
                &params.pseudo_output_encoding(),
                &torsioned,
            ),
            Err(Error::InvalidKeyImage)
        );
    }

    /// Tampering with the embedded auxiliary key image breaks the chain.
    #[test]
    fn test_verify_rejects_tampered_commitment_key_image() {
        let mut rng = ChaCha20Rng::from_seed([14u8; 32]);
        let params = ClsagGGTestParams::random_at(3, 0, &mut rng);

        let signature = params.sign(&mut rng).unwrap();

        let ki_base = hash_to_point(&params.ring[0].stealth_address);
        let (wrong_aux, _) = KeyImage::div8(&Scalar::random(&mut rng), &ki_base);

        let mut tampered = signature;
        tampered.commitment_key_image = wrong_aux;
        assert_eq!(params.verify(&tampered), Err(Error::InvalidSignature));
    }
}
