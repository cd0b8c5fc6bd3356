// Copyright (c) 2018-2025 The Botho Foundation

//! Domain separation tags for the hash functions used by the CLSAG
//! protocols.
//!
//! Domain separation allows multiple distinct hash functions to be derived
//! from a single base function:
//!   Hash_1(X) = Hash("Hash_1" || X),
//!   Hash_2(X) = Hash("Hash_2" || X),
//!   etc.
//!
//! The transcript tags are exactly 32 bytes and are absorbed as ordinary
//! transcript items, so producers and verifiers must agree on them
//! bit-for-bit. Each scheme gets one tag per aggregation layer plus one for
//! its challenge chain; no tag is shared between the GG and GGXG suites.

/// Domain separator for the "hash_to_point" function.
pub const HASH_TO_POINT_DOMAIN_TAG: &str = "bth_clsag_hash_to_point";

/// Domain separator for deriving the secondary generator `X`.
pub const X_GENERATOR_DOMAIN_TAG: &str = "bth_clsag_x_generator";

/// Aggregation coefficient tag for CLSAG-GG layer 0 (stealth address).
pub const CLSAG_GG_LAYER_0_DOMAIN_TAG: &[u8; 32] = b"bth_clsag_gg_agg_layer_0________";

/// Aggregation coefficient tag for CLSAG-GG layer 1 (amount commitment).
pub const CLSAG_GG_LAYER_1_DOMAIN_TAG: &[u8; 32] = b"bth_clsag_gg_agg_layer_1________";

/// Challenge chain tag for CLSAG-GG.
pub const CLSAG_GG_CHALLENGE_DOMAIN_TAG: &[u8; 32] = b"bth_clsag_gg_challenge__________";

/// Aggregation coefficient tag for CLSAG-GGXG layer 0 (stealth address).
pub const CLSAG_GGXG_LAYER_0_DOMAIN_TAG: &[u8; 32] = b"bth_clsag_ggxg_agg_layer_0______";

/// Aggregation coefficient tag for CLSAG-GGXG layer 1 (amount commitment).
pub const CLSAG_GGXG_LAYER_1_DOMAIN_TAG: &[u8; 32] = b"bth_clsag_ggxg_agg_layer_1______";

/// Aggregation coefficient tag for CLSAG-GGXG layer 2 (the `X`-side
/// extended-commitment balance).
pub const CLSAG_GGXG_LAYER_2_DOMAIN_TAG: &[u8; 32] = b"bth_clsag_ggxg_agg_layer_2______";

/// Aggregation coefficient tag for CLSAG-GGXG layer 3 (concealing point).
pub const CLSAG_GGXG_LAYER_3_DOMAIN_TAG: &[u8; 32] = b"bth_clsag_ggxg_agg_layer_3______";

/// Challenge chain tag for CLSAG-GGXG.
pub const CLSAG_GGXG_CHALLENGE_DOMAIN_TAG: &[u8; 32] = b"bth_clsag_ggxg_challenge________";
