// Copyright (c) 2018-2025 The Botho Foundation

//! CLSAG (Concise Linkable Spontaneous Anonymous Group) ring signatures
//! over the Ed25519 curve.
//!
//! Two variants are provided:
//!
//! * [`ClsagGG`] — a two-layer scheme over the basepoint `G`, binding a
//!   stealth-address key and an amount-commitment balance.
//! * [`ClsagGGXG`] — a four-layer scheme over two generators, `G` (layers
//!   0, 1 and 3) and [`generator_x`] (layer 2), additionally binding an
//!   extended-commitment balance and a concealing-point relation.
//!
//! Both collapse their parallel Schnorr relations into a single ring
//! argument using hash-derived aggregation coefficients, so a signature
//! carries one response per ring member and layer group rather than one per
//! layer.
//!
//! Reference: "Concise Linkable Ring Signatures and Forgery Against
//! Adversarial Keys" <https://eprint.iacr.org/2019/654>

#![no_std]
#![deny(missing_docs)]

extern crate alloc;

pub mod domain_separators;
mod ring_signature;

pub use ring_signature::{
    generator_x, hash_to_point, inv_eight, ClsagGG, ClsagGGXG, CurveScalar, EdwardsPoint, Error,
    ExtendedRingMember, KeyImage, PublicKey, RingMember, Scalar, Transcript, G,
};
