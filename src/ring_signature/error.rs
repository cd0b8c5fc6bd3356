// Copyright (c) 2018-2022 The Botho Foundation

//! Errors which can occur in connection to CLSAG signatures

use displaydoc::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An error which can occur when signing or verifying a CLSAG
#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Error {
    /// Incorrect length for array copy, provided `{0}`, required `{1}`.
    LengthMismatch(usize, usize),

    /// Ring is empty
    EmptyRing,

    /// Real input index out of bounds
    IndexOutOfBounds,

    /// Invalid curve point
    InvalidCurvePoint,

    /// Scalar encoding is not canonical
    InvalidCurveScalar,

    /// Failed to decompress a KeyImage, or it is outside the main subgroup
    InvalidKeyImage,

    /// Supplied key image does not match the signing secret
    KeyImageMismatch,

    /// The signature was not able to be validated
    InvalidSignature,
}
