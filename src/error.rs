// Copyright 2020 The Exonum Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Errors emitted by the serialization engine.

use thiserror::Error;

/// The error type of every encode and decode operation.
///
/// All variants describe malformed input or a malformed schema; none of them
/// is transient, so callers should not retry. An operation either fully
/// succeeds or fails without producing a usable partial result.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A declared field type does not resolve to one of the supported codec
    /// shapes (fixed-width integer, boolean, fixed array, nested record).
    ///
    /// Raised while deriving or validating a schema, never while encoding or
    /// decoding a well-typed value.
    #[error("malformed schema: {reason}")]
    Schema {
        /// What exactly failed to resolve.
        reason: String,
    },

    /// The sequence supplied for a fixed-length array field has a different
    /// element count than the array type declares.
    ///
    /// Nothing is written when this is raised.
    #[error("array length mismatch: declared {expected} elements, got {actual}")]
    ArrayLengthMismatch {
        /// Element count declared by the array type.
        expected: usize,
        /// Element count of the supplied sequence.
        actual: usize,
    },

    /// An integer cannot be represented in the width and signedness declared
    /// for its field.
    #[error("value {value} does not fit into a {bits}-bit field")]
    OutOfRange {
        /// The rejected value.
        value: i128,
        /// Declared field width in bits.
        bits: u16,
    },

    /// The input ended before the current field could be fully read.
    ///
    /// Propagated unchanged through array and record decoding; a short read
    /// is never zero-filled.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remain")]
    InsufficientInput {
        /// Bytes required by the field being decoded.
        needed: usize,
        /// Bytes actually left in the input.
        remaining: usize,
    },
}
