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

//! `deser` is a declarative serialization library for flat fixed-layout
//! binary formats: network protocol messages, binary file headers and other
//! structures whose field layout, order and width are contractually fixed.
//!
//! A record is declared once with the [`serializable!`](crate::serializable) macro; the byte-exact
//! codec and an ordered schema reflection are derived from the declaration.
//! The wire format of a record is the plain concatenation of its field
//! encodings in declaration order, recursively expanded for nested records
//! and fixed-length arrays. Nothing else is ever written: no padding, no
//! alignment, no length prefixes, no type tags.
//!
//! # Field types
//!
//! | Type | Wire size | Info |
//! |------|-----------|------|
//! | `u8` / `i8` | 1 | Single byte |
//! | `u16` / `i16` | 2 | Two's complement for the signed variant |
//! | `u32` / `i32` | 4 | |
//! | `u64` / `i64` | 8 | |
//! | `usize` / `isize` | platform | `mem::size_of::<usize>()` bytes |
//! | `bool` | 1 | `0x01` for `true`; any nonzero byte reads back as `true` |
//! | [`FixedArray<T, N>`] | `N * size(T)` | Element count is part of the type, never of the stream |
//! | a `serializable!` record | sum of fields | Plain concatenation, declaration order |
//!
//! # Byte order
//!
//! Multi-byte integers are laid out according to an [`Endianness`] value
//! passed explicitly through every call; nested records and arrays never
//! switch the order on their own. The top-level convenience methods
//! generated by [`serializable!`](crate::serializable) default to [`Endianness::Network`]
//! (big-endian).
//!
//! | Value | Meaning |
//! |-------|---------|
//! | `Little` | least-significant byte first |
//! | `Big` | most-significant byte first |
//! | `Native` | platform byte order |
//! | `NativePacked` | platform byte order, no padding (the format never pads) |
//! | `Network` (default) | big-endian |
//!
//! # Examples
//!
//! ```
//! use deser::{serializable, Endianness, FixedArray};
//!
//! serializable! {
//!     pub struct Reading {
//!         channel: u8,
//!         value: i16,
//!     }
//! }
//!
//! serializable! {
//!     pub struct Report {
//!         id: u16,
//!         reading: Reading,
//!         samples: FixedArray<u32, 3>,
//!     }
//! }
//!
//! let report = Report::new(32, Reading::new(0, 2), vec![1, 2, 3].into());
//! let wire = report.serialize()?;
//! assert_eq!(wire.len(), 17);
//! assert_eq!(Report::deserialize(&wire)?, report);
//!
//! let little = deser::serialize(&report, Endianness::Little)?;
//! assert_ne!(little, wire);
//! # Ok::<(), deser::Error>(())
//! ```

#![warn(
    missing_debug_implementations,
    unsafe_code,
    bare_trait_objects,
    missing_docs
)]

pub use crate::{
    arrays::FixedArray,
    error::Error,
    fields::{decode_int, decode_uint, encode_int, encode_uint, Field},
    schema::{FieldDescriptor, FieldKind, Record},
};

pub mod arrays;
pub mod error;
pub mod fields;
pub mod schema;

#[macro_use]
mod macros;
#[cfg(test)]
mod tests;

/// A specialized `Result` type for serialization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Byte order applied to every multi-byte integer in a stream.
///
/// The order is an explicit parameter of each encode and decode call and is
/// threaded unchanged through nested records and arrays; it is never stored
/// in shared state. The `Default` value is [`Network`](Self::Network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
    /// The byte order of the platform the code runs on.
    Native,
    /// Platform byte order without padding. The format never emits padding,
    /// so this coincides with [`Native`](Self::Native).
    NativePacked,
    /// Big-endian, the conventional order of network protocols.
    Network,
}

impl Endianness {
    /// Resolves the policy to a concrete layout for the current platform.
    pub fn is_little_endian(self) -> bool {
        match self {
            Endianness::Little => true,
            Endianness::Big | Endianness::Network => false,
            Endianness::Native | Endianness::NativePacked => cfg!(target_endian = "little"),
        }
    }
}

impl Default for Endianness {
    fn default() -> Self {
        Endianness::Network
    }
}

/// A position tracker over an input byte sequence.
///
/// A cursor is exclusively owned by a single decode call for its duration.
/// Consuming past the end of the input fails with
/// [`Error::InsufficientInput`]; missing bytes are never zero-filled.
#[derive(Debug)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `buffer`.
    pub fn new(buffer: &'a [u8]) -> Self {
        Cursor {
            buffer,
            position: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes left in the input.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Consumes the next `len` bytes and returns them.
    pub fn advance(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::InsufficientInput {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let chunk = &self.buffer[self.position..self.position + len];
        self.position += len;
        Ok(chunk)
    }
}

/// Encodes `value` into a freshly allocated byte vector.
///
/// The output length always equals `T::field_size()`; on error nothing is
/// returned to the caller.
pub fn serialize<T: Field>(value: &T, order: Endianness) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(T::field_size());
    value.write(&mut buffer, order)?;
    Ok(buffer)
}

/// Decodes a value of type `T` from the start of `bytes`.
///
/// Bytes past the value's fixed size are ignored; use [`deserialize_from`]
/// with an explicit [`Cursor`] to keep consuming the remainder.
pub fn deserialize<T: Field>(bytes: &[u8], order: Endianness) -> Result<T> {
    let mut cursor = Cursor::new(bytes);
    T::read(&mut cursor, order)
}

/// Decodes a value of type `T` from `cursor`, advancing it by exactly the
/// value's wire size.
pub fn deserialize_from<T: Field>(cursor: &mut Cursor<'_>, order: Endianness) -> Result<T> {
    T::read(cursor, order)
}
