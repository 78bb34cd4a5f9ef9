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

//! A definition of the `Field` trait and the primitive integer codec
//! beneath it.
//!
//! `Field` is the seam between a declared field type and the codec engine:
//! every type that can appear in a record declaration implements it. The
//! free `encode_*`/`decode_*` functions are the width-parametric engine the
//! typed implementations delegate to; they are public so that dynamic
//! callers can drive the same machinery with an explicit width.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use std::mem;

use crate::{schema::FieldKind, Cursor, Endianness, Error, Result};

/// A type with a fixed-layout wire representation.
///
/// Implemented for the primitive integers and `bool`, for
/// [`FixedArray`](crate::FixedArray), and by the [`serializable!`](crate::serializable) macro for
/// declared records. These three shapes are the only dispatch paths of the
/// engine; a type outside them cannot appear in a record declaration.
pub trait Field: Sized {
    /// Exact size of the encoded value in bytes.
    ///
    /// The size is a property of the type, never of an individual value.
    fn field_size() -> usize;

    /// The shape this type occupies in a record schema.
    fn kind() -> FieldKind;

    /// Appends the encoding of `self` to `buffer` in the given byte order.
    fn write(&self, buffer: &mut Vec<u8>, order: Endianness) -> Result<()>;

    /// Reads a value from the current cursor position, advancing the cursor
    /// by [`field_size()`](Self::field_size) bytes.
    fn read(cursor: &mut Cursor<'_>, order: Endianness) -> Result<Self>;
}

fn check_width(width: usize) -> Result<()> {
    match width {
        1 | 2 | 4 | 8 => Ok(()),
        _ => Err(Error::Schema {
            reason: format!("unsupported integer width: {} bits", width * 8),
        }),
    }
}

/// Appends `value` to `buffer` as an unsigned integer of exactly `width`
/// bytes in the given byte order.
///
/// `width` must be 1, 2, 4 or 8 bytes; anything else fails with
/// [`Error::Schema`]. A value that does not fit the width fails with
/// [`Error::OutOfRange`], writing nothing.
pub fn encode_uint(
    buffer: &mut Vec<u8>,
    value: u64,
    width: usize,
    order: Endianness,
) -> Result<()> {
    check_width(width)?;
    if width < 8 && value >> (width * 8) != 0 {
        return Err(Error::OutOfRange {
            value: i128::from(value),
            bits: (width * 8) as u16,
        });
    }
    let start = buffer.len();
    buffer.resize(start + width, 0);
    if order.is_little_endian() {
        LittleEndian::write_uint(&mut buffer[start..], value, width);
    } else {
        BigEndian::write_uint(&mut buffer[start..], value, width);
    }
    Ok(())
}

/// Reads an unsigned integer of exactly `width` bytes from `cursor`.
pub fn decode_uint(cursor: &mut Cursor<'_>, width: usize, order: Endianness) -> Result<u64> {
    check_width(width)?;
    let chunk = cursor.advance(width)?;
    let value = if order.is_little_endian() {
        LittleEndian::read_uint(chunk, width)
    } else {
        BigEndian::read_uint(chunk, width)
    };
    Ok(value)
}

/// Appends `value` to `buffer` as a two's-complement signed integer of
/// exactly `width` bytes in the given byte order.
///
/// Fails with [`Error::OutOfRange`] if `value` lies outside the
/// two's-complement range of the width, writing nothing.
pub fn encode_int(buffer: &mut Vec<u8>, value: i64, width: usize, order: Endianness) -> Result<()> {
    check_width(width)?;
    if width < 8 {
        let max = (1_i64 << (width * 8 - 1)) - 1;
        let min = -max - 1;
        if value < min || value > max {
            return Err(Error::OutOfRange {
                value: i128::from(value),
                bits: (width * 8) as u16,
            });
        }
    }
    let start = buffer.len();
    buffer.resize(start + width, 0);
    if order.is_little_endian() {
        LittleEndian::write_int(&mut buffer[start..], value, width);
    } else {
        BigEndian::write_int(&mut buffer[start..], value, width);
    }
    Ok(())
}

/// Reads a sign-extended two's-complement integer of exactly `width` bytes
/// from `cursor`.
pub fn decode_int(cursor: &mut Cursor<'_>, width: usize, order: Endianness) -> Result<i64> {
    check_width(width)?;
    let chunk = cursor.advance(width)?;
    let value = if order.is_little_endian() {
        LittleEndian::read_int(chunk, width)
    } else {
        BigEndian::read_int(chunk, width)
    };
    Ok(value)
}

macro_rules! implement_unsigned_field {
    ($type:ident) => {
        impl Field for $type {
            fn field_size() -> usize {
                mem::size_of::<$type>()
            }

            fn kind() -> FieldKind {
                FieldKind::Unsigned {
                    bits: (mem::size_of::<$type>() * 8) as u16,
                }
            }

            fn write(&self, buffer: &mut Vec<u8>, order: Endianness) -> Result<()> {
                encode_uint(buffer, *self as u64, mem::size_of::<$type>(), order)
            }

            fn read(cursor: &mut Cursor<'_>, order: Endianness) -> Result<Self> {
                decode_uint(cursor, mem::size_of::<$type>(), order).map(|value| value as $type)
            }
        }
    };
}

macro_rules! implement_signed_field {
    ($type:ident) => {
        impl Field for $type {
            fn field_size() -> usize {
                mem::size_of::<$type>()
            }

            fn kind() -> FieldKind {
                FieldKind::Signed {
                    bits: (mem::size_of::<$type>() * 8) as u16,
                }
            }

            fn write(&self, buffer: &mut Vec<u8>, order: Endianness) -> Result<()> {
                encode_int(buffer, *self as i64, mem::size_of::<$type>(), order)
            }

            fn read(cursor: &mut Cursor<'_>, order: Endianness) -> Result<Self> {
                decode_int(cursor, mem::size_of::<$type>(), order).map(|value| value as $type)
            }
        }
    };
}

implement_unsigned_field! { u8 }
implement_unsigned_field! { u16 }
implement_unsigned_field! { u32 }
implement_unsigned_field! { u64 }
implement_unsigned_field! { usize }

implement_signed_field! { i8 }
implement_signed_field! { i16 }
implement_signed_field! { i32 }
implement_signed_field! { i64 }
implement_signed_field! { isize }

impl Field for bool {
    fn field_size() -> usize {
        1
    }

    fn kind() -> FieldKind {
        FieldKind::Bool
    }

    fn write(&self, buffer: &mut Vec<u8>, order: Endianness) -> Result<()> {
        encode_uint(buffer, u64::from(*self), 1, order)
    }

    // Any nonzero byte reads back as `true`.
    fn read(cursor: &mut Cursor<'_>, order: Endianness) -> Result<Self> {
        decode_uint(cursor, 1, order).map(|byte| byte != 0)
    }
}
