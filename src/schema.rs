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

//! Record schemas: the ordered field reflection derived from a record
//! declaration.
//!
//! The reflection is a pure function of the type. It is produced by the
//! [`serializable!`](crate::serializable) macro at the declaration site, so a field whose type
//! falls outside the supported shapes is rejected by the compiler before
//! any value flows through the engine. [`FieldKind::wire_size`] is the
//! runtime validator for schemas assembled by hand.

use crate::{fields::Field, Error, Result};

/// The closed set of shapes a declared field can take.
///
/// Dispatch from a declared type to its codec is total over these shapes;
/// no other path into the engine exists.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-byte boolean.
    Bool,
    /// Unsigned integer of the given width.
    Unsigned {
        /// Field width in bits.
        bits: u16,
    },
    /// Two's-complement signed integer of the given width.
    Signed {
        /// Field width in bits.
        bits: u16,
    },
    /// Fixed-length homogeneous sequence; the length belongs to the type
    /// and never appears on the wire.
    Array {
        /// Shape of each element.
        element: Box<FieldKind>,
        /// Declared element count.
        len: usize,
    },
    /// Nested record with its own ordered fields.
    Record {
        /// Name of the nested record type.
        name: &'static str,
        /// The nested record's fields, in declaration order.
        fields: Vec<FieldDescriptor>,
    },
}

impl FieldKind {
    /// Computes the exact encoded size of this shape in bytes, validating
    /// the shape along the way.
    ///
    /// Fails with [`Error::Schema`] for integer widths outside
    /// {8, 16, 32, 64} and for layouts whose total size overflows `usize`.
    pub fn wire_size(&self) -> Result<usize> {
        match self {
            FieldKind::Bool => Ok(1),
            FieldKind::Unsigned { bits } | FieldKind::Signed { bits } => match bits {
                8 | 16 | 32 | 64 => Ok(usize::from(*bits) / 8),
                _ => Err(Error::Schema {
                    reason: format!("unsupported integer width: {} bits", bits),
                }),
            },
            FieldKind::Array { element, len } => {
                element
                    .wire_size()?
                    .checked_mul(*len)
                    .ok_or_else(|| Error::Schema {
                        reason: format!("array of {} elements overflows the addressable size", len),
                    })
            }
            FieldKind::Record { name, fields } => {
                let mut total = 0_usize;
                for field in fields {
                    total = total
                        .checked_add(field.kind.wire_size()?)
                        .ok_or_else(|| Error::Schema {
                            reason: format!("record `{}` overflows the addressable size", name),
                        })?;
                }
                Ok(total)
            }
        }
    }
}

/// A named, typed slot of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name as declared.
    pub name: &'static str,
    /// Shape of the declared field type.
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Creates a descriptor for a named field of the given shape.
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// A declared record type: an ordered collection of named, typed fields
/// serialized by plain concatenation.
///
/// Implemented by the [`serializable!`](crate::serializable) macro. The reflection is derived
/// from the declaration alone, never from instance state, and is identical
/// on every call; its order is the wire order.
pub trait Record: Field {
    /// Name of the record type as declared.
    fn type_name() -> &'static str;

    /// Field descriptors in declaration order.
    fn fields() -> Vec<FieldDescriptor>;

    /// Validates the record layout and returns its exact encoded size in
    /// bytes.
    fn wire_size() -> Result<usize> {
        Self::kind().wire_size()
    }
}
