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

//! Fixed-length array fields.

use crate::{fields::Field, schema::FieldKind, Cursor, Endianness, Error, Result};

/// A sequence field whose element count is part of the declared type.
///
/// The count is never written to the stream: on the wire a fixed array is
/// just its elements, encoded back to back in sequence order. The wrapped
/// sequence may be built with any length; equality with `N` is enforced when
/// the value is encoded, failing with [`Error::ArrayLengthMismatch`] before
/// a single element is written. Decoding always produces exactly `N`
/// elements or fails.
///
/// # Examples
///
/// ```
/// use deser::{Endianness, FixedArray};
///
/// let samples: FixedArray<u16, 3> = vec![1, 2, 3].into();
/// let wire = deser::serialize(&samples, Endianness::Network)?;
/// assert_eq!(wire, [0, 1, 0, 2, 0, 3]);
/// # Ok::<(), deser::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedArray<T, const N: usize> {
    values: Vec<T>,
}

impl<T, const N: usize> FixedArray<T, N> {
    /// Wraps `values` as a fixed-length array field.
    ///
    /// The length is checked at encode time, not here.
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    /// The element count declared by the type.
    pub fn declared_len() -> usize {
        N
    }

    /// The wrapped elements.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Consumes the wrapper and returns the elements.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T, const N: usize> From<Vec<T>> for FixedArray<T, N> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T, const N: usize> From<[T; N]> for FixedArray<T, N> {
    fn from(values: [T; N]) -> Self {
        Self::new(Vec::from(values))
    }
}

impl<T: Field, const N: usize> Field for FixedArray<T, N> {
    fn field_size() -> usize {
        N * T::field_size()
    }

    fn kind() -> FieldKind {
        FieldKind::Array {
            element: Box::new(T::kind()),
            len: N,
        }
    }

    fn write(&self, buffer: &mut Vec<u8>, order: Endianness) -> Result<()> {
        if self.values.len() != N {
            return Err(Error::ArrayLengthMismatch {
                expected: N,
                actual: self.values.len(),
            });
        }
        for value in &self.values {
            value.write(buffer, order)?;
        }
        Ok(())
    }

    fn read(cursor: &mut Cursor<'_>, order: Endianness) -> Result<Self> {
        let mut values = Vec::with_capacity(N);
        for _ in 0..N {
            values.push(T::read(cursor, order)?);
        }
        Ok(Self { values })
    }
}
