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

//! The `serializable!` macro: declares a record type together with its
//! derived wire codec and schema reflection.

/// Declares a record serialized as the plain concatenation of its fields in
/// declaration order.
///
/// For the declared struct the macro generates:
///
/// - the struct itself, with public fields;
/// - a `new` constructor whose argument order is the declaration order;
/// - a [`Field`](crate::Field) implementation encoding and decoding the
///   fields in declaration order, threading the caller's byte order through
///   every nested call;
/// - a [`Record`](crate::Record) implementation exposing the ordered field
///   reflection;
/// - inherent `serialize`/`deserialize` convenience methods fixed to
///   [`Endianness::Network`](crate::Endianness::Network), the default order
///   of the top-level operations.
///
/// Field types must implement `Field`: the primitive integers, `bool`,
/// [`FixedArray`](crate::FixedArray), or another `serializable!` record.
/// Anything else is rejected at compile time.
///
/// # Examples
///
/// ```
/// use deser::{serializable, FixedArray};
///
/// serializable! {
///     /// Fixed-size sensor reading.
///     pub struct Reading {
///         channel: u8,
///         value: i16,
///     }
/// }
///
/// serializable! {
///     pub struct Report {
///         id: u16,
///         reading: Reading,
///         samples: FixedArray<u32, 3>,
///     }
/// }
///
/// let report = Report::new(32, Reading::new(0, 2), vec![1, 2, 3].into());
/// let wire = report.serialize()?;
/// assert_eq!(wire.len(), 17);
/// assert_eq!(Report::deserialize(&wire)?, report);
/// # Ok::<(), deser::Error>(())
/// ```
#[macro_export]
macro_rules! serializable {
    (
        $(#[$attr:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                $field_name:ident : $field_type:ty
            ),*
            $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $(
                $(#[$field_attr])*
                pub $field_name: $field_type,
            )*
        }

        impl $name {
            /// Creates the record from its field values, in declaration
            /// order.
            pub fn new($($field_name: $field_type),*) -> Self {
                Self { $($field_name),* }
            }

            /// Encodes the record in network byte order.
            pub fn serialize(&self) -> $crate::Result<Vec<u8>> {
                $crate::serialize(self, $crate::Endianness::Network)
            }

            /// Decodes the record from the start of `bytes` in network byte
            /// order.
            pub fn deserialize(bytes: &[u8]) -> $crate::Result<Self> {
                $crate::deserialize(bytes, $crate::Endianness::Network)
            }
        }

        impl $crate::Field for $name {
            fn field_size() -> usize {
                0 $(+ <$field_type as $crate::Field>::field_size())*
            }

            fn kind() -> $crate::FieldKind {
                $crate::FieldKind::Record {
                    name: stringify!($name),
                    fields: <Self as $crate::Record>::fields(),
                }
            }

            fn write(
                &self,
                buffer: &mut Vec<u8>,
                order: $crate::Endianness,
            ) -> $crate::Result<()> {
                $(
                    $crate::Field::write(&self.$field_name, buffer, order)?;
                )*
                Ok(())
            }

            fn read(
                cursor: &mut $crate::Cursor<'_>,
                order: $crate::Endianness,
            ) -> $crate::Result<Self> {
                $(
                    let $field_name = <$field_type as $crate::Field>::read(cursor, order)?;
                )*
                Ok(Self::new($($field_name),*))
            }
        }

        impl $crate::Record for $name {
            fn type_name() -> &'static str {
                stringify!($name)
            }

            fn fields() -> Vec<$crate::FieldDescriptor> {
                vec![
                    $(
                        $crate::FieldDescriptor::new(
                            stringify!($field_name),
                            <$field_type as $crate::Field>::kind(),
                        ),
                    )*
                ]
            }
        }
    };
}
