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

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{
    deserialize, deserialize_from, serialize, Cursor, Endianness, Error, Field, FieldKind,
    FixedArray, Record,
};

serializable! {
    /// Fixed-size sensor reading used across the tests.
    pub struct Reading {
        channel: u8,
        value: i16,
    }
}

serializable! {
    /// Report frame: numeric header, a nested reading, three raw samples.
    pub struct Report {
        id: u16,
        reading: Reading,
        samples: FixedArray<u32, 3>,
    }
}

serializable! {
    pub struct Mixed {
        flag: bool,
        small: i8,
        big: u64,
        signed: i64,
        medium: u32,
        short: i16,
    }
}

const ALL_ORDERS: [Endianness; 5] = [
    Endianness::Little,
    Endianness::Big,
    Endianness::Native,
    Endianness::NativePacked,
    Endianness::Network,
];

fn sample_report() -> Report {
    Report::new(32, Reading::new(0, 2), vec![1, 2, 3].into())
}

#[test]
fn network_encoding_is_byte_exact() {
    let wire = sample_report().serialize().unwrap();
    assert_eq!(
        hex::encode(&wire),
        "0020000002000000010000000200000003"
    );
}

#[test]
fn little_endian_encoding_reverses_each_field() {
    let wire = serialize(&sample_report(), Endianness::Little).unwrap();
    assert_eq!(
        hex::encode(&wire),
        "2000000200010000000200000003000000"
    );
}

#[test]
fn network_order_is_big_endian() {
    let report = sample_report();
    assert_eq!(
        serialize(&report, Endianness::Network).unwrap(),
        serialize(&report, Endianness::Big).unwrap()
    );
}

#[test]
fn default_order_is_network() {
    let report = sample_report();
    assert_eq!(Endianness::default(), Endianness::Network);
    assert_eq!(
        report.serialize().unwrap(),
        serialize(&report, Endianness::default()).unwrap()
    );
}

#[test]
fn round_trips_in_every_byte_order() {
    let report = sample_report();
    for &order in ALL_ORDERS.iter() {
        let wire = serialize(&report, order).unwrap();
        assert_eq!(wire.len(), 17);
        assert_eq!(report, deserialize(&wire, order).unwrap());
    }
}

#[test]
fn byte_order_reaches_nested_fields() {
    // The nested reading and the array elements must flip together with the
    // top-level header when the order changes.
    let report = Report::new(0x0102, Reading::new(0xAA, 0x0304), vec![0x05060708, 0, 0].into());
    let big = serialize(&report, Endianness::Big).unwrap();
    let little = serialize(&report, Endianness::Little).unwrap();
    assert_eq!(&big[..2], [0x01, 0x02]);
    assert_eq!(&little[..2], [0x02, 0x01]);
    assert_eq!(&big[3..5], [0x03, 0x04]);
    assert_eq!(&little[3..5], [0x04, 0x03]);
    assert_eq!(&big[5..9], [0x05, 0x06, 0x07, 0x08]);
    assert_eq!(&little[5..9], [0x08, 0x07, 0x06, 0x05]);
}

#[test]
fn array_length_mismatch_is_rejected() {
    let report = Report::new(32, Reading::new(0, 2), vec![1, 2].into());
    assert_matches!(
        report.serialize(),
        Err(Error::ArrayLengthMismatch {
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn truncated_input_is_rejected_at_every_length() {
    let wire = sample_report().serialize().unwrap();
    for len in 0..wire.len() {
        assert_matches!(
            Report::deserialize(&wire[..len]),
            Err(Error::InsufficientInput { .. })
        );
    }
    assert!(Report::deserialize(&wire).is_ok());
}

#[test]
fn trailing_bytes_are_left_for_the_caller() {
    let mut wire = sample_report().serialize().unwrap();
    wire.extend_from_slice(&[0xAA, 0xBB]);
    let mut cursor = Cursor::new(&wire);
    let report: Report = deserialize_from(&mut cursor, Endianness::Network).unwrap();
    assert_eq!(report, sample_report());
    assert_eq!(cursor.position(), 17);
    assert_eq!(cursor.remaining(), 2);
}

#[test]
fn consecutive_records_share_one_cursor() {
    let first = sample_report();
    let second = Report::new(7, Reading::new(1, -1), vec![9, 8, 7].into());
    let mut wire = serialize(&first, Endianness::Little).unwrap();
    wire.extend(serialize(&second, Endianness::Little).unwrap());

    let mut cursor = Cursor::new(&wire);
    assert_eq!(
        first,
        deserialize_from::<Report>(&mut cursor, Endianness::Little).unwrap()
    );
    assert_eq!(
        second,
        deserialize_from::<Report>(&mut cursor, Endianness::Little).unwrap()
    );
    assert_eq!(cursor.remaining(), 0);
}

#[test]
fn reflection_follows_declaration_order() {
    let names = Report::fields()
        .iter()
        .map(|field| field.name)
        .collect::<Vec<_>>();
    assert_eq!(names, ["id", "reading", "samples"]);
    // Identical on repeated derivation.
    assert_eq!(Report::fields(), Report::fields());
    assert_eq!(Report::type_name(), "Report");
}

#[test]
fn reflection_expands_composite_shapes() {
    let fields = Report::fields();
    assert_eq!(fields[0].kind, FieldKind::Unsigned { bits: 16 });
    assert_matches!(
        &fields[1].kind,
        FieldKind::Record { name: "Reading", fields } if fields.len() == 2
    );
    assert_matches!(
        &fields[2].kind,
        FieldKind::Array { element, len: 3 } if **element == FieldKind::Unsigned { bits: 32 }
    );
}

#[test]
fn wire_size_matches_the_serialized_length() {
    assert_eq!(Report::wire_size().unwrap(), 17);
    assert_eq!(Report::field_size(), 17);
    assert_eq!(Reading::wire_size().unwrap(), 3);
    assert_eq!(
        Mixed::wire_size().unwrap(),
        Mixed::new(false, 0, 0, 0, 0, 0).serialize().unwrap().len()
    );
}

#[test]
fn width_is_independent_of_the_value() {
    for &value in [0_u64, 1, u64::MAX].iter() {
        assert_eq!(serialize(&value, Endianness::Network).unwrap().len(), 8);
    }
    for &value in [0_u16, u16::MAX].iter() {
        assert_eq!(serialize(&value, Endianness::Little).unwrap().len(), 2);
    }
}

#[test]
fn records_nest_inside_arrays() {
    serializable! {
        pub struct Pair {
            readings: FixedArray<Reading, 2>,
        }
    }

    let pair = Pair::new(vec![Reading::new(1, -2), Reading::new(3, 4)].into());
    for &order in ALL_ORDERS.iter() {
        let wire = serialize(&pair, order).unwrap();
        assert_eq!(wire.len(), 6);
        assert_eq!(pair, deserialize(&wire, order).unwrap());
    }

    let kind = <FixedArray<Reading, 2>>::kind();
    assert_eq!(kind.wire_size().unwrap(), 6);
}

#[test]
fn platform_width_fields_round_trip() {
    for &order in ALL_ORDERS.iter() {
        for &value in [0_usize, 1, usize::MAX].iter() {
            let wire = serialize(&value, order).unwrap();
            assert_eq!(wire.len(), std::mem::size_of::<usize>());
            assert_eq!(value, deserialize(&wire, order).unwrap());
        }
        for &value in [isize::MIN, -1, 0, isize::MAX].iter() {
            let wire = serialize(&value, order).unwrap();
            assert_eq!(value, deserialize(&wire, order).unwrap());
        }
    }
}

fn endianness_strategy() -> impl Strategy<Value = Endianness> {
    prop_oneof![
        Just(Endianness::Little),
        Just(Endianness::Big),
        Just(Endianness::Native),
        Just(Endianness::NativePacked),
        Just(Endianness::Network),
    ]
}

proptest! {
    #[test]
    fn mixed_round_trip(
        flag in any::<bool>(),
        small in any::<i8>(),
        big in any::<u64>(),
        signed in any::<i64>(),
        medium in any::<u32>(),
        short in any::<i16>(),
        order in endianness_strategy(),
    ) {
        let value = Mixed::new(flag, small, big, signed, medium, short);
        let wire = serialize(&value, order).unwrap();
        prop_assert_eq!(wire.len(), Mixed::field_size());
        prop_assert_eq!(deserialize::<Mixed>(&wire, order).unwrap(), value);
    }

    #[test]
    fn report_round_trip(
        id in any::<u16>(),
        channel in any::<u8>(),
        value in any::<i16>(),
        samples in proptest::collection::vec(any::<u32>(), 3),
        order in endianness_strategy(),
    ) {
        let report = Report::new(id, Reading::new(channel, value), samples.into());
        let wire = serialize(&report, order).unwrap();
        prop_assert_eq!(deserialize::<Report>(&wire, order).unwrap(), report);
    }

    #[test]
    fn decode_never_reads_past_a_complete_record(
        id in any::<u16>(),
        trailing in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let reading = Reading::new(1, 2);
        let mut wire = serialize(&Report::new(id, reading, vec![0, 1, 2].into()), Endianness::Network).unwrap();
        wire.extend(trailing.iter().copied());

        let mut cursor = Cursor::new(&wire);
        deserialize_from::<Report>(&mut cursor, Endianness::Network).unwrap();
        prop_assert_eq!(cursor.position(), Report::field_size());
    }
}
