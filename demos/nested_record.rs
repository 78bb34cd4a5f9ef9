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

//! Declares a pair of nested records and round-trips one over the wire in
//! several byte orders.

use deser::{serializable, Endianness, FixedArray, Record};

serializable! {
    /// Fixed-size sensor reading.
    pub struct Reading {
        channel: u8,
        value: i16,
    }
}

serializable! {
    /// Report frame: numeric header, one nested reading, three raw samples.
    pub struct Report {
        id: u16,
        reading: Reading,
        samples: FixedArray<u32, 3>,
    }
}

fn main() -> deser::Result<()> {
    let report = Report::new(32, Reading::new(0, 2), vec![1, 2, 3].into());

    let wire = report.serialize()?;
    println!("network order ({} bytes): {}", wire.len(), hex::encode(&wire));

    let little = deser::serialize(&report, Endianness::Little)?;
    println!("little endian ({} bytes): {}", little.len(), hex::encode(&little));

    let decoded = Report::deserialize(&wire)?;
    println!("decoded: {:?}", decoded);
    assert_eq!(decoded, report);

    println!("schema of {}:", Report::type_name());
    for field in Report::fields() {
        println!("  {}: {:?}", field.name, field.kind);
    }
    Ok(())
}
