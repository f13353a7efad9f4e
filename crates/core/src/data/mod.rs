//! The tableau data that gets plotted onto a tessellation. Data is loaded
//! from a static JSON array of [TableauRecord]s.

pub mod preprocess;

use crate::tessellation::AlcoveCoordinate;
use anyhow::Context;
use indexmap::IndexMap;
use log::info;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

/// Grouping key for records. Records in the same class get a shared
/// checkbox that toggles border overlays for all of them.
pub type ClassId = u32;

/// The class id assigned to records that don't belong to any class. This
/// class never gets a checkbox.
pub const UNCLASSIFIED: ClassId = 0;

/// A single data point: one semistandard Young tableau, plus the metadata
/// used to place and color it. Any extra fields in the input are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableauRecord {
    pub class_id: ClassId,

    /// Where this record lands in the lattice
    pub alcove_coordinates: AlcoveCoordinate,

    /// Does this tableau index a cluster variable? Accepts either a bool or
    /// a `0`/`1` integer when deserializing, and is always serialized as a
    /// bool.
    #[serde(deserialize_with = "serde_flag::deserialize")]
    pub is_cluster: bool,

    /// Count of each entry value in the tableau
    pub weight_vector: Vec<i64>,

    /// Rows of the tableau. This is display data only.
    pub tableau: Vec<Vec<u32>>,
}

impl TableauRecord {
    /// The weight vector in compact JSON form, e.g. `[1,0,2]`. Used as the
    /// human-readable label for a class.
    pub fn weight_label(&self) -> String {
        // Serializing a vec of ints can't fail
        serde_json::to_string(&self.weight_vector)
            .unwrap_or_else(|_| format!("{:?}", self.weight_vector))
    }
}

/// Parse a list of records from a JSON string
pub fn parse_records(json: &str) -> anyhow::Result<Vec<TableauRecord>> {
    serde_json::from_str(json).context("error deserializing tableau records")
}

/// Load a list of records from a JSON file
pub fn load_records(path: &Path) -> anyhow::Result<Vec<TableauRecord>> {
    let file = File::open(path)
        .with_context(|| format!("error opening data file {:?}", path))?;
    let records: Vec<TableauRecord> =
        serde_json::from_reader(BufReader::new(file)).with_context(|| {
            format!("error deserializing tableau records from {:?}", path)
        })?;
    info!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

/// One entry in the class selection list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassControl {
    pub class_id: ClassId,
    /// Weight vector of the first record in the class, as JSON
    pub label: String,
    /// Indexes of every record in this class, in data order
    pub members: Vec<usize>,
}

/// Group records by class id, in order of first appearance. The
/// [UNCLASSIFIED] class is left out, since it never gets a control.
pub fn class_controls(
    records: &[TableauRecord],
) -> IndexMap<ClassId, ClassControl> {
    let mut controls: IndexMap<ClassId, ClassControl> = IndexMap::new();
    for (i, record) in records.iter().enumerate() {
        if record.class_id == UNCLASSIFIED {
            continue;
        }
        controls
            .entry(record.class_id)
            .or_insert_with(|| ClassControl {
                class_id: record.class_id,
                label: record.weight_label(),
                members: Vec::new(),
            })
            .members
            .push(i);
    }
    controls
}

/// Deserialization for flags that might be encoded as either bools or
/// integers. Any nonzero integer is `true`.
mod serde_flag {
    use serde::{de::Visitor, Deserializer};
    use std::fmt;

    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a bool or an integer")
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value != 0)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value != 0)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FlagVisitor)
    }
}
