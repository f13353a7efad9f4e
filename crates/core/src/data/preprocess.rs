//! Derive plottable records from raw tableaux. Each tableau is reduced to
//! its weight vector, and from there to an SL₃ weight and a lattice
//! coordinate. Tableaux that share a weight vector form an equivalence
//! class, and large enough classes get a class id.

use crate::{
    data::{ClassId, TableauRecord, UNCLASSIFIED},
    tessellation::AlcoveCoordinate,
};
use anyhow::{bail, Context};
use fnv::FnvHashMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Largest entry value counted in a weight vector. Tableau entries are
/// drawn from `1..=MAX_ENTRY`.
pub const MAX_ENTRY: usize = 12;

/// A raw tableau, before any derived data is attached
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawTableau {
    pub tableau: Vec<Vec<u32>>,
    pub is_cluster: bool,
}

/// A weight in the SL₃ weight lattice, plus its position in the alcove
/// coordinate system
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sl3Weight {
    pub weight: [i64; 3],
    pub alcove: AlcoveCoordinate,
}

/// Count how many times each value in `1..=12` appears in a tableau. Out of
/// range entries are ignored.
pub fn weight_vector(tableau: &[Vec<u32>]) -> [i64; MAX_ENTRY] {
    let mut weights = [0; MAX_ENTRY];
    for &cell in tableau.iter().flatten() {
        let cell = cell as usize;
        if (1..=MAX_ENTRY).contains(&cell) {
            weights[cell - 1] += 1;
        }
    }
    weights
}

/// Fold a 12-component weight vector down to an SL₃ weight. Entries are
/// bucketed by their index mod 3. Each bucket total is shifted by a third of
/// the overall total (floor division), and the lattice coordinate is the
/// pairwise difference of the shifted totals.
pub fn sl3_weight(weight_vector: &[i64]) -> anyhow::Result<Sl3Weight> {
    if weight_vector.len() != MAX_ENTRY {
        bail!(
            "expected weight vector of length {}, got {}",
            MAX_ENTRY,
            weight_vector.len()
        );
    }

    let bucket = |offset: usize| -> i64 {
        weight_vector.iter().skip(offset).step_by(3).sum()
    };
    let m1 = bucket(0);
    let m2 = bucket(1);
    let m0 = bucket(2);
    let avg = (m1 + m2 + m0).div_euclid(3);

    let weight = [m1 - avg, m2 - avg, m0 - avg];
    Ok(Sl3Weight {
        weight,
        alcove: AlcoveCoordinate::new(
            (weight[0] - weight[1]) as f64,
            (weight[1] - weight[2]) as f64,
        ),
    })
}

/// Summary of one weight equivalence class. The serialized field names are
/// the ones the class summary file has always used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightClass {
    pub id: ClassId,
    pub weight_vector: Vec<i64>,
    pub total_count: usize,
    #[serde(rename = "valid_count")]
    pub cluster_count: usize,
    #[serde(rename = "invalid_count")]
    pub non_cluster_count: usize,
    /// First member, in input order, that indexes a cluster variable
    #[serde(rename = "example_tableau_valid")]
    pub cluster_example: Option<Vec<Vec<u32>>>,
    /// First member, in input order, that doesn't index a cluster variable
    #[serde(rename = "example_tableau_invalid")]
    pub non_cluster_example: Option<Vec<Vec<u32>>>,
}

/// Group records by weight vector. Classes with `min_size` or fewer members
/// are dropped. The rest are sorted by size, largest first (ties keep
/// first-appearance order), and numbered from 1.
pub fn weight_classes(
    records: &[TableauRecord],
    min_size: usize,
) -> Vec<WeightClass> {
    // Members of each class, in input order
    let mut order: Vec<&[i64]> = Vec::new();
    let mut members: FnvHashMap<&[i64], Vec<&TableauRecord>> =
        FnvHashMap::default();
    for record in records {
        let key = record.weight_vector.as_slice();
        members
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(record);
    }

    let mut classes: Vec<WeightClass> = order
        .into_iter()
        .filter_map(|key| {
            let members = &members[key];
            let total_count = members.len();
            if total_count <= min_size {
                return None;
            }
            let example = |is_cluster: bool| {
                members
                    .iter()
                    .find(|record| record.is_cluster == is_cluster)
                    .map(|record| record.tableau.clone())
            };
            let cluster_count =
                members.iter().filter(|record| record.is_cluster).count();
            Some(WeightClass {
                id: UNCLASSIFIED,
                weight_vector: key.to_vec(),
                total_count,
                cluster_count,
                non_cluster_count: total_count - cluster_count,
                cluster_example: example(true),
                non_cluster_example: example(false),
            })
        })
        .collect();
    // Stable sort, so equal sizes stay in first-appearance order
    classes.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    for (i, class) in classes.iter_mut().enumerate() {
        class.id = (i + 1) as ClassId;
    }
    classes
}

/// Turn raw tableaux into full records. Each record gets its weight
/// vector, its lattice position, and the id of its weight class (or
/// [UNCLASSIFIED] if its class was too small). The kept weight classes are
/// returned alongside the records.
pub fn build_records(
    raw: Vec<RawTableau>,
    min_class_size: usize,
) -> anyhow::Result<(Vec<TableauRecord>, Vec<WeightClass>)> {
    let mut records = raw
        .into_iter()
        .map(|raw| {
            let weights = weight_vector(&raw.tableau);
            let sl3 = sl3_weight(&weights)?;
            Ok(TableauRecord {
                class_id: UNCLASSIFIED,
                alcove_coordinates: sl3.alcove,
                is_cluster: raw.is_cluster,
                weight_vector: weights.to_vec(),
                tableau: raw.tableau,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let classes = weight_classes(&records, min_class_size);
    debug!(
        "Kept {} weight classes of more than {} members",
        classes.len(),
        min_class_size
    );
    let ids: FnvHashMap<&[i64], ClassId> = classes
        .iter()
        .map(|class| (class.weight_vector.as_slice(), class.id))
        .collect();
    for record in &mut records {
        if let Some(&id) = ids.get(record.weight_vector.as_slice()) {
            record.class_id = id;
        }
    }
    Ok((records, classes))
}

/// Rewrite a nested tuple literal like `((1, 2), (3,))` into the
/// equivalent JSON list. Parens become brackets, and a trailing comma before
/// a closing bracket is dropped. Input that's already a JSON list passes
/// through unchanged.
fn normalize_tableau_literal(line: &str) -> String {
    let mut normalized = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '(' => normalized.push('['),
            ')' => normalized.push(']'),
            ',' => {
                // Look past whitespace for a closer
                let rest = chars.clone().find(|c| !c.is_whitespace());
                if !matches!(rest, Some(')') | Some(']')) {
                    normalized.push(',');
                }
            }
            _ => normalized.push(c),
        }
    }
    normalized
}

/// Parse tableaux from a reader, one per line. Each line is a nested list
/// literal like `[[1, 2, 3], [4, 5, 6]]`. Tuple literals such as
/// `((1, 2, 3), (4, 5, 6))` are accepted too, including single-element
/// tuples with a trailing comma. Blank lines are skipped.
pub fn read_tableaux(
    reader: impl BufRead,
    is_cluster: bool,
) -> anyhow::Result<Vec<RawTableau>> {
    let mut tableaux = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.context("error reading tableau line")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let tableau: Vec<Vec<u32>> =
            serde_json::from_str(&normalize_tableau_literal(line))
            .with_context(|| format!("invalid tableau on line {}", i + 1))?;
        tableaux.push(RawTableau {
            tableau,
            is_cluster,
        });
    }
    Ok(tableaux)
}

/// Load tableaux from a file. See [read_tableaux] for the format.
pub fn load_tableaux(
    path: &Path,
    is_cluster: bool,
) -> anyhow::Result<Vec<RawTableau>> {
    let file = File::open(path)
        .with_context(|| format!("error opening tableau file {:?}", path))?;
    let tableaux = read_tableaux(BufReader::new(file), is_cluster)
        .with_context(|| format!("error reading tableaux from {:?}", path))?;
    info!("Loaded {} tableaux from {:?}", tableaux.len(), path);
    Ok(tableaux)
}
