pub mod unit;

use std::cmp::Ordering;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs the elapsed time at the given level (debug by default),
/// and evaluates to the value of the expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Compare two `PartialOrd` values dangerously. If the partial comparison
/// fails (returns `None`), this will panic. This is useful if you have floats
/// that you know for a fact will not be `NaN`.
pub fn cmp_unwrap<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap()
}

/// Serialize an [IndexMap](indexmap::IndexMap) as a list of its values,
/// instead of a map. Triangle ids are composite, and JSON doesn't support
/// complex keys, so each value must carry its own key.
pub mod triangle_map_to_vec_serde {
    use crate::tessellation::{Triangle, TriangleId};
    use fnv::FnvBuildHasher;
    use indexmap::IndexMap;
    use serde::{
        ser::SerializeSeq, Deserialize, Deserializer, Serializer,
    };

    pub fn serialize<S>(
        map: &IndexMap<TriangleId, Triangle, FnvBuildHasher>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(map.len()))?;
        for triangle in map.values() {
            seq.serialize_element(triangle)?;
        }
        seq.end()
    }

    /// Deserialize a list of triangles back into a map, keyed by each
    /// triangle's id. Insertion order is preserved, so resolution order
    /// survives a round trip.
    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<IndexMap<TriangleId, Triangle, FnvBuildHasher>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let vec: Vec<Triangle> = Vec::deserialize(deserializer)?;
        Ok(vec
            .into_iter()
            .map(|triangle| (triangle.id(), triangle))
            .collect())
    }
}
