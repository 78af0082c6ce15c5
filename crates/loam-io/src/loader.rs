//! Parameter stream loader.

use std::collections::HashSet;
use std::io::BufRead;

use loam_tensor::ParameterCollection;

use crate::error::IoError;
use crate::format::decode_record;

/// Reads parameter records from a byte stream into an existing collection.
///
/// Loading does not create parameters: the receiving collection must
/// already hold a parameter of identical name and shape for every record
/// under the requested key — the standard flow is to rebuild the model
/// structure first, then populate its values. Records are applied in file
/// order.
///
/// Generic over `R: BufRead` so tests can use `&[u8]` and production code
/// can use `BufReader<File>`.
pub struct TextLoader<R: BufRead> {
    reader: R,
    line: u64,
}

impl<R: BufRead> TextLoader<R> {
    /// Create a loader over the given source.
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    /// Fill every parameter of `params` whose name starts with `key` from
    /// the stream, in file order.
    ///
    /// Records outside `key` are skipped. Fails with
    /// [`IoError::NameMismatch`] when a record under `key` has no
    /// counterpart in the collection, [`IoError::ShapeMismatch`] when the
    /// shapes differ, and [`IoError::MissingParameter`] when the stream
    /// ends before every parameter under `key` has been filled.
    ///
    /// Returns the number of parameters populated.
    pub fn populate(
        &mut self,
        params: &mut ParameterCollection,
        key: &str,
    ) -> Result<usize, IoError> {
        let mut filled = HashSet::new();

        while let Some(record) = decode_record(&mut self.reader, &mut self.line)? {
            if !record.name.starts_with(key) {
                continue;
            }
            let id = params
                .get(&record.name)
                .ok_or_else(|| IoError::NameMismatch {
                    name: record.name.clone(),
                })?;
            let expected = params.param(id).dim().clone();
            if expected != record.dim {
                return Err(IoError::ShapeMismatch {
                    name: record.name,
                    expected,
                    found: record.dim,
                });
            }
            params
                .write_values(id, &record.values)
                .expect("record length was validated against its shape");
            filled.insert(record.name);
        }

        for (_, param) in params.iter() {
            if param.name().starts_with(key) && !filled.contains(param.name()) {
                return Err(IoError::MissingParameter {
                    name: param.name().to_string(),
                });
            }
        }
        Ok(filled.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saver::TextSaver;
    use loam_core::HostAllocator;
    use loam_pool::{GrowablePool, PoolConfig};
    use loam_tensor::Dim;

    fn empty_collection() -> ParameterCollection {
        let pool = GrowablePool::new(
            PoolConfig::new("params", 4096),
            Box::new(HostAllocator::new()),
        )
        .unwrap();
        ParameterCollection::new(pool)
    }

    /// Collection with three parameters under two prefixes.
    fn model() -> ParameterCollection {
        let mut params = empty_collection();
        params.add_parameter("/mlp/W", Dim::new(&[2, 3])).unwrap();
        params.add_parameter("/mlp/b", Dim::new(&[3])).unwrap();
        params.add_parameter("/out/W", Dim::new(&[3, 1])).unwrap();
        params
    }

    fn fill_distinct(params: &mut ParameterCollection) {
        let ids: Vec<_> = params.iter().map(|(id, p)| (id, p.dim().total_elems())).collect();
        for (i, (id, n)) in ids.into_iter().enumerate() {
            let values: Vec<f32> = (0..n).map(|j| (i * 100 + j) as f32).collect();
            params.write_values(id, &values).unwrap();
        }
    }

    #[test]
    fn save_populate_round_trip_restores_every_value() {
        let mut original = model();
        fill_distinct(&mut original);

        let mut buf = Vec::new();
        TextSaver::new(&mut buf).save(&original, "").unwrap();

        let mut restored = model();
        let count = TextLoader::new(buf.as_slice())
            .populate(&mut restored, "")
            .unwrap();
        assert_eq!(count, 3);

        for ((_, a), (_, b)) in original.iter().zip(restored.iter()) {
            assert_eq!(a.name(), b.name());
        }
        let a = original.get("/mlp/W").unwrap();
        let b = restored.get("/mlp/W").unwrap();
        assert_eq!(original.read_values(a), restored.read_values(b));
    }

    #[test]
    fn key_prefix_restricts_save_and_load() {
        let mut original = model();
        fill_distinct(&mut original);

        let mut buf = Vec::new();
        let written = TextSaver::new(&mut buf).save(&original, "/mlp/").unwrap();
        assert_eq!(written, 2);

        // A collection holding only the /mlp/ parameters loads cleanly.
        let mut restored = empty_collection();
        restored.add_parameter("/mlp/W", Dim::new(&[2, 3])).unwrap();
        restored.add_parameter("/mlp/b", Dim::new(&[3])).unwrap();
        let count = TextLoader::new(buf.as_slice())
            .populate(&mut restored, "/mlp/")
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn load_skips_records_outside_the_key() {
        let mut original = model();
        fill_distinct(&mut original);
        let mut buf = Vec::new();
        TextSaver::new(&mut buf).save(&original, "").unwrap();

        // Restored collection only declares /out/; /mlp/ records are skipped.
        let mut restored = empty_collection();
        let id = restored.add_parameter("/out/W", Dim::new(&[3, 1])).unwrap();
        let count = TextLoader::new(buf.as_slice())
            .populate(&mut restored, "/out/")
            .unwrap();
        assert_eq!(count, 1);
        let expected = original.read_values(original.get("/out/W").unwrap());
        assert_eq!(restored.read_values(id), expected);
    }

    #[test]
    fn unknown_record_name_is_name_mismatch() {
        let mut original = model();
        fill_distinct(&mut original);
        let mut buf = Vec::new();
        TextSaver::new(&mut buf).save(&original, "").unwrap();

        let mut restored = empty_collection();
        restored.add_parameter("/mlp/W", Dim::new(&[2, 3])).unwrap();
        let err = TextLoader::new(buf.as_slice())
            .populate(&mut restored, "")
            .unwrap_err();
        assert!(matches!(err, IoError::NameMismatch { ref name } if name == "/mlp/b"));
    }

    #[test]
    fn wrong_shape_is_shape_mismatch() {
        let mut original = empty_collection();
        original.add_parameter("/w", Dim::new(&[2, 3])).unwrap();
        let mut buf = Vec::new();
        TextSaver::new(&mut buf).save(&original, "").unwrap();

        let mut restored = empty_collection();
        restored.add_parameter("/w", Dim::new(&[3, 2])).unwrap();
        let err = TextLoader::new(buf.as_slice())
            .populate(&mut restored, "")
            .unwrap_err();
        match err {
            IoError::ShapeMismatch {
                name,
                expected,
                found,
            } => {
                assert_eq!(name, "/w");
                assert_eq!(expected, Dim::new(&[3, 2]));
                assert_eq!(found, Dim::new(&[2, 3]));
            }
            other => panic!("expected ShapeMismatch, got {other}"),
        }
    }

    #[test]
    fn truncated_stream_reports_missing_parameter() {
        let mut original = empty_collection();
        original.add_parameter("/a", Dim::new(&[1])).unwrap();
        let mut buf = Vec::new();
        TextSaver::new(&mut buf).save(&original, "").unwrap();

        let mut restored = empty_collection();
        restored.add_parameter("/a", Dim::new(&[1])).unwrap();
        restored.add_parameter("/b", Dim::new(&[1])).unwrap();
        let err = TextLoader::new(buf.as_slice())
            .populate(&mut restored, "")
            .unwrap_err();
        assert!(matches!(err, IoError::MissingParameter { ref name } if name == "/b"));
    }

    #[test]
    fn loaded_values_live_in_the_collection_pool() {
        let mut original = empty_collection();
        let id = original.add_parameter("/w", Dim::new(&[8])).unwrap();
        original.write_values(id, &[3.0; 8]).unwrap();
        let mut buf = Vec::new();
        TextSaver::new(&mut buf).save(&original, "").unwrap();

        let mut restored = empty_collection();
        restored.add_parameter("/w", Dim::new(&[8])).unwrap();
        TextLoader::new(buf.as_slice())
            .populate(&mut restored, "")
            .unwrap();
        // The restored tensor's bytes come from the collection's pool.
        assert!(restored.pool().used() >= 32);
    }
}
