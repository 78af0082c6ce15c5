//! Named parameter tensors backed by a growable pool.

use indexmap::IndexMap;

use loam_pool::{BlockHandle, GrowablePool};

use crate::dim::Dim;
use crate::error::TensorError;
use crate::values::{read_f32s, write_f32s};

/// Identifier of a parameter within its collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParamId(pub usize);

/// One named tensor: a fully-qualified name, a shape, and a handle into the
/// owning collection's pool.
pub struct Parameter {
    name: String,
    dim: Dim,
    handle: BlockHandle,
}

impl Parameter {
    /// Fully-qualified, slash-separated name (`/mlp/W`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shape of the tensor.
    pub fn dim(&self) -> &Dim {
        &self.dim
    }

    /// Location of the tensor's bytes in the collection's pool.
    pub fn handle(&self) -> BlockHandle {
        self.handle
    }
}

/// An insertion-ordered collection of named parameters, owning the pool
/// their storage is drawn from.
///
/// All value access goes through the collection, which mediates between
/// parameter handles and the pool's byte views. Iteration order is
/// insertion order — the order the persistence layer saves in.
///
/// # Example
///
/// ```
/// use loam_core::HostAllocator;
/// use loam_pool::{GrowablePool, PoolConfig};
/// use loam_tensor::{Dim, ParameterCollection};
///
/// let pool = GrowablePool::new(
///     PoolConfig::new("params", 1 << 16),
///     Box::new(HostAllocator::new()),
/// )
/// .unwrap();
/// let mut params = ParameterCollection::new(pool);
///
/// let w = params.add_parameter("/mlp/W", Dim::new(&[4, 2])).unwrap();
/// params.write_values(w, &[1.0; 8]).unwrap();
/// assert_eq!(params.read_values(w), vec![1.0; 8]);
/// ```
pub struct ParameterCollection {
    pool: GrowablePool,
    params: Vec<Parameter>,
    index: IndexMap<String, usize>,
}

impl ParameterCollection {
    /// Create an empty collection drawing storage from `pool`.
    pub fn new(pool: GrowablePool) -> Self {
        Self {
            pool,
            params: Vec::new(),
            index: IndexMap::new(),
        }
    }

    /// Add a zero-initialised parameter with the given name and shape.
    ///
    /// Names must be unique within the collection, non-empty, and contain
    /// no whitespace (they are written as single tokens by the persistence
    /// layer). Storage comes from the collection's pool; a backend failure
    /// surfaces as [`TensorError::Pool`].
    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        dim: Dim,
    ) -> Result<ParamId, TensorError> {
        let name = name.into();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(TensorError::InvalidName { name });
        }
        if self.index.contains_key(&name) {
            return Err(TensorError::DuplicateName { name });
        }

        let handle = self.pool.allocate(dim.byte_len())?;
        self.pool.bytes_mut(handle).fill(0);

        let id = ParamId(self.params.len());
        self.index.insert(name.clone(), id.0);
        self.params.push(Parameter {
            name,
            dim,
            handle,
        });
        Ok(id)
    }

    /// Look up a parameter by fully-qualified name.
    pub fn get(&self, name: &str) -> Option<ParamId> {
        self.index.get(name).map(|&i| ParamId(i))
    }

    /// The parameter behind an id.
    ///
    /// # Panics
    ///
    /// Panics if the id did not come from this collection.
    pub fn param(&self, id: ParamId) -> &Parameter {
        &self.params[id.0]
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the collection holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamId, &Parameter)> {
        self.params
            .iter()
            .enumerate()
            .map(|(i, p)| (ParamId(i), p))
    }

    /// Copy a parameter's values out of the pool.
    ///
    /// # Panics
    ///
    /// Panics if the id did not come from this collection.
    pub fn read_values(&self, id: ParamId) -> Vec<f32> {
        let param = &self.params[id.0];
        read_f32s(self.pool.bytes(param.handle))
    }

    /// Overwrite a parameter's values.
    ///
    /// `values` must hold exactly `dim().total_elems()` elements.
    ///
    /// # Panics
    ///
    /// Panics if the id did not come from this collection.
    pub fn write_values(&mut self, id: ParamId, values: &[f32]) -> Result<(), TensorError> {
        let param = &self.params[id.0];
        let expected = param.dim.total_elems();
        if values.len() != expected {
            return Err(TensorError::LengthMismatch {
                name: param.name.clone(),
                expected,
                found: values.len(),
            });
        }
        write_f32s(self.pool.bytes_mut(param.handle), values);
        Ok(())
    }

    /// The pool backing this collection's storage.
    pub fn pool(&self) -> &GrowablePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loam_core::HostAllocator;
    use loam_pool::PoolConfig;

    fn collection() -> ParameterCollection {
        let pool = GrowablePool::new(
            PoolConfig::new("params", 4096),
            Box::new(HostAllocator::new()),
        )
        .unwrap();
        ParameterCollection::new(pool)
    }

    #[test]
    fn new_parameters_read_as_zero() {
        let mut params = collection();
        let id = params.add_parameter("/a", Dim::new(&[3, 2])).unwrap();
        assert_eq!(params.read_values(id), vec![0.0; 6]);
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut params = collection();
        let id = params.add_parameter("/w", Dim::new(&[4])).unwrap();
        params.write_values(id, &[1.0, -2.0, 3.5, 0.25]).unwrap();
        assert_eq!(params.read_values(id), vec![1.0, -2.0, 3.5, 0.25]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut params = collection();
        params.add_parameter("/w", Dim::new(&[1])).unwrap();
        let err = params.add_parameter("/w", Dim::new(&[2])).unwrap_err();
        assert!(matches!(err, TensorError::DuplicateName { .. }));
    }

    #[test]
    fn names_with_whitespace_are_rejected() {
        let mut params = collection();
        let err = params.add_parameter("/bad name", Dim::new(&[1])).unwrap_err();
        assert!(matches!(err, TensorError::InvalidName { .. }));
        assert!(params.add_parameter("", Dim::new(&[1])).is_err());
    }

    #[test]
    fn wrong_value_count_is_length_mismatch() {
        let mut params = collection();
        let id = params.add_parameter("/w", Dim::new(&[2, 2])).unwrap();
        let err = params.write_values(id, &[1.0; 3]).unwrap_err();
        assert!(matches!(
            err,
            TensorError::LengthMismatch {
                expected: 4,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut params = collection();
        params.add_parameter("/z", Dim::new(&[1])).unwrap();
        params.add_parameter("/a", Dim::new(&[1])).unwrap();
        params.add_parameter("/m", Dim::new(&[1])).unwrap();
        let names: Vec<_> = params.iter().map(|(_, p)| p.name().to_string()).collect();
        assert_eq!(names, vec!["/z", "/a", "/m"]);
    }

    #[test]
    fn lookup_by_name_matches_ids() {
        let mut params = collection();
        let a = params.add_parameter("/a", Dim::new(&[1])).unwrap();
        let b = params.add_parameter("/b", Dim::new(&[1])).unwrap();
        assert_eq!(params.get("/a"), Some(a));
        assert_eq!(params.get("/b"), Some(b));
        assert_eq!(params.get("/c"), None);
    }

    #[test]
    fn parameters_grow_the_pool_when_needed() {
        let pool = GrowablePool::new(
            PoolConfig::new("small", 64),
            Box::new(HostAllocator::new()),
        )
        .unwrap();
        let mut params = ParameterCollection::new(pool);
        // 64 floats = 256 bytes, past the 64-byte first segment.
        let id = params.add_parameter("/big", Dim::new(&[64])).unwrap();
        params.write_values(id, &[9.0; 64]).unwrap();
        assert_eq!(params.read_values(id), vec![9.0; 64]);
        assert!(params.pool().segment_count() > 1);
    }
}
