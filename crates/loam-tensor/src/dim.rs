//! Tensor shape descriptions.

use std::fmt;

use smallvec::SmallVec;

/// Shape of a tensor: an ordered list of dimension sizes.
///
/// Stored inline for up to four dimensions, which covers the vast majority
/// of tensor shapes in practice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dim {
    dims: SmallVec<[usize; 4]>,
}

impl Dim {
    /// Create a shape from a slice of dimension sizes.
    pub fn new(dims: &[usize]) -> Self {
        Self {
            dims: SmallVec::from_slice(dims),
        }
    }

    /// Number of dimensions.
    pub fn ndims(&self) -> usize {
        self.dims.len()
    }

    /// The dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of f32 elements: the product of all dimensions.
    ///
    /// An empty shape is a scalar and has one element.
    pub fn total_elems(&self) -> usize {
        self.dims.iter().product()
    }

    /// Bytes needed to store the tensor as f32 values.
    pub fn byte_len(&self) -> usize {
        self.total_elems() * std::mem::size_of::<f32>()
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "}}")
    }
}

impl From<Vec<usize>> for Dim {
    fn from(dims: Vec<usize>) -> Self {
        Self {
            dims: SmallVec::from_vec(dims),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_elems_is_the_product() {
        assert_eq!(Dim::new(&[2, 3, 4]).total_elems(), 24);
        assert_eq!(Dim::new(&[7]).total_elems(), 7);
    }

    #[test]
    fn scalar_shape_has_one_element() {
        assert_eq!(Dim::new(&[]).total_elems(), 1);
        assert_eq!(Dim::new(&[]).byte_len(), 4);
    }

    #[test]
    fn byte_len_is_four_per_element() {
        assert_eq!(Dim::new(&[256, 128]).byte_len(), 256 * 128 * 4);
    }

    #[test]
    fn display_is_braced_and_comma_separated() {
        assert_eq!(Dim::new(&[256, 128]).to_string(), "{256,128}");
        assert_eq!(Dim::new(&[5]).to_string(), "{5}");
        assert_eq!(Dim::new(&[]).to_string(), "{}");
    }

    #[test]
    fn zero_dimension_means_zero_elements() {
        assert_eq!(Dim::new(&[4, 0]).total_elems(), 0);
    }
}
