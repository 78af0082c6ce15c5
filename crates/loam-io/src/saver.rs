//! Parameter stream saver.

use std::io::Write;

use loam_tensor::ParameterCollection;

use crate::error::IoError;
use crate::format::encode_record;

/// Writes parameter records to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production code
/// can use `BufWriter<File>`.
///
/// # Examples
///
/// ```
/// use loam_core::HostAllocator;
/// use loam_pool::{GrowablePool, PoolConfig};
/// use loam_tensor::{Dim, ParameterCollection};
/// use loam_io::{TextLoader, TextSaver};
///
/// let pool = GrowablePool::new(
///     PoolConfig::new("params", 4096),
///     Box::new(HostAllocator::new()),
/// )
/// .unwrap();
/// let mut params = ParameterCollection::new(pool);
/// let w = params.add_parameter("/mlp/W", Dim::new(&[2, 2])).unwrap();
/// params.write_values(w, &[1.0, 2.0, 3.0, 4.0]).unwrap();
///
/// // Save everything to an in-memory buffer.
/// let mut buf = Vec::new();
/// let mut saver = TextSaver::new(&mut buf);
/// saver.save(&params, "").unwrap();
/// assert_eq!(saver.records_written(), 1);
/// drop(saver);
///
/// // Load it back into a freshly built collection of the same layout.
/// let pool = GrowablePool::new(
///     PoolConfig::new("params", 4096),
///     Box::new(HostAllocator::new()),
/// )
/// .unwrap();
/// let mut restored = ParameterCollection::new(pool);
/// let w2 = restored.add_parameter("/mlp/W", Dim::new(&[2, 2])).unwrap();
/// let mut loader = TextLoader::new(buf.as_slice());
/// loader.populate(&mut restored, "").unwrap();
/// assert_eq!(restored.read_values(w2), vec![1.0, 2.0, 3.0, 4.0]);
/// ```
pub struct TextSaver<W: Write> {
    writer: W,
    records_written: u64,
}

impl<W: Write> TextSaver<W> {
    /// Create a saver over the given sink.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    /// Save every parameter whose fully-qualified name starts with `key`,
    /// in collection insertion order.
    ///
    /// An empty `key` saves everything. Returns the number of records
    /// written.
    pub fn save(&mut self, params: &ParameterCollection, key: &str) -> Result<usize, IoError> {
        let mut written = 0;
        for (id, param) in params.iter() {
            if !param.name().starts_with(key) {
                continue;
            }
            let values = params.read_values(id);
            encode_record(&mut self.writer, param.name(), param.dim(), &values)?;
            written += 1;
        }
        self.records_written += written as u64;
        Ok(written)
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), IoError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Consume the saver and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
