//! Binary matrix format and storage backends.
//!
//! # Format
//!
//! ```text
//! +----------------------+
//! | Magic (4 bytes)      |  "MAT\0"
//! +----------------------+
//! | Rows (W bytes)       |  isize, native-endian, > 0
//! +----------------------+
//! | Cols (W bytes)       |  isize, native-endian, > 0
//! +----------------------+
//! | Entries              |  rows * cols f64, native-endian, row-major
//! +----------------------+
//! ```
//!
//! `W` is the host word size, so files are only portable between hosts
//! with the same word size and endianness.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Cursor, Read, Write};
use std::path::{Component, Path, PathBuf};

use log::debug;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::dense_matrix::Matrix;
use crate::error::{MatError, Result};

/// Format tag at offset 0.
pub const MAGIC: [u8; 4] = *b"MAT\0";

const WORD: usize = std::mem::size_of::<isize>();
const ENTRY: usize = std::mem::size_of::<f64>();

/// Header size: magic (4) + rows (W) + cols (W).
pub const HEADER_SIZE: usize = MAGIC.len() + 2 * WORD;

/// Limits applied while decoding.
#[derive(Clone, Copy, Debug)]
pub struct CodecConfig {
    /// Largest `rows * cols` accepted; checked before any payload is read.
    pub max_elements: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_elements: 1 << 28,
        }
    }
}

fn encode_dim(value: usize) -> Result<[u8; WORD]> {
    isize::try_from(value)
        .map(isize::to_ne_bytes)
        .map_err(|_| MatError::Parse(format!("dimension {value} does not fit in isize")))
}

fn encode_header(matrix: &Matrix) -> Result<[u8; HEADER_SIZE]> {
    let mut header = [0u8; HEADER_SIZE];
    header[..MAGIC.len()].copy_from_slice(&MAGIC);
    header[MAGIC.len()..MAGIC.len() + WORD].copy_from_slice(&encode_dim(matrix.num_rows())?);
    header[MAGIC.len() + WORD..].copy_from_slice(&encode_dim(matrix.num_cols())?);
    Ok(header)
}

/// Writes `matrix` to `writer` and flushes it.
///
/// # Errors
///
/// [`MatError::Io`] if any write comes up short or fails.
pub fn serialize<W: Write>(matrix: &Matrix, mut writer: W) -> Result<()> {
    writer.write_all(&encode_header(matrix)?)?;
    for v in matrix.as_slice() {
        writer.write_all(&v.to_ne_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads one matrix from `reader` with the default [`CodecConfig`].
///
/// # Errors
///
/// See [`deserialize_with`].
pub fn deserialize<R: Read>(reader: R) -> Result<Matrix> {
    deserialize_with(reader, &CodecConfig::default())
}

fn decode_dim<R: Read>(reader: &mut R, field: &str) -> Result<usize> {
    let mut buf = [0u8; WORD];
    reader.read_exact(&mut buf)?;
    let value = isize::from_ne_bytes(buf);
    if value <= 0 {
        return Err(MatError::Parse(format!("{field} must be positive, got {value}")));
    }
    usize::try_from(value).map_err(|_| MatError::Parse(format!("{field} out of range: {value}")))
}

/// Reads one matrix from `reader`.
///
/// # Errors
///
/// [`MatError::Parse`] for a wrong magic tag, non-positive dimensions or an
/// element count above `config.max_elements`; [`MatError::Io`] if the
/// header or payload is truncated.
pub fn deserialize_with<R: Read>(mut reader: R, config: &CodecConfig) -> Result<Matrix> {
    let mut magic = [0u8; MAGIC.len()];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(MatError::Parse(format!(
            "bad magic {:?}",
            String::from_utf8_lossy(&magic)
        )));
    }

    let rows = decode_dim(&mut reader, "rows")?;
    let cols = decode_dim(&mut reader, "cols")?;
    match rows.checked_mul(cols) {
        Some(n) if n <= config.max_elements => {}
        _ => {
            return Err(MatError::Parse(format!(
                "{rows}x{cols} exceeds the limit of {} elements",
                config.max_elements
            )))
        }
    }

    Ok(Matrix::from_parts(rows, cols, read_payload(&mut reader, rows, cols)?))
}

/// Entries decoded per read while filling the payload.
const CHUNK_ENTRIES: usize = 1024;

/// Reads `rows * cols` entries. Storage grows only as payload bytes arrive.
fn read_payload<R: Read>(reader: &mut R, rows: usize, cols: usize) -> Result<Vec<f64>> {
    let count = rows * cols;
    let mut data: Vec<f64> = Vec::new();
    let mut buf = [0u8; CHUNK_ENTRIES * ENTRY];
    while data.len() < count {
        let batch = (count - data.len()).min(CHUNK_ENTRIES);
        let bytes = &mut buf[..batch * ENTRY];
        reader.read_exact(bytes)?;
        data.try_reserve(batch)
            .map_err(|_| MatError::Allocation { rows, cols })?;
        data.extend(bytes.chunks_exact(ENTRY).map(|chunk| {
            let mut word = [0u8; ENTRY];
            word.copy_from_slice(chunk);
            f64::from_ne_bytes(word)
        }));
    }
    Ok(data)
}

impl Matrix {
    /// Encodes the matrix into a fresh buffer.
    ///
    /// # Errors
    ///
    /// [`MatError::Parse`] if a dimension cannot be represented on disk.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.as_slice().len() * ENTRY);
        out.extend_from_slice(&encode_header(self)?);
        for v in self.as_slice() {
            out.extend_from_slice(&v.to_ne_bytes());
        }
        Ok(out)
    }

    /// Decodes a buffer produced by [`Matrix::to_bytes`].
    ///
    /// Unlike [`deserialize`], trailing bytes after the payload are rejected.
    ///
    /// # Errors
    ///
    /// As [`deserialize`], plus [`MatError::Parse`] for trailing data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let matrix = deserialize(&mut cursor)?;
        let consumed = usize::try_from(cursor.position()).unwrap_or(usize::MAX);
        if consumed != bytes.len() {
            return Err(MatError::Parse(format!(
                "{} trailing bytes after payload",
                bytes.len().saturating_sub(consumed)
            )));
        }
        Ok(matrix)
    }

    /// Writes the matrix to a file, replacing it if present.
    ///
    /// # Errors
    ///
    /// [`MatError::Io`] on any file error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        serialize(self, BufWriter::new(File::create(path)?))?;
        debug!(
            "saved {}x{} matrix to {}",
            self.num_rows(),
            self.num_cols(),
            path.display()
        );
        Ok(())
    }

    /// Reads a matrix from a file written by [`Matrix::save`].
    ///
    /// # Errors
    ///
    /// See [`deserialize_with`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, &CodecConfig::default())
    }

    /// Reads a matrix from a file with explicit decoding limits.
    ///
    /// # Errors
    ///
    /// See [`deserialize_with`].
    pub fn load_with(path: impl AsRef<Path>, config: &CodecConfig) -> Result<Self> {
        let path = path.as_ref();
        let matrix = deserialize_with(BufReader::new(File::open(path)?), config)?;
        debug!(
            "loaded {}x{} matrix from {}",
            matrix.num_rows(),
            matrix.num_cols(),
            path.display()
        );
        Ok(matrix)
    }
}

// ============================================================================
// Storage backends
// ============================================================================

/// Named byte storage the codec reads from and writes to.
///
/// Implement this to keep matrices somewhere other than the local disk.
pub trait MatrixStore {
    /// Opens `name` for reading.
    ///
    /// # Errors
    ///
    /// [`MatError::Io`] if `name` does not exist or cannot be opened.
    fn reader(&self, name: &str) -> Result<Box<dyn Read + '_>>;

    /// Opens `name` for writing, replacing previous contents.
    ///
    /// Contents must be visible to [`MatrixStore::reader`] once the writer
    /// has been flushed.
    ///
    /// # Errors
    ///
    /// [`MatError::Io`] if `name` cannot be created.
    fn writer(&self, name: &str) -> Result<Box<dyn Write + '_>>;
}

/// Stores each matrix as a file under a root directory.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at `root`. The directory must already exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path a given name maps to.
    ///
    /// # Errors
    ///
    /// [`MatError::Io`] with [`io::ErrorKind::InvalidInput`] unless `name`
    /// is a single plain file name, so entries always stay under the root.
    pub fn path(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(name)),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("store entry name {name:?} is not a plain file name"),
            )
            .into()),
        }
    }
}

impl MatrixStore for FsStore {
    fn reader(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        Ok(Box::new(BufReader::new(File::open(self.path(name)?)?)))
    }

    fn writer(&self, name: &str) -> Result<Box<dyn Write + '_>> {
        Ok(Box::new(BufWriter::new(File::create(self.path(name)?)?)))
    }
}

/// Keeps encoded matrices in memory, keyed by name.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<FxHashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw bytes under `name`.
    pub fn insert(&self, name: impl Into<String>, bytes: Vec<u8>) {
        self.entries.write().insert(name.into(), bytes);
    }

    /// Returns a copy of the bytes stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.entries.read().get(name).cloned()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Buffers writes and publishes them to the store on flush.
struct MemoryWriter<'a> {
    store: &'a MemoryStore,
    name: String,
    buf: Vec<u8>,
}

impl Write for MemoryWriter<'_> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.store.insert(self.name.clone(), self.buf.clone());
        Ok(())
    }
}

impl MatrixStore for MemoryStore {
    fn reader(&self, name: &str) -> Result<Box<dyn Read + '_>> {
        let bytes = self.get(name).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no entry named {name:?}"))
        })?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn writer(&self, name: &str) -> Result<Box<dyn Write + '_>> {
        Ok(Box::new(MemoryWriter {
            store: self,
            name: name.to_owned(),
            buf: Vec::new(),
        }))
    }
}

/// Saves and loads matrices through a [`MatrixStore`].
#[derive(Debug)]
pub struct MatrixCodec<S> {
    store: S,
    config: CodecConfig,
}

impl<S: MatrixStore> MatrixCodec<S> {
    /// Creates a codec over `store` with the default [`CodecConfig`].
    pub fn new(store: S) -> Self {
        Self::with_config(store, CodecConfig::default())
    }

    /// Creates a codec over `store` with explicit limits.
    pub fn with_config(store: S, config: CodecConfig) -> Self {
        Self { store, config }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Encodes `matrix` under `name`.
    ///
    /// # Errors
    ///
    /// [`MatError::Io`] if the store cannot be written.
    pub fn save(&self, name: &str, matrix: &Matrix) -> Result<()> {
        serialize(matrix, self.store.writer(name)?)?;
        debug!(
            "stored {}x{} matrix as {name:?}",
            matrix.num_rows(),
            matrix.num_cols()
        );
        Ok(())
    }

    /// Decodes the matrix stored under `name`.
    ///
    /// # Errors
    ///
    /// See [`deserialize_with`].
    pub fn load(&self, name: &str) -> Result<Matrix> {
        let matrix = deserialize_with(self.store.reader(name)?, &self.config)?;
        debug!(
            "fetched {}x{} matrix {name:?}",
            matrix.num_rows(),
            matrix.num_cols()
        );
        Ok(matrix)
    }
}
