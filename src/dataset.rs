//! Dataset source boundary and the `BPD1` container reader.
//!
//! The benchmark core only needs three things from a dataset source: open it,
//! learn a named dataset's shape (dimensions + element size), and read its
//! raw bytes in one block. [`DatasetSource`] captures exactly that seam;
//! closing is Drop. [`BpdFile`] is the concrete reader for a small
//! self-describing binary container:
//!
//! ```text
//! magic   b"BPD1"
//! u32     dataset count
//! entry*  u16 name length, name (utf-8),
//!         u32 element size, u32 rank, rank x u64 dims,
//!         u64 payload offset (absolute), u64 payload length
//! bytes   payloads
//! ```
//!
//! All integers are little-endian. [`write_bpd`] produces the format and is
//! used by tests and input generation.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{BenchError, Result};

const BPD_MAGIC: &[u8; 4] = b"BPD1";

/// Shape of one named dataset: ordered dimensions plus bytes per sample.
/// Dimension 0 is the frame axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetShape {
    pub dims: Vec<u64>,
    pub element_size: usize,
}

impl DatasetShape {
    /// Total payload bytes implied by the shape.
    pub fn total_bytes(&self) -> u64 {
        self.dims.iter().product::<u64>() * self.element_size as u64
    }
}

/// External dataset collaborator. Opening is the implementor's constructor;
/// closing happens on Drop.
pub trait DatasetSource {
    fn shape(&mut self, dataset: &str) -> Result<DatasetShape>;
    fn read_all(&mut self, dataset: &str) -> Result<Vec<u8>>;
}

#[derive(Debug)]
struct Entry {
    name: String,
    shape: DatasetShape,
    payload_offset: u64,
    payload_len: u64,
}

/// Reader for the `BPD1` container format.
#[derive(Debug)]
pub struct BpdFile {
    path: PathBuf,
    file: File,
    entries: Vec<Entry>,
}

impl BpdFile {
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path).map_err(|source| BenchError::Open {
            path: path.to_owned(),
            source,
        })?;
        let entries = read_header(&mut file)
            .map_err(|e| BenchError::Format(format!("{}: {}", path.display(), e)))?;
        Ok(BpdFile {
            path: path.to_owned(),
            file,
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the datasets in this container, in file order.
    pub fn dataset_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn entry(&self, dataset: &str) -> Result<&Entry> {
        self.entries
            .iter()
            .find(|e| e.name == dataset)
            .ok_or_else(|| BenchError::NotFound {
                name: dataset.to_owned(),
            })
    }
}

impl DatasetSource for BpdFile {
    fn shape(&mut self, dataset: &str) -> Result<DatasetShape> {
        Ok(self.entry(dataset)?.shape.clone())
    }

    fn read_all(&mut self, dataset: &str) -> Result<Vec<u8>> {
        let (offset, len, expected) = {
            let entry = self.entry(dataset)?;
            (
                entry.payload_offset,
                entry.payload_len,
                entry.shape.total_bytes(),
            )
        };
        if len != expected {
            return Err(BenchError::Format(format!(
                "dataset {:?}: payload is {} bytes but shape implies {}",
                dataset, len, expected
            )));
        }
        let mut data = vec![0u8; len as usize];
        self.file
            .seek(SeekFrom::Start(offset))
            .and_then(|_| self.file.read_exact(&mut data))
            .map_err(|source| BenchError::Read {
                name: dataset.to_owned(),
                source,
            })?;
        Ok(data)
    }
}

// ── Header parsing ───────────────────────────────────────────────────────────

fn read_header(file: &mut File) -> io::Result<Vec<Entry>> {
    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)?;
    if &magic != BPD_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "bad magic (not a BPD1 container)",
        ));
    }
    let count = read_u32(file)?;
    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name_len = read_u16(file)? as usize;
        let mut name_bytes = vec![0u8; name_len];
        file.read_exact(&mut name_bytes)?;
        let name = String::from_utf8(name_bytes)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "dataset name is not utf-8"))?;
        let element_size = read_u32(file)? as usize;
        let rank = read_u32(file)?;
        if element_size == 0 || rank == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "zero element size or rank",
            ));
        }
        let mut dims = Vec::with_capacity(rank as usize);
        for _ in 0..rank {
            dims.push(read_u64(file)?);
        }
        let payload_offset = read_u64(file)?;
        let payload_len = read_u64(file)?;
        entries.push(Entry {
            name,
            shape: DatasetShape { dims, element_size },
            payload_offset,
            payload_len,
        });
    }
    Ok(entries)
}

fn read_u16(r: &mut impl Read) -> io::Result<u16> {
    let mut b = [0u8; 2];
    r.read_exact(&mut b)?;
    Ok(u16::from_le_bytes(b))
}

fn read_u32(r: &mut impl Read) -> io::Result<u32> {
    let mut b = [0u8; 4];
    r.read_exact(&mut b)?;
    Ok(u32::from_le_bytes(b))
}

fn read_u64(r: &mut impl Read) -> io::Result<u64> {
    let mut b = [0u8; 8];
    r.read_exact(&mut b)?;
    Ok(u64::from_le_bytes(b))
}

// ── Writer ───────────────────────────────────────────────────────────────────

/// One dataset to be written into a container.
pub struct BpdDataset<'a> {
    pub name: &'a str,
    pub dims: Vec<u64>,
    pub element_size: usize,
    pub data: &'a [u8],
}

/// Write a `BPD1` container holding `datasets`.
pub fn write_bpd(path: &Path, datasets: &[BpdDataset<'_>]) -> io::Result<()> {
    for ds in datasets {
        let expected = ds.dims.iter().product::<u64>() * ds.element_size as u64;
        if expected != ds.data.len() as u64 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "dataset {:?}: {} bytes of data but shape implies {}",
                    ds.name,
                    ds.data.len(),
                    expected
                ),
            ));
        }
    }

    // Header size first, so payload offsets are absolute.
    let mut header_len = 4 + 4;
    for ds in datasets {
        header_len += 2 + ds.name.len() + 4 + 4 + 8 * ds.dims.len() + 8 + 8;
    }

    let mut file = File::create(path)?;
    file.write_all(BPD_MAGIC)?;
    file.write_all(&(datasets.len() as u32).to_le_bytes())?;
    let mut payload_offset = header_len as u64;
    for ds in datasets {
        file.write_all(&(ds.name.len() as u16).to_le_bytes())?;
        file.write_all(ds.name.as_bytes())?;
        file.write_all(&(ds.element_size as u32).to_le_bytes())?;
        file.write_all(&(ds.dims.len() as u32).to_le_bytes())?;
        for &d in &ds.dims {
            file.write_all(&d.to_le_bytes())?;
        }
        file.write_all(&payload_offset.to_le_bytes())?;
        file.write_all(&(ds.data.len() as u64).to_le_bytes())?;
        payload_offset += ds.data.len() as u64;
    }
    for ds in datasets {
        file.write_all(ds.data)?;
    }
    file.flush()
}
