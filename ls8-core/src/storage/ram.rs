use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("image of {len} bytes does not fit at 0x{address:02X} in {capacity} bytes of storage")]
    ImageTooLarge {
        address: usize,
        len: usize,
        capacity: usize,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Access counters for a [`Ram`], reported when a machine halts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RamStats {
    pub num_reads: usize,
    pub num_writes: usize,
}

/// Flat byte-addressable memory of `N` cells.
///
/// Addresses wrap modulo `N`, so every read and write lands somewhere in the
/// array; there is no out-of-bounds access.
#[derive(Clone, Debug)]
pub struct Ram<const N: usize> {
    buffer: [u8; N],
    stats: RamStats,
}

impl<const N: usize> Default for Ram<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Ram<N> {
    pub fn new() -> Self {
        Self {
            buffer: [0; N],
            stats: RamStats::default(),
        }
    }

    pub fn read(&mut self, address: usize) -> u8 {
        self.stats.num_reads += 1;
        self.buffer[address % N]
    }

    /// Reads without touching the access counters.
    pub fn peek(&self, address: usize) -> u8 {
        self.buffer[address % N]
    }

    pub fn write(&mut self, address: usize, value: u8) {
        self.stats.num_writes += 1;
        self.buffer[address % N] = value;
    }

    /// Copies `data` into memory starting at `address`. Images are never
    /// wrapped around the end of the array.
    pub fn load(&mut self, address: usize, data: &[u8]) -> Result<()> {
        let end = address
            .checked_add(data.len())
            .filter(|end| *end <= N)
            .ok_or(StorageError::ImageTooLarge {
                address,
                len: data.len(),
                capacity: N,
            })?;
        self.buffer[address..end].copy_from_slice(data);
        tracing::debug!("loaded {} bytes at 0x{:02X}", data.len(), address);
        Ok(())
    }

    pub fn stats(&self) -> RamStats {
        self.stats
    }
}
