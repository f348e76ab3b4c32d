use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::codec::io::{load, read_image, store, write_image};
use crate::codec::raster::Image;
use crate::foundation::error::{TgaError, TgaResult};

/// Where the pipeline reads operand images from and writes results to.
pub trait ImageStore {
    /// Load and decode the image at `path`.
    fn load(&mut self, path: &Path) -> TgaResult<Image>;
    /// Encode `image` and write it to `path`, replacing any previous content.
    fn store(&mut self, path: &Path, image: &Image) -> TgaResult<()>;
}

/// Reads and writes real files.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsImageStore;

impl ImageStore for FsImageStore {
    fn load(&mut self, path: &Path) -> TgaResult<Image> {
        load(path)
    }

    fn store(&mut self, path: &Path, image: &Image) -> TgaResult<()> {
        store(path, image)
    }
}

/// In-memory store for tests and embedding. Images are kept in their encoded form so every
/// load and store goes through the same codec as files on disk.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    files: BTreeMap<PathBuf, Vec<u8>>,
    writes: usize,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode and insert `image` at `path` without counting it as a write.
    pub fn insert(&mut self, path: impl Into<PathBuf>, image: &Image) -> TgaResult<()> {
        let path = path.into();
        let mut bytes = Vec::new();
        write_image(&mut bytes, image, &path)?;
        self.files.insert(path, bytes);
        Ok(())
    }

    /// Insert raw file bytes, e.g. a deliberately malformed file.
    pub fn insert_bytes(&mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    pub fn bytes(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Number of `store` calls served so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ImageStore for MemoryImageStore {
    fn load(&mut self, path: &Path) -> TgaResult<Image> {
        let bytes = self
            .files
            .get(path)
            .ok_or_else(|| TgaError::FileNotFound(path.to_path_buf()))?;
        read_image(Cursor::new(bytes), path)
    }

    fn store(&mut self, path: &Path, image: &Image) -> TgaResult<()> {
        let mut bytes = Vec::new();
        write_image(&mut bytes, image, path)?;
        self.files.insert(path.to_path_buf(), bytes);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_counts_writes() {
        let img = Image::filled(2, 2, [9, 8, 7]).unwrap();
        let mut mem = MemoryImageStore::new();
        mem.insert("a.tga", &img).unwrap();
        assert_eq!(mem.writes(), 0);

        let loaded = mem.load(Path::new("a.tga")).unwrap();
        assert_eq!(loaded, img);

        mem.store(Path::new("b.tga"), &loaded).unwrap();
        assert_eq!(mem.writes(), 1);
        assert_eq!(mem.bytes(Path::new("a.tga")), mem.bytes(Path::new("b.tga")));
    }

    #[test]
    fn memory_store_missing_path_is_file_not_found() {
        let mut mem = MemoryImageStore::new();
        let err = mem.load(Path::new("missing.tga")).unwrap_err();
        assert!(matches!(err, TgaError::FileNotFound(_)));
    }
}
