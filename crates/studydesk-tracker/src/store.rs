//! File-based collection store — each collection is one JSON array on disk.
//! Human-readable, pretty-printed, rewritten in full on every change.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use studydesk_core::{Result, StudyDeskError};

/// Raw byte storage behind a collection.
pub trait BlobStore: Send + Sync {
    /// Read the whole blob. `None` when it was never written.
    fn read(&self) -> Result<Option<Vec<u8>>>;
    /// Replace the whole blob.
    fn write(&self, bytes: &[u8]) -> Result<()>;
    /// Human-readable location, used in logs and errors.
    fn describe(&self) -> PathBuf;
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A blob backed by a single file, replaced atomically on write.
#[derive(Debug, Clone)]
pub struct FileBlob {
    path: PathBuf,
}

impl FileBlob {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("collection");
        let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.path
            .with_file_name(format!(".{name}.tmp.{}.{seq}", std::process::id()))
    }
}

impl BlobStore for FileBlob {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a sibling temp file, flush it, then rename over the target
    /// so readers see either the old or the new file, never a partial one.
    fn write(&self, bytes: &[u8]) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
            _ => {}
        }

        let temp_path = self.temp_path();
        let written = (|| -> std::io::Result<()> {
            let mut file = std::fs::File::create(&temp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            drop(file);
            std::fs::rename(&temp_path, &self.path)
        })();

        if let Err(e) = written {
            std::fs::remove_file(&temp_path).ok();
            return Err(e.into());
        }
        Ok(())
    }

    fn describe(&self) -> PathBuf {
        self.path.clone()
    }
}

/// An in-process blob, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBlob {
    name: String,
    bytes: Mutex<Option<Vec<u8>>>,
}

impl MemoryBlob {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bytes: Mutex::new(None),
        }
    }

    /// Start with existing content.
    pub fn with_content(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            bytes: Mutex::new(Some(content.as_bytes().to_vec())),
        }
    }

    /// Current content as text, if any was written.
    pub fn contents(&self) -> Option<String> {
        self.bytes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }
}

impl BlobStore for MemoryBlob {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.bytes.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        *self.bytes.lock().unwrap_or_else(|e| e.into_inner()) = Some(bytes.to_vec());
        Ok(())
    }

    fn describe(&self) -> PathBuf {
        PathBuf::from(format!("memory:{}", self.name))
    }
}

impl<B: BlobStore + ?Sized> BlobStore for std::sync::Arc<B> {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn describe(&self) -> PathBuf {
        (**self).describe()
    }
}

/// An ordered collection of records of type `T`, kept as one JSON array.
pub struct Collection<T> {
    blob: Box<dyn BlobStore>,
    cycle_lock: Option<Mutex<()>>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    /// Wrap a blob. With `serialize_writes`, every [`Collection::modify`]
    /// cycle holds a lock so concurrent writers cannot lose each other's
    /// changes; without it the last writer wins.
    pub fn new(blob: impl BlobStore + 'static, serialize_writes: bool) -> Self {
        Self {
            blob: Box::new(blob),
            cycle_lock: serialize_writes.then(|| Mutex::new(())),
            _record: PhantomData,
        }
    }

    /// Collection stored in a file.
    pub fn open(path: &Path, serialize_writes: bool) -> Self {
        Self::new(FileBlob::new(path), serialize_writes)
    }

    /// Load all records. A missing blob is an empty collection.
    pub fn load(&self) -> Result<Vec<T>> {
        let Some(bytes) = self.blob.read()? else {
            return Ok(Vec::new());
        };
        serde_json::from_slice(&bytes).map_err(|e| {
            let path = self.blob.describe();
            tracing::error!("❌ Failed to parse {}: {e}", path.display());
            StudyDeskError::StorageCorrupt {
                path,
                reason: e.to_string(),
            }
        })
    }

    /// Replace all records on disk.
    pub fn save(&self, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        self.blob.write(json.as_bytes())?;
        tracing::debug!(
            "💾 Saved {} record(s) to {}",
            records.len(),
            self.blob.describe().display()
        );
        Ok(())
    }

    /// One load-mutate-save cycle. If `mutate` fails nothing is written.
    pub fn modify<R>(&self, mutate: impl FnOnce(&mut Vec<T>) -> Result<R>) -> Result<R> {
        let _guard = self
            .cycle_lock
            .as_ref()
            .map(|lock| lock.lock().unwrap_or_else(|e| e.into_inner()));
        let mut records = self.load()?;
        let out = mutate(&mut records)?;
        self.save(&records)?;
        Ok(out)
    }
}
