use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::base::{CookieStore, CookieStoreError};
use super::memory_store::MemoryCookieStore;

/// A cookie jar persisted as JSON so a session outlives the process.
pub struct FileCookieStore {
    path: PathBuf,
    inner: MemoryCookieStore,
}

impl FileCookieStore {
    /// Open the jar at `path`. A missing file is an empty jar.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CookieStoreError> {
        let path = path.as_ref().to_path_buf();
        let cookies = if path.exists() {
            let raw = fs::read(&path)?;
            serde_json::from_slice::<BTreeMap<String, String>>(&raw)?
        } else {
            BTreeMap::new()
        };
        debug!(
            "Loaded {} cookie(s) from {}",
            cookies.len(),
            path.display()
        );
        Ok(FileCookieStore {
            path,
            inner: MemoryCookieStore::from_map(cookies),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), CookieStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_vec_pretty(&self.inner.snapshot())?;
        write_private(&self.path, &body)?;
        Ok(())
    }
}

/// Write `body` to `path`, readable by the owner only. The jar holds a live
/// session cookie.
fn write_private(path: &Path, body: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // `mode` only applies to new files; tighten a jar left by an older run.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(body)
}

impl CookieStore for FileCookieStore {
    fn cookie_header(&self) -> String {
        self.inner.cookie_header()
    }

    fn apply_set_cookie(&self, header: &str) {
        if self.inner.apply(header) {
            if let Err(e) = self.persist() {
                // The in-memory jar still holds the cookie for this process.
                warn!("Failed to save cookie jar {}: {}", self.path.display(), e);
            }
        }
    }
}
