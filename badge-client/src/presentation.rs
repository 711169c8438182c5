//! Display surfaces for badge renders.
//!
//! A surface is an independent top-level target showing one render. The
//! host may refuse to create one (popup blocking, read-only disk, no
//! viewer); that refusal is [`PresentationBlocked`], never a generation
//! failure.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use thiserror::Error;

/// The host refused to open a new surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Presentation blocked: {0}")]
pub struct PresentationBlocked(pub String);

/// An opened, sealed surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceHandle {
    pub id: String,
    /// Where the content lives, if the surface is file backed
    pub location: Option<PathBuf>,
}

/// Capability to open a new surface holding `content`.
///
/// The content is written once; the surface is sealed against further
/// writes before `open` returns.
#[async_trait]
pub trait PresentationSurface: Send + Sync {
    async fn open(&self, content: &str) -> Result<SurfaceHandle, PresentationBlocked>;
}

// ============================================================================
// File Surface
// ============================================================================

/// Writes each render to its own HTML file and optionally opens it in the
/// desktop browser.
#[derive(Debug)]
pub struct FileSurface {
    dir: PathBuf,
    launch_viewer: bool,
    seq: AtomicU64,
}

impl FileSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            launch_viewer: false,
            seq: AtomicU64::new(0),
        }
    }

    /// Hand every opened file to the system browser
    pub fn with_viewer(mut self, launch: bool) -> Self {
        self.launch_viewer = launch;
        self
    }

    fn next_path(&self) -> (String, PathBuf) {
        let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("{:03}-{}", n, uuid::Uuid::new_v4().simple());
        let path = self.dir.join(format!("{}.html", id));
        (id, path)
    }
}

#[async_trait]
impl PresentationSurface for FileSurface {
    async fn open(&self, content: &str) -> Result<SurfaceHandle, PresentationBlocked> {
        let (id, path) = self.next_path();

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            PresentationBlocked(format!("cannot create {}: {}", self.dir.display(), e))
        })?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| PresentationBlocked(format!("cannot write {}: {}", path.display(), e)))?;

        // seal
        let mut perms = tokio::fs::metadata(&path)
            .await
            .map_err(|e| PresentationBlocked(e.to_string()))?
            .permissions();
        perms.set_readonly(true);
        tokio::fs::set_permissions(&path, perms)
            .await
            .map_err(|e| PresentationBlocked(e.to_string()))?;

        if self.launch_viewer {
            open::that_detached(&path).map_err(|e| {
                PresentationBlocked(format!("viewer refused {}: {}", path.display(), e))
            })?;
        }

        tracing::debug!(surface = %id, path = %path.display(), "Surface opened");
        Ok(SurfaceHandle {
            id,
            location: Some(path),
        })
    }
}
