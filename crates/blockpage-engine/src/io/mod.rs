//! Page documents on disk.
//!
//! A [`DocumentsDir`] is a directory tree of `.json` page documents. Pages are
//! addressed by a [`RelativePath`] below it and read and written as whole
//! [`BlockStore`]s through the [`codec`](crate::codec).

use relative_path::{Component, RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{self, Format};
use crate::editing::{BlockStore, ImportSummary};
use crate::error::EngineError;

/// File extension of page documents
pub const PAGE_EXTENSION: &str = "json";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Documents directory {0} does not exist or is not a directory")]
    InvalidDocumentsDir(PathBuf),
    #[error("Page not found: {0}")]
    PageNotFound(RelativePathBuf),
    #[error("Page already exists: {0}")]
    PageExists(RelativePathBuf),
    #[error("Not a page document (expected a .json file): {0}")]
    NotAPage(RelativePathBuf),
    #[error("Page path leaves the documents directory: {0}")]
    OutsideDocumentsDir(RelativePathBuf),
    #[error("Page {page}: {source}")]
    Document {
        page: RelativePathBuf,
        source: EngineError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle on an existing documents directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentsDir {
    root: PathBuf,
}

impl DocumentsDir {
    /// Open a documents directory; it must already exist
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, IoError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(IoError::InvalidDocumentsDir(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute file path of a page, after checking the page name
    pub fn page_path(&self, page: &RelativePath) -> Result<PathBuf, IoError> {
        let normalized = page.normalize();
        if normalized.extension() != Some(PAGE_EXTENSION) {
            return Err(IoError::NotAPage(page.to_relative_path_buf()));
        }
        if matches!(normalized.components().next(), Some(Component::ParentDir)) {
            return Err(IoError::OutsideDocumentsDir(page.to_relative_path_buf()));
        }
        Ok(normalized.to_path(&self.root))
    }

    pub fn contains(&self, page: &RelativePath) -> bool {
        self.page_path(page).is_ok_and(|path| path.is_file())
    }

    /// Load a page into a fresh store. Entries the codec drops are listed in
    /// the summary; an unreadable document is an error.
    pub fn load(&self, page: &RelativePath) -> Result<(BlockStore, ImportSummary), IoError> {
        let path = self.page_path(page)?;
        if !path.is_file() {
            return Err(IoError::PageNotFound(page.to_relative_path_buf()));
        }

        let text = fs::read_to_string(&path)?;
        let (store, summary) =
            BlockStore::from_document(&text).map_err(|source| IoError::Document {
                page: page.to_relative_path_buf(),
                source,
            })?;

        log::debug!(
            "loaded {page}: {} blocks, {} dropped",
            summary.imported,
            summary.dropped_count()
        );
        Ok((store, summary))
    }

    /// Write a page, creating parent directories as needed.
    ///
    /// The document goes to a sibling temp file first and is renamed over the
    /// page, so a failed write never leaves a truncated page behind.
    pub fn save(
        &self,
        page: &RelativePath,
        store: &BlockStore,
        format: Format,
    ) -> Result<(), IoError> {
        let path = self.page_path(page)?;
        let text =
            codec::serialize(store.blocks(), format).map_err(|source| IoError::Document {
                page: page.to_relative_path_buf(),
                source,
            })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let staging = path.with_extension(format!("{PAGE_EXTENSION}.tmp"));
        fs::write(&staging, text)?;
        fs::rename(&staging, &path)?;

        log::debug!("saved {page}: {} blocks", store.len());
        Ok(())
    }

    /// Write an empty page. Refuses to replace an existing one unless
    /// `overwrite` is set.
    pub fn create(
        &self,
        page: &RelativePath,
        format: Format,
        overwrite: bool,
    ) -> Result<(), IoError> {
        if !overwrite && self.contains(page) {
            return Err(IoError::PageExists(page.to_relative_path_buf()));
        }
        self.save(page, &BlockStore::new(), format)
    }

    /// Every page below the root, as sorted relative paths
    pub fn pages(&self) -> Result<Vec<RelativePathBuf>, IoError> {
        let mut pages = Vec::new();
        self.collect_pages(&self.root, &mut pages)?;
        pages.sort();
        Ok(pages)
    }

    fn collect_pages(&self, dir: &Path, pages: &mut Vec<RelativePathBuf>) -> Result<(), IoError> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_dir() {
                self.collect_pages(&path, pages)?;
                continue;
            }
            if path.extension().is_none_or(|ext| ext != PAGE_EXTENSION) {
                continue;
            }

            let relative = path
                .strip_prefix(&self.root)
                .ok()
                .and_then(|relative| RelativePathBuf::from_path(relative).ok());
            match relative {
                Some(page) => pages.push(page),
                None => log::warn!("skipping page with a non-portable path: {}", path.display()),
            }
        }
        Ok(())
    }
}
