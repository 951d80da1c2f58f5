//! Session directory layout.
//!
//! A session directory holds two JSON documents: `short_term.json` (the
//! turn buffer) and `long_term.json` (every memory record with its
//! embedding). Files are written to a temporary name and renamed into
//! place so a crash never leaves a half-written document.

use crate::error::Result;
use crate::long_term::LongTermSnapshot;
use crate::short_term::ShortTermSnapshot;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Short-term snapshot file name.
pub const SHORT_TERM_FILE: &str = "short_term.json";
/// Long-term snapshot file name.
pub const LONG_TERM_FILE: &str = "long_term.json";

/// A directory holding one persisted session.
#[derive(Debug, Clone)]
pub struct SessionDir {
    root: PathBuf,
}

impl SessionDir {
    /// Wrap a directory path. Nothing is touched until a read or write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the short-term document.
    pub fn short_term_path(&self) -> PathBuf {
        self.root.join(SHORT_TERM_FILE)
    }

    /// Path of the long-term document.
    pub fn long_term_path(&self) -> PathBuf {
        self.root.join(LONG_TERM_FILE)
    }

    /// Whether both documents are present.
    pub fn exists(&self) -> bool {
        self.short_term_path().is_file() && self.long_term_path().is_file()
    }

    /// Write both snapshots, creating the directory if needed.
    pub async fn write(
        &self,
        short_term: &ShortTermSnapshot,
        long_term: &LongTermSnapshot,
    ) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        write_atomic(&self.short_term_path(), &short_term.to_json()?).await?;
        write_atomic(&self.long_term_path(), &long_term.to_json()?).await?;
        info!(
            dir = %self.root.display(),
            turns = short_term.turns.len(),
            memories = long_term.records.len(),
            "Session saved"
        );
        Ok(())
    }

    /// Read and parse both snapshots.
    ///
    /// A missing file is an I/O error; malformed JSON is a deserialization
    /// error.
    pub async fn read(&self) -> Result<(ShortTermSnapshot, LongTermSnapshot)> {
        let short_json = tokio::fs::read_to_string(self.short_term_path()).await?;
        let long_json = tokio::fs::read_to_string(self.long_term_path()).await?;
        let short_term = ShortTermSnapshot::from_json(&short_json)?;
        let long_term = LongTermSnapshot::from_json(&long_json)?;
        debug!(dir = %self.root.display(), "Session documents read");
        Ok((short_term, long_term))
    }
}

async fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::long_term::LongTermStore;
    use crate::short_term::ShortTermStore;
    use crate::types::{ConversationTurn, MemoryType};

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionDir::new(dir.path().join("nested"));
        assert!(!session.exists());

        let mut short_term = ShortTermStore::new(5);
        short_term.append(ConversationTurn::user("hi"));
        let mut long_term = LongTermStore::new(2);
        long_term.add("fact", MemoryType::Fact, 0.7, vec![0.6, 0.8]).unwrap();

        session
            .write(&short_term.export_snapshot(), &long_term.export_snapshot())
            .await
            .unwrap();
        assert!(session.exists());
        assert!(!session.root().join("short_term.json.tmp").exists());

        let (st, lt) = session.read().await.unwrap();
        assert_eq!(st.turns.len(), 1);
        assert_eq!(lt.records.len(), 1);
        assert_eq!(lt.records[0].embedding, vec![0.6, 0.8]);
    }

    #[tokio::test]
    async fn test_read_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionDir::new(dir.path()).read().await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_read_malformed_is_deserialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionDir::new(dir.path());
        tokio::fs::write(session.short_term_path(), "{not json").await.unwrap();
        tokio::fs::write(session.long_term_path(), "{}").await.unwrap();
        let err = session.read().await.unwrap_err();
        assert!(matches!(err, Error::Deserialization(_)));
    }
}
