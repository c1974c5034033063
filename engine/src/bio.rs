//! Biography lookup, one text file per person keyed `{open|lock}#{id}`

use std::path::PathBuf;

use crate::error::Result;
use crate::model::PersonId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioKind {
    Open,
    Locked,
}

impl BioKind {
    fn key_prefix(self) -> &'static str {
        match self {
            BioKind::Open => "open",
            BioKind::Locked => "lock",
        }
    }
}

pub fn bio_key(kind: BioKind, id: PersonId) -> String {
    format!("{}#{}", kind.key_prefix(), id.0)
}

/// Where person cards learn whether a biography exists.
pub trait BioIndex {
    fn has_bio(&self, kind: BioKind, id: PersonId) -> bool;
}

/// No biographies at all.
pub struct NoBio;

impl BioIndex for NoBio {
    fn has_bio(&self, _kind: BioKind, _id: PersonId) -> bool {
        false
    }
}

/// Biographies stored as `<root>/<key>.txt`.
#[derive(Debug, Clone)]
pub struct BioDir {
    root: PathBuf,
}

impl BioDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, kind: BioKind, id: PersonId) -> PathBuf {
        self.root.join(format!("{}.txt", bio_key(kind, id)))
    }

    /// Text of a biography, `None` if the file does not exist.
    pub fn read(&self, kind: BioKind, id: PersonId) -> Result<Option<String>> {
        let path = self.path(kind, id);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }
}

impl BioIndex for BioDir {
    fn has_bio(&self, kind: BioKind, id: PersonId) -> bool {
        self.path(kind, id).is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bio_dir_reads_by_key() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("open#4.txt"), "Родился в Туле").unwrap();
        let bios = BioDir::new(dir.path());

        assert!(bios.has_bio(BioKind::Open, PersonId(4)));
        assert!(!bios.has_bio(BioKind::Locked, PersonId(4)));
        assert_eq!(
            bios.read(BioKind::Open, PersonId(4)).unwrap().as_deref(),
            Some("Родился в Туле")
        );
        assert_eq!(bios.read(BioKind::Locked, PersonId(4)).unwrap(), None);
    }

    #[test]
    fn test_bio_key_format() {
        assert_eq!(bio_key(BioKind::Locked, PersonId(12)), "lock#12");
    }
}
