use crate::error::{FilterError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of raw email files.
///
/// Files whose name starts with `!` hold metadata (truth, predictions) and
/// are not emails.
#[derive(Debug, Clone)]
pub struct Corpus {
    src: PathBuf,
}

impl Corpus {
    pub fn new<P: AsRef<Path>>(src: P) -> Result<Self> {
        let src = src.as_ref();
        if !src.is_dir() {
            return Err(FilterError::InvalidDirectory(src.to_path_buf()));
        }

        Ok(Self {
            src: src.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.src
    }

    /// Email file names in sorted order
    pub fn email_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.src)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('!') {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    /// Lazily read `(file name, raw bytes)` for every email
    pub fn emails(&self) -> Result<Emails> {
        Ok(Emails {
            src: self.src.clone(),
            names: self.email_names()?.into_iter(),
        })
    }
}

/// Iterator over the emails of a [`Corpus`]
pub struct Emails {
    src: PathBuf,
    names: std::vec::IntoIter<String>,
}

impl Iterator for Emails {
    type Item = Result<(String, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.names.next()?;
        Some(
            fs::read(self.src.join(&name))
                .map(|body| (name, body))
                .map_err(FilterError::from),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.names.size_hint()
    }
}
