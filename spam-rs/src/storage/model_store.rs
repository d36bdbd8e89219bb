use crate::bayes::Model;
use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// JSON file holding a single trained model
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write the model atomically: temp file in the same directory, then rename
    pub fn save(&self, model: &Model) -> Result<()> {
        let parent_dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            serde_json::to_writer(&mut writer, model)?;
            writer.flush()?;
        }

        temp_file.persist(&self.path).map_err(|e| e.error)?;

        info!(
            "Saved model ({} tokens) to {}",
            model.vocabulary().len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn load(&self) -> Result<Model> {
        let file = File::open(&self.path)?;
        let model: Model = serde_json::from_reader(BufReader::new(file))?;

        info!(
            "Loaded model ({} tokens) from {}",
            model.vocabulary().len(),
            self.path.display()
        );
        Ok(model)
    }
}
