//! Two-column `name label` classification files

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::warn;

use crate::bayes::Label;
use crate::error::Result;

/// Predicted label per email file name
pub type Predictions = BTreeMap<String, Label>;

/// Read `name tag` lines into a map.
///
/// Blank lines and lines without exactly two fields are skipped. Tags are kept
/// as written; validating them is the reader's concern.
pub fn read_classification_from_file<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, String>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut classifications = BTreeMap::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [name, tag] => {
                classifications.insert(name.to_string(), tag.to_string());
            }
            _ => warn!(
                "Skipping malformed line {} in {}: {:?}",
                index + 1,
                path.display(),
                line
            ),
        }
    }

    Ok(classifications)
}

pub fn write_classification_to_file<P: AsRef<Path>>(
    path: P,
    predictions: &Predictions,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (name, label) in predictions {
        writeln!(writer, "{} {}", name, label)?;
    }
    writer.flush()?;
    Ok(())
}
