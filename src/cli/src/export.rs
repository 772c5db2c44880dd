//! JSON and text artifacts consumed by the renderers.

use anyhow::{Context, Result};
use projstats_report::table::Cell;
use projstats_report::{Diagnostic, NormalizedTable};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const TABLE_FILE: &str = "normalized_table.json";
pub const SUPER_MODULE_FILE: &str = "super_module.json";
pub const RUNTIME_VIEWS_FILE: &str = "runtime_views.json";
pub const SUMMARY_FILE: &str = "summary.txt";

#[derive(Serialize)]
pub struct TableExport<'a> {
    pub columns: Vec<&'a str>,
    pub rows: Vec<Vec<Cell>>,
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> From<&'a NormalizedTable> for TableExport<'a> {
    fn from(table: &'a NormalizedTable) -> Self {
        Self {
            columns: table.column_names(),
            rows: table.to_cells(),
            diagnostics: table.diagnostics(),
        }
    }
}

/// Writes artifacts into one directory and remembers what it wrote.
pub struct ArtifactWriter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl ArtifactWriter {
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: Vec::new(),
        })
    }

    pub fn write_json<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", name))?;
        self.write_text(name, &json)
    }

    pub fn write_text(&mut self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.join(name);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Wrote {}", path.display());
        self.written.push(path.clone());
        Ok(path)
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions_sorted::assert_eq;

    #[test]
    fn test_writer_creates_directory_and_tracks_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out");
        let mut writer = ArtifactWriter::new(&out).unwrap();

        writer.write_json("values.json", &vec![1, 2]).unwrap();
        writer.write_text("notes.txt", "hello").unwrap();

        assert_eq!(
            writer.written().to_vec(),
            vec![out.join("values.json"), out.join("notes.txt")]
        );
        let values: Vec<i32> =
            serde_json::from_str(&fs::read_to_string(out.join("values.json")).unwrap()).unwrap();
        assert_eq!(values, vec![1, 2]);
    }
}
