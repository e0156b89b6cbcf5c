use crate::domain::asset::FrontierPoint;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Destination for a swept frontier. Implementations own formatting and output; the sweep only
/// hands over the ordered points.
pub trait FrontierRenderer {
    fn renderer_name(&self) -> &'static str;

    fn render(&self, points: &[FrontierPoint]) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct CsvFrontierFile {
    path: PathBuf,
}

impl CsvFrontierFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FrontierRenderer for CsvFrontierFile {
    fn renderer_name(&self) -> &'static str {
        "csv"
    }

    fn render(&self, points: &[FrontierPoint]) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("failed to create frontier file: {}", self.path.display()))?;

        let mut writer = csv::Writer::from_writer(file);
        for point in points {
            writer
                .serialize(point)
                .context("failed to write frontier point")?;
        }
        writer.flush().context("failed to flush frontier file")?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct JsonFrontierFile {
    path: PathBuf,
}

impl JsonFrontierFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FrontierRenderer for JsonFrontierFile {
    fn renderer_name(&self) -> &'static str {
        "json"
    }

    fn render(&self, points: &[FrontierPoint]) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("failed to create frontier file: {}", self.path.display()))?;
        serde_json::to_writer_pretty(file, points).context("failed to write frontier json")?;
        Ok(())
    }
}

/// JSON for a `.json` extension (case-insensitive), CSV for anything else.
pub fn renderer_for_path(path: &Path) -> Box<dyn FrontierRenderer> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        Box::new(JsonFrontierFile::new(path))
    } else {
        Box::new(CsvFrontierFile::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<FrontierPoint> {
        vec![
            FrontierPoint {
                tolerance: 0,
                risk: 0,
                return_percent: 0.0,
            },
            FrontierPoint {
                tolerance: 5,
                risk: 5,
                return_percent: 1.25,
            },
        ]
    }

    #[test]
    fn csv_file_has_header_and_one_row_per_point() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frontier.csv");
        CsvFrontierFile::new(&path).render(&points()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, vec!["tolerance", "risk", "return_percent"]);

        let rows: Vec<FrontierPoint> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows, points());
    }

    #[test]
    fn json_file_holds_point_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frontier.json");
        JsonFrontierFile::new(&path).render(&points()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<FrontierPoint> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, points());
    }

    #[test]
    fn picks_renderer_by_extension() {
        assert_eq!(renderer_for_path(Path::new("out.json")).renderer_name(), "json");
        assert_eq!(renderer_for_path(Path::new("out.JSON")).renderer_name(), "json");
        assert_eq!(renderer_for_path(Path::new("out.csv")).renderer_name(), "csv");
        assert_eq!(renderer_for_path(Path::new("frontier")).renderer_name(), "csv");
    }

    #[test]
    fn render_fails_for_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frontier.csv");
        assert!(CsvFrontierFile::new(path).render(&points()).is_err());
    }
}
