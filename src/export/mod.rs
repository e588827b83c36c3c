use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::dte::Receipt;
use crate::error::{DteError, Result};
use crate::view::FilterState;

/// An in-memory zip archive ready to be saved
#[derive(Debug, Clone)]
pub struct Archive {
    pub file_name: String,
    pub entries: usize,
    pub bytes: Vec<u8>,
}

impl Archive {
    /// Write the archive into `dir` under its suggested file name
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), entries = self.entries, "archive written");
        Ok(path)
    }
}

/// Suggested download name: `{type}_{months joined by '-'}.zip`
pub fn archive_name(filter: &FilterState) -> Result<String> {
    let doc_type = filter.selected_type.ok_or(DteError::NoTypeSelected)?;
    Ok(format!("{}_{}.zip", doc_type, filter.months_label()))
}

/// Entry name for the receipt at zero-based `position`
pub fn entry_name(position: usize) -> String {
    format!("documento_{}.json", position + 1)
}

/// Package each receipt as a pretty-printed JSON entry of a deflated zip.
///
/// `receipts` is the type+month filtered set; search text never applies here.
pub fn build_archive(receipts: &[&Receipt], filter: &FilterState) -> Result<Archive> {
    let file_name = archive_name(filter)?;
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (position, receipt) in receipts.iter().enumerate() {
        writer.start_file(entry_name(position), options)?;
        writer.write_all(receipt.to_pretty_json().as_bytes())?;
    }
    let bytes = writer.finish()?.into_inner();

    Ok(Archive {
        file_name,
        entries: receipts.len(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dte::receipt::tests::sample_json;
    use crate::dte::{DocumentType, YearMonth};
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn receipt(fecha: &str, total: &str) -> Receipt {
        Receipt::parse("t.json", sample_json("01", fecha, total).as_bytes()).unwrap()
    }

    fn filter(months: &[&str]) -> FilterState {
        FilterState {
            selected_type: Some(DocumentType::Factura),
            selected_months: months
                .iter()
                .map(|m| m.parse::<YearMonth>().unwrap())
                .collect(),
            search_text: "ignored".to_string(),
        }
    }

    #[test]
    fn names_archive_after_filter() {
        assert_eq!(archive_name(&filter(&["2024-01"])).unwrap(), "01_2024-01.zip");
        assert_eq!(
            archive_name(&filter(&["2024-02", "2024-01"])).unwrap(),
            "01_2024-01-2024-02.zip"
        );
        assert_eq!(archive_name(&filter(&[])).unwrap(), "01_.zip");
        assert!(matches!(
            archive_name(&FilterState::default()),
            Err(DteError::NoTypeSelected)
        ));
    }

    #[test]
    fn one_entry_per_receipt() {
        let receipts = vec![receipt("2024-01-05", "10.00"), receipt("2024-01-20", "20.00")];
        let refs: Vec<&Receipt> = receipts.iter().collect();
        let archive = build_archive(&refs, &filter(&["2024-01"])).unwrap();
        assert_eq!(archive.entries, 2);

        let mut zip = ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        assert_eq!(zip.len(), 2);
        let mut content = String::new();
        zip.by_name("documento_2.json")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["dteJson"]["identificacion"]["fecEmi"], "2024-01-20");
    }

    #[test]
    fn empty_selection_gives_empty_archive() {
        let archive = build_archive(&[], &filter(&[])).unwrap();
        assert_eq!(archive.entries, 0);
        let zip = ZipArchive::new(Cursor::new(archive.bytes)).unwrap();
        assert_eq!(zip.len(), 0);
    }

    #[test]
    fn saves_under_suggested_name() {
        let dir = TempDir::new().unwrap();
        let receipts = vec![receipt("2024-01-05", "10.00")];
        let refs: Vec<&Receipt> = receipts.iter().collect();
        let archive = build_archive(&refs, &filter(&["2024-01"])).unwrap();
        let path = archive.save_in(&dir.path().join("out")).unwrap();
        assert!(path.ends_with("01_2024-01.zip"));
        assert!(path.exists());
    }
}
