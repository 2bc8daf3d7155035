use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

pub const CONFIGURATION_SHEET: &str = "Configuration";
pub const TRANSACTIONS_SHEET: &str = "Transactions";

pub const CONFIGURATION_HEADER: [&str; 5] = ["Needs", "Wants", "Investments", "Methods", "Types"];
pub const TRANSACTIONS_HEADER: [&str; 7] = [
    "Date",
    "Description",
    "Category",
    "Type",
    "Amount",
    "Method",
    "Status",
];

const TMP_SUFFIX: &str = "tmp";

/// A single cell. `None` is a structurally absent cell.
pub type Cell = Option<String>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, header: &[&str]) -> Self {
        Self {
            name: name.into(),
            rows: vec![header.iter().map(|h| Some(h.to_string())).collect()],
        }
    }

    /// Index of the last row holding at least one non-blank cell.
    pub fn last_populated_row(&self) -> Option<usize> {
        self.rows.iter().rposition(|row| row_is_populated(row))
    }
}

/// Tabular document made of named sheets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workbook {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|sheet| sheet.name == name)
    }
}

#[derive(Debug)]
pub enum WorkbookReadError {
    NotFound(PathBuf),
    Io(io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for WorkbookReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkbookReadError::NotFound(path) => write!(f, "{} does not exist", path.display()),
            WorkbookReadError::Io(err) => write!(f, "I/O error: {err}"),
            WorkbookReadError::Parse(err) => write!(f, "unreadable workbook: {err}"),
        }
    }
}

pub fn cell_text(cell: Option<&Cell>) -> Option<&str> {
    cell.and_then(|value| value.as_deref())
}

pub fn is_blank(cell: Option<&Cell>) -> bool {
    cell_text(cell).map_or(true, |text| text.trim().is_empty())
}

pub fn row_is_populated(row: &[Cell]) -> bool {
    row.iter().any(|cell| !is_blank(Some(cell)))
}

/// Reads and parses the workbook at `path`.
pub fn read_workbook(path: &Path) -> Result<Workbook, WorkbookReadError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(WorkbookReadError::NotFound(path.to_path_buf()))
        }
        Err(err) => return Err(WorkbookReadError::Io(err)),
    };
    serde_json::from_str(&data).map_err(WorkbookReadError::Parse)
}

/// Replaces the workbook at `path` in one step: the full document is staged to a
/// sibling temp file, flushed to disk, then renamed over the original. The
/// containing directory is synced last.
pub fn write_workbook(path: &Path, workbook: &Workbook) -> io::Result<()> {
    let json = serde_json::to_string_pretty(workbook)?;
    let tmp = sibling_path(path, TMP_SUFFIX);
    if let Err(err) = write_synced(&tmp, json.as_bytes()) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    sync_dir(parent_dir(path))
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Flushes directory entries so a completed rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// `path` with `suffix` appended to its extension (`book.json` -> `book.json.tmp`).
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut sibling = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, suffix),
        None => suffix.to_string(),
    };
    sibling.set_extension(ext);
    sibling
}

fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_path_appends_suffix() {
        assert_eq!(
            sibling_path(Path::new("/data/book.json"), "lock"),
            PathBuf::from("/data/book.json.lock")
        );
        assert_eq!(
            sibling_path(Path::new("/data/book"), "tmp"),
            PathBuf::from("/data/book.tmp")
        );
    }

    #[test]
    fn last_populated_row_skips_trailing_blanks() {
        let mut sheet = Sheet::new(TRANSACTIONS_SHEET, &TRANSACTIONS_HEADER);
        sheet.rows.push(vec![Some("2024-01-01".into()), None]);
        sheet.rows.push(vec![None, Some("  ".into())]);
        sheet.rows.push(Vec::new());
        assert_eq!(sheet.last_populated_row(), Some(1));
    }

    #[test]
    fn null_cells_deserialize_as_absent() {
        let json = r#"{"sheets":[{"name":"Configuration","rows":[["Needs",null],["Rent"]]}]}"#;
        let workbook: Workbook = serde_json::from_str(json).unwrap();
        let sheet = workbook.sheet(CONFIGURATION_SHEET).unwrap();
        assert_eq!(sheet.rows[0], vec![Some("Needs".to_string()), None]);
        assert_eq!(sheet.rows[1].len(), 1);
    }

    #[test]
    fn parent_dir_of_bare_file_name_is_current_dir() {
        assert_eq!(parent_dir(Path::new("book.json")), Path::new("."));
        assert_eq!(parent_dir(Path::new("/data/book.json")), Path::new("/data"));
    }

    #[cfg(unix)]
    #[test]
    fn write_syncs_the_containing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");
        let workbook = Workbook {
            sheets: vec![Sheet::new(TRANSACTIONS_SHEET, &TRANSACTIONS_HEADER)],
        };
        write_workbook(&path, &workbook).unwrap();
        assert!(!sibling_path(&path, TMP_SUFFIX).exists());
        sync_dir(dir.path()).unwrap();

        let missing = dir.path().join("gone");
        let err = sync_dir(&missing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
