//! CSV-backed record store.
//!
//! [`RecordStore`] owns the data directory and is passed to whatever needs
//! table access. Each table is one comma-separated file with a header row.

use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{GradebookError, Result};
use crate::schema::{Grade, Record, Table};

/// Handle over the directory holding `students.csv`, `subjects.csv` and
/// `grades.csv`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Opens the store at `dir`, creating the directory and a header-only file
    /// for each table that does not exist yet.
    #[tracing::instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            dir: dir.as_ref().to_path_buf(),
        };
        fs::create_dir_all(&store.dir)?;

        for table in Table::ALL {
            let path = store.path(table);
            if !path.exists() {
                info!(table = %table, path = %path.display(), "Creating empty table");
                write_table::<Grade>(&path, table, &[])?;
            }
        }

        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, table: Table) -> PathBuf {
        self.dir.join(table.file_name())
    }

    /// Reads every row of `R`'s table in file order.
    ///
    /// A missing file is an empty table.
    pub fn load<R: Record>(&self) -> Result<Vec<R>> {
        let path = self.path(R::TABLE);
        if !path.exists() {
            debug!(table = %R::TABLE, "Table file missing, treating as empty");
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

        let mut rows = Vec::new();
        for result in rdr.deserialize() {
            let record: R = result?;
            rows.push(record);
        }

        debug!(table = %R::TABLE, rows = rows.len(), "Table loaded");
        Ok(rows)
    }

    /// Overwrites `R`'s table with `rows`.
    ///
    /// The rows go to a temporary file next to the target which is then
    /// renamed over it, so readers never see a half-written table.
    pub fn save<R: Record>(&self, rows: &[R]) -> Result<()> {
        write_table(&self.path(R::TABLE), R::TABLE, rows)
    }

    /// Appends `row` and persists the table.
    ///
    /// # Errors
    ///
    /// [`GradebookError::DuplicateKey`] if the table is keyed and already
    /// holds a row with the same key. Nothing is written in that case.
    #[tracing::instrument(skip_all, fields(table = %R::TABLE, key = row.key()))]
    pub fn append<R: Record>(&self, row: R) -> Result<()> {
        let mut rows = self.load::<R>()?;

        if let Some(key) = row.key() {
            if rows.iter().any(|r| r.key() == Some(key)) {
                warn!("Rejected duplicate key");
                return Err(GradebookError::DuplicateKey {
                    table: R::TABLE,
                    key: key.to_string(),
                });
            }
        }

        rows.push(row);
        self.save(&rows)?;

        info!(rows = rows.len(), "Row appended");
        Ok(())
    }

    /// Looks up a row of a keyed table by its key.
    pub fn find<R: Record>(&self, key: &str) -> Result<Option<R>> {
        Ok(self
            .load::<R>()?
            .into_iter()
            .find(|r| r.key() == Some(key)))
    }

    /// Grade rows for `student_id`, in file order.
    pub fn grades_for(&self, student_id: &str) -> Result<Vec<Grade>> {
        Ok(self
            .load::<Grade>()?
            .into_iter()
            .filter(|g| g.student_id == student_id)
            .collect())
    }
}

fn write_table<R: Record>(path: &Path, table: Table, rows: &[R]) -> Result<()> {
    let tmp_path = temp_path_for(path);
    debug!(path = %path.display(), rows = rows.len(), "Writing table");

    let written = (|| -> Result<()> {
        let file = File::create(&tmp_path)?;
        // Header is written by hand so an empty table still has one.
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(table.headers())?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        writer
            .into_inner()
            .map_err(|e| GradebookError::Io(e.into_error()))?
            .sync_all()?;
        Ok(())
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("table.csv");
    path.with_file_name(format!(".{}.tmp.{}", file_name, std::process::id()))
}
