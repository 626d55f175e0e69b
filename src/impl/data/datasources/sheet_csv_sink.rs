use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use fractic_server_error::ServerError;

use crate::{
    domain::repositories::sheet_sink::SheetSink,
    entities::{Sheet, SheetFormat},
    errors::WriteError,
};

/// UTF-8 byte order mark, needed for Excel to pick the right encoding.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes each sheet to `<dir>/<sheet name>.csv`, in a form spreadsheet
/// applications open directly.
pub struct CsvSheetSink {
    dir: PathBuf,
    delimiter: u8,
    byte_order_mark: bool,
    written: Vec<PathBuf>,
}

impl CsvSheetSink {
    pub fn new(dir: impl Into<PathBuf>, format: &SheetFormat) -> Self {
        Self {
            dir: dir.into(),
            delimiter: format.delimiter,
            byte_order_mark: format.byte_order_mark,
            written: Vec::new(),
        }
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write_file(&self, path: &Path, sheet: &Sheet) -> Result<(), ServerError> {
        let display = path.display().to_string();
        let to_write_error = |e: &dyn std::fmt::Debug| WriteError::with_debug(&display, &e);

        let mut file = fs::File::create(path).map_err(|e| to_write_error(&e))?;
        if self.byte_order_mark {
            file.write_all(BOM).map_err(|e| to_write_error(&e))?;
        }
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_writer(file);
        writer
            .write_record(&sheet.header)
            .map_err(|e| to_write_error(&e))?;
        for row in &sheet.rows {
            writer.write_record(row).map_err(|e| to_write_error(&e))?;
        }
        writer.flush().map_err(|e| to_write_error(&e))
    }
}

impl SheetSink for CsvSheetSink {
    fn write_sheet(&mut self, sheet: &Sheet) -> Result<(), ServerError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| WriteError::with_debug(&self.dir.display().to_string(), &e))?;
        let path = self.dir.join(format!("{}.csv", sheet.name));
        self.write_file(&path, sheet)?;
        log::info!(
            "wrote {} row(s) to '{}'",
            sheet.rows.len(),
            path.display()
        );
        self.written.push(path);
        Ok(())
    }
}
