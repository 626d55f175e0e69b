use fractic_server_error::ServerError;

use crate::entities::Sheet;

/// Destination of the exported workbook, one call per sheet in workbook
/// order.
pub trait SheetSink {
    fn write_sheet(&mut self, sheet: &Sheet) -> Result<(), ServerError>;
}
