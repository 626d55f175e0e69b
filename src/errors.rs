use fractic_server_error::define_client_error;

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_client_error!(WriteError, "Error writing '{path}'.", { path: &str });
define_client_error!(
    UnsupportedInputFormat,
    "Unsupported input format '{extension}'. Expected a CSV file or a spreadsheet workbook (xlsx, xlsm, xlsb, xls, ods).",
    { extension: &str }
);

// Parsing-related.
define_client_error!(InvalidCsv, "Invalid CSV format.");
define_client_error!(InvalidWorkbook, "Invalid spreadsheet workbook.");
define_client_error!(EmptyWorkbook, "Workbook does not contain any worksheet.");
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidDate, "Invalid date: '{value}'.", { value: &str });
define_client_error!(InvalidAmount, "Invalid amount: '{value}'.", { value: &str });
define_client_error!(InvalidVatRate, "Invalid VAT rate: '{value}'.", { value: &str });

// Schema-related.
define_client_error!(
    MissingColumns,
    "Input does not match any known layout: {requirement}.",
    { requirement: &str }
);

// Session-related.
define_client_error!(InvalidCredentials, "Invalid username or password.");
