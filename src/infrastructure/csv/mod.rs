// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Delimited-text decoding, CSV export encoding, XLSX export

mod csv_parser;
mod exporter;
mod xlsx;

pub use csv_parser::{decode_content, detect_delimiter, CsvDecoder, DecodedCsv};
pub use exporter::export_to_csv;
pub use xlsx::{export_to_xlsx, export_to_xlsx_bytes, xlsx_filename};
