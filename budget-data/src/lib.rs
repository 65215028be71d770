pub mod csv_codec;
pub mod error;
pub mod import;

pub use csv_codec::{export_to_csv, parse_csv};
pub use error::CsvCodecError;
pub use import::{CsvImporter, CsvSource, FileSource, TextSource, import_from_csv};
