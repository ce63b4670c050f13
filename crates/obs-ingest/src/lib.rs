pub mod date;
pub mod error;
pub mod numeric;
pub mod parse;
pub mod reader;

pub use date::parse_date;
pub use error::{IngestError, Result};
pub use numeric::parse_decimal;
pub use parse::{ParsedRow, parse_row};
pub use reader::{RawRow, REQUIRED_COLUMNS, read_rows};
