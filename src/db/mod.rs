pub mod connection;
pub mod information_schema;
pub mod source;

pub use information_schema::{InformationSchemaSource, RawColumnRow};
pub use source::ColumnSource;
