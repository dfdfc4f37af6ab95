//! Schema-to-model translation: identifier normalization, type mapping, enum
//! extraction and per-table model assembly.

pub mod column;
pub mod enums;
pub mod model;
pub mod naming;
pub mod types;

pub use column::{ColumnDescriptor, TableColumns};
pub use enums::EnumDefinition;
pub use model::{FieldDescriptor, GenOptions, ModelAssembler, ModelDescriptor};
pub use naming::{IdentifierNormalizer, Initialisms};
pub use types::NullStyle;
