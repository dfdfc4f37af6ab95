use std::collections::HashMap;

pub const AUTO_INCREMENT: &str = "auto_increment";

/// Columns of one table keyed by column name. Iteration order carries no meaning.
pub type TableColumns = HashMap<String, ColumnDescriptor>;

/// Schema metadata for a single column as reported by the descriptor source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Full declared type, e.g. `enum('A','B')` or `varchar(255)`.
    pub raw_type: String,
    /// Bare type keyword, e.g. `enum` or `varchar`.
    pub base_type: String,
    pub nullable: bool,
    pub is_primary_key: bool,
    /// 1-based position in the table definition.
    pub ordinal_position: u32,
    pub extra: String,
    pub default_value: Option<String>,
    pub is_indexed: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, base_type: impl Into<String>, ordinal_position: u32) -> Self {
        let base_type = base_type.into();
        Self {
            name: name.into(),
            raw_type: base_type.clone(),
            base_type,
            nullable: false,
            is_primary_key: false,
            ordinal_position,
            extra: String::new(),
            default_value: None,
            is_indexed: false,
        }
    }

    pub fn with_raw_type(mut self, raw_type: impl Into<String>) -> Self {
        self.raw_type = raw_type.into();
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn indexed(mut self) -> Self {
        self.is_indexed = true;
        self
    }

    pub fn is_auto_increment(&self) -> bool {
        self.extra.contains(AUTO_INCREMENT)
    }

    /// True when the declared type is an `enum(...)` literal list.
    pub fn is_enum(&self) -> bool {
        self.raw_type
            .trim_start()
            .get(..5)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("enum("))
    }
}
