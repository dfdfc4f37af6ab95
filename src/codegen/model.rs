use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    column::{AUTO_INCREMENT, ColumnDescriptor, TableColumns},
    enums::{self, EnumDefinition},
    naming::IdentifierNormalizer,
    types::{self, GO_INT, NullStyle},
};

/// Per-run switches for the generated struct fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenOptions {
    /// Emit `json:"<column>"` tags.
    pub json: bool,
    /// Emit `gorm:"..."` tags.
    pub gorm: bool,
    pub null_style: NullStyle,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            json: true,
            gorm: false,
            null_style: NullStyle::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub identifier: String,
    /// Go type; empty when the column type has no mapping.
    pub target_type: String,
    /// Struct tags in emission order.
    pub annotations: Vec<String>,
    pub source_column: ColumnDescriptor,
}

impl FieldDescriptor {
    /// The struct field line, e.g. ``UserID int `json:"user_id"` ``.
    pub fn declaration(&self) -> String {
        if self.annotations.is_empty() {
            format!("{} {}", self.identifier, self.target_type)
        } else {
            format!(
                "{} {} `{}`",
                self.identifier,
                self.target_type,
                self.annotations.join(" ")
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub package: String,
    pub struct_name: String,
    /// Receiver name for generated methods.
    pub short_alias: String,
    pub table_name: String,
    /// Fields in ordinal position order.
    pub fields: Vec<FieldDescriptor>,
    pub enum_definitions: Vec<EnumDefinition>,
}

#[derive(Debug, Clone, Default)]
pub struct ModelAssembler {
    normalizer: IdentifierNormalizer,
    options: GenOptions,
}

impl ModelAssembler {
    pub fn new(normalizer: IdentifierNormalizer, options: GenOptions) -> Self {
        Self {
            normalizer,
            options,
        }
    }

    pub fn normalizer(&self) -> &IdentifierNormalizer {
        &self.normalizer
    }

    pub fn options(&self) -> GenOptions {
        self.options
    }

    pub fn assemble(
        &self,
        table_name: &str,
        struct_name: &str,
        package: &str,
        columns: &TableColumns,
    ) -> ModelDescriptor {
        // Columns are processed by name so enum definitions come out in a
        // stable order; fields are emitted by ordinal position afterwards.
        let mut names: Vec<&String> = columns.keys().collect();
        names.sort();

        let mut fields = Vec::with_capacity(names.len());
        let mut enum_definitions = Vec::new();
        for name in names {
            let (field, enum_def) = self.build_field(table_name, &columns[name]);
            enum_definitions.extend(enum_def);
            fields.push(field);
        }
        order_by_position(table_name, &mut fields);

        debug!(
            table = table_name,
            fields = fields.len(),
            enums = enum_definitions.len(),
            "assembled model"
        );

        ModelDescriptor {
            package: package.to_string(),
            struct_name: struct_name.to_string(),
            short_alias: short_alias(struct_name),
            table_name: table_name.to_string(),
            fields,
            enum_definitions,
        }
    }

    fn build_field(
        &self,
        table_name: &str,
        column: &ColumnDescriptor,
    ) -> (FieldDescriptor, Option<EnumDefinition>) {
        let identifier = self.normalizer.normalize(&column.name);
        let enum_def = column
            .is_enum()
            .then(|| enums::extract(&self.normalizer, &column.name, &column.raw_type, table_name));

        let mut target_type = types::resolve(
            &column.base_type,
            column.nullable,
            self.options.null_style,
            enum_def.as_ref().map(|def| def.type_name.as_str()),
        );
        if target_type.is_empty() {
            warn!(
                table = table_name,
                column = %column.name,
                base_type = %column.base_type,
                "no Go type for column; emitting it untyped"
            );
        }

        let mut primary = String::new();
        let mut column_type = format!("type:{}", column.raw_type);
        if column.is_primary_key {
            primary.push_str(";primary_key");
            if target_type == GO_INT {
                if column.is_auto_increment() {
                    // Auto-increment keys are always nullable ints so inserts can leave them unset.
                    primary.push_str(";auto_increment:true");
                    column_type.clear();
                    target_type = self.options.null_style.nullable_int().to_string();
                } else {
                    primary.push_str(";auto_increment:false");
                }
            }
        }

        let mut annotations = Vec::new();
        if self.options.gorm {
            annotations.push(if column.is_enum() {
                format!(
                    "gorm:\"column:{}\" sql:\"type:{}\"",
                    column.name, column.raw_type
                )
            } else {
                format!(
                    "gorm:\"column:{}{}{}{};{}{}\"",
                    column.name,
                    null_fragment(column),
                    primary,
                    if column.is_indexed { ";index" } else { "" },
                    column_type,
                    default_fragment(column),
                )
            });
        }
        if self.options.json {
            annotations.push(format!("json:\"{}\"", column.name));
        }

        let field = FieldDescriptor {
            identifier,
            target_type,
            annotations,
            source_column: column.clone(),
        };
        (field, enum_def)
    }
}

fn null_fragment(column: &ColumnDescriptor) -> &'static str {
    if column.nullable { ";NULL" } else { ";NOT NULL" }
}

fn default_fragment(column: &ColumnDescriptor) -> String {
    let mut fragment = match column.default_value.as_deref() {
        Some(value) if !value.is_empty() => format!(" DEFAULT {value}"),
        _ if column.nullable && column.base_type.eq_ignore_ascii_case("timestamp") => {
            " NULL DEFAULT NULL".to_string()
        }
        _ => String::new(),
    };
    if !column.extra.is_empty() && column.extra != AUTO_INCREMENT {
        fragment.push(' ');
        fragment.push_str(&column.extra);
    }
    fragment
}

fn order_by_position(table_name: &str, fields: &mut [FieldDescriptor]) {
    // Stable: columns sharing a position stay in name order.
    fields.sort_by_key(|field| field.source_column.ordinal_position);

    for pair in fields.windows(2) {
        let (a, b) = (&pair[0].source_column, &pair[1].source_column);
        if a.ordinal_position == b.ordinal_position {
            warn!(
                table = table_name,
                position = a.ordinal_position,
                first = %a.name,
                second = %b.name,
                "columns share an ordinal position"
            );
        }
    }
}

fn short_alias(struct_name: &str) -> String {
    struct_name
        .chars()
        .next()
        .map(|first| first.to_lowercase().collect())
        .unwrap_or_default()
}
