use serde::{Deserialize, Serialize};

pub const GO_INT: &str = "int";
pub const GO_INT64: &str = "int64";
pub const GO_BOOL: &str = "bool";
pub const GO_STRING: &str = "string";
pub const GO_FLOAT32: &str = "float32";
pub const GO_FLOAT64: &str = "float64";
pub const GO_BYTES: &str = "[]byte";
pub const GO_TIME_PTR: &str = "*time.Time";
pub const GO_RAW_JSON: &str = "json.RawMessage";
pub const GO_RAW_JSON_PTR: &str = "*json.RawMessage";

pub const SQL_NULL_INT: &str = "sql.NullInt64";
pub const SQL_NULL_BOOL: &str = "sql.NullBool";
pub const SQL_NULL_STRING: &str = "sql.NullString";
pub const SQL_NULL_FLOAT: &str = "sql.NullFloat64";

pub const NULL_INT: &str = "null.Int";
pub const NULL_BOOL: &str = "null.Bool";
pub const NULL_STRING: &str = "null.String";
pub const NULL_FLOAT: &str = "null.Float";
pub const NULL_TIME: &str = "null.Time";

/// Returned for base types with no mapping. Callers emit it as-is.
pub const UNKNOWN_TYPE: &str = "";

/// How nullable columns are represented in the generated code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NullStyle {
    /// `database/sql` null types such as `sql.NullInt64`.
    #[default]
    Plain,
    /// `github.com/guregu/null` wrappers such as `null.Int`.
    LibraryWrapped,
}

impl NullStyle {
    pub fn nullable_int(self) -> &'static str {
        match self {
            NullStyle::Plain => SQL_NULL_INT,
            NullStyle::LibraryWrapped => NULL_INT,
        }
    }

    fn nullable_bool(self) -> &'static str {
        match self {
            NullStyle::Plain => SQL_NULL_BOOL,
            NullStyle::LibraryWrapped => NULL_BOOL,
        }
    }

    fn nullable_string(self) -> &'static str {
        match self {
            NullStyle::Plain => SQL_NULL_STRING,
            NullStyle::LibraryWrapped => NULL_STRING,
        }
    }

    fn nullable_float(self) -> &'static str {
        match self {
            NullStyle::Plain => SQL_NULL_FLOAT,
            NullStyle::LibraryWrapped => NULL_FLOAT,
        }
    }
}

/// MySQL base types grouped by the Go type family they map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlTypeClass {
    Int,
    BigInt,
    Bool,
    Text,
    Json,
    Time,
    Double,
    Float,
    Bytes,
    Enum,
}

impl SqlTypeClass {
    pub fn classify(base_type: &str) -> Option<Self> {
        let class = match base_type.trim().to_ascii_lowercase().as_str() {
            "int" | "smallint" | "mediumint" => Self::Int,
            "bigint" => Self::BigInt,
            "tinyint" => Self::Bool,
            "char" | "varchar" | "tinytext" | "text" | "mediumtext" => Self::Text,
            "longtext" => Self::Json,
            "date" | "datetime" | "time" | "timestamp" => Self::Time,
            "decimal" | "double" => Self::Double,
            "float" => Self::Float,
            "binary" | "varbinary" | "blob" | "mediumblob" | "longblob" => Self::Bytes,
            "enum" => Self::Enum,
            _ => return None,
        };
        Some(class)
    }
}

/// Maps a column's base type to a Go type name.
///
/// `enum_type` is the name of the enum generated for the column and is used
/// for `enum` columns regardless of nullability. Unmapped base types yield
/// [`UNKNOWN_TYPE`].
pub fn resolve(
    base_type: &str,
    nullable: bool,
    null_style: NullStyle,
    enum_type: Option<&str>,
) -> String {
    let Some(class) = SqlTypeClass::classify(base_type) else {
        return UNKNOWN_TYPE.to_string();
    };

    let resolved = match (class, nullable) {
        (SqlTypeClass::Enum, _) => enum_type.unwrap_or(UNKNOWN_TYPE),
        (SqlTypeClass::Int, false) => GO_INT,
        (SqlTypeClass::BigInt, false) => GO_INT64,
        (SqlTypeClass::Int | SqlTypeClass::BigInt, true) => null_style.nullable_int(),
        (SqlTypeClass::Bool, false) => GO_BOOL,
        (SqlTypeClass::Bool, true) => null_style.nullable_bool(),
        (SqlTypeClass::Text, false) => GO_STRING,
        (SqlTypeClass::Text, true) => null_style.nullable_string(),
        (SqlTypeClass::Json, false) => GO_RAW_JSON,
        (SqlTypeClass::Json, true) => GO_RAW_JSON_PTR,
        (SqlTypeClass::Time, true) if null_style == NullStyle::LibraryWrapped => NULL_TIME,
        (SqlTypeClass::Time, _) => GO_TIME_PTR,
        (SqlTypeClass::Double, false) => GO_FLOAT64,
        (SqlTypeClass::Float, false) => GO_FLOAT32,
        (SqlTypeClass::Double | SqlTypeClass::Float, true) => null_style.nullable_float(),
        (SqlTypeClass::Bytes, _) => GO_BYTES,
    };
    resolved.to_string()
}

#[cfg(test)]
mod tests {
    use super::{NullStyle, SqlTypeClass, resolve};

    const STYLES: [NullStyle; 2] = [NullStyle::Plain, NullStyle::LibraryWrapped];

    fn row(base_type: &str) -> [String; 3] {
        [
            resolve(base_type, false, NullStyle::Plain, None),
            resolve(base_type, true, NullStyle::Plain, None),
            resolve(base_type, true, NullStyle::LibraryWrapped, None),
        ]
    }

    #[test]
    fn mapping_matrix_matches_go_types() {
        let cases: &[(&str, [&str; 3])] = &[
            ("int", ["int", "sql.NullInt64", "null.Int"]),
            ("smallint", ["int", "sql.NullInt64", "null.Int"]),
            ("mediumint", ["int", "sql.NullInt64", "null.Int"]),
            ("bigint", ["int64", "sql.NullInt64", "null.Int"]),
            ("tinyint", ["bool", "sql.NullBool", "null.Bool"]),
            ("varchar", ["string", "sql.NullString", "null.String"]),
            ("mediumtext", ["string", "sql.NullString", "null.String"]),
            ("longtext", ["json.RawMessage", "*json.RawMessage", "*json.RawMessage"]),
            ("datetime", ["*time.Time", "*time.Time", "null.Time"]),
            ("timestamp", ["*time.Time", "*time.Time", "null.Time"]),
            ("decimal", ["float64", "sql.NullFloat64", "null.Float"]),
            ("double", ["float64", "sql.NullFloat64", "null.Float"]),
            ("float", ["float32", "sql.NullFloat64", "null.Float"]),
            ("blob", ["[]byte", "[]byte", "[]byte"]),
            ("varbinary", ["[]byte", "[]byte", "[]byte"]),
        ];

        for (base_type, expected) in cases {
            assert_eq!(row(base_type), expected.map(String::from), "{base_type}");
        }
    }

    #[test]
    fn non_null_time_ignores_null_style() {
        assert_eq!(
            resolve("date", false, NullStyle::LibraryWrapped, None),
            "*time.Time"
        );
    }

    #[test]
    fn enum_uses_generated_type_for_every_nullability() {
        for style in STYLES {
            for nullable in [false, true] {
                assert_eq!(resolve("enum", nullable, style, Some("Status")), "Status");
            }
        }
    }

    #[test]
    fn unmapped_types_resolve_to_empty_sentinel() {
        for style in STYLES {
            assert_eq!(resolve("geometry", false, style, None), "");
            assert_eq!(resolve("json", true, style, None), "");
        }
        assert!(SqlTypeClass::classify("geometry").is_none());
    }

    #[test]
    fn base_type_lookup_ignores_case() {
        assert_eq!(resolve("VARCHAR", false, NullStyle::Plain, None), "string");
    }

    #[test]
    fn resolve_is_pure() {
        for base_type in ["int", "enum", "geometry", "timestamp"] {
            for style in STYLES {
                for nullable in [false, true] {
                    let first = resolve(base_type, nullable, style, Some("Kind"));
                    let second = resolve(base_type, nullable, style, Some("Kind"));
                    assert_eq!(first, second);
                }
            }
        }
    }
}
