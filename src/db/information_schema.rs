use std::collections::hash_map::Entry;

use async_trait::async_trait;
use sea_orm::{DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use tracing::{debug, warn};

use super::source::ColumnSource;
use crate::{
    codegen::{ColumnDescriptor, TableColumns},
    error::{GenError, GenResult},
};

// information_schema reports several columns as binary strings or enums on
// MySQL 8; every text column is cast so it decodes as a plain string.
const COLUMNS_QUERY: &str = "SELECT \
    CAST(C.COLUMN_NAME AS CHAR) AS column_name, \
    CAST(C.COLUMN_KEY AS CHAR) AS column_key, \
    CAST(C.COLUMN_TYPE AS CHAR) AS column_type, \
    CAST(C.COLUMN_DEFAULT AS CHAR) AS column_default, \
    CAST(C.DATA_TYPE AS CHAR) AS data_type, \
    CAST(C.IS_NULLABLE AS CHAR) AS is_nullable, \
    CAST(C.ORDINAL_POSITION AS CHAR) AS ordinal_position, \
    CAST(C.EXTRA AS CHAR) AS extra, \
    CAST(S.INDEX_NAME AS CHAR) AS index_name \
    FROM INFORMATION_SCHEMA.COLUMNS AS C \
    LEFT JOIN INFORMATION_SCHEMA.STATISTICS AS S \
    ON C.TABLE_NAME = S.TABLE_NAME AND C.COLUMN_NAME = S.COLUMN_NAME AND C.TABLE_SCHEMA = S.TABLE_SCHEMA \
    WHERE C.TABLE_SCHEMA = ? AND C.TABLE_NAME = ?";

const TABLES_QUERY: &str = "SELECT CAST(TABLE_NAME AS CHAR) AS table_name \
    FROM INFORMATION_SCHEMA.TABLES \
    WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE' \
    ORDER BY TABLE_NAME";

const NULLABLE_YES: &str = "YES";
const PRIMARY_KEY: &str = "PRI";

/// One `INFORMATION_SCHEMA.COLUMNS` row, joined with at most one index.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct RawColumnRow {
    pub column_name: String,
    /// `PRI` for primary key columns.
    pub column_key: String,
    pub column_type: String,
    pub column_default: Option<String>,
    pub data_type: String,
    /// `YES` or `NO`.
    pub is_nullable: String,
    pub ordinal_position: String,
    pub extra: String,
    pub index_name: Option<String>,
}

impl RawColumnRow {
    fn indexes_itself(&self) -> bool {
        self.index_name
            .as_deref()
            .is_some_and(|index| index.eq_ignore_ascii_case(&self.column_name))
    }

    pub fn into_descriptor(self, table: &str) -> ColumnDescriptor {
        let ordinal_position = match self.ordinal_position.trim().parse::<u32>() {
            Ok(position) => position,
            Err(_) => {
                warn!(
                    table,
                    column = %self.column_name,
                    position = %self.ordinal_position,
                    "ordinal position is not a number; using 0"
                );
                0
            }
        };
        let is_indexed = self.indexes_itself();

        ColumnDescriptor {
            name: self.column_name,
            raw_type: self.column_type,
            base_type: self.data_type,
            nullable: self.is_nullable == NULLABLE_YES,
            is_primary_key: self.column_key == PRIMARY_KEY,
            ordinal_position,
            extra: self.extra,
            default_value: self.column_default,
            is_indexed,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct TableNameRow {
    table_name: String,
}

/// Folds joined rows into one descriptor per column. A column listed once per
/// index it belongs to is indexed when any of those indexes is named after it.
pub fn collect_columns(table: &str, rows: Vec<RawColumnRow>) -> TableColumns {
    let mut columns = TableColumns::with_capacity(rows.len());
    for row in rows {
        match columns.entry(row.column_name.clone()) {
            Entry::Occupied(mut existing) => {
                if row.indexes_itself() {
                    existing.get_mut().is_indexed = true;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(row.into_descriptor(table));
            }
        }
    }
    columns
}

/// MySQL column source backed by `INFORMATION_SCHEMA`.
#[derive(Debug, Clone)]
pub struct InformationSchemaSource {
    db: DatabaseConnection,
    schema: String,
}

impl InformationSchemaSource {
    pub fn new(db: DatabaseConnection, schema: impl Into<String>) -> Self {
        Self {
            db,
            schema: schema.into(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }
}

#[async_trait]
impl ColumnSource for InformationSchemaSource {
    async fn table_names(&self) -> GenResult<Vec<String>> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::MySql,
            TABLES_QUERY,
            [self.schema.as_str().into()],
        );
        let rows = TableNameRow::find_by_statement(stmt).all(&self.db).await?;
        debug!(schema = %self.schema, tables = rows.len(), "listed tables");
        Ok(rows.into_iter().map(|row| row.table_name).collect())
    }

    async fn columns(&self, table: &str) -> GenResult<TableColumns> {
        let stmt = Statement::from_sql_and_values(
            DatabaseBackend::MySql,
            COLUMNS_QUERY,
            [self.schema.as_str().into(), table.into()],
        );
        let rows = RawColumnRow::find_by_statement(stmt).all(&self.db).await?;
        if rows.is_empty() {
            return Err(GenError::NoColumns {
                table: table.to_string(),
            });
        }
        debug!(table, rows = rows.len(), "fetched column metadata");
        Ok(collect_columns(table, rows))
    }
}
