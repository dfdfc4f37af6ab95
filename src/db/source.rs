use async_trait::async_trait;

use crate::{codegen::TableColumns, error::GenResult};

/// Supplies column metadata for the tables of one schema.
#[async_trait]
pub trait ColumnSource: Send + Sync {
    /// Base tables of the schema, in name order.
    async fn table_names(&self) -> GenResult<Vec<String>>;

    /// Columns of `table`. An empty result is an error.
    async fn columns(&self, table: &str) -> GenResult<TableColumns>;
}
