use std::path::PathBuf;

use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),
    #[error("no columns found for table `{table}`")]
    NoColumns { table: String },
    #[error("failed to render {template} template: {source}")]
    Render {
        template: &'static str,
        #[source]
        source: askama::Error,
    },
    #[error("failed to format generated source for `{table}`: {message}")]
    Format { table: String, message: String },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type GenResult<T> = Result<T, GenError>;

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
