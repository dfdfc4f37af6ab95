use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::error::{GenError, GenResult};

/// Writes one `<table>.go` file per model into a package directory.
#[derive(Debug, Clone)]
pub struct ModelWriter {
    dir: PathBuf,
}

impl ModelWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prepare(&self) -> GenResult<()> {
        fs::create_dir_all(&self.dir).map_err(|err| GenError::io(&self.dir, err))
    }

    pub fn path_for(&self, table: &str) -> PathBuf {
        let file_name: String = table
            .chars()
            .map(|ch| if matches!(ch, '/' | '\\') { '_' } else { ch })
            .collect();
        self.dir.join(format!("{file_name}.go"))
    }

    pub fn write(&self, table: &str, source: &str) -> GenResult<PathBuf> {
        let path = self.path_for(table);
        fs::write(&path, source).map_err(|err| GenError::io(&path, err))?;
        info!(table, path = %path.display(), "wrote model");
        Ok(path)
    }
}
