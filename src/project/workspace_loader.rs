use std::path::Path;

use rayon::prelude::*;

use super::{LoadError, RobotOptions, file_loader};
use crate::base::FileId;
use crate::ide::AnalysisHost;

/// Loads workspace files on demand
#[derive(Debug, Default)]
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads every robot document below `path` into the host, and the
    /// options of a config file in `path` itself.
    ///
    /// Files are read and parsed in parallel. A file that cannot be read is
    /// logged and skipped; the count of loaded files is returned.
    pub fn load_directory_into_host(
        &self,
        path: impl AsRef<Path>,
        host: &mut AnalysisHost,
    ) -> Result<usize, LoadError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(LoadError::NotADirectory(path.to_path_buf()));
        }

        host.set_options(RobotOptions::load(path));

        let paths = file_loader::collect_file_paths(path)?;
        let files: Vec<_> = paths
            .par_iter()
            .filter_map(|path| match file_loader::load_and_parse(path) {
                Ok(file) => Some((path, file)),
                Err(err) => {
                    tracing::warn!(%err, "skipping file");
                    None
                }
            })
            .collect();

        let loaded = files.len();
        for (path, file) in files {
            host.insert_syntax(path, file);
        }
        tracing::debug!(root = %path.display(), loaded, total = paths.len(), "loaded workspace");
        Ok(loaded)
    }

    /// Loads a single file into the host.
    pub fn load_file_into_host(
        &self,
        path: impl AsRef<Path>,
        host: &mut AnalysisHost,
    ) -> Result<FileId, LoadError> {
        let path = path.as_ref();
        let file = file_loader::load_and_parse(path)?;
        Ok(host.insert_syntax(path, file))
    }
}
