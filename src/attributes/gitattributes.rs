//! Reads attribute paths from the attribute files of a working tree.

use super::{AttributePath, AttributeSource};
use crate::config::Config;
use crate::context::RepoContext;
use crate::walk::TreeWalk;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const ATTRIBUTES_FILE_NAME: &str = ".gitattributes";
const LOCKABLE_ATTR: &str = "lockable";
const LFS_FILTER_ATTR: &str = "filter=lfs";

/// Attribute source backed by the attribute files of a working tree.
///
/// Files are read in this order:
/// 1. `.git/info/attributes` (when configured)
/// 2. `.gitattributes` at the repository root
/// 3. nested `.gitattributes` files, sorted by path (when enabled)
///
/// Patterns declared in a nested file are prefixed with that file's directory.
#[derive(Debug, Clone)]
pub struct GitAttributes {
    repo_root: PathBuf,
    info_attributes: Option<PathBuf>,
    scan_nested: bool,
    skip_dirs: Vec<String>,
}

impl GitAttributes {
    /// Read only the attribute files inside `repo_root`.
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            info_attributes: None,
            scan_nested: true,
            skip_dirs: crate::config::types::default_skip_dirs(),
        }
    }

    /// Build the source for a resolved repository and its config.
    pub fn from_context(ctx: &RepoContext, config: &Config) -> Self {
        let mut source = Self::new(&ctx.repo_root)
            .scan_nested(config.scan_nested_attributes)
            .skip_dirs(config.skip_dirs.clone());
        if config.read_info_attributes {
            source = source.with_info_attributes(ctx.info_attributes_path());
        }
        source
    }

    /// Also read the given repository-local attributes file first.
    pub fn with_info_attributes(mut self, path: impl Into<PathBuf>) -> Self {
        self.info_attributes = Some(path.into());
        self
    }

    /// Enable or disable reading `.gitattributes` files below the root.
    pub fn scan_nested(mut self, scan: bool) -> Self {
        self.scan_nested = scan;
        self
    }

    /// Directory names to skip while looking for nested attribute files.
    pub fn skip_dirs(mut self, dirs: Vec<String>) -> Self {
        self.skip_dirs = dirs;
        self
    }

    /// Nested attribute files as (absolute path, directory prefix) pairs.
    fn nested_attribute_files(&self) -> Vec<(PathBuf, String)> {
        let walk = TreeWalk::new(&self.repo_root, self.repo_root.clone(), true)
            .skip_dirs(self.skip_dirs.clone());

        let mut files = Vec::new();
        for visit in walk {
            let visit = match visit {
                Ok(visit) => visit,
                Err(e) => {
                    tracing::warn!("stopped scanning for attribute files: {}", e);
                    break;
                }
            };
            if visit.is_dir || visit.file_name() != Some(ATTRIBUTES_FILE_NAME) {
                continue;
            }
            let Some((dir, _)) = visit.canonical.rsplit_once('/') else {
                // The root file is read separately.
                continue;
            };
            files.push((visit.path.clone(), dir.to_string()));
        }

        files.sort_by(|a, b| a.1.cmp(&b.1));
        files
    }
}

impl AttributeSource for GitAttributes {
    fn list_attribute_paths(&self) -> Vec<AttributePath> {
        let mut paths = Vec::new();

        if let Some(info) = &self.info_attributes {
            read_attribute_file(info, "", &mut paths);
        }

        read_attribute_file(&self.repo_root.join(ATTRIBUTES_FILE_NAME), "", &mut paths);

        if self.scan_nested {
            for (file, prefix) in self.nested_attribute_files() {
                read_attribute_file(&file, &prefix, &mut paths);
            }
        }

        tracing::debug!(
            count = paths.len(),
            root = %self.repo_root.display(),
            "read attribute paths"
        );
        paths
    }
}

fn read_attribute_file(path: &Path, dir_prefix: &str, out: &mut Vec<AttributePath>) {
    match fs::read_to_string(path) {
        Ok(content) => out.extend(parse_attributes(&content, dir_prefix)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("skipping unreadable attribute file '{}': {}", path.display(), e),
    }
}

/// Parse the content of an attribute file into tracked attribute paths.
///
/// A line is kept when it carries `filter=lfs` or `lockable`. Blank lines and
/// `#` comments are ignored. Patterns are prefixed with `dir_prefix` (a
/// repository-relative directory, empty for the root).
pub fn parse_attributes(content: &str, dir_prefix: &str) -> Vec<AttributePath> {
    let mut paths = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let Some(pattern) = fields.next() else {
            continue;
        };

        let mut tracked = false;
        let mut lockable = false;
        for attr in fields {
            match attr {
                LFS_FILTER_ATTR => tracked = true,
                LOCKABLE_ATTR => lockable = true,
                _ => {}
            }
        }
        if !tracked && !lockable {
            continue;
        }

        let path = if dir_prefix.is_empty() {
            pattern.to_string()
        } else {
            format!("{}/{}", dir_prefix, pattern.trim_start_matches('/'))
        };
        paths.push(AttributePath { path, lockable });
    }

    paths
}
