//! Manifest interpretation.
//!
//! A manifest is a JSON object with an optional `metadata` object applied
//! to the root folder and an `entries` array of `file`, `folder` and `glob`
//! directives. Interpretation walks the entries depth-first, translating
//! each into [`Vfs`] calls. Any error aborts the whole load.
//!
//! # Examples
//!
//! ```
//! use rescomp_manifest::Manifest;
//! use serde_json::json;
//!
//! let value = json!({
//!     "metadata": { "version": "1.0" },
//!     "entries": [
//!         { "type": "folder", "path": "web", "entries": [
//!             { "type": "file", "path": "css/site.css", "source": "site.css" }
//!         ]}
//!     ]
//! });
//!
//! let manifest = Manifest::from_value(&value, "res", "assets").unwrap();
//! let vfs = manifest.vfs();
//! let file = vfs.find_file("web/css/site.css").unwrap();
//! assert_eq!(vfs.file(file).mime(), "text/css");
//! assert_eq!(manifest.dependencies(), vec![std::path::Path::new("res/site.css")]);
//! ```

use crate::glob;
use crate::path::{basename, dirname, join, nest, resolve_source};
use rescomp_core::{Error, Result};
use rescomp_vfs::{FolderId, Metadata, Vfs};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A loaded manifest: the resource tree it describes plus where it came from.
#[derive(Debug, Clone)]
pub struct Manifest {
    name: String,
    base_dir: PathBuf,
    vfs: Vfs,
}

impl Manifest {
    /// Reads, interprets and loads every file's data for the manifest at `path`.
    ///
    /// `name` is the base name later used for generated symbols.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the manifest or any referenced file cannot be read
    /// - [`Error::Parse`] if the manifest is not a JSON object
    /// - [`Error::InvalidArgument`] for malformed entries
    /// - [`Error::Duplicate`] for two explicit files with the same virtual path
    pub fn load(path: impl AsRef<Path>, name: &str) -> Result<Self> {
        let mut manifest = Self::interpret_file(path.as_ref(), name)?;
        manifest.vfs.load_all_data()?;
        info!(
            manifest = %path.as_ref().display(),
            files = manifest.vfs.file_len(),
            folders = manifest.vfs.folder_len() - 1,
            "manifest loaded"
        );
        Ok(manifest)
    }

    /// Interprets the manifest at `path` without loading any file data.
    ///
    /// Used for dependency extraction, where only source paths matter.
    ///
    /// # Errors
    ///
    /// Same as [`Manifest::load`], minus file read failures.
    pub fn load_deps(path: impl AsRef<Path>) -> Result<Self> {
        Self::interpret_file(path.as_ref(), "deps")
    }

    /// Interprets an already parsed manifest value.
    ///
    /// Relative `source` and glob paths resolve against `base_dir`. No data
    /// is loaded; call [`Manifest::load_data`] afterwards if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `value` is not an object, or any
    /// interpretation error described in [`Manifest::load`].
    pub fn from_value(value: &Value, base_dir: impl Into<PathBuf>, name: &str) -> Result<Self> {
        let root = value.as_object().ok_or_else(|| Error::Parse {
            message: "manifest root must be an object".to_string(),
            source: None,
        })?;

        let base_dir = base_dir.into();
        let mut vfs = Vfs::new();
        Interpreter {
            base_dir: &base_dir,
            vfs: &mut vfs,
        }
        .run(root)?;

        Ok(Self {
            name: name.to_string(),
            base_dir,
            vfs,
        })
    }

    fn interpret_file(path: &Path, name: &str) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let value: Value = serde_json::from_str(&text).map_err(|e| Error::Parse {
            message: format!("{}: {e}", path.display()),
            source: Some(e),
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!(manifest = %path.display(), base_dir = %base_dir.display(), "interpreting manifest");
        Self::from_value(&value, base_dir, name)
    }

    /// Loads the data of every file not loaded yet.
    ///
    /// # Errors
    ///
    /// Returns the first load failure from [`Vfs::load_all_data`].
    pub fn load_data(&mut self) -> Result<()> {
        self.vfs.load_all_data()
    }

    /// Returns the base name for generated symbols.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the directory relative sources resolve against.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the resource tree.
    #[must_use]
    pub const fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    /// Consumes the manifest, handing the tree to the caller.
    #[must_use]
    pub fn into_vfs(self) -> Vfs {
        self.vfs
    }

    /// Returns every file's source path in pre-order.
    #[must_use]
    pub fn dependencies(&self) -> Vec<&Path> {
        self.vfs
            .files_preorder()
            .into_iter()
            .filter_map(|id| self.vfs.file(id).source_path())
            .collect()
    }

    /// Renders the dependencies one per line.
    #[must_use]
    pub fn dependency_list(&self) -> String {
        self.dependencies()
            .iter()
            .map(|path| format!("{}\n", path.display()))
            .collect()
    }

    /// Renders a Makefile rule making `output` and `header` depend on
    /// every source file.
    #[must_use]
    pub fn depfile_rule(&self, output: &Path, header: &Path) -> String {
        let mut rule = format!("{} {}:", output.display(), header.display());
        for dep in self.dependencies() {
            rule.push(' ');
            rule.push_str(&dep.display().to_string());
        }
        rule.push('\n');
        rule
    }
}

struct Interpreter<'a> {
    base_dir: &'a Path,
    vfs: &'a mut Vfs,
}

impl Interpreter<'_> {
    fn run(&mut self, root: &Map<String, Value>) -> Result<()> {
        let metadata = read_metadata(root);
        append_metadata(self.vfs.folder_mut(FolderId::ROOT).metadata_mut(), &metadata);
        self.process_entries(root.get("entries"), FolderId::ROOT)
    }

    fn process_entries(&mut self, entries: Option<&Value>, parent: FolderId) -> Result<()> {
        let Some(entries) = entries.and_then(Value::as_array) else {
            return Ok(());
        };
        for entry in entries {
            self.process_entry(entry, parent)?;
        }
        Ok(())
    }

    fn process_entry(&mut self, entry: &Value, parent: FolderId) -> Result<()> {
        let entry = entry
            .as_object()
            .ok_or_else(|| Error::InvalidArgument("manifest entry must be an object".into()))?;

        match required(entry, "type", "entry")? {
            "file" => self.process_file(entry, parent),
            "folder" => self.process_folder(entry, parent),
            "glob" => self.process_glob(entry, parent),
            other => Err(Error::InvalidArgument(format!(
                "unknown entry type '{other}'"
            ))),
        }
    }

    fn process_file(&mut self, entry: &Map<String, Value>, parent: FolderId) -> Result<()> {
        let path = required(entry, "path", "file entry")?;
        let source = required(entry, "source", "file entry")?;

        let parent_path = self.vfs.folder(parent).path().to_string();
        let folder_path = nest(&parent_path, dirname(path));
        let folder = self.vfs.ensure_folder(&folder_path);

        let id = self
            .vfs
            .add_file(folder, basename(path), resolve_source(self.base_dir, source))?;

        let file = self.vfs.file_mut(id);
        if let Some(mime) = entry.get("mime").and_then(Value::as_str) {
            file.set_mime(mime);
        }
        append_metadata(file.metadata_mut(), &read_metadata(entry));
        debug!(path = %file.path(), "file entry");
        Ok(())
    }

    fn process_folder(&mut self, entry: &Map<String, Value>, parent: FolderId) -> Result<()> {
        let path = required(entry, "path", "folder entry")?;

        let full_path = nest(self.vfs.folder(parent).path(), path);
        let folder = self.vfs.ensure_folder(&full_path);
        append_metadata(self.vfs.folder_mut(folder).metadata_mut(), &read_metadata(entry));
        debug!(path = %full_path, "folder entry");

        self.process_entries(entry.get("entries"), folder)
    }

    fn process_glob(&mut self, entry: &Map<String, Value>, parent: FolderId) -> Result<()> {
        let pattern = required(entry, "pattern", "glob entry")?;
        let target = required(entry, "target", "glob entry")?;

        let target_path = nest(self.vfs.folder(parent).path(), target);
        let metadata = read_metadata(entry);
        let vfs = &mut *self.vfs;
        let mut added = 0_usize;

        glob::for_each_match(pattern, self.base_dir, |source| {
            let name = source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let virtual_path = join(&target_path, &name);
            let folder = vfs.ensure_folder(dirname(&virtual_path));

            match vfs.add_file(folder, basename(&virtual_path), source) {
                Ok(id) => {
                    append_metadata(vfs.file_mut(id).metadata_mut(), &metadata);
                    added += 1;
                    Ok(())
                }
                Err(e) if e.is_duplicate() => {
                    warn!(path = %virtual_path, "glob match already present, skipping");
                    Ok(())
                }
                Err(e) => Err(e),
            }
        })?;

        debug!(pattern, target = %target_path, added, "glob entry");
        Ok(())
    }
}

fn required<'v>(entry: &'v Map<String, Value>, key: &str, what: &str) -> Result<&'v str> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::InvalidArgument(format!("{what} is missing '{key}'")))
}

/// Collects the string-valued pairs of an optional `metadata` object.
/// Non-string values are ignored.
fn read_metadata(entry: &Map<String, Value>) -> Vec<(&str, &str)> {
    entry
        .get("metadata")
        .and_then(Value::as_object)
        .map(|object| {
            object
                .iter()
                .filter_map(|(key, value)| value.as_str().map(|value| (key.as_str(), value)))
                .collect()
        })
        .unwrap_or_default()
}

fn append_metadata(target: &mut Metadata, pairs: &[(&str, &str)]) {
    for (key, value) in pairs {
        target.push(*key, *value);
    }
}
