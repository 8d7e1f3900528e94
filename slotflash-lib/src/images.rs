use crate::manifest::image_name;
use crate::{Error, Result};
use std::fmt;
use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// An existing directory holding partition images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDir {
    path: PathBuf,
}

impl ImageDir {
    /// Resolve the optional directory argument.
    ///
    /// `None` means the current directory. The stored path is made absolute
    /// without following symlinks.
    pub fn resolve(arg: Option<&Path>) -> Result<Self> {
        let dir = match arg {
            Some(dir) => {
                if !dir.is_dir() {
                    return Err(Error::NotADirectory(dir.to_path_buf()));
                }
                dir.to_path_buf()
            }
            None => PathBuf::from("."),
        };
        let path = std::path::absolute(&dir)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ImageDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display().to_string();
        if path.ends_with(MAIN_SEPARATOR) {
            write!(f, "{}", path)
        } else {
            write!(f, "{}{}", path, MAIN_SEPARATOR)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Base name, e.g. `boot.img`
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
}

/// Snapshot of the regular files in an [`ImageDir`], sorted by name.
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    files: Vec<ImageFile>,
}

impl ImageSet {
    pub fn collect(dir: &ImageDir) -> Result<Self> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir.path())? {
            let entry = entry?;
            let path = entry.path();
            // fs::metadata follows symlinks, a link to an image counts as a file
            if !fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            files.push(ImageFile { name, path });
        }
        Ok(Self::from_files(files))
    }

    pub fn from_files(mut files: Vec<ImageFile>) -> Self {
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Self { files }
    }

    pub fn files(&self) -> &[ImageFile] {
        &self.files
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|file| file.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|file| file.name == name)
    }

    /// Image to flash for `partition`.
    ///
    /// An exact `<partition>.img` wins; otherwise the first file (by name)
    /// ending in `<partition>.img`.
    pub fn find_for(&self, partition: &str) -> Option<&ImageFile> {
        let wanted = image_name(partition);
        let candidates: Vec<&ImageFile> = self
            .files
            .iter()
            .filter(|file| file.name.ends_with(&wanted))
            .collect();
        if candidates.len() > 1 {
            tracing::debug!(
                "{} files match partition '{}': {:?}",
                candidates.len(),
                partition,
                candidates.iter().map(|f| &f.name).collect::<Vec<_>>()
            );
        }
        candidates
            .iter()
            .find(|file| file.name == wanted)
            .or_else(|| candidates.first())
            .copied()
    }
}
