//! Image list and current-image state for a front end.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::SessionError;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Whether `path` has one of the supported image extensions.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> SessionError + '_ {
    move |source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Everything a viewer needs to remember between user actions.
#[derive(Debug, Clone)]
pub struct AppState {
    image_folder: PathBuf,
    current_image: PathBuf,
    /// File names imported this session, in import order.
    imported: Vec<String>,
}

impl AppState {
    /// Open the image folder, creating it if needed. `default_image` is a file
    /// name inside the folder and becomes the current image.
    pub fn open(image_folder: impl Into<PathBuf>, default_image: &str) -> Result<Self, SessionError> {
        let image_folder = image_folder.into();
        fs::create_dir_all(&image_folder).map_err(io_err(&image_folder))?;

        let current_image = image_folder.join(default_image);
        if !current_image.is_file() {
            return Err(SessionError::MissingDefaultImage(current_image));
        }
        debug!(folder = %image_folder.display(), "image folder ready");

        Ok(Self {
            image_folder,
            current_image,
            imported: Vec::new(),
        })
    }

    /// Folder holding the default and stored images.
    pub fn image_folder(&self) -> &Path {
        &self.image_folder
    }

    /// Path of the image currently shown.
    pub fn current_image(&self) -> &Path {
        &self.current_image
    }

    /// Supported images in the folder (sorted), then imported names the
    /// folder does not already contain.
    pub fn list_images(&self) -> Result<Vec<String>, SessionError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.image_folder).map_err(io_err(&self.image_folder))? {
            let entry = entry.map_err(io_err(&self.image_folder))?;
            let path = entry.path();
            if path.is_file() && is_supported_image(&path) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();

        for name in &self.imported {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(names)
    }

    /// Import an image. With `persist`, a copy is stored in the image folder
    /// and becomes current; otherwise the original path becomes current.
    /// Returns the name it is listed under.
    pub fn import(&mut self, path: &Path, persist: bool) -> Result<String, SessionError> {
        if !is_supported_image(path) {
            return Err(SessionError::UnsupportedFormat(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(SessionError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SessionError::UnsupportedFormat(path.to_path_buf()))?
            .to_string();

        self.current_image = if persist {
            let stored = self.image_folder.join(&name);
            // Copying a file onto itself truncates it.
            if !same_file(path, &stored)? {
                fs::copy(path, &stored).map_err(io_err(&stored))?;
                info!(image = %name, "stored image in folder");
            }
            stored
        } else {
            path.to_path_buf()
        };

        if !self.imported.contains(&name) {
            self.imported.push(name.clone());
        }
        Ok(name)
    }

    /// Make the folder image `name` current.
    pub fn select(&mut self, name: &str) -> Result<&Path, SessionError> {
        let path = self.image_folder.join(name);
        if Path::new(name).file_name() != Some(OsStr::new(name)) || !path.is_file() {
            return Err(SessionError::UnknownImage(name.to_string()));
        }
        self.current_image = path;
        Ok(&self.current_image)
    }

    /// Make `image` current: a bare name of a folder image selects it,
    /// anything else is imported from its path for this session only.
    pub fn choose(&mut self, image: &str) -> Result<&Path, SessionError> {
        let as_path = Path::new(image);
        if as_path.components().count() == 1 && self.image_folder.join(image).is_file() {
            self.select(image)
        } else {
            self.import(as_path, false)?;
            Ok(&self.current_image)
        }
    }
}

/// Whether `a` and `b` name the same existing file. A missing `b` is never the same.
fn same_file(a: &Path, b: &Path) -> Result<bool, SessionError> {
    if !b.exists() {
        return Ok(false);
    }
    let a = fs::canonicalize(a).map_err(io_err(a))?;
    let b = fs::canonicalize(b).map_err(io_err(b))?;
    Ok(a == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for f in files {
            fs::write(dir.path().join(f), b"x").unwrap();
        }
        dir
    }

    #[test]
    fn extension_filter() {
        assert!(is_supported_image(Path::new("a.JPG")));
        assert!(is_supported_image(Path::new("dir/b.jpeg")));
        assert!(is_supported_image(Path::new("c.png")));
        assert!(!is_supported_image(Path::new("d.gif")));
        assert!(!is_supported_image(Path::new("png")));
    }

    #[test]
    fn open_requires_default_image() {
        let dir = folder_with(&[]);
        assert!(matches!(
            AppState::open(dir.path(), "living_room.jpeg"),
            Err(SessionError::MissingDefaultImage(_))
        ));
    }

    #[test]
    fn open_creates_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("images");
        let err = AppState::open(&folder, "room.png").unwrap_err();
        assert!(folder.is_dir());
        assert!(matches!(err, SessionError::MissingDefaultImage(_)));
    }

    #[test]
    fn list_filters_and_sorts() {
        let dir = folder_with(&["room.png", "b.jpg", "notes.txt", "a.JPEG"]);
        let state = AppState::open(dir.path(), "room.png").unwrap();
        assert_eq!(state.current_image(), dir.path().join("room.png"));
        assert_eq!(state.list_images().unwrap(), vec!["a.JPEG", "b.jpg", "room.png"]);
    }

    #[test]
    fn import_without_persist_lists_name_once() {
        let dir = folder_with(&["room.png"]);
        let outside = folder_with(&["beach.jpg"]);
        let beach = outside.path().join("beach.jpg");

        let mut state = AppState::open(dir.path(), "room.png").unwrap();
        assert_eq!(state.import(&beach, false).unwrap(), "beach.jpg");
        state.import(&beach, false).unwrap();

        assert_eq!(state.current_image(), beach);
        assert!(!dir.path().join("beach.jpg").exists());
        assert_eq!(state.list_images().unwrap(), vec!["room.png", "beach.jpg"]);
    }

    #[test]
    fn import_with_persist_copies_into_folder() {
        let dir = folder_with(&["room.png"]);
        let outside = folder_with(&["aa.png"]);

        let mut state = AppState::open(dir.path(), "room.png").unwrap();
        state.import(&outside.path().join("aa.png"), true).unwrap();

        assert!(dir.path().join("aa.png").is_file());
        assert_eq!(state.current_image(), dir.path().join("aa.png"));
        assert_eq!(state.list_images().unwrap(), vec!["aa.png", "room.png"]);
    }

    #[test]
    fn import_rejects_bad_input() {
        let dir = folder_with(&["room.png", "doc.txt"]);
        let mut state = AppState::open(dir.path(), "room.png").unwrap();
        assert!(matches!(
            state.import(&dir.path().join("doc.txt"), false),
            Err(SessionError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            state.import(&dir.path().join("gone.png"), false),
            Err(SessionError::Io { .. })
        ));
    }

    #[test]
    fn select_switches_current_image() {
        let dir = folder_with(&["room.png", "hall.jpg"]);
        let mut state = AppState::open(dir.path(), "room.png").unwrap();
        assert_eq!(state.select("hall.jpg").unwrap(), dir.path().join("hall.jpg"));
        assert!(matches!(state.select("nope.jpg"), Err(SessionError::UnknownImage(_))));
        assert!(matches!(
            state.select("../room.png"),
            Err(SessionError::UnknownImage(_))
        ));
        assert_eq!(state.current_image(), dir.path().join("hall.jpg"));
    }

    #[test]
    fn persisting_an_image_already_in_the_folder_keeps_its_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let room = dir.path().join("room.png");
        fs::write(&room, b"eighteen byte data").unwrap();

        let mut state = AppState::open(dir.path(), "room.png").unwrap();
        assert_eq!(state.import(&room, true).unwrap(), "room.png");
        // Same file reached through a non-canonical path.
        let dotted = dir.path().join(".").join("room.png");
        state.import(&dotted, true).unwrap();

        assert_eq!(fs::read(&room).unwrap(), b"eighteen byte data");
        assert_eq!(state.current_image(), room);
        assert_eq!(state.list_images().unwrap(), vec!["room.png"]);
    }

    #[test]
    fn choose_prefers_folder_names_then_paths() {
        let dir = folder_with(&["room.png", "hall.jpg"]);
        let outside = folder_with(&["hall.jpg", "beach.png"]);
        let mut state = AppState::open(dir.path(), "room.png").unwrap();

        assert_eq!(state.choose("hall.jpg").unwrap(), dir.path().join("hall.jpg"));

        let other_hall = outside.path().join("hall.jpg");
        let chosen = state.choose(other_hall.to_str().unwrap()).unwrap().to_path_buf();
        assert_eq!(chosen, other_hall);

        let beach = outside.path().join("beach.png");
        state.choose(beach.to_str().unwrap()).unwrap();
        assert_eq!(state.current_image(), beach);
        assert!(!dir.path().join("beach.png").exists());

        assert!(matches!(state.choose("nope.png"), Err(SessionError::Io { .. })));
        assert!(matches!(state.choose("notes.txt"), Err(SessionError::UnsupportedFormat(_))));
    }
}
