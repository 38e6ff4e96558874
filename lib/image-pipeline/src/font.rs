//! Font resources for the text overlay.

use crate::{Error, Result};
use ab_glyph::FontArc;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

static DEJAVU_SANS: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Supplies the font used to draw overlay text. The pixel size is applied
/// by the renderer, so one provider serves every size.
pub trait FontProvider {
    fn load(&self) -> Result<FontArc>;
}

/// DejaVu Sans, compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedFont;

impl FontProvider for EmbeddedFont {
    fn load(&self) -> Result<FontArc> {
        FontArc::try_from_slice(DEJAVU_SANS)
            .map_err(|e| Error::ResourceUnavailable(format!("embedded font: {e}")))
    }
}

/// A TrueType or OpenType file on disk.
#[derive(Debug, Clone)]
pub struct FileFont {
    path: PathBuf,
}

impl FileFont {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FontProvider for FileFont {
    fn load(&self) -> Result<FontArc> {
        load_file(&self.path)
    }
}

/// Resolves a family name such as `arial` or `DejaVu Sans` against the
/// platform font directories.
#[derive(Debug, Clone)]
pub struct SystemFont {
    family: String,
    dirs: Vec<PathBuf>,
}

impl SystemFont {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            dirs: default_font_dirs(),
        }
    }

    /// Search only `dirs`.
    pub fn with_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.dirs = dirs;
        self
    }

    pub fn find(&self) -> Option<PathBuf> {
        let wanted = normalize_family(&self.family);
        if wanted.is_empty() {
            return None;
        }

        self.dirs
            .iter()
            .filter(|dir| dir.is_dir())
            .flat_map(|dir| WalkDir::new(dir).follow_links(true).into_iter().flatten())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .find(|path| {
                let is_font = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf"));

                is_font
                    && path
                        .file_stem()
                        .and_then(|stem| stem.to_str())
                        .is_some_and(|stem| normalize_family(stem) == wanted)
            })
    }
}

impl FontProvider for SystemFont {
    fn load(&self) -> Result<FontArc> {
        let path = self.find().ok_or_else(|| {
            Error::ResourceUnavailable(format!("font family `{}` not found", self.family))
        })?;

        log::debug!("font family `{}` resolved to {}", self.family, path.display());
        load_file(&path)
    }
}

fn load_file(path: &Path) -> Result<FontArc> {
    let data = fs::read(path).map_err(|e| {
        Error::ResourceUnavailable(format!("failed to read font {}: {e}", path.display()))
    })?;

    FontArc::try_from_vec(data)
        .map_err(|e| Error::ResourceUnavailable(format!("invalid font {}: {e}", path.display())))
}

fn normalize_family(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn default_font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("C:\\Windows\\Fonts"),
    ];

    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
        dirs.push(home.join("Library/Fonts"));
    }

    dirs
}
