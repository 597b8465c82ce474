//! Loads the site's named layouts: every `*.html` file under the project's
//! `layouts/` directory is parsed as a template and registered under its file
//! stem, so `layouts/archive_index.html` becomes the `archive_index` layout.
//! The navigation formatters from [`crate::filters`] are registered on every
//! layout so templates can call `archive_links` and `archive_selects`.

use crate::filters;
use gtmpl::Template;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The directory under the project root holding layout files.
pub const LAYOUTS_DIR: &str = "layouts";

const HTML_EXTENSION: &str = "html";

/// Loads every layout under `<project_root>/layouts/`. Returns the mapping
/// from layout name to parsed template. A missing or empty directory yields
/// an empty mapping; whether a *specific* layout is required is the writer's
/// concern.
pub fn load_layouts(project_root: &Path) -> Result<HashMap<String, Template>> {
    let dir = project_root.join(LAYOUTS_DIR);
    let mut layouts = HashMap::new();
    if !dir.is_dir() {
        return Ok(layouts);
    }

    for result in walkdir::WalkDir::new(&dir) {
        let entry = result?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(HTML_EXTENSION)
        {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::InvalidFileName(path.to_owned()))?;
        layouts.insert(name.to_owned(), parse_layout(path)?);
    }

    Ok(layouts)
}

/// Parses a single layout file into a [`Template`] with the archive
/// formatter functions registered.
pub fn parse_layout(path: &Path) -> Result<Template> {
    use std::io::Read;
    let mut contents = String::new();
    File::open(path)
        .map_err(|e| Error::OpenLayoutFile {
            path: path.to_owned(),
            err: e,
        })?
        .read_to_string(&mut contents)?;
    parse_layout_str(&contents)
}

/// Parses layout source text into a [`Template`] with the archive formatter
/// functions registered. Split out from [`parse_layout`] so tests can build
/// layouts without touching the file system.
pub fn parse_layout_str(contents: &str) -> Result<Template> {
    let mut template = Template::default();
    template.add_func("archive_links", filters::archive_links_func);
    template.add_func("archive_selects", filters::archive_selects_func);
    template
        .parse(contents)
        .map_err(|e| Error::ParseTemplate(e.to_string()))?;
    Ok(template)
}

/// Represents the result of a fallible layout-loading operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading layouts.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems opening a layout file.
    OpenLayoutFile { path: PathBuf, err: std::io::Error },

    /// Returned when a layout's file name isn't valid UTF-8, so it can't
    /// become a layout name.
    InvalidFileName(PathBuf),

    /// Returned when a layout file fails to parse as a template.
    ParseTemplate(String),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OpenLayoutFile { path, err } => {
                write!(f, "Opening layout file '{}': {}", path.display(), err)
            }
            Error::InvalidFileName(path) => {
                write!(f, "Invalid layout file name: {:?}", path)
            }
            Error::ParseTemplate(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OpenLayoutFile { path: _, err } => Some(err),
            Error::InvalidFileName(_) => None,
            Error::ParseTemplate(_) => None,
            Error::WalkDir(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator for directory-walking functions.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gtmpl::{Context, Value};

    #[test]
    fn test_parse_layout_str() -> Result<()> {
        parse_layout_str("<title>{{ .page.title }}</title>")?;
        Ok(())
    }

    #[test]
    fn test_registered_filters_usable_from_template() -> Result<()> {
        use std::collections::HashMap;

        let template = parse_layout_str(
            "{{ range archive_links .site.archives }}{{ . }}{{ end }}",
        )?;

        let mut archives: HashMap<String, Value> = HashMap::new();
        archives.insert("2012/03".to_owned(), Value::from(5u64));
        let mut site: HashMap<String, Value> = HashMap::new();
        site.insert("archives".to_owned(), Value::Object(archives));
        let mut root: HashMap<String, Value> = HashMap::new();
        root.insert("site".to_owned(), Value::Object(site));

        let mut out: Vec<u8> = Vec::new();
        template
            .execute(&mut out, &Context::from(Value::Object(root)))
            .map_err(|e| Error::ParseTemplate(e.to_string()))?;
        assert_eq!(
            r#"<link rel="archives" title="March 2012" href="/archives/2012/03/" />"#,
            String::from_utf8(out).unwrap(),
        );
        Ok(())
    }
}
