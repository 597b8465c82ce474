//! Defines the [`Post`] type and the logic for loading the site's post list
//! from a YAML manifest. A [`Post`] carries its publish date plus the derived
//! `year` and `month` strings which key the archive groups; both are computed
//! once, eagerly, when the post is constructed.

use chrono::{Datelike, NaiveDate};
use gtmpl::Value;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// A single published post. Only the metadata needed for archive pages is
/// carried here; post bodies are rendered elsewhere and are not this crate's
/// concern.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// The post's title.
    pub title: String,

    /// The post's permalink URL.
    pub url: Url,

    /// The post's publish date.
    pub date: NaiveDate,

    /// The post's publish year as a 4-digit string (e.g., `"2012"`). Derived
    /// from `date` at construction.
    pub year: String,

    /// The post's publish month as a 2-digit zero-padded string (e.g.,
    /// `"03"`). Derived from `date` at construction.
    pub month: String,
}

impl Post {
    /// Constructs a [`Post`] from its title, permalink, and a `YYYY-MM-DD`
    /// date string. A date that can't be parsed is a fatal error; no default
    /// date is ever substituted.
    pub fn new(title: &str, url: Url, date: &str) -> Result<Post> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(Error::DateParse)?;
        Ok(Post {
            title: title.to_owned(),
            url,
            year: format!("{:04}", date.year()),
            month: format!("{:02}", date.month()),
            date,
        })
    }

    /// Converts a [`Post`] into a [`Value`] for templating. The result is a
    /// [`Value::Object`] with `title`, `url`, `date`, `year`, and `month`
    /// fields.
    pub fn to_value(&self) -> Value {
        use std::collections::HashMap;
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), (&self.title).into());
        m.insert("url".to_owned(), Value::String(self.url.to_string()));
        m.insert(
            "date".to_owned(),
            Value::String(self.date.format("%Y-%m-%d").to_string()),
        );
        m.insert("year".to_owned(), (&self.year).into());
        m.insert("month".to_owned(), (&self.month).into());
        Value::Object(m)
    }
}

/// The on-disk shape of one manifest entry. Only deserialized; converted into
/// a [`Post`] (with derived fields) immediately after.
#[derive(Deserialize)]
struct ManifestEntry {
    title: String,
    url: Url,
    date: String,
}

/// Loads the site's post list from a YAML manifest: a sequence of entries,
/// each with `title`, `url`, and `date` (`YYYY-MM-DD`) fields. For example:
///
/// ```yaml
/// - title: Hello, world!
///   url: https://example.org/posts/hello.html
///   date: 2012-03-01
/// ```
///
/// The returned posts are sorted chronologically (oldest first), matching the
/// order the rest of the site iterates posts in. The archive grouping step is
/// what flips each group to most-recent-first.
pub fn load_posts(path: &Path) -> Result<Vec<Post>> {
    let file = File::open(path).map_err(|e| Error::OpenManifest {
        path: path.to_owned(),
        err: e,
    })?;
    let entries: Vec<ManifestEntry> = serde_yaml::from_reader(file)?;

    let mut posts = Vec::with_capacity(entries.len());
    for entry in entries {
        posts.push(Post::new(&entry.title, entry.url, &entry.date)?);
    }
    posts.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(posts)
}

/// Represents the result of a fallible post-loading operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the post manifest.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems opening the manifest file.
    OpenManifest { path: PathBuf, err: std::io::Error },

    /// Returned when there was an error parsing the manifest as YAML
    /// (including a missing `title`, `url`, or `date` field).
    DeserializeYaml(serde_yaml::Error),

    /// Returned when a post's date string can't be parsed. Year and month
    /// are derived from the date, so a post without one can't be archived.
    DateParse(chrono::ParseError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OpenManifest { path, err } => {
                write!(f, "Opening post manifest '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::DateParse(err) => write!(f, "Parsing post date: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OpenManifest { path: _, err } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
            Error::DateParse(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}
