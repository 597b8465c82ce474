//! Site configuration. Every knob has an explicit default resolved at load
//! time, so the rest of the generation pass never reaches into a dictionary
//! with fallbacks; it reads plain fields.

use gtmpl::Value;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The configuration file's name, searched for in the project directory and
/// its parents.
const CONFIG_FILE: &str = "site.yaml";

/// The prefix wrapper exists so serde's `#[serde(default)]` picks up the
/// `"Archive: "` default for both prefix fields.
#[derive(Clone, Deserialize)]
pub struct Prefix(pub String);
impl Default for Prefix {
    fn default() -> Self {
        Prefix("Archive: ".to_owned())
    }
}

fn default_archive_dir() -> String {
    "archives".to_owned()
}

/// The site configuration, deserialized from `site.yaml`. For example:
///
/// ```yaml
/// title: My Blog
/// archive_dir: archives
/// paginate: 10
/// archive_title_prefix: "Archive: "
/// archive_meta_description_prefix: "Archive: "
/// ```
///
/// Every field except `title` is optional.
#[derive(Deserialize)]
struct ConfigFile {
    title: String,

    #[serde(default = "default_archive_dir")]
    archive_dir: String,

    /// Posts per archive page; 0 (the default) means unpaginated.
    #[serde(default)]
    paginate: usize,

    #[serde(default)]
    archive_title_prefix: Prefix,

    #[serde(default)]
    archive_meta_description_prefix: Prefix,
}

impl ConfigFile {
    /// Unwraps the serde default-wrappers into the plain [`Config`] record.
    fn resolve(self) -> Config {
        Config {
            title: self.title,
            archive_dir: self.archive_dir,
            paginate: self.paginate,
            archive_title_prefix: self.archive_title_prefix.0,
            archive_meta_description_prefix: self.archive_meta_description_prefix.0,
        }
    }
}

/// The resolved configuration handed to the generation pass. Unlike
/// [`ConfigFile`], all fields are plain values with defaults already
/// applied.
#[derive(Clone)]
pub struct Config {
    /// The site title, made available to templates as `site.title`.
    pub title: String,

    /// The directory under the destination root holding archive pages.
    pub archive_dir: String,

    /// Posts per archive page; 0 means everything on one page.
    pub paginate: usize,

    /// The prefix for archive page titles.
    pub archive_title_prefix: String,

    /// The prefix for archive page meta-descriptions.
    pub archive_meta_description_prefix: String,
}

impl Default for Config {
    /// The configuration with every default applied and an empty title.
    fn default() -> Config {
        Config {
            title: String::new(),
            archive_dir: default_archive_dir(),
            paginate: 0,
            archive_title_prefix: Prefix::default().0,
            archive_meta_description_prefix: Prefix::default().0,
        }
    }
}

impl Config {
    /// Searches `dir` and its parent directories for `site.yaml` and loads
    /// the first one found.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Config::from_file(&path)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Err(Error::NotFound),
            }
        }
    }

    /// Loads the configuration from a specific `site.yaml` path.
    pub fn from_file(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|e| Error::Open {
            path: path.to_owned(),
            err: e,
        })?;
        let config: ConfigFile = serde_yaml::from_reader(file)?;
        Ok(config.resolve())
    }

    /// Builds the base site payload for template rendering: an object with a
    /// `site` object carrying the site metadata. The archive pass layers
    /// `site.archives` on top of this via [`crate::payload::augment`].
    pub fn base_payload(&self) -> Value {
        use std::collections::HashMap;
        let mut site: HashMap<String, Value> = HashMap::new();
        site.insert("title".to_owned(), (&self.title).into());
        let mut root: HashMap<String, Value> = HashMap::new();
        root.insert("site".to_owned(), Value::Object(site));
        Value::Object(root)
    }
}

/// Represents the result of a fallible configuration-loading operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading the site configuration.
#[derive(Debug)]
pub enum Error {
    /// Returned when no `site.yaml` exists in the project directory or any
    /// of its parents.
    NotFound,

    /// Returned for I/O problems opening the configuration file.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when there was an error parsing the configuration as YAML.
    DeserializeYaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound => write!(
                f,
                "Could not find `{}` in any parent directory",
                CONFIG_FILE,
            ),
            Error::Open { path, err } => {
                write!(f, "Opening config file '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound => None,
            Error::Open { path: _, err } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
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
