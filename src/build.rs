//! Exports the [`build_archives`] function which stitches together the
//! high-level steps of an archive build: loading the site configuration
//! ([`crate::config`]), loading the post manifest ([`crate::post`]), loading
//! the named layouts ([`crate::layout`]), and running the generation pass
//! ([`crate::write`]).

use crate::config::{Config, Error as ConfigError};
use crate::layout::{load_layouts, Error as LayoutError};
use crate::post::{load_posts, Error as PostError};
use crate::write::{Error as WriteError, Writer};
use std::fmt;
use std::path::{Path, PathBuf};

/// The post manifest's file name under the project root.
const POSTS_FILE: &str = "posts.yaml";

/// Builds the archive pages for the project rooted at (or above)
/// `project_dir`, writing output under `output_dir`. Returns the list of
/// written page paths; callers running a cleanup sweep over `output_dir`
/// must treat those paths as part of the build.
pub fn build_archives(project_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let config = Config::from_directory(project_dir)?;
    let posts = load_posts(&project_dir.join(POSTS_FILE))?;
    let layouts = load_layouts(project_dir)?;

    let writer = Writer {
        layouts: &layouts,
        config: &config,
        destination: output_dir,
    };

    let mut pages = Vec::new();
    writer.write_archives(&posts, &config.base_payload(), &mut pages)?;
    Ok(pages)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building the archives. Errors can be during
/// configuration loading, manifest loading, layout loading, or the
/// generation pass itself.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors loading the site configuration.
    Config(ConfigError),

    /// Returned for errors loading the post manifest.
    Post(PostError),

    /// Returned for errors loading layouts.
    Layout(LayoutError),

    /// Returned for errors rendering or writing archive pages.
    Write(WriteError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Config(err) => err.fmt(f),
            Error::Post(err) => err.fmt(f),
            Error::Layout(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            Error::Post(err) => Some(err),
            Error::Layout(err) => Some(err),
            Error::Write(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    /// Converts [`ConfigError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: ConfigError) -> Error {
        Error::Config(err)
    }
}

impl From<PostError> for Error {
    /// Converts [`PostError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: PostError) -> Error {
        Error::Post(err)
    }
}

impl From<LayoutError> for Error {
    /// Converts [`LayoutError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: LayoutError) -> Error {
        Error::Layout(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
