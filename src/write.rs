//! The archive generation pass: checks the layout precondition, builds the
//! month table, augments the site payload, and renders and writes every
//! archive page. The pass is a single synchronous sweep; the first error
//! aborts it, and re-running after fixing the cause is the only recovery.

use crate::archive;
use crate::config::Config;
use crate::page::{self, ArchivePage};
use crate::payload;
use crate::post::Post;
use gtmpl::{Template, Value};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// The name of the layout every archive page renders with. Its absence
/// aborts the pass before anything is written.
pub const ARCHIVE_LAYOUT: &str = "archive_index";

/// The file name written inside every archive page directory.
const INDEX_FILE: &str = "index.html";

/// Responsible for rendering and writing archive pages to disk from the
/// site's [`Post`] list.
pub struct Writer<'a> {
    /// The site's named layouts. Must contain [`ARCHIVE_LAYOUT`].
    pub layouts: &'a HashMap<String, Template>,

    /// The resolved site configuration.
    pub config: &'a Config,

    /// The destination root directory. Pages land at
    /// `{destination}/{archive_dir}/{year}/{month}/...`.
    pub destination: &'a Path,
}

impl Writer<'_> {
    /// Runs the generation pass: for every (year, month) group, builds its
    /// [`ArchivePage`]s, renders each against the archive-augmented
    /// `payload`, and writes it under the destination root. Every written
    /// file's path is appended to `pages`, the site's page collection, so a
    /// later cleanup sweep knows the file belongs to the build.
    ///
    /// Groups are visited in chronological key order and pages in page-number
    /// order, so two passes over identical input produce identical output
    /// sets.
    pub fn write_archives(
        &self,
        posts: &[Post],
        payload: &Value,
        pages: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let layout = self.layouts.get(ARCHIVE_LAYOUT).ok_or(Error::MissingLayout)?;

        let groups = archive::group_posts(posts);
        let counts = archive::count_posts(posts);
        let payload = payload::augment(payload, &counts);

        for (key, group) in &groups {
            for archive_page in
                page::build_pages(&key.year, &key.month, group, self.config)
            {
                let rendered = render_page(layout, &archive_page, &payload)?;
                let dir = self.destination.join(&archive_page.dir);
                std::fs::create_dir_all(&dir)?;
                let file_path = dir.join(INDEX_FILE);
                std::fs::write(&file_path, &rendered)?;
                pages.push(file_path);
            }
        }
        Ok(())
    }
}

/// Renders a single [`ArchivePage`] against the (already augmented) site
/// payload, returning the output bytes.
pub fn render_page(
    layout: &Template,
    page: &ArchivePage,
    payload: &Value,
) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::new();
    layout
        .execute(&mut out, &gtmpl::Context::from(page.to_value(payload)))
        .map_err(|e| Error::Template(e.to_string()))?;
    Ok(out)
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in the archive generation pass.
#[derive(Debug)]
pub enum Error {
    /// Returned when the required `archive_index` layout doesn't exist. The
    /// pass writes nothing in this case.
    MissingLayout,

    /// An error during templating.
    Template(String),

    /// An error writing the output files.
    Io(io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingLayout => {
                write!(f, "No '{}' layout found", ARCHIVE_LAYOUT)
            }
            Error::Template(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingLayout => None,
            Error::Template(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`].
    /// This allows us to use the `?` operator for fallible template
    /// operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use
    /// the `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::layout::parse_layout_str;
    use url::Url;

    #[test]
    fn test_missing_layout_is_fatal() {
        let layouts = HashMap::new();
        let config = Config::default();
        let writer = Writer {
            layouts: &layouts,
            config: &config,
            destination: Path::new("/nonexistent"),
        };
        let mut pages = Vec::new();
        match writer.write_archives(&[], &Value::Nil, &mut pages) {
            Err(Error::MissingLayout) => (),
            other => panic!("expected MissingLayout, got {:?}", other.err()),
        }
        assert!(pages.is_empty());
    }

    #[test]
    fn test_render_page() -> Result<()> {
        let layout = parse_layout_str(
            "<h1>{{ .page.title }}</h1><p>{{ .page.description }}</p>",
        )
        .map_err(|e| Error::Template(e.to_string()))?;
        let posts = fixture_posts(1);
        let refs: Vec<&Post> = posts.iter().collect();
        let pages =
            crate::page::build_pages("2012", "03", &refs, &Config::default());

        let rendered = render_page(&layout, &pages[0], &Value::Nil)?;
        assert_eq!(
            "<h1>Archive: 2012 » March</h1><p>Archive: 2012 03</p>",
            String::from_utf8(rendered).unwrap(),
        );
        Ok(())
    }

    #[test]
    fn test_write_archives_layout_and_registration() -> Result<()> {
        let mut layouts = HashMap::new();
        layouts.insert(
            ARCHIVE_LAYOUT.to_owned(),
            parse_layout_str("{{ .page.title }} (page {{ .page.pager.page }})")
                .map_err(|e| Error::Template(e.to_string()))?,
        );
        let mut config = Config::default();
        config.paginate = 2;

        let destination =
            std::env::temp_dir().join(format!("arkiv-write-test-{}", std::process::id()));
        let writer = Writer {
            layouts: &layouts,
            config: &config,
            destination: &destination,
        };

        let posts = fixture_posts(3);
        let mut pages = Vec::new();
        writer.write_archives(&posts, &Value::Nil, &mut pages)?;

        assert_eq!(
            vec![
                destination.join("archives/2012/03/index.html"),
                destination.join("archives/2012/03/page/2/index.html"),
            ],
            pages,
        );
        let first = std::fs::read_to_string(&pages[0])?;
        assert_eq!("Archive: 2012 » March (page 1)", first);
        let second = std::fs::read_to_string(&pages[1])?;
        assert_eq!("Archive: 2012 » March (page 2)", second);

        // A second pass over identical input reproduces the same bytes.
        let mut pages_again = Vec::new();
        writer.write_archives(&posts, &Value::Nil, &mut pages_again)?;
        assert_eq!(pages, pages_again);
        assert_eq!(first, std::fs::read_to_string(&pages_again[0])?);

        std::fs::remove_dir_all(&destination)?;
        Ok(())
    }

    fn fixture_posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                Post::new(
                    &format!("post-{}", i),
                    Url::parse("https://example.org/posts/test.html").unwrap(),
                    &format!("2012-03-{:02}", i + 1),
                )
                .unwrap()
            })
            .collect()
    }
}
