//! The archive page builder: turns one archive group into a sequence of
//! [`ArchivePage`] records, one per pagination page, each carrying its
//! output directory, title, description, and [`Pager`] state.

use crate::config::Config;
use crate::pager::Pager;
use crate::post::Post;
use gtmpl::Value;
use std::path::{Path, PathBuf};

/// English month names indexed by month number. Index 0 is a sentinel that
/// never appears for real data; callers index with 1..=12. Anything outside
/// that range is a caller bug, not a runtime condition, and panics.
pub const MONTHS: [&str; 13] = [
    "None",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Looks up the English name for a zero-padded month string (e.g., `"03"` →
/// `"March"`). The argument must be a numeric string in `01..=12`; it always
/// is when it comes from [`Post::month`] or an archive key.
pub fn month_name(month: &str) -> &'static str {
    // Panics on non-numeric or out-of-range input; see above.
    MONTHS[month.parse::<usize>().unwrap()]
}

/// One renderable archive page: the output artifact for a single
/// (group, page-number) pair. Created fresh during a generation pass,
/// rendered and written once, then discarded.
pub struct ArchivePage<'a> {
    /// The page's output directory, relative to the destination root. The
    /// written file is `<dir>/index.html`.
    pub dir: PathBuf,

    /// The group's 4-digit year string.
    pub year: String,

    /// The group's 2-digit month string.
    pub month: String,

    /// The page title, e.g. `Archive: 2012 » March`.
    pub title: String,

    /// The page meta-description, e.g. `Archive: 2012 03`. Note the numeric
    /// month where the title spells the name out; this mirrors the observed
    /// output and is deliberate.
    pub description: String,

    /// The pager state: page number, total pages, and this page's slice of
    /// the group's posts.
    pub pager: Pager<'a>,
}

impl ArchivePage<'_> {
    /// Converts an [`ArchivePage`] into the full template context for
    /// rendering: a [`Value::Object`] with the (already augmented) `site`
    /// payload alongside a `page` object carrying `year`, `month`, `title`,
    /// `description`, and `pager` fields.
    pub fn to_value(&self, site: &Value) -> Value {
        use std::collections::HashMap;

        let mut page: HashMap<String, Value> = HashMap::new();
        page.insert("year".to_owned(), (&self.year).into());
        page.insert("month".to_owned(), (&self.month).into());
        page.insert("title".to_owned(), (&self.title).into());
        page.insert("description".to_owned(), (&self.description).into());
        page.insert("pager".to_owned(), self.pager.to_value());

        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("page".to_owned(), Value::Object(page));
        if let Value::Object(payload) = site {
            for (key, value) in payload {
                m.insert(key.clone(), value.clone());
            }
        }
        Value::Object(m)
    }
}

/// Builds the [`ArchivePage`]s for one archive group. `posts` must be the
/// group's most-recent-first post list as produced by
/// [`crate::archive::group_posts`]. Page 1 lives at
/// `<archive_dir>/<year>/<month>`; page N>1 lives at
/// `<archive_dir>/<year>/<month>/page/<N>`.
pub fn build_pages<'a>(
    year: &str,
    month: &str,
    posts: &'a [&'a Post],
    config: &Config,
) -> Vec<ArchivePage<'a>> {
    let group_dir = Path::new(&config.archive_dir).join(year).join(month);
    let title = format!(
        "{}{} » {}",
        config.archive_title_prefix,
        year,
        month_name(month),
    );
    let description = format!(
        "{}{} {}",
        config.archive_meta_description_prefix, year, month,
    );

    Pager::paginate(posts, config.paginate)
        .into_iter()
        .map(|pager| ArchivePage {
            dir: match pager.page {
                1 => group_dir.clone(),
                n => group_dir.join("page").join(n.to_string()),
            },
            year: year.to_owned(),
            month: month.to_owned(),
            title: title.clone(),
            description: description.clone(),
            pager,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::Path;
    use url::Url;

    #[test]
    fn test_month_name() {
        assert_eq!("January", month_name("01"));
        assert_eq!("March", month_name("03"));
        assert_eq!("December", month_name("12"));
    }

    #[test]
    fn test_title() {
        let (posts, config) = fixture(1);
        let refs: Vec<&Post> = posts.iter().collect();
        let pages = build_pages("2012", "03", &refs, &config);
        assert_eq!("Archive: 2012 » March", pages[0].title);
    }

    #[test]
    fn test_description_keeps_numeric_month() {
        let (posts, config) = fixture(1);
        let refs: Vec<&Post> = posts.iter().collect();
        let pages = build_pages("2012", "03", &refs, &config);
        assert_eq!("Archive: 2012 03", pages[0].description);
    }

    #[test]
    fn test_configured_prefixes() {
        let (posts, mut config) = fixture(1);
        config.archive_title_prefix = "The Vault: ".to_owned();
        config.archive_meta_description_prefix = "Vault ".to_owned();
        let refs: Vec<&Post> = posts.iter().collect();
        let pages = build_pages("2012", "03", &refs, &config);
        assert_eq!("The Vault: 2012 » March", pages[0].title);
        assert_eq!("Vault 2012 03", pages[0].description);
    }

    #[test]
    fn test_output_directories() {
        let (posts, mut config) = fixture(5);
        config.paginate = 2;
        let refs: Vec<&Post> = posts.iter().collect();
        let pages = build_pages("2012", "03", &refs, &config);

        assert_eq!(3, pages.len());
        assert_eq!(Path::new("archives/2012/03"), pages[0].dir);
        assert_eq!(Path::new("archives/2012/03/page/2"), pages[1].dir);
        assert_eq!(Path::new("archives/2012/03/page/3"), pages[2].dir);
    }

    #[test]
    fn test_unpaginated_single_page() {
        let (posts, config) = fixture(5);
        let refs: Vec<&Post> = posts.iter().collect();
        let pages = build_pages("2012", "03", &refs, &config);

        assert_eq!(1, pages.len());
        assert_eq!(5, pages[0].pager.posts.len());
        assert_eq!(Path::new("archives/2012/03"), pages[0].dir);
    }

    #[test]
    fn test_to_value_merges_site_payload() {
        use std::collections::HashMap;

        let (posts, config) = fixture(1);
        let refs: Vec<&Post> = posts.iter().collect();
        let pages = build_pages("2012", "03", &refs, &config);

        let mut payload: HashMap<String, Value> = HashMap::new();
        payload.insert("site".to_owned(), Value::String("marker".to_owned()));
        let value = pages[0].to_value(&Value::Object(payload));

        match value {
            Value::Object(m) => {
                assert_eq!(Some(&Value::String("marker".to_owned())), m.get("site"));
                assert!(m.contains_key("page"));
            }
            v => panic!("expected an object, got {:?}", v),
        }
    }

    fn fixture(n: usize) -> (Vec<Post>, Config) {
        let posts = (0..n)
            .map(|i| {
                Post::new(
                    &format!("post-{}", i),
                    Url::parse("https://example.org/posts/test.html").unwrap(),
                    &format!("2012-03-{:02}", i + 1),
                )
                .unwrap()
            })
            .collect();
        (posts, Config::default())
    }
}
