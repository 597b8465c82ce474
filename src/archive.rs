//! The month table: groups the site's posts by publish year and month and
//! builds the parallel count table consumed by the navigation formatters
//! ([`crate::filters`]) and the payload overlay ([`crate::payload`]).

use crate::post::Post;
use std::collections::BTreeMap;
use std::fmt;

/// The key for one archive group: a (year, month) pair, both as the
/// zero-padded strings derived on [`Post`]. Because both segments are
/// fixed-width, the derived lexicographic [`Ord`] is also chronological
/// order, so a [`BTreeMap`] keyed by [`Key`] iterates groups
/// oldest-to-newest.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Key {
    pub year: String,
    pub month: String,
}

impl Key {
    /// Constructs the [`Key`] for a given [`Post`] from its derived `year`
    /// and `month` fields. Every post maps to exactly one key.
    pub fn for_post(post: &Post) -> Key {
        Key {
            year: post.year.clone(),
            month: post.month.clone(),
        }
    }
}

impl fmt::Display for Key {
    /// Renders a [`Key`] in its `year/month` form (e.g., `2012/03`), the
    /// shape used for count-table keys and archive link paths.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.year, self.month)
    }
}

/// Groups posts by (year, month). Posts are appended in input order and each
/// group is reversed exactly once after the single pass, so when the input is
/// the site's chronological post list, every group comes out
/// most-recent-first. The reversal happens here, at group-finalization, and
/// nowhere else; consumers must not reorder the group.
pub fn group_posts(posts: &[Post]) -> BTreeMap<Key, Vec<&Post>> {
    let mut groups: BTreeMap<Key, Vec<&Post>> = BTreeMap::new();
    for post in posts {
        groups.entry(Key::for_post(post)).or_default().push(post);
    }
    for group in groups.values_mut() {
        group.reverse();
    }
    groups
}

/// Builds the archive count table: a mapping from `"year/month"` to the
/// number of posts published that month. Built once per generation pass and
/// handed to templates as `site.archives`.
pub fn count_posts(posts: &[Post]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for post in posts {
        *counts.entry(Key::for_post(post).to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod test {
    use super::*;
    use url::Url;

    #[test]
    fn test_every_post_in_exactly_one_group() {
        let posts = fixture_posts();
        let groups = group_posts(&posts);
        let total: usize = groups.values().map(|g| g.len()).sum();
        assert_eq!(posts.len(), total);
        for (key, group) in &groups {
            for post in group {
                assert_eq!(key.year, post.year);
                assert_eq!(key.month, post.month);
            }
        }
    }

    #[test]
    fn test_groups_are_reverse_chronological() {
        let posts = fixture_posts();
        let groups = group_posts(&posts);
        let march = &groups[&Key {
            year: "2012".to_owned(),
            month: "03".to_owned(),
        }];
        let dates: Vec<String> = march
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(vec!["2012-03-20", "2012-03-05", "2012-03-01"], dates);
    }

    #[test]
    fn test_group_iteration_is_chronological() {
        let posts = fixture_posts();
        let groups = group_posts(&posts);
        let keys: Vec<String> = groups.keys().map(Key::to_string).collect();
        assert_eq!(vec!["2011/12", "2012/03", "2012/04"], keys);
    }

    #[test]
    fn test_count_posts() {
        let counts = count_posts(&fixture_posts());
        assert_eq!(Some(&3), counts.get("2012/03"));
        assert_eq!(Some(&1), counts.get("2012/04"));
        assert_eq!(Some(&1), counts.get("2011/12"));
        assert_eq!(3, counts.len());
    }

    #[test]
    fn test_empty_post_list() {
        assert!(group_posts(&[]).is_empty());
        assert!(count_posts(&[]).is_empty());
    }

    // Chronological (site-iteration order) fixture spanning three months.
    fn fixture_posts() -> Vec<Post> {
        vec![
            fixture_post("2011-12-25"),
            fixture_post("2012-03-01"),
            fixture_post("2012-03-05"),
            fixture_post("2012-03-20"),
            fixture_post("2012-04-02"),
        ]
    }

    fn fixture_post(date: &str) -> Post {
        Post::new(
            date,
            Url::parse("https://example.org/posts/test.html").unwrap(),
            date,
        )
        .unwrap()
    }
}
