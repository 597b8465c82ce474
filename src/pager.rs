//! Pagination: the page-count calculation and the [`Pager`] record attached
//! to every archive page (page number, total pages, post slice, and the
//! previous/next page numbers implied by pager state).

use crate::post::Post;
use gtmpl::Value;

/// Returns the number of pages needed to hold `total` items at `page_size`
/// items per page. A `page_size` of zero means "unpaginated": everything on
/// a single page.
pub fn calculate_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    match total % page_size {
        0 => total / page_size,
        _ => total / page_size + 1,
    }
}

/// The pager state for one archive page: a 1-based page number, the group's
/// total page count, and this page's slice of the group's posts. Pagers are
/// built once per (group, page-number) pair during a generation pass and
/// discarded after the page is written.
pub struct Pager<'a> {
    /// This page's 1-based number.
    pub page: usize,

    /// The total number of pages in this pager's group.
    pub total_pages: usize,

    /// The slice of the group's posts belonging to this page. Every page
    /// holds exactly `page_size` posts except the last, which may hold
    /// fewer.
    pub posts: &'a [&'a Post],

    /// The previous page's number, if this isn't the first page.
    pub previous_page: Option<usize>,

    /// The next page's number, if this isn't the last page.
    pub next_page: Option<usize>,
}

impl<'a> Pager<'a> {
    /// Splits a group's posts into per-page [`Pager`]s. `page_size == 0`
    /// yields a single pager holding every post. The slice order is
    /// preserved as-is; the group was already put in most-recent-first order
    /// at group-build time.
    pub fn paginate(posts: &'a [&'a Post], page_size: usize) -> Vec<Pager<'a>> {
        let total_pages = calculate_pages(posts.len(), page_size);
        let chunk_size = match page_size {
            0 => posts.len().max(1),
            n => n,
        };

        posts
            .chunks(chunk_size)
            .enumerate()
            .map(|(i, chunk)| {
                let page = i + 1;
                Pager {
                    page,
                    total_pages,
                    posts: chunk,
                    previous_page: match page {
                        1 => None,
                        _ => Some(page - 1),
                    },
                    next_page: match page < total_pages {
                        true => Some(page + 1),
                        false => None,
                    },
                }
            })
            .collect()
    }

    /// Converts a [`Pager`] into a [`Value`] for templating. The result is a
    /// [`Value::Object`] with `page`, `total_pages`, `posts`,
    /// `previous_page`, and `next_page` fields; the page-number options
    /// become [`Value::Nil`] at the ends of the group.
    pub fn to_value(&self) -> Value {
        use std::collections::HashMap;

        let option_to_value = |opt: Option<usize>| match opt {
            Some(n) => Value::from(n as u64),
            None => Value::Nil,
        };

        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("page".to_owned(), Value::from(self.page as u64));
        m.insert(
            "total_pages".to_owned(),
            Value::from(self.total_pages as u64),
        );
        m.insert(
            "posts".to_owned(),
            Value::Array(self.posts.iter().map(|p| p.to_value()).collect()),
        );
        m.insert(
            "previous_page".to_owned(),
            option_to_value(self.previous_page),
        );
        m.insert("next_page".to_owned(), option_to_value(self.next_page));
        Value::Object(m)
    }
}
