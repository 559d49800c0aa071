use std::ops::Range;

use serde::Serialize;

/// The slice of a filtered collection shown on one table page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub total_items: usize,
    pub per_page: usize,
    /// `ceil(total_items / per_page)`; zero for an empty collection.
    pub total_pages: usize,
    /// 1-based, always within `1..=max(total_pages, 1)`.
    pub current_page: usize,
    pub start: usize,
    pub end: usize,
}

/// An entry of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Gap,
}

impl PageWindow {
    /// Never fails: a `per_page` of zero is treated as one and the
    /// requested page is clamped into range.
    pub fn compute(total_items: usize, per_page: usize, requested_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_items.div_ceil(per_page);
        let current_page = requested_page.clamp(1, total_pages.max(1));
        let start = ((current_page - 1) * per_page).min(total_items);
        let end = (start + per_page).min(total_items);
        Self {
            total_items,
            per_page,
            total_pages,
            current_page,
            start,
            end,
        }
    }

    /// A single page holding everything.
    pub fn unpaginated(total_items: usize) -> Self {
        Self::compute(total_items, total_items, 1)
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        let start = self.start.min(end);
        &items[start..end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page buttons around the current page, always including the first and
    /// last page. A gap that would hide a single page shows that page instead.
    pub fn page_links(&self, siblings: usize) -> Vec<PageLink> {
        if self.total_pages == 0 {
            return Vec::new();
        }
        let low = self.current_page.saturating_sub(siblings).max(1);
        let high = self.current_page.saturating_add(siblings).min(self.total_pages);

        let mut pages = vec![1];
        pages.extend(low..=high);
        pages.push(self.total_pages);
        pages.sort_unstable();
        pages.dedup();

        let mut links = Vec::with_capacity(pages.len() + 2);
        let mut previous = 0;
        for page in pages {
            match page - previous {
                1 => {}
                2 => links.push(PageLink::Page(previous + 1)),
                _ if previous > 0 => links.push(PageLink::Gap),
                _ => {}
            }
            links.push(PageLink::Page(page));
            previous = page;
        }
        links
    }
}
