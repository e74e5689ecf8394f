//! Paging arithmetic for the board list.

/// Posts per page.
pub const PAGE_SIZE: i64 = 10;

/// Page links shown together in one group.
pub const PAGE_GROUP: i64 = 10;

/// Row offset of the first post on `page_num` (1-based).
pub fn start_row(page_num: i64) -> i64 {
    (clamp_page(page_num, PAGE_SIZE) - 1) * PAGE_SIZE
}

/// Clamp a requested page so that its row offset fits in an `i64`.
fn clamp_page(page_num: i64, page_size: i64) -> i64 {
    page_num.clamp(1, i64::MAX / page_size)
}

/// Page window for a list of `list_count` rows viewed at `current_page`.
///
/// With no rows the window is `start_page = 1`, `end_page = 0`,
/// `page_count = 0`, so callers render no page links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Requested page, clamped to `1..=i64::MAX / page_size`.
    pub current_page: i64,
    /// Total number of matching rows.
    pub list_count: i64,
    /// Number of pages, `ceil(list_count / page_size)`.
    pub page_count: i64,
    /// First page link of the current group.
    pub start_page: i64,
    /// Last page link of the current group, capped at `page_count`.
    pub end_page: i64,
    pub page_size: i64,
    pub page_group: i64,
}

impl PageWindow {
    /// Window using [`PAGE_SIZE`] and [`PAGE_GROUP`].
    pub fn new(page_num: i64, list_count: i64) -> Self {
        Self::with_sizes(page_num, list_count, PAGE_SIZE, PAGE_GROUP)
    }

    pub fn with_sizes(page_num: i64, list_count: i64, page_size: i64, page_group: i64) -> Self {
        let page_size = page_size.max(1);
        let page_group = page_group.max(1);
        let current_page = clamp_page(page_num, page_size);
        let list_count = list_count.max(0);

        let page_count = if list_count == 0 {
            0
        } else {
            (list_count - 1) / page_size + 1
        };
        let start_page = (current_page - 1) / page_group * page_group + 1;
        let end_page = start_page.saturating_add(page_group - 1).min(page_count);

        Self {
            current_page,
            list_count,
            page_count,
            start_page,
            end_page,
            page_size,
            page_group,
        }
    }

    /// Row offset of the current page.
    pub fn start_row(&self) -> i64 {
        (self.current_page - 1) * self.page_size
    }

    /// Whether a "previous group" link applies.
    pub fn has_prev_group(&self) -> bool {
        self.start_page > self.page_group
    }

    /// Whether a "next group" link applies.
    pub fn has_next_group(&self) -> bool {
        self.end_page < self.page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_row() {
        for page in 1..=50 {
            assert_eq!(start_row(page), (page - 1) * 10);
            assert_eq!(PageWindow::new(page, 1000).start_row(), (page - 1) * 10);
        }
    }

    #[test]
    fn test_page_count() {
        assert_eq!(PageWindow::new(1, 95).page_count, 10);
        assert_eq!(PageWindow::new(1, 100).page_count, 10);
        assert_eq!(PageWindow::new(1, 101).page_count, 11);
        assert_eq!(PageWindow::new(1, 1).page_count, 1);
    }

    #[test]
    fn test_group_start() {
        for page in 1..=10 {
            assert_eq!(PageWindow::new(page, 500).start_page, 1, "page {page}");
        }
        for page in 11..=20 {
            assert_eq!(PageWindow::new(page, 500).start_page, 11, "page {page}");
        }
        assert_eq!(PageWindow::new(21, 500).start_page, 21);
    }

    #[test]
    fn test_group_end_capped_by_page_count() {
        let window = PageWindow::new(11, 125);
        assert_eq!(window.page_count, 13);
        assert_eq!(window.start_page, 11);
        assert_eq!(window.end_page, 13);

        let window = PageWindow::new(3, 500);
        assert_eq!(window.end_page, 10);
    }

    #[test]
    fn test_empty_list() {
        let window = PageWindow::new(1, 0);
        assert_eq!(window.page_count, 0);
        assert_eq!(window.start_page, 1);
        assert_eq!(window.end_page, 0);
        assert_eq!(window.start_row(), 0);
        assert!(!window.has_next_group());
        assert!(!window.has_prev_group());
    }

    #[test]
    fn test_page_below_one_is_clamped() {
        let window = PageWindow::new(0, 30);
        assert_eq!(window.current_page, 1);
        assert_eq!(window.start_row(), 0);
        assert_eq!(PageWindow::new(-4, 30).current_page, 1);
        assert_eq!(start_row(0), 0);
    }

    #[test]
    fn test_page_past_the_end() {
        let window = PageWindow::new(25, 30);
        assert_eq!(window.page_count, 3);
        assert_eq!(window.start_page, 21);
        assert_eq!(window.end_page, 3);
        assert_eq!(window.start_row(), 240);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let window = PageWindow::new(i64::MAX, 3);
        assert_eq!(window.current_page, i64::MAX / PAGE_SIZE);
        assert_eq!(window.page_count, 1);
        assert_eq!(window.end_page, 1);
        assert!(window.start_page <= window.current_page);
        assert!(window.start_row() > 0);
        assert_eq!(start_row(i64::MAX), window.start_row());

        let window = PageWindow::with_sizes(i64::MAX, i64::MAX, 1, i64::MAX);
        assert_eq!(window.current_page, i64::MAX);
        assert_eq!(window.page_count, i64::MAX);
        assert_eq!(window.end_page, i64::MAX);
        assert_eq!(window.start_row(), i64::MAX - 1);
    }

    #[test]
    fn test_group_navigation() {
        let window = PageWindow::new(12, 300);
        assert!(window.has_prev_group());
        assert!(window.has_next_group());

        let window = PageWindow::new(2, 50);
        assert!(!window.has_prev_group());
        assert!(!window.has_next_group());
    }
}
