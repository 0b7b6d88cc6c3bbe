//! List-page helpers: page windows and free-text search.

/// Page window over `total` filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub page_count: usize,
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// Clamps `requested` into `1..=page_count`. A zero page size is
    /// treated as one row per page.
    pub fn new(total: usize, page_size: usize, requested: usize) -> Self {
        let page_size = page_size.max(1);
        let page_count = total.div_ceil(page_size).max(1);
        let page = requested.clamp(1, page_count);
        let start = ((page - 1) * page_size).min(total);
        let end = (start + page_size).min(total);
        Self {
            page,
            page_count,
            start,
            end,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// Rows of the requested page together with the clamped window.
pub fn paginate<T: Clone>(rows: &[T], page_size: usize, requested: usize) -> (Vec<T>, PageWindow) {
    let window = PageWindow::new(rows.len(), page_size, requested);
    (rows[window.start..window.end].to_vec(), window)
}

/// Implemented by rows that take part in the search box.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match of the trimmed term over any field.
pub fn matches_search(fields: &[&str], term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn filter_by_search<T: Searchable + Clone>(rows: &[T], term: &str) -> Vec<T> {
    if term.trim().is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| matches_search(&row.search_fields(), term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(&'static str, &'static str);

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.0, self.1]
        }
    }

    #[test]
    fn last_page_holds_remainder() {
        let rows: Vec<u32> = (0..23).collect();
        let (page, window) = paginate(&rows, 10, 3);
        assert_eq!(window.page_count, 3);
        assert_eq!(page, vec![20, 21, 22]);
    }

    #[test]
    fn last_page_is_full_when_total_is_a_multiple() {
        let rows: Vec<u32> = (0..20).collect();
        let (page, window) = paginate(&rows, 10, 2);
        assert_eq!(window.page_count, 2);
        assert_eq!(page.len(), 10);
        assert!(!window.has_next());
    }

    #[test]
    fn empty_input_has_one_empty_page() {
        let (page, window) = paginate::<u32>(&[], 10, 1);
        assert!(page.is_empty());
        assert_eq!(window.page_count, 1);
        assert_eq!(window.page, 1);
        assert!(window.is_empty());
    }

    #[test]
    fn requested_page_is_clamped() {
        assert_eq!(PageWindow::new(15, 10, 0).page, 1);
        assert_eq!(PageWindow::new(15, 10, 9).page, 2);
        assert_eq!(PageWindow::new(15, 10, 9).len(), 5);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let rows = vec![Row("Alice", "alice@example.com"), Row("Bob", "bob@corp.io")];
        assert_eq!(filter_by_search(&rows, "ALI"), vec![rows[0].clone()]);
        assert_eq!(filter_by_search(&rows, " corp "), vec![rows[1].clone()]);
        assert!(filter_by_search(&rows, "zed").is_empty());
    }

    #[test]
    fn blank_search_returns_rows_in_original_order() {
        let rows = vec![Row("b", ""), Row("a", "")];
        assert_eq!(filter_by_search(&rows, "   "), rows);
    }
}
