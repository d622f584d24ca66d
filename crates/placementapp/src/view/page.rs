//! Pagination, applied to an already filtered and sorted view.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, R> {
    pub rows: Vec<&'a R>,
    /// The page actually shown, after clamping
    pub page: usize,
    pub per_page: usize,
    /// Matching rows across all pages
    pub total: usize,
    pub page_count: usize,
}

impl<R> Page<'_, R> {
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Slice one page out of `rows`.
///
/// Page numbers below 1 show the first page and numbers past the end show the
/// last one. An empty view still has one (empty) page.
pub fn paginate<'a, R>(rows: Vec<&'a R>, request: PageRequest) -> Page<'a, R> {
    let per_page = request.per_page.max(1);
    let total = rows.len();
    let page_count = total.div_ceil(per_page).max(1);
    let page = request.page.clamp(1, page_count);

    let rows = rows
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Page {
        rows,
        page,
        per_page,
        total,
        page_count,
    }
}
