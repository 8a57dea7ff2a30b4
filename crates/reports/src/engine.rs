//! Generic `filter → sort → paginate` pipeline.

use std::cmp::Ordering;

/// Page sizes offered by every tabular view.
pub const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];

/// How a table searches and orders its rows.
///
/// Implementations supply the searchable text fields and the full comparator
/// chain (primary key plus tie-breakers). The pipeline itself never inspects
/// row contents.
pub trait TableSpec {
    type Row;

    /// Text fields matched by the search term. A row matches when the term
    /// is empty or any field contains it, case-insensitively.
    fn search_text<'a>(&self, row: &'a Self::Row) -> Vec<&'a str>;

    /// Total order over rows: primary sort key, then tie-breakers.
    fn compare(&self, a: &Self::Row, b: &Self::Row) -> Ordering;
}

/// One evaluation of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    pub search: String,
    /// 1-indexed; clamped into `[1, total_pages]` during evaluation.
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: PAGE_SIZES[0],
        }
    }
}

/// Pipeline output: the rows of one page plus the totals the pager needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage<R> {
    pub rows: Vec<R>,
    /// The page actually served (after clamping).
    pub page: usize,
    pub total_pages: usize,
    /// Row count after filtering, before pagination.
    pub total_count: usize,
}

fn matches_search(term: &str, fields: &[&str]) -> bool {
    if term.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}

/// Run the pipeline over `rows` with the given `spec` and `query`.
///
/// The sort is stable, so rows the comparator considers equal keep their
/// input order. `total_pages` is at least 1 even for an empty result, and
/// the requested page is clamped rather than rejected.
pub fn run<S: TableSpec>(spec: &S, rows: &[S::Row], query: &TableQuery) -> TablePage<S::Row>
where
    S::Row: Clone,
{
    let term = query.search.trim().to_lowercase();

    let mut filtered: Vec<S::Row> = rows
        .iter()
        .filter(|row| matches_search(&term, &spec.search_text(row)))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| spec.compare(a, b));

    let total_count = filtered.len();
    let page_size = query.page_size.max(1);
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let rows = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    TablePage {
        rows,
        page,
        total_pages,
        total_count,
    }
}

/// Search + pagination state of one tabular view.
///
/// Encodes the navigation rules every table shares: changing the search term
/// or the page size snaps back to page 1; shrinking totals clamp the current
/// page down; the page never leaves `[1, total_pages]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    search: String,
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: PAGE_SIZES[0],
        }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search {
            self.search = term;
            self.page = 1;
        }
    }

    /// Switch page size. Sizes outside [`PAGE_SIZES`] are ignored.
    pub fn set_page_size(&mut self, size: usize) {
        if !PAGE_SIZES.contains(&size) {
            tracing::warn!(size, "ignoring page size outside the offered set");
            return;
        }
        if size != self.page_size {
            self.page_size = size;
            self.page = 1;
        }
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn query(&self) -> TableQuery {
        TableQuery {
            search: self.search.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Evaluate the pipeline and adopt the clamped page it served.
    pub fn apply<S: TableSpec>(&mut self, spec: &S, rows: &[S::Row]) -> TablePage<S::Row>
    where
        S::Row: Clone,
    {
        let page = run(spec, rows, &self.query());
        self.page = page.page;
        page
    }
}
