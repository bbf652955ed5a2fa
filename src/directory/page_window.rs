/// Number of contacts fetched per page.
pub const PAGE_SIZE: u32 = 10;

/// The `(offset, limit)` slice of the remote contact collection being
/// viewed. The offset only moves in whole pages, so it always stays a
/// non-negative multiple of `PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageWindow {
    page: u32,
}

impl PageWindow {
    pub fn new() -> Self {
        Self { page: 0 }
    }

    pub fn at_page(page: u32) -> Self {
        Self { page }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn offset(&self) -> u32 {
        self.page * PAGE_SIZE
    }

    pub fn limit(&self) -> u32 {
        PAGE_SIZE
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// A short page means the collection ends here.
    pub fn has_next(&self, fetched: usize) -> bool {
        fetched >= PAGE_SIZE as usize
    }

    pub fn next(&mut self, fetched: usize) -> bool {
        if !self.has_next(fetched) {
            return false;
        }
        self.page += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }
}
