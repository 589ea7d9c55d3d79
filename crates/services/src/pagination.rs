use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Page size must be greater than zero")]
    ZeroPageSize,
    #[error("Page size {0} is not one of the configured options")]
    UnsupportedPageSize(u64),
    #[error("Page {0} is out of range")]
    PageOutOfRange(u64),
}

/// Number of pages needed for `total_items`; zero for an empty collection.
pub fn page_count(total_items: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Zero-based page to fetch from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// Inclusive row range, or `None` when it does not fit in a `u64`.
    pub fn checked_rows(&self) -> Option<(u64, u64)> {
        let start = self.page.checked_mul(self.size)?;
        let end = start.checked_add(self.size.saturating_sub(1))?;
        Some((start, end))
    }

    /// Inclusive row range covered by this page, saturating at `u64::MAX`.
    pub fn rows(&self) -> (u64, u64) {
        let start = self.offset();
        (start, start.saturating_add(self.size.saturating_sub(1)))
    }

    /// Value of the API's `range` query parameter, e.g. `[10,19]`.
    pub fn range_param(&self) -> String {
        let (start, end) = self.rows();
        format!("[{start},{end}]")
    }
}

/// Page/size/total bookkeeping for a list screen.
///
/// Navigation methods return the request the owner must fetch, or `None`
/// when the move is a no-op. After each fetch the owner reports the fresh
/// total through [`PaginationController::set_total_items`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationController {
    current_page: u64,
    page_size: u64,
    total_items: u64,
    page_size_options: Vec<u64>,
}

impl PaginationController {
    pub fn new(page_size: u64) -> Result<Self, PaginationError> {
        Self::with_options(page_size, &[])
    }

    /// Restricts page sizes to `options`; an empty list allows any size.
    pub fn with_options(page_size: u64, options: &[u64]) -> Result<Self, PaginationError> {
        check_page_size(page_size, options)?;
        Ok(Self {
            current_page: 0,
            page_size,
            total_items: 0,
            page_size_options: options.to_vec(),
        })
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn page_size_options(&self) -> &[u64] {
        &self.page_size_options
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn total_pages(&self) -> u64 {
        page_count(self.total_items, self.page_size)
    }

    pub fn set_total_items(&mut self, total_items: u64) {
        self.total_items = total_items;
    }

    pub fn request(&self) -> PageRequest {
        PageRequest {
            page: self.current_page,
            size: self.page_size,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages()
    }

    pub fn first_page(&mut self) -> PageRequest {
        self.current_page = 0;
        self.request()
    }

    pub fn previous_page(&mut self) -> Option<PageRequest> {
        if !self.has_previous() {
            return None;
        }
        self.current_page -= 1;
        Some(self.request())
    }

    pub fn next_page(&mut self) -> Option<PageRequest> {
        if !self.has_next() {
            return None;
        }
        self.current_page += 1;
        Some(self.request())
    }

    pub fn last_page(&mut self) -> PageRequest {
        self.current_page = self.total_pages().saturating_sub(1);
        self.request()
    }

    /// Moves to an arbitrary page, e.g. one restored from a URL. The page is
    /// not clamped to the total, which may not be known yet, but its rows must
    /// be addressable.
    pub fn jump_to(&mut self, page: u64) -> Result<PageRequest, PaginationError> {
        let request = PageRequest {
            page,
            size: self.page_size,
        };
        if request.checked_rows().is_none() {
            return Err(PaginationError::PageOutOfRange(page));
        }
        self.current_page = page;
        Ok(request)
    }

    pub fn change_page_size(&mut self, page_size: u64) -> Result<PageRequest, PaginationError> {
        check_page_size(page_size, &self.page_size_options)?;
        self.page_size = page_size;
        self.current_page = 0;
        Ok(self.request())
    }

    /// `"11 - 20 de 23"`.
    pub fn range_label(&self) -> String {
        if self.total_items == 0 {
            return "0 - 0 de 0".to_string();
        }
        let (start, end) = self.request().rows();
        format!(
            "{} - {} de {}",
            start + 1,
            (end + 1).min(self.total_items),
            self.total_items
        )
    }

    /// `"Página 2 de 3"`.
    pub fn page_label(&self) -> String {
        format!("Página {} de {}", self.current_page + 1, self.total_pages())
    }
}

fn check_page_size(page_size: u64, options: &[u64]) -> Result<(), PaginationError> {
    if page_size == 0 {
        return Err(PaginationError::ZeroPageSize);
    }
    if !options.is_empty() && !options.contains(&page_size) {
        return Err(PaginationError::UnsupportedPageSize(page_size));
    }
    Ok(())
}
