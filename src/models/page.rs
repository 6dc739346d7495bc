use serde::{Deserialize, Serialize};

/// Number of results the server puts on one page.
pub const PAGE_SIZE: u64 = 20;

/// A paginated list response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn total_pages(&self) -> u64 {
        self.count.div_ceil(PAGE_SIZE)
    }
}
