//! 메모리 접속 필터 테이블.

use std::sync::{PoisonError, RwLock};

use crate::application::ports::FilterTable;
use crate::domain::filter::{FilterFlags, ServFilter};

#[derive(Default)]
pub struct FilterRegistry {
    filters: RwLock<Vec<ServFilter>>,
}

impl FilterRegistry {
    pub fn new(filters: Vec<ServFilter>) -> Self {
        Self {
            filters: RwLock::new(filters),
        }
    }
}

impl FilterTable for FilterRegistry {
    fn snapshot(&self) -> Vec<ServFilter> {
        self.filters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn ban(&self, pattern: &str) -> ServFilter {
        let mut filters = self.filters.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = filters.iter_mut().find(|f| f.pattern == pattern) {
            existing.flags |= FilterFlags::BAN;
            return existing.clone();
        }

        let filter = ServFilter {
            pattern: pattern.to_string(),
            flags: FilterFlags::BAN,
        };
        filters.push(filter.clone());
        filter
    }
}
