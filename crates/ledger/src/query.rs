//! Read-side query types for the transaction log.
//!
//! All history reads are filtered and paginated; results are ordered by
//! `created_at` descending (most recent first) for audit display.

use serde::{Deserialize, Serialize};

use morpankh_core::{ProductId, StockChannel, VariantId};

use crate::transaction::StockTransaction;

/// Pagination parameters for log queries (1-based pages).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
        }
    }
}

impl Pagination {
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(50).clamp(1, 500),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }
}

/// Filter criteria for log queries. Empty filter matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub product_id: Option<ProductId>,
    pub variant_id: Option<VariantId>,
    pub channel: Option<StockChannel>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &StockTransaction) -> bool {
        if let Some(product_id) = self.product_id {
            if tx.product_id != product_id {
                return false;
            }
        }
        if let Some(variant_id) = self.variant_id {
            if tx.variant_id != Some(variant_id) {
                return false;
            }
        }
        if let Some(channel) = self.channel {
            if tx.channel != channel {
                return false;
            }
        }
        true
    }
}

/// One page of transaction history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionPage {
    /// Transactions on this page, most recent first.
    pub transactions: Vec<StockTransaction>,
    /// Total matching transactions across all pages.
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    /// Number of pages needed for `total` at `page_size`.
    pub page_count: u32,
}

impl TransactionPage {
    pub fn new(transactions: Vec<StockTransaction>, total: u64, pagination: Pagination) -> Self {
        let page_count = total.div_ceil(pagination.page_size as u64) as u32;
        Self {
            transactions,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            page_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_caps() {
        let p = Pagination::new(None, None);
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, 50);

        let p = Pagination::new(Some(0), Some(10_000));
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, 500);
    }

    #[test]
    fn page_count_rounds_up() {
        let page = TransactionPage::new(vec![], 101, Pagination::new(Some(1), Some(50)));
        assert_eq!(page.page_count, 3);

        let page = TransactionPage::new(vec![], 0, Pagination::default());
        assert_eq!(page.page_count, 0);
    }
}
