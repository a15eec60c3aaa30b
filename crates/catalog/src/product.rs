//! Catalog identity records.

use serde::{Deserialize, Serialize};

use morpankh_core::{LedgerError, ProductId, VariantId};

/// A sellable product.
///
/// `barcode` is the product-level code used when the product has no variants
/// (or for its base stock pool).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub barcode: Option<String>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>) -> Result<Self, LedgerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::validation("product name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            barcode: None,
        })
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }
}

/// A concrete variant of a product (e.g. one colour/length combination).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub product_id: ProductId,
    /// Human-assigned short code, unique within the catalog (e.g. "MS-RED-6M").
    pub variant_code: String,
    pub barcode: Option<String>,
}

impl Variant {
    pub fn new(
        id: VariantId,
        product_id: ProductId,
        variant_code: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        let variant_code = variant_code.into();
        if variant_code.trim().is_empty() {
            return Err(LedgerError::validation("variant_code cannot be empty"));
        }
        Ok(Self {
            id,
            product_id,
            variant_code,
            barcode: None,
        })
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_rejects_blank_name() {
        let err = Product::new(ProductId::new(), "   ").unwrap_err();
        match err {
            LedgerError::Validation(_) => {}
            _ => panic!("expected Validation error"),
        }
    }

    #[test]
    fn variant_rejects_blank_code() {
        let err = Variant::new(VariantId::new(), ProductId::new(), "").unwrap_err();
        match err {
            LedgerError::Validation(_) => {}
            _ => panic!("expected Validation error"),
        }
    }
}
