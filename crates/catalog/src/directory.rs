//! Target resolution: ids, barcodes, and variant codes to a canonical key.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use morpankh_core::{LedgerError, LedgerResult, ProductId, VariantId};

use crate::product::{Product, Variant};

/// How a caller names the product/variant a transaction applies to.
///
/// Scanning stations usually send a barcode; the admin panel sends explicit
/// ids; bulk imports use the variant code. All three funnel through
/// [`ProductDirectory::resolve`] before the ledger touches any stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionTarget {
    Ids {
        product_id: ProductId,
        variant_id: Option<VariantId>,
    },
    Barcode(String),
    VariantCode(String),
}

/// Canonical resolution result: the pair the ledger keys stock on.
///
/// `variant_id = None` means the product's base stock pool.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedTarget {
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
}

/// Read-only view the ledger needs from the catalog.
///
/// Production backs this with the real product store; tests use
/// [`InMemoryProductDirectory`].
pub trait ProductDirectory: Send + Sync {
    /// Resolve a caller-supplied target to a canonical `(product, variant)` pair.
    ///
    /// Fails with `NotFound` when the product/variant/barcode/code is unknown,
    /// or when an explicit `variant_id` does not belong to the named product.
    fn resolve(&self, target: &TransactionTarget) -> LedgerResult<ResolvedTarget>;
}

impl<D> ProductDirectory for Arc<D>
where
    D: ProductDirectory + ?Sized,
{
    fn resolve(&self, target: &TransactionTarget) -> LedgerResult<ResolvedTarget> {
        (**self).resolve(target)
    }
}

/// In-memory catalog directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductDirectory {
    inner: RwLock<DirectoryState>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    products: HashMap<ProductId, Product>,
    variants: HashMap<VariantId, Variant>,
    barcodes: HashMap<String, ResolvedTarget>,
    variant_codes: HashMap<String, VariantId>,
}

impl InMemoryProductDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_product(&self, product: Product) -> LedgerResult<()> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LedgerError::storage("directory lock poisoned"))?;

        if let Some(barcode) = &product.barcode {
            if state.barcodes.contains_key(barcode) {
                return Err(LedgerError::validation(format!(
                    "barcode '{barcode}' already registered"
                )));
            }
            state.barcodes.insert(
                barcode.clone(),
                ResolvedTarget {
                    product_id: product.id,
                    variant_id: None,
                },
            );
        }

        state.products.insert(product.id, product);
        Ok(())
    }

    pub fn insert_variant(&self, variant: Variant) -> LedgerResult<()> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LedgerError::storage("directory lock poisoned"))?;

        if !state.products.contains_key(&variant.product_id) {
            return Err(LedgerError::not_found(format!(
                "product {} for variant {}",
                variant.product_id, variant.id
            )));
        }
        if state.variant_codes.contains_key(&variant.variant_code) {
            return Err(LedgerError::validation(format!(
                "variant_code '{}' already registered",
                variant.variant_code
            )));
        }
        if let Some(barcode) = &variant.barcode {
            if state.barcodes.contains_key(barcode) {
                return Err(LedgerError::validation(format!(
                    "barcode '{barcode}' already registered"
                )));
            }
            state.barcodes.insert(
                barcode.clone(),
                ResolvedTarget {
                    product_id: variant.product_id,
                    variant_id: Some(variant.id),
                },
            );
        }

        state
            .variant_codes
            .insert(variant.variant_code.clone(), variant.id);
        state.variants.insert(variant.id, variant);
        Ok(())
    }
}

impl ProductDirectory for InMemoryProductDirectory {
    fn resolve(&self, target: &TransactionTarget) -> LedgerResult<ResolvedTarget> {
        let state = self
            .inner
            .read()
            .map_err(|_| LedgerError::storage("directory lock poisoned"))?;

        match target {
            TransactionTarget::Ids {
                product_id,
                variant_id,
            } => {
                if !state.products.contains_key(product_id) {
                    return Err(LedgerError::not_found(format!("product {product_id}")));
                }
                if let Some(variant_id) = variant_id {
                    let variant = state
                        .variants
                        .get(variant_id)
                        .ok_or_else(|| LedgerError::not_found(format!("variant {variant_id}")))?;
                    if variant.product_id != *product_id {
                        return Err(LedgerError::not_found(format!(
                            "variant {variant_id} does not belong to product {product_id}"
                        )));
                    }
                }
                Ok(ResolvedTarget {
                    product_id: *product_id,
                    variant_id: *variant_id,
                })
            }
            TransactionTarget::Barcode(barcode) => state
                .barcodes
                .get(barcode)
                .copied()
                .ok_or_else(|| LedgerError::not_found(format!("barcode '{barcode}'"))),
            TransactionTarget::VariantCode(code) => {
                let variant_id = state
                    .variant_codes
                    .get(code)
                    .ok_or_else(|| LedgerError::not_found(format!("variant_code '{code}'")))?;
                let variant = state
                    .variants
                    .get(variant_id)
                    .ok_or_else(|| LedgerError::not_found(format!("variant {variant_id}")))?;
                Ok(ResolvedTarget {
                    product_id: variant.product_id,
                    variant_id: Some(variant.id),
                })
            }
        }
    }
}
