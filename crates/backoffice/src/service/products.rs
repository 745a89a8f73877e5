//! Product catalogue administration.

use std::collections::BTreeSet;
use std::sync::Arc;

use backoffice_query::{Dir, ListState, OwnedPage};
use chrono::Utc;

use super::validation::{validate_create_product, validate_update_product};
use super::{Latency, Operation, Result, ServiceError};
use crate::model::product::non_empty;
use crate::model::{
    parse_tags, seed_products, CreateProduct, Product, UpdateProduct, NEXT_PRODUCT_ID,
};
use crate::store::{ResourceStore, Store, StoreError};

const KIND: &str = "Product";
const SKU_TAKEN: &str = "Product with this SKU already exists";

#[derive(Debug, Clone)]
pub struct ProductService {
    store: Store<Product>,
    latency: Latency,
}

impl Default for ProductService {
    fn default() -> Self {
        ProductService::seeded(Latency::default())
    }
}

impl ProductService {
    pub fn new(store: Store<Product>, latency: Latency) -> Self {
        ProductService { store, latency }
    }

    pub fn seeded(latency: Latency) -> Self {
        ProductService::new(Store::new(seed_products(), NEXT_PRODUCT_ID), latency)
    }

    /// Newest first.
    pub fn default_list_state(page_size: usize) -> ListState {
        let mut state = ListState::new(page_size);
        state.set_sort(Product::CREATED_AT, Dir::Desc);
        state
    }

    pub fn snapshot(&self) -> Arc<Vec<Product>> {
        self.store.snapshot()
    }

    /// Distinct categories in sorted order.
    pub fn categories(&self) -> Vec<String> {
        self.latency.wait(Operation::Categories);
        let records = self.store.snapshot();
        let categories: BTreeSet<&str> = records.iter().map(|p| p.category.as_str()).collect();
        tracing::debug!(count = categories.len(), "list categories");
        categories.into_iter().map(str::to_string).collect()
    }

    /// Empty SKUs never conflict.
    fn sku_taken(&self, sku: &str, except: Option<&str>) -> bool {
        !sku.is_empty()
            && self
                .store
                .snapshot()
                .iter()
                .any(|p| p.sku.as_deref() == Some(sku) && Some(p.id.as_str()) != except)
    }

    fn not_found(err: StoreError) -> ServiceError {
        let StoreError::NotFound { id } = err;
        ServiceError::NotFound { kind: KIND, id }
    }
}

impl ResourceStore for ProductService {
    type Item = Product;
    type Id = String;
    type Draft = CreateProduct;
    type Patch = UpdateProduct;
    type Error = ServiceError;

    fn parse_id(&self, id_str: &str) -> Result<String> {
        let id = id_str.trim();
        if id.is_empty() {
            return Err(Self::not_found_error(&id.to_string()));
        }
        Ok(id.to_string())
    }

    fn get(&self, id: &String) -> Result<Option<Product>> {
        self.latency.wait(Operation::Get);
        let product = self.store.get(id).cloned();
        tracing::debug!(%id, found = product.is_some(), "get product");
        Ok(product)
    }

    fn not_found_error(id: &String) -> ServiceError {
        ServiceError::NotFound {
            kind: KIND,
            id: id.clone(),
        }
    }

    fn list(&self, state: &ListState) -> Result<OwnedPage<Product>> {
        self.latency.wait(Operation::List);
        let records = self.store.snapshot();
        let page = state.run(records.as_slice())?.into_owned();
        tracing::debug!(
            total = page.pagination.total,
            page = page.pagination.page,
            "list products"
        );
        Ok(page)
    }

    fn create(&mut self, draft: CreateProduct) -> Result<Product> {
        self.latency.wait(Operation::Create);
        if let Err(errors) = validate_create_product(&draft) {
            tracing::warn!(count = errors.len(), "product rejected by validation");
            return Err(ServiceError::Validation(errors));
        }
        let sku = non_empty(&draft.sku);
        if let Some(sku) = &sku {
            if self.sku_taken(sku, None) {
                tracing::warn!(%sku, "duplicate product sku");
                return Err(ServiceError::Conflict(SKU_TAKEN.to_string()));
            }
        }

        let now = Utc::now();
        let product = Product {
            id: self.store.allocate_id(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            // Validated to 0..=999_999 above.
            stock: u32::try_from(draft.stock).unwrap_or_default(),
            category: draft.category,
            status: draft.status,
            images: draft.images,
            sku,
            tags: parse_tags(&draft.tags),
            created_at: now,
            updated_at: now,
        };
        self.store.insert(product.clone());
        tracing::debug!(id = %product.id, "created product");
        Ok(product)
    }

    fn update(&mut self, id: &String, patch: UpdateProduct) -> Result<Product> {
        self.latency.wait(Operation::Update);
        if self.store.get(id).is_none() {
            return Err(Self::not_found_error(id));
        }
        if let Err(errors) = validate_update_product(&patch) {
            tracing::warn!(%id, count = errors.len(), "product update rejected by validation");
            return Err(ServiceError::Validation(errors));
        }
        if let Some(sku) = patch.sku.as_deref().and_then(non_empty) {
            if self.sku_taken(&sku, Some(id)) {
                tracing::warn!(%id, %sku, "duplicate product sku");
                return Err(ServiceError::Conflict(SKU_TAKEN.to_string()));
            }
        }

        let now = Utc::now();
        let records = self
            .store
            .replace(id, |product| patch.apply(product, now))
            .map_err(Self::not_found)?;
        let product = records
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found_error(id))?;
        tracing::debug!(%id, "updated product");
        Ok(product)
    }

    fn delete(&mut self, id: &String) -> Result<()> {
        self.latency.wait(Operation::Delete);
        self.store.remove(id).map_err(Self::not_found)?;
        tracing::debug!(%id, "deleted product");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductStatus;
    use backoffice_query::{ConfigurationError, NumericRange};

    fn service() -> ProductService {
        ProductService::seeded(Latency::none())
    }

    fn draft(sku: &str) -> CreateProduct {
        CreateProduct {
            name: "Standing Desk".into(),
            description: "Height adjustable standing desk".into(),
            price: 549.0,
            category: "Furniture".into(),
            stock: 5,
            status: ProductStatus::Draft,
            images: Vec::new(),
            sku: sku.into(),
            tags: "office, desk".into(),
        }
    }

    fn names(page: &OwnedPage<Product>) -> Vec<&str> {
        page.items.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn categories_are_distinct_and_sorted() {
        assert_eq!(
            service().categories(),
            ["Clothing", "Electronics", "Food & Beverage", "Furniture", "Sports & Fitness"]
        );
    }

    #[test]
    fn default_list_is_newest_first() {
        let page = service()
            .list(&ProductService::default_list_state(12))
            .unwrap();
        assert_eq!(names(&page)[0], "Wireless Headphones Pro");
        assert_eq!(names(&page)[5], "Vintage Leather Jacket");
    }

    #[test]
    fn list_by_category_and_price() {
        let products = service();
        let mut state = ProductService::default_list_state(12);
        state.select(Product::CATEGORY, "Electronics");
        state.set_range(Some(NumericRange::new(150.0, 250.0)));
        assert_eq!(names(&products.list(&state).unwrap()), ["Smart Fitness Watch"]);

        state.set_range(Some(NumericRange::new(250.0, 150.0)));
        assert!(matches!(
            products.list(&state),
            Err(ServiceError::Query(ConfigurationError::InvertedRange { .. }))
        ));
    }

    #[test]
    fn search_covers_sku() {
        let products = service();
        let mut state = ProductService::default_list_state(12);
        state.set_search("vlj");
        assert_eq!(names(&products.list(&state).unwrap()), ["Vintage Leather Jacket"]);
    }

    #[test]
    fn create_parses_tags_and_blank_sku() {
        let mut products = service();
        let product = products.create(draft("  ")).unwrap();
        assert_eq!(product.id, "7");
        assert_eq!(product.sku, None);
        assert_eq!(product.tags, ["office", "desk"]);
        assert_eq!(product.stock, 5);

        // A second blank SKU is no conflict.
        assert!(products.create(draft("")).is_ok());
    }

    #[test]
    fn update_with_blank_sku_clears_it() {
        let mut products = service();
        let patch = UpdateProduct {
            sku: Some("   ".into()),
            ..UpdateProduct::default()
        };
        let product = products.update(&"3".to_string(), patch).unwrap();
        assert_eq!(product.sku, None);

        let padded = UpdateProduct {
            sku: Some(" NEW-3 ".into()),
            ..UpdateProduct::default()
        };
        let product = products.update(&"3".to_string(), padded).unwrap();
        assert_eq!(product.sku.as_deref(), Some("NEW-3"));
    }

    #[test]
    fn create_rejects_duplicate_sku() {
        let mut products = service();
        let err = products.create(draft("WHP-001")).unwrap_err();
        assert_eq!(err, ServiceError::Conflict(SKU_TAKEN.into()));
    }

    #[test]
    fn update_checks_sku_against_others() {
        let mut products = service();
        let keep = UpdateProduct {
            sku: Some("WHP-001".into()),
            stock: Some(0),
            ..UpdateProduct::default()
        };
        let product = products.update(&"1".to_string(), keep).unwrap();
        assert_eq!(product.stock, 0);

        let steal = UpdateProduct {
            sku: Some("SFW-002".into()),
            ..UpdateProduct::default()
        };
        assert!(matches!(
            products.update(&"1".to_string(), steal),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn invalid_update_is_rejected() {
        let mut products = service();
        let patch = UpdateProduct {
            stock: Some(-3),
            ..UpdateProduct::default()
        };
        let err = products.update(&"1".to_string(), patch).unwrap_err();
        assert_eq!(err.validation_errors()[0].message, "Stock cannot be negative");
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let mut products = service();
        let id = "4".to_string();
        products.delete(&id).unwrap();
        assert_eq!(products.resolve(&id).unwrap_err().to_string(), "Product not found");
        assert_eq!(products.delete(&id).unwrap_err().to_string(), "Product not found");
    }
}
