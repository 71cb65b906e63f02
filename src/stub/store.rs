use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::mock_data::init_mock_data;
use crate::models::{Product, ProductDraft};

#[derive(Debug)]
struct StoreInner {
    products: BTreeMap<i64, Product>,
    next_id: i64,
}

/// In-memory product table. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct ProductStore {
    inner: Mutex<StoreInner>,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    pub fn new() -> Self {
        ProductStore {
            inner: Mutex::new(StoreInner {
                products: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    pub fn seeded() -> Self {
        let store = Self::new();
        for draft in init_mock_data() {
            store.create(draft);
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self) -> Vec<Product> {
        self.lock().products.values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<Product> {
        self.lock().products.get(&id).cloned()
    }

    pub fn create(&self, draft: ProductDraft) -> Product {
        let mut inner = self.lock();
        let timestamp = now();
        let product = Product {
            id: inner.next_id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            category: draft.category,
            created_at: Some(timestamp.clone()),
            updated_at: Some(timestamp),
        };
        inner.next_id += 1;
        inner.products.insert(product.id, product.clone());
        product
    }

    pub fn update(&self, id: i64, draft: ProductDraft) -> Option<Product> {
        let mut inner = self.lock();
        let product = inner.products.get_mut(&id)?;
        product.name = draft.name;
        product.description = draft.description;
        product.price = draft.price;
        product.stock = draft.stock;
        product.category = draft.category;
        product.updated_at = Some(now());
        Some(product.clone())
    }

    pub fn delete(&self, id: i64) -> bool {
        self.lock().products.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
