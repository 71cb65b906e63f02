use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// The operator-editable fields of a product. Sent as the body of create and
/// update requests; the id travels in the path, never here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub category: String,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        ProductDraft {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            category: product.category.clone(),
        }
    }
}
