use serde::{Deserialize, Serialize};

use super::{Resource, ResourceId};

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ResourceId,
    pub name: String,
    pub price: f64,
    pub stock: u64,
}

/// Validated payload for creating a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub stock: u64,
}

impl Resource for Product {
    type Draft = CreateProductRequest;

    const KIND: &'static str = "Product";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn from_draft(id: ResourceId, draft: CreateProductRequest) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            stock: draft.stock,
        }
    }
}

/// Products every fresh product store starts with
pub fn product_fixtures() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Laptop".to_string(),
            price: 999.99,
            stock: 10,
        },
        Product {
            id: 2,
            name: "Smartphone".to_string(),
            price: 699.99,
            stock: 15,
        },
    ]
}
