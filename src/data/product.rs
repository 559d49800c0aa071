use serde::{Deserialize, Serialize};

use crate::{
    core::{FacetSpec, Record, SortKey, record::facet_enum},
    data::{Money, Page},
    render::{Column, badge},
};

/// Stock at or below this counts as low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

facet_enum! {
    pub enum ProductStatus {
        Active => "active",
        Draft => "draft",
        OutOfStock => "out_of_stock",
    }
}

facet_enum! {
    pub enum ProductCategory {
        Electronics => "electronics",
        Clothing => "clothing",
        Home => "home",
        Sports => "sports",
        Books => "books",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub sku: String,
    pub category: ProductCategory,
    pub price: Money,
    pub stock: u32,
    pub status: ProductStatus,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }

    pub fn inventory_value(&self) -> Money {
        Money::from_cents(self.price.cents() * i64::from(self.stock))
    }
}

impl Record for Product {
    type Id = u32;

    const FACETS: &'static [FacetSpec] = &[
        FacetSpec::new("status", ProductStatus::VALUES),
        FacetSpec::new("category", ProductCategory::VALUES),
    ];
    const FLAGS: &'static [&'static str] = &["low_stock"];
    const SORT_KEYS: &'static [&'static str] = &["name", "price", "stock"];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.sku]
    }

    fn facet(&self, name: &str) -> Option<&'static str> {
        match name {
            "status" => Some(self.status.as_str()),
            "category" => Some(self.category.as_str()),
            _ => None,
        }
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match name {
            "low_stock" => Some(self.is_low_stock()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "name" => Some(SortKey::text(&self.name)),
            "price" => Some(SortKey::Int(self.price.cents())),
            "stock" => Some(SortKey::Int(i64::from(self.stock))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProductPage;

impl Page for ProductPage {
    const NAME: &'static str = "products";
    const TITLE: &'static str = "Products";

    type Record = Product;

    fn seed() -> Vec<Product> {
        seed()
    }

    fn columns() -> Vec<Column<Product>> {
        vec![
            Column::new("Product", |p: &Product| p.name.clone()),
            Column::new("SKU", |p: &Product| p.sku.clone()),
            Column::new("Category", |p: &Product| p.category.to_string()),
            Column::new("Price", |p: &Product| p.price.to_string()),
            Column::new("Stock", |p: &Product| {
                if p.is_low_stock() && p.stock > 0 {
                    format!("{} (low)", p.stock)
                } else {
                    p.stock.to_string()
                }
            }),
            Column::new("Status", |p: &Product| badge(p.status)),
        ]
    }

    fn summary(records: &[Product]) -> Vec<(&'static str, String)> {
        vec![
            ("Products", records.len().to_string()),
            (
                "Low stock",
                records.iter().filter(|p| p.is_low_stock()).count().to_string(),
            ),
            (
                "Inventory value",
                records
                    .iter()
                    .map(Product::inventory_value)
                    .sum::<Money>()
                    .to_string(),
            ),
        ]
    }
}

fn product(
    id: u32,
    name: &str,
    category: ProductCategory,
    cents: i64,
    stock: u32,
    status: ProductStatus,
) -> Product {
    let prefix: String = category.as_str().chars().take(3).collect();
    Product {
        id,
        name: name.to_string(),
        sku: format!("{}-{:04}", prefix.to_uppercase(), id),
        category,
        price: Money::from_cents(cents),
        stock,
        status,
    }
}

pub fn seed() -> Vec<Product> {
    use ProductCategory as C;
    use ProductStatus as S;
    vec![
        product(1, "Wireless Headphones", C::Electronics, 19_999, 45, S::Active),
        product(2, "Smart Watch Pro", C::Electronics, 34_900, 8, S::Active),
        product(3, "Running Shoes", C::Sports, 12_950, 0, S::OutOfStock),
        product(4, "Cotton T-Shirt", C::Clothing, 2_499, 120, S::Active),
        product(5, "Ceramic Coffee Mug", C::Home, 1_599, 64, S::Active),
        product(6, "Yoga Mat", C::Sports, 3_999, 5, S::Active),
        product(7, "Mechanical Keyboard", C::Electronics, 14_900, 23, S::Draft),
        product(8, "Denim Jacket", C::Clothing, 8_900, 0, S::OutOfStock),
        product(9, "The Pragmatic Programmer", C::Books, 4_495, 31, S::Active),
        product(10, "Desk Lamp", C::Home, 4_900, 12, S::Active),
        product(11, "Bluetooth Speaker", C::Electronics, 7_999, 3, S::Active),
        product(12, "Rust in Action", C::Books, 3_999, 17, S::Draft),
    ]
}
