//! Receipt data models shared by the extraction pipeline and its callers.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spending category shared by products and whole receipts.
///
/// The wire names are a contract surface: the engine instruction, the
/// payload validator, and the persisted schema must all agree on this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Groceries (храна).
    Food,
    /// Electronics (електроника).
    Electronics,
    /// Clothing (дрехи).
    Clothing,
    /// Home and garden (дом).
    Home,
    /// Pharmacy and drugstore (аптека).
    Pharmacy,
    /// Transport and fuel (транспорт).
    Transport,
    /// Entertainment (развлечения).
    Entertainment,
    /// Education (образование).
    Education,
    /// Utility bills (сметки).
    Utilities,
    /// Services (услуги).
    Services,
    /// Banking and finance (финанси).
    Finances,
    /// Fallback when nothing better applies (друго).
    Other,
}

impl Category {
    /// Every category, in contract order.
    pub const ALL: [Category; 12] = [
        Category::Food,
        Category::Electronics,
        Category::Clothing,
        Category::Home,
        Category::Pharmacy,
        Category::Transport,
        Category::Entertainment,
        Category::Education,
        Category::Utilities,
        Category::Services,
        Category::Finances,
        Category::Other,
    ];

    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Home => "home",
            Category::Pharmacy => "pharmacy",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Education => "education",
            Category::Utilities => "utilities",
            Category::Services => "services",
            Category::Finances => "finances",
            Category::Other => "other",
        }
    }

    /// Parse a category from loose engine output.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Category::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single product line reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product name, possibly OCR-corrected by the engine.
    pub name: String,

    /// Price, VAT inclusive, two decimal places by convention.
    pub price: Decimal,

    /// Category assigned to this product.
    pub category: Category,
}

/// A fully validated receipt extraction.
///
/// Produced at most once per pipeline attempt and never mutated
/// afterwards; persistence assigns identity, timestamps, and ownership
/// downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptExtraction {
    /// Store name, best-effort corrected.
    pub store_name: String,

    /// Receipt total, VAT inclusive. Independent of the product prices:
    /// receipts may omit line items or carry discounts and fees not
    /// modeled as products, so no reconciliation is performed.
    pub total_amount: Decimal,

    /// Purchase date (no time-of-day component).
    pub date: NaiveDate,

    /// Overall category, derived from the product categories by
    /// plurality vote; `other` when the product list is empty.
    pub category: Category,

    /// Products in engine-reported order; may be empty.
    pub products: Vec<Product>,
}
