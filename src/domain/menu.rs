use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Drink,
    Snack,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Drink => write!(f, "Minuman"),
            Category::Snack => write!(f, "Camilan"),
        }
    }
}

/// One sellable entry of the menu.
///
/// `id` is a short slug that travels inside button callback data, `name` is what the
/// operator and the receipt see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub category: Category,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate menu item name: {0}")]
    DuplicateName(String),
    #[error("Duplicate menu item id: {0}")]
    DuplicateId(String),
    #[error("Negative price for menu item: {0}")]
    NegativePrice(String),
}

/// Ordered, immutable list of menu items loaded once at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    pub fn new(items: Vec<MenuItem>) -> Result<Self, CatalogError> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for item in &items {
            if item.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(item.name.clone()));
            }
            if !names.insert(item.name.as_str()) {
                return Err(CatalogError::DuplicateName(item.name.clone()));
            }
            if !ids.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// The matcha bar menu the till ships with.
    pub fn matcha_bar() -> Self {
        let item = |id: &str, name: &str, price: i64, category| {
            MenuItem::new(id, name, Decimal::from(price), category)
        };
        Self {
            items: vec![
                item("og", "🍵 Matcha OG", 12000, Category::Drink),
                item("strawberry", "🍓 Strawberry Matcha", 16000, Category::Drink),
                item("cookies", "🍪 Matcha Cookies", 16000, Category::Snack),
                item("choco", "🍫 Choco Matcha", 16000, Category::Drink),
                item("cloud", "☁️ Matcha Cloud", 14000, Category::Drink),
                item("honey", "🍯 Honey Matcha", 15000, Category::Drink),
                item("coconut", "🥥 Coconut Matcha", 15000, Category::Drink),
                item("orange", "🍊 Orange Matcha", 14000, Category::Drink),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rejects_duplicates_and_negative_prices() {
        let latte = MenuItem::new("latte", "Matcha Latte", Decimal::from(15000), Category::Drink);
        let dup = MenuItem::new("latte2", "Matcha Latte", Decimal::from(1), Category::Drink);
        assert_eq!(
            Catalog::new(vec![latte.clone(), dup]).unwrap_err(),
            CatalogError::DuplicateName("Matcha Latte".to_string())
        );

        let negative = MenuItem::new("neg", "Refund", Decimal::from(-1), Category::Snack);
        assert!(matches!(Catalog::new(vec![negative]), Err(CatalogError::NegativePrice(_))));

        let catalog = Catalog::new(vec![latte]).unwrap();
        assert_eq!(catalog.get("latte").unwrap().price, Decimal::from(15000));
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_matcha_bar_is_valid() {
        let catalog = Catalog::matcha_bar();
        assert_eq!(catalog.items().len(), 8);
        assert!(Catalog::new(catalog.items().to_vec()).is_ok());
    }
}
