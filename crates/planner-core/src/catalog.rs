// ABOUTME: Read-only view of the external vendor catalog the ledger references by id.
// ABOUTME: Provides the VendorCatalog trait and an in-memory implementation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::model::VendorId;

/// A vendor listing as the catalog describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub category: Category,
    pub location: Option<String>,
    pub price_range: Option<String>,
}

impl Vendor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: VendorId::new(id),
            name: name.into(),
            category,
            location: None,
            price_range: None,
        }
    }
}

/// Lookup surface for vendor metadata. The ledger only reads through it.
pub trait VendorCatalog {
    fn vendor(&self, id: &VendorId) -> Option<&Vendor>;

    /// Display name for a vendor id, falling back to the raw id.
    fn display_name(&self, id: &VendorId) -> String {
        self.vendor(id)
            .map(|v| v.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    vendors: BTreeMap<VendorId, Vendor>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, vendor: Vendor) {
        self.vendors.insert(vendor.id.clone(), vendor);
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}

impl FromIterator<Vendor> for InMemoryCatalog {
    fn from_iter<T: IntoIterator<Item = Vendor>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for vendor in iter {
            catalog.insert(vendor);
        }
        catalog
    }
}

impl VendorCatalog for InMemoryCatalog {
    fn vendor(&self, id: &VendorId) -> Option<&Vendor> {
        self.vendors.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_display_name() {
        let catalog: InMemoryCatalog = vec![
            Vendor::new("7", "Grand Hall", Category::Venue),
            Vendor::new("9", "Lakeside Lodge", Category::Venue),
            Vendor::new("12", "Spice Route Catering", Category::Catering),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.display_name(&VendorId::from("7")), "Grand Hall");
        assert_eq!(catalog.display_name(&VendorId::from("404")), "404");
    }
}
