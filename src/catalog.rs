//! Static reference data: categories, subcategories and regions.
//!
//! Loaded once at startup from the embedded JSON and never mutated. Icon
//! names are resolved against a closed enum at load time so a bad catalog
//! fails fast instead of surfacing as a broken lookup later.

use serde::Deserialize;
use thiserror::Error;

use crate::models::Language;

const CATALOG_JSON: &str = include_str!("catalog.json");

/// Categories that require MYiD identity verification before publishing.
pub const HIGH_TRUST_CATEGORIES: &[&str] = &["cars", "real-estate", "jobs"];

pub fn is_high_trust(category_id: &str) -> bool {
    HIGH_TRUST_CATEGORIES.contains(&category_id)
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("category '{category}' has unknown icon '{icon}'")]
    UnknownIcon { category: String, icon: String },
    #[error("duplicate category id '{0}'")]
    DuplicateCategory(String),
    #[error("duplicate region id '{0}'")]
    DuplicateRegion(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIcon {
    Smartphone,
    Car,
    Home,
    Briefcase,
    Sofa,
    Shirt,
    Wrench,
    Paw,
}

impl CategoryIcon {
    fn parse(s: &str) -> Option<CategoryIcon> {
        match s {
            "smartphone" => Some(CategoryIcon::Smartphone),
            "car" => Some(CategoryIcon::Car),
            "home" => Some(CategoryIcon::Home),
            "briefcase" => Some(CategoryIcon::Briefcase),
            "sofa" => Some(CategoryIcon::Sofa),
            "shirt" => Some(CategoryIcon::Shirt),
            "wrench" => Some(CategoryIcon::Wrench),
            "paw" => Some(CategoryIcon::Paw),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name_uz: String,
    pub name_ru: String,
    pub name_en: String,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub name_uz: String,
    pub name_ru: String,
    pub name_en: String,
    pub icon: CategoryIcon,
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn name(&self, lang: Language) -> &str {
        match lang {
            Language::Uz => &self.name_uz,
            Language::Ru => &self.name_ru,
            Language::En => &self.name_en,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    pub id: String,
    pub name_uz: String,
    pub name_ru: String,
    pub name_en: String,
}

impl Region {
    pub fn name(&self, lang: Language) -> &str {
        match lang {
            Language::Uz => &self.name_uz,
            Language::Ru => &self.name_ru,
            Language::En => &self.name_en,
        }
    }
}

// Raw shapes as they appear in the JSON, before icon validation.
#[derive(Deserialize)]
struct RawCategory {
    id: String,
    name_uz: String,
    name_ru: String,
    name_en: String,
    icon: String,
    #[serde(default)]
    subcategories: Vec<Subcategory>,
}

#[derive(Deserialize)]
struct RawCatalog {
    categories: Vec<RawCategory>,
    regions: Vec<Region>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    regions: Vec<Region>,
}

impl Catalog {
    /// Load and validate the embedded catalog.
    pub fn load() -> Result<Catalog, CatalogError> {
        Catalog::from_json(CATALOG_JSON)
    }

    pub fn from_json(json: &str) -> Result<Catalog, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;

        let mut categories = Vec::with_capacity(raw.categories.len());
        for raw_cat in raw.categories {
            if categories.iter().any(|c: &Category| c.id == raw_cat.id) {
                return Err(CatalogError::DuplicateCategory(raw_cat.id));
            }
            let icon = CategoryIcon::parse(&raw_cat.icon).ok_or_else(|| CatalogError::UnknownIcon {
                category: raw_cat.id.clone(),
                icon: raw_cat.icon.clone(),
            })?;
            categories.push(Category {
                id: raw_cat.id,
                name_uz: raw_cat.name_uz,
                name_ru: raw_cat.name_ru,
                name_en: raw_cat.name_en,
                icon,
                subcategories: raw_cat.subcategories,
            });
        }

        let mut seen_regions: Vec<&str> = Vec::new();
        for region in &raw.regions {
            if seen_regions.contains(&region.id.as_str()) {
                return Err(CatalogError::DuplicateRegion(region.id.clone()));
            }
            seen_regions.push(region.id.as_str());
        }

        log::debug!(
            "catalog loaded: {} categories, {} regions",
            categories.len(),
            raw.regions.len()
        );
        Ok(Catalog { categories, regions: raw.regions })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }
}
