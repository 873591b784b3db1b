use serde::Deserialize;

use crate::error::Result;

/// The catalog shipped with the binary.
pub const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Raw catalog document, in the Portuguese field names it is authored with.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogData {
    #[serde(rename = "bolos")]
    pub cakes: Vec<CakeEntry>,

    #[serde(rename = "coberturas")]
    pub coverages: Vec<CoverageEntry>,
}

/// A named variant of a recipe with its own ingredient list.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    #[serde(rename = "tipo")]
    pub kind: String,

    #[serde(rename = "ingredientes", default)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CakeEntry {
    #[serde(rename = "titulo")]
    pub title: String,

    #[serde(rename = "versoes")]
    pub versions: Option<Vec<VersionEntry>>,

    #[serde(rename = "ingredientes")]
    pub ingredients: Option<Vec<String>>,

    /// Cake layer of a base + topping recipe.
    #[serde(rename = "massa")]
    pub base_layer: Option<Vec<String>>,

    #[serde(rename = "farofa_crocante")]
    pub topping_layer: Option<Vec<String>>,

    #[serde(rename = "observacao")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverageEntry {
    #[serde(rename = "titulo")]
    pub title: String,

    /// Free-text yield such as "650g" or "400 a 450g".
    #[serde(rename = "rendimento")]
    pub yield_text: Option<String>,

    #[serde(rename = "ingredientes")]
    pub ingredients: Option<Vec<String>>,

    #[serde(rename = "versoes")]
    pub versions: Option<Vec<VersionEntry>>,
}

/// How a cake entry lays out its ingredient lines.
#[derive(Debug, Clone, Copy)]
pub enum CakeShape<'a> {
    Versions(&'a [VersionEntry]),
    Flat(&'a [String]),
    Layered {
        base: &'a [String],
        topping: &'a [String],
    },
    Empty,
}

impl CakeEntry {
    /// Versions take precedence over a flat list, which takes precedence over layers.
    pub fn shape(&self) -> CakeShape<'_> {
        if let Some(versions) = &self.versions {
            CakeShape::Versions(versions)
        } else if let Some(lines) = &self.ingredients {
            CakeShape::Flat(lines)
        } else if let Some(base) = &self.base_layer {
            CakeShape::Layered {
                base,
                topping: self.topping_layer.as_deref().unwrap_or_default(),
            }
        } else {
            CakeShape::Empty
        }
    }
}

impl CatalogData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }
}
