//! Wire types for the catalog backend.
//!
//! Field names follow the backend's Spanish JSON (`nombre`, `icono`,
//! `subcategorias`, `disenios`). Conversion into [`nsc_model`] types happens
//! here so the rest of the workspace never sees the wire shape of designs.
//! Taxonomy DTOs are handed out as-is; normalizing them into filter
//! categories is the explorer's job.

use nsc_model::{Design, DesignId, DesignTag, slugify};
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Parent category from `GET /categorias`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    /// Display name.
    pub nombre: String,

    /// Icon reference.
    #[serde(default)]
    pub icono: Option<String>,

    /// Only active categories are usable.
    #[serde(default = "default_active")]
    pub activo: bool,

    /// Filter-type slug used as the query key. Falls back to the slugified
    /// name when the backend omits it.
    #[serde(default, alias = "tipoFiltro", alias = "slug")]
    pub filtro: Option<String>,

    /// Child options.
    #[serde(default)]
    pub subcategorias: Vec<SubcategoryDto>,
}

/// Child option of a [`CategoryDto`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryDto {
    /// Display name.
    pub nombre: String,

    /// Icon reference.
    #[serde(default)]
    pub icono: Option<String>,

    /// Only active options are usable.
    #[serde(default = "default_active")]
    pub activo: bool,

    /// Explicit slug, if the backend provides one.
    #[serde(default)]
    pub slug: Option<String>,
}

impl CategoryDto {
    /// The query key of this category.
    pub fn filter_key(&self) -> String {
        match self.filtro.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => slugify(&self.nombre),
        }
    }
}

impl SubcategoryDto {
    /// The option slug of this subcategory.
    pub fn option_slug(&self) -> String {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slugify(&self.nombre),
        }
    }
}

/// Design identifiers arrive either as strings (document ids) or numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// String identifier.
    Text(String),
    /// Numeric identifier.
    Number(u64),
}

impl RawId {
    fn into_design_id(self) -> DesignId {
        match self {
            Self::Text(text) => DesignId::new(text),
            Self::Number(number) => DesignId::new(number.to_string()),
        }
    }
}

/// Tag attached to a design in the listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignTagDto {
    /// Option display name.
    pub nombre: String,

    /// Option slug; falls back to the slugified name.
    #[serde(default)]
    pub slug: Option<String>,

    /// Category filter key.
    #[serde(default, alias = "tipoFiltro")]
    pub filtro: Option<String>,

    /// Category display name, used when `filtro` is absent.
    #[serde(default)]
    pub categoria: Option<String>,
}

impl DesignTagDto {
    fn into_tag(self) -> Option<DesignTag> {
        let category_key = match (self.filtro.as_deref(), self.categoria.as_deref()) {
            (Some(key), _) if !key.trim().is_empty() => key.trim().to_string(),
            (_, Some(category)) => slugify(category),
            _ => return None,
        };
        let option_slug = match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => slugify(&self.nombre),
        };
        if category_key.is_empty() || option_slug.is_empty() {
            return None;
        }
        Some(DesignTag {
            category_key,
            option_slug,
            label: self.nombre,
        })
    }
}

/// Design from `GET /disenios`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignDto {
    /// Identifier.
    #[serde(alias = "_id")]
    pub id: RawId,

    /// Display name.
    pub nombre: String,

    /// Long description.
    #[serde(default)]
    pub descripcion: Option<String>,

    /// Main image.
    #[serde(default, alias = "imagenUrl")]
    pub imagen: Option<String>,

    /// Card tags.
    #[serde(default, alias = "subcategorias")]
    pub categorias: Vec<DesignTagDto>,
}

impl From<DesignDto> for Design {
    fn from(dto: DesignDto) -> Self {
        Self {
            id: dto.id.into_design_id(),
            name: dto.nombre,
            description: dto.descripcion.filter(|text| !text.trim().is_empty()),
            image_url: dto.imagen.filter(|url| !url.trim().is_empty()),
            tags: dto
                .categorias
                .into_iter()
                .filter_map(DesignTagDto::into_tag)
                .collect(),
        }
    }
}

/// Paginated response from `GET /disenios`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignPageDto {
    /// Designs on the page.
    #[serde(default)]
    pub disenios: Vec<DesignDto>,

    /// Total number of pages for the query.
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
}

/// A page of designs as returned by [`CatalogBackend`](crate::CatalogBackend).
#[derive(Debug, Clone, PartialEq)]
pub struct DesignPage {
    /// Designs on the page.
    pub designs: Vec<Design>,
    /// Total number of pages for the query.
    pub total_pages: u32,
}

impl From<DesignPageDto> for DesignPage {
    fn from(dto: DesignPageDto) -> Self {
        Self {
            designs: dto.disenios.into_iter().map(Design::from).collect(),
            total_pages: dto.total_pages,
        }
    }
}
