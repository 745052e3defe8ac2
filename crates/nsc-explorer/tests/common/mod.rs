//! Shared fixtures for the explorer integration tests.

#![allow(dead_code)]

use nsc_client::{CategoryDto, DesignPage, SubcategoryDto};
use nsc_explorer::{CatalogUrl, Effect, FetchRequest};
use nsc_model::{Design, DesignId, DesignTag};

pub fn category(nombre: &str, key: &str, icon: Option<&str>, options: &[&str]) -> CategoryDto {
    CategoryDto {
        nombre: nombre.to_string(),
        icono: icon.map(str::to_string),
        activo: true,
        filtro: Some(key.to_string()),
        subcategorias: options
            .iter()
            .map(|name| SubcategoryDto {
                nombre: (*name).to_string(),
                icono: None,
                activo: true,
                slug: None,
            })
            .collect(),
    }
}

/// color: red/blue/green, size: s/m/l, material: silk/gel.
pub fn salon_taxonomy() -> Vec<CategoryDto> {
    vec![
        category("Color", "color", None, &["Red", "Blue", "Green"]),
        category("Size", "size", None, &["S", "M", "L"]),
        category("Material", "material", None, &["Silk", "Gel"]),
    ]
}

pub fn design(id: &str) -> Design {
    Design {
        id: DesignId::new(id),
        name: format!("Design {id}"),
        description: None,
        image_url: None,
        tags: vec![DesignTag {
            category_key: "material".to_string(),
            option_slug: "silk".to_string(),
            label: "Silk".to_string(),
        }],
    }
}

pub fn page(ids: &[&str], total_pages: u32) -> DesignPage {
    DesignPage {
        designs: ids.iter().map(|id| design(id)).collect(),
        total_pages,
    }
}

pub fn url(input: &str) -> CatalogUrl {
    CatalogUrl::parse(input).expect("valid catalog url")
}

/// The single listing fetch among `effects`.
pub fn only_fetch(effects: &[Effect]) -> FetchRequest {
    match effects {
        [Effect::FetchDesigns(request)] => request.clone(),
        other => panic!("expected exactly one listing fetch, got {other:?}"),
    }
}
