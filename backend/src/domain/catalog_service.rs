//! Read access and bulk loading for the ingredient/tag catalog.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::catalog::{Ingredient, IngredientRecord, Tag, TagRecord};
use super::ports::CatalogRepository;
use super::recipe_service::map_catalog_error;
use super::Error;

/// Driving service for the static catalog.
#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    /// Create a new service over the given adapter.
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }

    /// Every ingredient, ordered by name.
    pub async fn ingredients(&self) -> Result<Vec<Ingredient>, Error> {
        self.catalog
            .list_ingredients()
            .await
            .map_err(map_catalog_error)
    }

    /// One ingredient by id.
    pub async fn ingredient(&self, id: Uuid) -> Result<Ingredient, Error> {
        self.catalog
            .find_ingredient(id)
            .await
            .map_err(map_catalog_error)?
            .ok_or_else(|| Error::not_found("ingredient not found"))
    }

    /// Every tag, ordered by name.
    pub async fn tags(&self) -> Result<Vec<Tag>, Error> {
        self.catalog.list_tags().await.map_err(map_catalog_error)
    }

    /// One tag by id.
    pub async fn tag(&self, id: Uuid) -> Result<Tag, Error> {
        self.catalog
            .find_tag(id)
            .await
            .map_err(map_catalog_error)?
            .ok_or_else(|| Error::not_found("tag not found"))
    }

    /// Validate and load a batch of ingredient records atomically.
    ///
    /// The first invalid record fails the whole batch before any write.
    pub async fn load_ingredients(&self, records: Vec<IngredientRecord>) -> Result<usize, Error> {
        let items: Vec<Ingredient> = records
            .into_iter()
            .map(|record| Ingredient::new(record.name, record.measurement_unit))
            .collect::<Result<_, _>>()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let count = self
            .catalog
            .insert_ingredients(&items)
            .await
            .map_err(map_catalog_error)?;
        info!(count, "ingredients loaded");
        Ok(count)
    }

    /// Validate and load a batch of tag records atomically.
    pub async fn load_tags(&self, records: Vec<TagRecord>) -> Result<usize, Error> {
        let items: Vec<Tag> = records
            .into_iter()
            .map(|record| Tag::new(record.name, record.slug))
            .collect::<Result<_, _>>()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let count = self
            .catalog
            .insert_tags(&items)
            .await
            .map_err(map_catalog_error)?;
        info!(count, "tags loaded");
        Ok(count)
    }
}
