//! Collection operations for the Cellar.

use log::{debug, info};

use super::Cellar;
use crate::{
    display::Wines,
    error::Result,
    models::Wine,
    params::{validate_owner, AddWine, Id, ListWines},
};

impl Cellar {
    /// Adds a wine to the owner's collection.
    ///
    /// # Errors
    ///
    /// Returns `CellarError::InvalidInput` for a blank name or owner, a rating
    /// outside 0–5 or an implausible ABV
    pub async fn add_wine(&self, params: &AddWine) -> Result<Wine> {
        params.validate()?;
        let params = params.clone();

        let wine = self.with_db(move |db| db.add_wine(&params)).await?;
        info!("Added wine {} ({}) for {}", wine.id, wine.name, wine.owner);
        Ok(wine)
    }

    /// Retrieves a wine by its ID.
    pub async fn get_wine(&self, params: &Id) -> Result<Option<Wine>> {
        let id = params.id;
        self.with_db(move |db| db.get_wine(id)).await
    }

    /// Lists an owner's wines, optionally hiding empty bottles.
    pub async fn list_wines(&self, params: &ListWines) -> Result<Wines> {
        validate_owner(&params.owner)?;
        let owner = params.owner.clone();
        let filter = params.filter();
        let in_stock = params.in_stock;
        debug!("Listing wines for {owner}: {filter:?} in_stock={in_stock}");

        let wines = self
            .with_db(move |db| {
                if in_stock {
                    db.list_available_wines(&owner, &filter)
                } else {
                    db.list_wines(&owner, &filter)
                }
            })
            .await?;
        Ok(Wines(wines))
    }
}
