//! Collection queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row, ToSql};

use super::utils::{id_column, lenient_json_column, parsed_column, timestamp_column};
use crate::{
    error::{Result, StoreResultExt},
    models::{Wine, WineFilter},
    params::AddWine,
};

const WINE_COLUMNS: &str = "id, owner, name, color, vintage, region, style, abv, quantity, readiness, rating, profile, created_at, updated_at";
const INSERT_WINE_SQL: &str = "INSERT INTO wines (owner, name, color, vintage, region, style, abv, quantity, readiness, rating, profile, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";

impl super::Database {
    /// Helper function to construct a Wine from a database row
    fn build_wine_from_row(row: &Row) -> rusqlite::Result<Wine> {
        Ok(Wine {
            id: id_column(row, 0)?,
            owner: row.get(1)?,
            name: row.get(2)?,
            color: parsed_column(row, 3)?,
            vintage: row.get(4)?,
            region: row.get(5)?,
            style: row.get(6)?,
            abv: row.get(7)?,
            quantity: row.get(8)?,
            readiness: parsed_column(row, 9)?,
            rating: row.get::<_, Option<f64>>(10)?.map(|r| r as f32),
            profile: lenient_json_column(row, 11)?,
            created_at: timestamp_column(row, 12)?,
            updated_at: timestamp_column(row, 13)?,
        })
    }

    /// Adds a wine to the collection.
    pub fn add_wine(&mut self, wine: &AddWine) -> Result<Wine> {
        let now = Timestamp::now();
        let now_str = now.to_string();
        let profile = wine.profile.map(|p| serde_json::to_string(&p)).transpose()?;

        self.connection
            .execute(
                INSERT_WINE_SQL,
                params![
                    wine.owner,
                    wine.name,
                    wine.color.as_str(),
                    wine.vintage,
                    wine.region,
                    wine.style,
                    wine.abv,
                    wine.quantity,
                    wine.readiness.as_str(),
                    wine.rating.map(f64::from),
                    profile,
                    &now_str,
                    &now_str,
                ],
            )
            .store_context("Failed to insert wine")?;

        let id = self.connection.last_insert_rowid() as u64;

        Ok(Wine {
            id,
            owner: wine.owner.clone(),
            name: wine.name.clone(),
            color: wine.color,
            vintage: wine.vintage,
            region: wine.region.clone(),
            style: wine.style.clone(),
            abv: wine.abv,
            quantity: wine.quantity,
            readiness: wine.readiness,
            rating: wine.rating,
            profile: wine.profile,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a wine by its ID.
    pub fn get_wine(&self, id: u64) -> Result<Option<Wine>> {
        let sql = format!("SELECT {WINE_COLUMNS} FROM wines WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], Self::build_wine_from_row)
            .optional()
            .store_context("Failed to query wine")
    }

    /// Lists an owner's wines in ID order, including empty bottles.
    pub fn list_wines(&self, owner: &str, filter: &WineFilter) -> Result<Vec<Wine>> {
        self.query_wines(owner, filter, false)
    }

    /// Lists an owner's wines with at least one bottle left.
    ///
    /// These are the only wines that may become lineup candidates.
    pub fn list_available_wines(&self, owner: &str, filter: &WineFilter) -> Result<Vec<Wine>> {
        self.query_wines(owner, filter, true)
    }

    fn query_wines(&self, owner: &str, filter: &WineFilter, in_stock: bool) -> Result<Vec<Wine>> {
        let mut query = format!("SELECT {WINE_COLUMNS} FROM wines WHERE owner = ?");
        let mut params_vec: Vec<Box<dyn ToSql>> = vec![Box::new(owner.to_string())];

        if in_stock {
            query.push_str(" AND quantity > 0");
        }
        if let Some(color) = filter.color {
            query.push_str(" AND color = ?");
            params_vec.push(Box::new(color.as_str()));
        }
        if let Some(min_rating) = filter.min_rating {
            query.push_str(" AND rating >= ?");
            params_vec.push(Box::new(f64::from(min_rating)));
        }
        query.push_str(" ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .store_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let wines = stmt
            .query_map(&params_refs[..], Self::build_wine_from_row)
            .store_context("Failed to query wines")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .store_context("Failed to read wine rows")?;

        Ok(wines)
    }
}
