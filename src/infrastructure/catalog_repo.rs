use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::catalog::{
    BoxType, BoxTypePatch, NewBoxType, NewProduct, Product, ProductFilter, ProductPatch,
};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::schema::{box_types, products};

use super::models::{
    BoxTypeChangeset, BoxTypeRow, NewBoxTypeRow, NewProductRow, ProductChangeset, ProductRow,
};

pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogRepository for DieselCatalogRepository {
    fn list_box_types(&self) -> Result<Vec<BoxType>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = box_types::table
            .filter(box_types::is_active.eq(true))
            .order((box_types::price.asc(), box_types::id.asc()))
            .select(BoxTypeRow::as_select())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(BoxType::from).collect())
    }

    fn create_box_type(&self, new: NewBoxType) -> Result<BoxType, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(box_types::table)
            .values(NewBoxTypeRow::from(new))
            .returning(BoxTypeRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn update_box_type(&self, id: i32, patch: BoxTypePatch) -> Result<Option<BoxType>, DomainError> {
        let mut conn = self.pool.get()?;

        // An empty changeset is rejected by Diesel; treat it as a read.
        let row = if patch.is_empty() {
            box_types::table
                .find(id)
                .select(BoxTypeRow::as_select())
                .first(&mut conn)
                .optional()?
        } else {
            diesel::update(box_types::table.find(id))
                .set(BoxTypeChangeset::from(patch))
                .returning(BoxTypeRow::as_returning())
                .get_result(&mut conn)
                .optional()?
        };

        Ok(row.map(BoxType::from))
    }

    fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut query = products::table
            .select(ProductRow::as_select())
            .order((products::category.asc(), products::name.asc()))
            .into_boxed();
        if let Some(category) = filter.category {
            query = query.filter(products::category.eq(category.as_str()));
        }
        if filter.available_only {
            query = query.filter(products::is_available.eq(true));
        }

        query
            .load(&mut conn)?
            .into_iter()
            .map(Product::try_from)
            .collect()
    }

    fn create_product(&self, new: NewProduct) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(products::table)
            .values(NewProductRow::from(new))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;

        row.try_into()
    }

    fn update_product(&self, id: i32, patch: ProductPatch) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = if patch.is_empty() {
            products::table
                .find(id)
                .select(ProductRow::as_select())
                .first(&mut conn)
                .optional()?
        } else {
            diesel::update(products::table.find(id))
                .set(ProductChangeset::from(patch))
                .returning(ProductRow::as_returning())
                .get_result(&mut conn)
                .optional()?
        };

        row.map(Product::try_from).transpose()
    }

    fn delete_product(&self, id: i32) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(products::table.find(id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
