use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::DbConnection,
    domain::{
        product::{NewProduct, Product, UpdateProduct},
        types::{BusinessId, EntityStatus, ProductId},
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
        into_domain,
    },
    repository::{
        DieselRepository, ListQuery, ProductReader, ProductWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{brands, categories, products},
};

fn filtered(query: &ListQuery) -> products::BoxedQuery<'static, Sqlite> {
    let mut items = products::table
        .filter(products::business_id.eq(query.business_id.get()))
        .into_boxed();

    if let Some(status) = query.status {
        items = items.filter(products::status.eq(status.as_str()));
    }

    if let Some(pattern) = query.like_pattern() {
        items = items.filter(
            products::name
                .like(pattern.clone())
                .escape('\\')
                .or(products::sku.like(pattern).escape('\\')),
        );
    }

    items
}

/// Attaches category and brand names to the loaded rows.
fn with_names(
    conn: &mut DbConnection,
    rows: Vec<DbProduct>,
) -> RepositoryResult<Vec<Product>> {
    let category_ids: Vec<i32> = rows.iter().filter_map(|p| p.category_id).collect();
    let brand_ids: Vec<i32> = rows.iter().filter_map(|p| p.brand_id).collect();

    let category_names: HashMap<i32, String> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        categories::table
            .filter(categories::id.eq_any(&category_ids))
            .select((categories::id, categories::name))
            .load::<(i32, String)>(conn)?
            .into_iter()
            .collect()
    };

    let brand_names: HashMap<i32, String> = if brand_ids.is_empty() {
        HashMap::new()
    } else {
        brands::table
            .filter(brands::id.eq_any(&brand_ids))
            .select((brands::id, brands::name))
            .load::<(i32, String)>(conn)?
            .into_iter()
            .collect()
    };

    rows.into_iter()
        .map(|product| {
            let category_name = product
                .category_id
                .and_then(|id| category_names.get(&id).cloned());
            let brand_name = product
                .brand_id
                .and_then(|id| brand_names.get(&id).cloned());
            into_domain((product, category_name, brand_name)).map_err(RepositoryError::from)
        })
        .collect()
}

fn single(conn: &mut DbConnection, row: DbProduct) -> RepositoryResult<Product> {
    with_names(conn, vec![row])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(
        &self,
        id: ProductId,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<Product>> {
        let mut conn = self.conn()?;
        let row = products::table
            .filter(products::id.eq(id.get()))
            .filter(products::business_id.eq(business_id.get()))
            .select(DbProduct::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(|row| single(&mut conn, row)).transpose()
    }

    fn list_products(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(query).count().get_result(&mut conn)?;

        let mut items = filtered(query).order(products::id.desc());
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.limit_offset();
            items = items.limit(limit).offset(offset);
        }

        let rows = items.select(DbProduct::as_select()).load(&mut conn)?;
        let products = with_names(&mut conn, rows)?;

        Ok((total as usize, products))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;
        let db_new: DbNewProduct = new_product.into();

        let created = diesel::insert_into(products::table)
            .values(&db_new)
            .returning(DbProduct::as_returning())
            .get_result(&mut conn)?;

        single(&mut conn, created)
    }

    fn update_product(
        &self,
        id: ProductId,
        business_id: BusinessId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateProduct = updates.into();

        let updated = diesel::update(
            products::table
                .filter(products::id.eq(id.get()))
                .filter(products::business_id.eq(business_id.get())),
        )
        .set((&db_updates, products::updated_at.eq(Utc::now().naive_utc())))
        .returning(DbProduct::as_returning())
        .get_result(&mut conn)?;

        single(&mut conn, updated)
    }

    fn set_product_status(
        &self,
        id: ProductId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<Product> {
        let mut conn = self.conn()?;

        let updated = diesel::update(
            products::table
                .filter(products::id.eq(id.get()))
                .filter(products::business_id.eq(business_id.get())),
        )
        .set((
            products::status.eq(status.as_str()),
            products::updated_at.eq(Utc::now().naive_utc()),
        ))
        .returning(DbProduct::as_returning())
        .get_result(&mut conn)?;

        single(&mut conn, updated)
    }

    fn delete_product(&self, id: ProductId, business_id: BusinessId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(
            products::table
                .filter(products::id.eq(id.get()))
                .filter(products::business_id.eq(business_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected > 0)
    }
}
