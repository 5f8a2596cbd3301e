use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        brand::{Brand, NewBrand, UpdateBrand},
        types::{BusinessId, BrandId, EntityStatus},
    },
    models::brand::{
        Brand as DbBrand, NewBrand as DbNewBrand, UpdateBrand as DbUpdateBrand,
    },
    repository::{
        BrandReader, BrandWriter, DieselRepository, ListQuery,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::brands,
};

fn filtered(query: &ListQuery) -> brands::BoxedQuery<'static, Sqlite> {
    let mut items = brands::table
        .filter(brands::business_id.eq(query.business_id.get()))
        .into_boxed();

    if let Some(status) = query.status {
        items = items.filter(brands::status.eq(status.as_str()));
    }

    if let Some(pattern) = query.like_pattern() {
        items = items.filter(
            brands::name
                .like(pattern.clone())
                .escape('\\')
                .or(brands::description.like(pattern).escape('\\')),
        );
    }

    items
}

fn into_domain(db_brand: DbBrand) -> RepositoryResult<Brand> {
    Brand::try_from(db_brand).map_err(RepositoryError::from)
}

impl BrandReader for DieselRepository {
    fn get_brand_by_id(
        &self,
        id: BrandId,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<Brand>> {
        let mut conn = self.conn()?;
        brands::table
            .filter(brands::id.eq(id.get()))
            .filter(brands::business_id.eq(business_id.get()))
            .select(DbBrand::as_select())
            .first(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list_brands(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Brand>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(query).count().get_result(&mut conn)?;

        let mut items = filtered(query).order(brands::id.desc());
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.limit_offset();
            items = items.limit(limit).offset(offset);
        }

        let brands = items
            .select(DbBrand::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, brands))
    }
}

impl BrandWriter for DieselRepository {
    fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<Brand> {
        let mut conn = self.conn()?;
        let db_new: DbNewBrand = new_brand.into();

        let created = diesel::insert_into(brands::table)
            .values(&db_new)
            .returning(DbBrand::as_returning())
            .get_result(&mut conn)?;

        into_domain(created)
    }

    fn update_brand(
        &self,
        id: BrandId,
        business_id: BusinessId,
        updates: &UpdateBrand,
    ) -> RepositoryResult<Brand> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateBrand = updates.into();

        let updated = diesel::update(
            brands::table
                .filter(brands::id.eq(id.get()))
                .filter(brands::business_id.eq(business_id.get())),
        )
        .set((&db_updates, brands::updated_at.eq(Utc::now().naive_utc())))
        .returning(DbBrand::as_returning())
        .get_result(&mut conn)?;

        into_domain(updated)
    }

    fn set_brand_status(
        &self,
        id: BrandId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<Brand> {
        let mut conn = self.conn()?;

        let updated = diesel::update(
            brands::table
                .filter(brands::id.eq(id.get()))
                .filter(brands::business_id.eq(business_id.get())),
        )
        .set((
            brands::status.eq(status.as_str()),
            brands::updated_at.eq(Utc::now().naive_utc()),
        ))
        .returning(DbBrand::as_returning())
        .get_result(&mut conn)?;

        into_domain(updated)
    }

    fn delete_brand(&self, id: BrandId, business_id: BusinessId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(
            brands::table
                .filter(brands::id.eq(id.get()))
                .filter(brands::business_id.eq(business_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected > 0)
    }
}
