use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        category::{Category, NewCategory, UpdateCategory},
        types::{BusinessId, CategoryId, EntityStatus},
    },
    models::category::{
        Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
    },
    repository::{
        CategoryReader, CategoryWriter, DieselRepository, ListQuery,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::categories,
};

fn filtered(query: &ListQuery) -> categories::BoxedQuery<'static, Sqlite> {
    let mut items = categories::table
        .filter(categories::business_id.eq(query.business_id.get()))
        .into_boxed();

    if let Some(status) = query.status {
        items = items.filter(categories::status.eq(status.as_str()));
    }

    if let Some(pattern) = query.like_pattern() {
        items = items.filter(
            categories::name
                .like(pattern.clone())
                .escape('\\')
                .or(categories::description.like(pattern).escape('\\')),
        );
    }

    items
}

fn into_domain(db_category: DbCategory) -> RepositoryResult<Category> {
    Category::try_from(db_category).map_err(RepositoryError::from)
}

impl CategoryReader for DieselRepository {
    fn get_category_by_id(
        &self,
        id: CategoryId,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<Category>> {
        let mut conn = self.conn()?;
        categories::table
            .filter(categories::id.eq(id.get()))
            .filter(categories::business_id.eq(business_id.get()))
            .select(DbCategory::as_select())
            .first(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list_categories(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Category>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(query).count().get_result(&mut conn)?;

        let mut items = filtered(query).order(categories::id.desc());
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.limit_offset();
            items = items.limit(limit).offset(offset);
        }

        let categories = items
            .select(DbCategory::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, categories))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category> {
        let mut conn = self.conn()?;
        let db_new: DbNewCategory = new_category.into();

        let created = diesel::insert_into(categories::table)
            .values(&db_new)
            .returning(DbCategory::as_returning())
            .get_result(&mut conn)?;

        into_domain(created)
    }

    fn update_category(
        &self,
        id: CategoryId,
        business_id: BusinessId,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateCategory = updates.into();

        let updated = diesel::update(
            categories::table
                .filter(categories::id.eq(id.get()))
                .filter(categories::business_id.eq(business_id.get())),
        )
        .set((&db_updates, categories::updated_at.eq(Utc::now().naive_utc())))
        .returning(DbCategory::as_returning())
        .get_result(&mut conn)?;

        into_domain(updated)
    }

    fn set_category_status(
        &self,
        id: CategoryId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<Category> {
        let mut conn = self.conn()?;

        let updated = diesel::update(
            categories::table
                .filter(categories::id.eq(id.get()))
                .filter(categories::business_id.eq(business_id.get())),
        )
        .set((
            categories::status.eq(status.as_str()),
            categories::updated_at.eq(Utc::now().naive_utc()),
        ))
        .returning(DbCategory::as_returning())
        .get_result(&mut conn)?;

        into_domain(updated)
    }

    fn delete_category(&self, id: CategoryId, business_id: BusinessId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(
            categories::table
                .filter(categories::id.eq(id.get()))
                .filter(categories::business_id.eq(business_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected > 0)
    }
}
