//! Repository implementation for dashboard users.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        types::{BusinessId, Email, EntityStatus, UserId},
        user::{NewUser, UpdateUser, User},
    },
    models::user::{NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser},
    repository::{
        DieselRepository, ListQuery, UserReader, UserWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::users,
};

fn filtered(query: &ListQuery) -> users::BoxedQuery<'static, Sqlite> {
    let mut items = users::table
        .filter(users::business_id.eq(query.business_id.get()))
        .into_boxed();

    if let Some(status) = query.status {
        items = items.filter(users::account_status.eq(status.as_str()));
    }

    if let Some(pattern) = query.like_pattern() {
        items = items.filter(
            users::full_name
                .like(pattern.clone())
                .escape('\\')
                .or(users::email.like(pattern.clone()).escape('\\'))
                .or(users::phone.like(pattern).escape('\\')),
        );
    }

    items
}

fn into_domain(db_user: DbUser) -> RepositoryResult<User> {
    User::try_from(db_user).map_err(RepositoryError::from)
}

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId, business_id: BusinessId) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;
        users::table
            .filter(users::id.eq(id.get()))
            .filter(users::business_id.eq(business_id.get()))
            .select(DbUser::as_select())
            .first(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn get_user_by_email(
        &self,
        email: &Email,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<User>> {
        let mut conn = self.conn()?;
        users::table
            .filter(users::email.eq(email.as_str()))
            .filter(users::business_id.eq(business_id.get()))
            .select(DbUser::as_select())
            .first(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list_users(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<User>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(query).count().get_result(&mut conn)?;

        let mut items = filtered(query).order(users::id.desc());
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.limit_offset();
            items = items.limit(limit).offset(offset);
        }

        let users = items
            .select(DbUser::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, users))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let db_new_user: DbNewUser = new_user.into();

        let created = diesel::insert_into(users::table)
            .values(&db_new_user)
            .returning(DbUser::as_returning())
            .get_result(&mut conn)?;

        into_domain(created)
    }

    fn update_user(
        &self,
        id: UserId,
        business_id: BusinessId,
        updates: &UpdateUser,
    ) -> RepositoryResult<User> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateUser = updates.into();

        let updated = diesel::update(
            users::table
                .filter(users::id.eq(id.get()))
                .filter(users::business_id.eq(business_id.get())),
        )
        .set((&db_updates, users::updated_at.eq(Utc::now().naive_utc())))
        .returning(DbUser::as_returning())
        .get_result(&mut conn)?;

        into_domain(updated)
    }

    fn set_user_status(
        &self,
        id: UserId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<User> {
        let mut conn = self.conn()?;

        let updated = diesel::update(
            users::table
                .filter(users::id.eq(id.get()))
                .filter(users::business_id.eq(business_id.get())),
        )
        .set((
            users::account_status.eq(status.as_str()),
            users::updated_at.eq(Utc::now().naive_utc()),
        ))
        .returning(DbUser::as_returning())
        .get_result(&mut conn)?;

        into_domain(updated)
    }

    fn delete_user(&self, id: UserId, business_id: BusinessId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(
            users::table
                .filter(users::id.eq(id.get()))
                .filter(users::business_id.eq(business_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected > 0)
    }
}
