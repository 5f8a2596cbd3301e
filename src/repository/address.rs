use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::DbConnection,
    domain::{
        address::{Address, NewAddress, UpdateAddress},
        types::{AddressId, BusinessId, EntityStatus},
    },
    models::address::{
        Address as DbAddress, NewAddress as DbNewAddress, UpdateAddress as DbUpdateAddress,
    },
    repository::{
        AddressReader, AddressWriter, DieselRepository, ListQuery,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::addresses,
};

fn filtered(query: &ListQuery) -> addresses::BoxedQuery<'static, Sqlite> {
    let mut items = addresses::table
        .filter(addresses::business_id.eq(query.business_id.get()))
        .into_boxed();

    if let Some(status) = query.status {
        items = items.filter(addresses::status.eq(status.as_str()));
    }

    if let Some(pattern) = query.like_pattern() {
        items = items.filter(
            addresses::label
                .like(pattern.clone())
                .escape('\\')
                .or(addresses::street.like(pattern.clone()).escape('\\'))
                .or(addresses::city.like(pattern.clone()).escape('\\'))
                .or(addresses::country.like(pattern).escape('\\')),
        );
    }

    items
}

fn into_domain(db_address: DbAddress) -> RepositoryResult<Address> {
    Address::try_from(db_address).map_err(RepositoryError::from)
}

/// Drops the default flag from every address of the business.
fn clear_default(conn: &mut DbConnection, business_id: i32) -> QueryResult<usize> {
    diesel::update(
        addresses::table
            .filter(addresses::business_id.eq(business_id))
            .filter(addresses::is_default.eq(true)),
    )
    .set(addresses::is_default.eq(false))
    .execute(conn)
}

impl AddressReader for DieselRepository {
    fn get_address_by_id(
        &self,
        id: AddressId,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<Address>> {
        let mut conn = self.conn()?;
        addresses::table
            .filter(addresses::id.eq(id.get()))
            .filter(addresses::business_id.eq(business_id.get()))
            .select(DbAddress::as_select())
            .first(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list_addresses(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Address>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(query).count().get_result(&mut conn)?;

        let mut items = filtered(query).order((addresses::is_default.desc(), addresses::id.desc()));
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.limit_offset();
            items = items.limit(limit).offset(offset);
        }

        let addresses = items
            .select(DbAddress::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, addresses))
    }
}

impl AddressWriter for DieselRepository {
    fn create_address(&self, new_address: &NewAddress) -> RepositoryResult<Address> {
        let mut conn = self.conn()?;
        let db_new: DbNewAddress = new_address.into();

        let created = conn.transaction::<DbAddress, diesel::result::Error, _>(|conn| {
            if db_new.is_default {
                clear_default(conn, db_new.business_id)?;
            }

            diesel::insert_into(addresses::table)
                .values(&db_new)
                .returning(DbAddress::as_returning())
                .get_result(conn)
        })?;

        into_domain(created)
    }

    fn update_address(
        &self,
        id: AddressId,
        business_id: BusinessId,
        updates: &UpdateAddress,
    ) -> RepositoryResult<Address> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateAddress = updates.into();

        let updated = conn.transaction::<DbAddress, diesel::result::Error, _>(|conn| {
            if db_updates.is_default {
                clear_default(conn, business_id.get())?;
            }

            diesel::update(
                addresses::table
                    .filter(addresses::id.eq(id.get()))
                    .filter(addresses::business_id.eq(business_id.get())),
            )
            .set((&db_updates, addresses::updated_at.eq(Utc::now().naive_utc())))
            .returning(DbAddress::as_returning())
            .get_result(conn)
        })?;

        into_domain(updated)
    }

    fn set_address_status(
        &self,
        id: AddressId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<Address> {
        let mut conn = self.conn()?;

        let updated = diesel::update(
            addresses::table
                .filter(addresses::id.eq(id.get()))
                .filter(addresses::business_id.eq(business_id.get())),
        )
        .set((
            addresses::status.eq(status.as_str()),
            addresses::updated_at.eq(Utc::now().naive_utc()),
        ))
        .returning(DbAddress::as_returning())
        .get_result(&mut conn)?;

        into_domain(updated)
    }

    fn delete_address(&self, id: AddressId, business_id: BusinessId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(
            addresses::table
                .filter(addresses::id.eq(id.get()))
                .filter(addresses::business_id.eq(business_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected > 0)
    }
}
