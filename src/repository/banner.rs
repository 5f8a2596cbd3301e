//! Repository implementation for storefront banners.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        banner::{Banner, NewBanner, UpdateBanner},
        types::{BusinessId, BannerId, EntityStatus},
    },
    models::banner::{
        Banner as DbBanner, NewBanner as DbNewBanner, UpdateBanner as DbUpdateBanner,
    },
    repository::{
        BannerReader, BannerWriter, DieselRepository, ListQuery,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::banners,
};

fn filtered(query: &ListQuery) -> banners::BoxedQuery<'static, Sqlite> {
    let mut items = banners::table
        .filter(banners::business_id.eq(query.business_id.get()))
        .into_boxed();

    if let Some(status) = query.status {
        items = items.filter(banners::status.eq(status.as_str()));
    }

    if let Some(pattern) = query.like_pattern() {
        items = items.filter(
            banners::title
                .like(pattern.clone())
                .escape('\\')
                .or(banners::subtitle.like(pattern).escape('\\')),
        );
    }

    items
}

fn into_domain(db_banner: DbBanner) -> RepositoryResult<Banner> {
    Banner::try_from(db_banner).map_err(RepositoryError::from)
}

impl BannerReader for DieselRepository {
    fn get_banner_by_id(
        &self,
        id: BannerId,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<Banner>> {
        let mut conn = self.conn()?;
        banners::table
            .filter(banners::id.eq(id.get()))
            .filter(banners::business_id.eq(business_id.get()))
            .select(DbBanner::as_select())
            .first(&mut conn)
            .optional()?
            .map(into_domain)
            .transpose()
    }

    fn list_banners(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Banner>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(query).count().get_result(&mut conn)?;

        let mut items = filtered(query).order((banners::position.asc(), banners::id.desc()));
        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.limit_offset();
            items = items.limit(limit).offset(offset);
        }

        let banners = items
            .select(DbBanner::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, banners))
    }
}

impl BannerWriter for DieselRepository {
    fn create_banner(&self, new_banner: &NewBanner) -> RepositoryResult<Banner> {
        let mut conn = self.conn()?;
        let db_new: DbNewBanner = new_banner.into();

        let created = diesel::insert_into(banners::table)
            .values(&db_new)
            .returning(DbBanner::as_returning())
            .get_result(&mut conn)?;

        into_domain(created)
    }

    fn update_banner(
        &self,
        id: BannerId,
        business_id: BusinessId,
        updates: &UpdateBanner,
    ) -> RepositoryResult<Banner> {
        let mut conn = self.conn()?;
        let db_updates: DbUpdateBanner = updates.into();

        let updated = diesel::update(
            banners::table
                .filter(banners::id.eq(id.get()))
                .filter(banners::business_id.eq(business_id.get())),
        )
        .set((&db_updates, banners::updated_at.eq(Utc::now().naive_utc())))
        .returning(DbBanner::as_returning())
        .get_result(&mut conn)?;

        into_domain(updated)
    }

    fn set_banner_status(
        &self,
        id: BannerId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<Banner> {
        let mut conn = self.conn()?;

        let updated = diesel::update(
            banners::table
                .filter(banners::id.eq(id.get()))
                .filter(banners::business_id.eq(business_id.get())),
        )
        .set((
            banners::status.eq(status.as_str()),
            banners::updated_at.eq(Utc::now().naive_utc()),
        ))
        .returning(DbBanner::as_returning())
        .get_result(&mut conn)?;

        into_domain(updated)
    }

    fn delete_banner(&self, id: BannerId, business_id: BusinessId) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(
            banners::table
                .filter(banners::id.eq(id.get()))
                .filter(banners::business_id.eq(business_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected > 0)
    }
}
