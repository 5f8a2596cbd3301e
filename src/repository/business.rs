use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        business::{BusinessProfile, SaveBusinessProfile},
        types::BusinessId,
    },
    models::business::{
        BusinessProfile as DbBusinessProfile, SaveBusinessProfile as DbSaveBusinessProfile,
    },
    repository::{
        BusinessReader, BusinessWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::businesses,
};

impl BusinessReader for DieselRepository {
    fn get_business_profile(
        &self,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<BusinessProfile>> {
        let mut conn = self.conn()?;
        businesses::table
            .filter(businesses::business_id.eq(business_id.get()))
            .select(DbBusinessProfile::as_select())
            .first(&mut conn)
            .optional()?
            .map(|profile| BusinessProfile::try_from(profile).map_err(RepositoryError::from))
            .transpose()
    }
}

impl BusinessWriter for DieselRepository {
    fn save_business_profile(
        &self,
        profile: &SaveBusinessProfile,
    ) -> RepositoryResult<BusinessProfile> {
        let mut conn = self.conn()?;
        let db_profile = DbSaveBusinessProfile::from_domain(profile, Utc::now().naive_utc());

        let saved = diesel::insert_into(businesses::table)
            .values(&db_profile)
            .on_conflict(businesses::business_id)
            .do_update()
            .set(&db_profile)
            .returning(DbBusinessProfile::as_returning())
            .get_result(&mut conn)?;

        BusinessProfile::try_from(saved).map_err(RepositoryError::from)
    }
}
