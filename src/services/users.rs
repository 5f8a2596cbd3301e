//! Dashboard user administration.
//!
//! Only business administrators may manage users. Emails are unique per
//! business and an administrator cannot disable or delete their own account.

use crate::SERVICE_ADMIN_ROLE;
use crate::controller::state::FetchParams;
use crate::domain::types::{BusinessId, Email, EntityStatus, UserId};
use crate::domain::user::User;
use crate::forms::user::UserPayload;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::ListPage;
use crate::repository::{UserReader, UserWriter};
use crate::services::export::to_csv;
use crate::services::{
    ServiceError, ServiceResult, business_of, ensure_role, filter_query, page_query,
};

pub fn list_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<ListPage<User>>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let business_id = business_of(user)?;

    let (total, users) = repo
        .list_users(&page_query(business_id, params))
        .map_err(|err| {
            log::error!("Failed to list users: {err}");
            err
        })?;

    Ok(ListPage::new(
        users,
        params.page_no,
        params.page_size.get(),
        total,
    ))
}

pub fn get_user<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let business_id = business_of(user)?;

    repo.get_user_by_id(UserId::new(id)?, business_id)?
        .ok_or(ServiceError::NotFound)
}

/// Fails when `email` already belongs to a user other than `except`.
fn ensure_email_free<R>(
    repo: &R,
    email: &Email,
    business_id: BusinessId,
    except: Option<UserId>,
) -> ServiceResult<()>
where
    R: UserReader + ?Sized,
{
    match repo.get_user_by_email(email, business_id)? {
        Some(existing) if Some(existing.id) != except => Err(ServiceError::Conflict(format!(
            "A user with email {email} already exists"
        ))),
        _ => Ok(()),
    }
}

/// Refuses actions that would lock the acting administrator out.
fn ensure_not_self<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: UserId,
    business_id: BusinessId,
) -> ServiceResult<()>
where
    R: UserReader + ?Sized,
{
    let target = repo
        .get_user_by_id(id, business_id)?
        .ok_or(ServiceError::NotFound)?;

    if target.email.as_str().eq_ignore_ascii_case(user.email.trim()) {
        return Err(ServiceError::Form(
            "You cannot change the status of your own account".to_string(),
        ));
    }

    Ok(())
}

pub fn create_user<R, F>(repo: &R, user: &AuthenticatedUser, input: F) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
    F: TryInto<UserPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;

    ensure_email_free(repo, &payload.email, business_id, None)?;

    let created = repo
        .create_user(&payload.into_new(business_id))
        .map_err(|err| {
            log::error!("Failed to create user: {err}");
            err
        })?;

    Ok(created)
}

pub fn update_user<R, F>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    input: F,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
    F: TryInto<UserPayload>,
    ServiceError: From<F::Error>,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let payload = input.try_into()?;
    let business_id = business_of(user)?;
    let user_id = UserId::new(id)?;

    ensure_email_free(repo, &payload.email, business_id, Some(user_id))?;

    let updated = repo
        .update_user(user_id, business_id, &payload.into_update())
        .map_err(|err| {
            log::error!("Failed to update user {id}: {err}");
            err
        })?;

    Ok(updated)
}

pub fn set_user_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    status: EntityStatus,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let business_id = business_of(user)?;
    let user_id = UserId::new(id)?;

    if !status.is_active() {
        ensure_not_self(repo, user, user_id, business_id)?;
    }

    let updated = repo
        .set_user_status(user_id, business_id, status)
        .map_err(|err| {
            log::error!("Failed to set status of user {id}: {err}");
            err
        })?;

    Ok(updated)
}

pub fn delete_user<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let business_id = business_of(user)?;
    let user_id = UserId::new(id)?;

    ensure_not_self(repo, user, user_id, business_id)?;

    if repo.delete_user(user_id, business_id)? {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

pub fn export_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &FetchParams,
) -> ServiceResult<Vec<u8>>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let business_id = business_of(user)?;

    let (_, users) = repo.list_users(&filter_query(business_id, params))?;

    to_csv(&users)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::SERVICE_ACCESS_ROLE;
    use crate::domain::types::{PersonName, UserRole};
    use crate::forms::user::UserForm;
    use crate::repository::mock::MockRepository;

    /// Builds an admin user for test scenarios.
    fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            business_id: 42,
            name: "Admin".to_string(),
            roles: vec![SERVICE_ADMIN_ROLE.to_string()],
            exp: 0,
        }
    }

    /// Builds a staff user without admin rights.
    fn staff_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "staff@example.com".to_string(),
            business_id: 42,
            name: "Staff".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    fn stored_user(id: i32, email: &str) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: UserId::new(id).unwrap(),
            business_id: BusinessId::new(42).unwrap(),
            full_name: PersonName::new("Stored").unwrap(),
            email: Email::new(email).unwrap(),
            phone: None,
            role: UserRole::Staff,
            account_status: EntityStatus::Active,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn form(email: &str) -> UserForm {
        UserForm {
            full_name: "Grace Hopper".to_string(),
            email: email.to_string(),
            ..UserForm::default()
        }
    }

    #[test]
    fn listing_requires_admin_role() {
        let mut repo = MockRepository::new();
        repo.expect_list_users().times(0);

        let params = FetchParams {
            search: None,
            status: None,
            page_no: 1,
            page_size: Default::default(),
        };
        let result = list_users(&repo, &staff_user(), &params);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .withf(|email, business_id| {
                email.as_str() == "grace@example.com" && business_id.get() == 42
            })
            .times(1)
            .returning(|email, _| Ok(Some(stored_user(5, email.as_str()))));
        repo.expect_create_user().times(0);

        let result = create_user(&repo, &admin_user(), form("Grace@Example.com"));

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn keeping_own_email_on_update_is_allowed() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_email()
            .times(1)
            .returning(|email, _| Ok(Some(stored_user(5, email.as_str()))));
        repo.expect_update_user()
            .withf(|id, _, updates| id.get() == 5 && updates.full_name.as_str() == "Grace Hopper")
            .times(1)
            .returning(|id, _, _| Ok(stored_user(id.get(), "grace@example.com")));

        let updated = update_user(&repo, &admin_user(), 5, form("grace@example.com")).unwrap();

        assert_eq!(updated.id.get(), 5);
    }

    #[test]
    fn admin_cannot_delete_own_account() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .times(1)
            .returning(|id, _| Ok(Some(stored_user(id.get(), "admin@example.com"))));
        repo.expect_delete_user().times(0);

        let result = delete_user(&repo, &admin_user(), 1);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn enabling_skips_self_check() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id().times(0);
        repo.expect_set_user_status()
            .times(1)
            .returning(|id, _, status| {
                let mut user = stored_user(id.get(), "someone@example.com");
                user.account_status = status;
                Ok(user)
            });

        let updated = set_user_status(&repo, &admin_user(), 9, EntityStatus::Active).unwrap();

        assert_eq!(updated.account_status, EntityStatus::Active);
    }
}
