//! Image storage for uploads coming from the mutation modals.

use std::fs;
use std::path::Path;

use uuid::Uuid;

use crate::SERVICE_ACCESS_ROLE;
use crate::forms::upload::{UploadImageForm, UploadPayload};
use crate::models::auth::AuthenticatedUser;
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// URL prefix uploaded files are served from.
pub const UPLOADS_URL: &str = "/uploads";

/// Decodes the image, writes it under `upload_dir` with a random name and
/// returns the public URL.
pub fn upload_image(
    user: &AuthenticatedUser,
    form: UploadImageForm,
    upload_dir: &Path,
) -> ServiceResult<String> {
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let payload = UploadPayload::try_from(form)?;

    fs::create_dir_all(upload_dir).map_err(|err| {
        log::error!("Failed to create upload dir {}: {err}", upload_dir.display());
        ServiceError::Internal(err.to_string())
    })?;

    let file_name = format!("{}.{}", Uuid::new_v4(), payload.extension);
    let path = upload_dir.join(&file_name);

    fs::write(&path, &payload.bytes).map_err(|err| {
        log::error!("Failed to store upload {}: {err}", path.display());
        ServiceError::Internal(err.to_string())
    })?;

    log::info!(
        "Stored {} image of {} bytes as {file_name}",
        payload.content_type,
        payload.bytes.len()
    );

    Ok(format!("{UPLOADS_URL}/{file_name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff_user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "staff@example.com".to_string(),
            business_id: 42,
            name: "Staff".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
        }
    }

    #[test]
    fn stores_file_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let form = UploadImageForm::from_bytes(b"GIF89a", "image/gif");

        let url = upload_image(&staff_user(&[SERVICE_ACCESS_ROLE]), form, dir.path()).unwrap();

        let name = url.strip_prefix("/uploads/").unwrap();
        assert!(name.ends_with(".gif"));
        assert_eq!(fs::read(dir.path().join(name)).unwrap(), b"GIF89a");
    }

    #[test]
    fn invalid_payload_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let form = UploadImageForm::from_bytes(b"text", "text/plain");

        let result = upload_image(&staff_user(&[SERVICE_ACCESS_ROLE]), form, dir.path());

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn requires_access_role() {
        let dir = tempfile::tempdir().unwrap();
        let form = UploadImageForm::from_bytes(b"GIF89a", "image/gif");

        let result = upload_image(&staff_user(&[]), form, dir.path());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
