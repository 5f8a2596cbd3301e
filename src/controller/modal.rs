//! Create/edit modal holding an uncommitted form draft.

use std::fmt::Display;

use crate::controller::{Notifier, Toast};
use crate::domain::Record;
use crate::forms::FormError;
use crate::forms::upload::UploadImageForm;

/// Form bound to one entity type.
///
/// `Default` is the fixed draft a create modal starts from.
pub trait DraftForm: Clone + Default {
    type Record: Record;
    type Payload;

    /// camelCase field names in the order the modal lays them out.
    const FIELDS: &'static [&'static str];

    /// Draft prefilled from an existing record for edit mode.
    fn from_record(record: &Self::Record) -> Self;

    /// Trims, strips blank optionals and validates the draft.
    fn into_payload(self) -> Result<Self::Payload, FormError>;
}

/// Upload collaborator: takes `{base64, type}`, returns the stored image URL.
pub trait ImageUploader {
    type Error: Display;

    fn upload(&self, image: UploadImageForm) -> Result<String, Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit(i32),
}

/// Inline validation failure shown next to the offending field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Option<String>,
    pub message: String,
}

impl FieldError {
    /// Attaches `err` to the first failing field of `fields`.
    pub fn new(err: &FormError, fields: &[&str]) -> Self {
        Self {
            field: err.field_in(fields),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The draft failed validation; the save callback was not called.
    Invalid,
    Saved,
    /// The save callback failed; the modal stays open on the same draft.
    Failed,
    /// Submit on a closed modal.
    Closed,
}

#[derive(Clone, Debug)]
struct OpenModal<F> {
    mode: ModalMode,
    draft: F,
    error: Option<FieldError>,
}

#[derive(Clone, Debug)]
pub struct MutationModal<F: DraftForm> {
    open: Option<OpenModal<F>>,
}

impl<F: DraftForm> Default for MutationModal<F> {
    fn default() -> Self {
        Self { open: None }
    }
}

impl<F: DraftForm> MutationModal<F> {
    pub fn open_create(&mut self) {
        if matches!(&self.open, Some(open) if open.mode == ModalMode::Create) {
            return;
        }
        self.open = Some(OpenModal {
            mode: ModalMode::Create,
            draft: F::default(),
            error: None,
        });
    }

    /// Opens on `record`; the draft is rebuilt unless the modal is already
    /// open on the same record.
    pub fn open_edit(&mut self, record: &F::Record) {
        let mode = ModalMode::Edit(record.record_id());
        if matches!(&self.open, Some(open) if open.mode == mode) {
            return;
        }
        self.open = Some(OpenModal {
            mode,
            draft: F::from_record(record),
            error: None,
        });
    }

    /// Discards the draft unconditionally.
    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn mode(&self) -> Option<ModalMode> {
        self.open.as_ref().map(|open| open.mode)
    }

    pub fn draft(&self) -> Option<&F> {
        self.open.as_ref().map(|open| &open.draft)
    }

    pub fn draft_mut(&mut self) -> Option<&mut F> {
        self.open.as_mut().map(|open| &mut open.draft)
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.open.as_ref().and_then(|open| open.error.as_ref())
    }

    /// Validates the draft and hands the payload to `save`.
    ///
    /// The modal closes only when `save` succeeds.
    pub fn submit<E>(
        &mut self,
        save: impl FnOnce(ModalMode, F::Payload) -> Result<(), E>,
    ) -> SubmitOutcome {
        let Some(open) = self.open.as_mut() else {
            return SubmitOutcome::Closed;
        };

        let payload = match open.draft.clone().into_payload() {
            Ok(payload) => payload,
            Err(err) => {
                open.error = Some(FieldError::new(&err, F::FIELDS));
                return SubmitOutcome::Invalid;
            }
        };
        open.error = None;

        match save(open.mode, payload) {
            Ok(()) => {
                self.open = None;
                SubmitOutcome::Saved
            }
            Err(_) => SubmitOutcome::Failed,
        }
    }

    /// Uploads a picked file and stores the returned URL through `apply`.
    ///
    /// On failure the field keeps its previous value and the error is logged
    /// and toasted.
    pub fn upload_image<U, N>(
        &mut self,
        uploader: &U,
        notifier: &N,
        bytes: &[u8],
        content_type: &str,
        apply: impl FnOnce(&mut F, String),
    ) -> bool
    where
        U: ImageUploader + ?Sized,
        N: Notifier + ?Sized,
    {
        let Some(open) = self.open.as_mut() else {
            return false;
        };

        match uploader.upload(UploadImageForm::from_bytes(bytes, content_type)) {
            Ok(url) => {
                apply(&mut open.draft, url);
                true
            }
            Err(err) => {
                log::error!("Failed to upload image: {err}");
                notifier.notify(Toast::error(format!("Image upload failed: {err}")));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::Utc;

    use super::*;
    use crate::domain::banner::Banner;
    use crate::domain::types::{BannerId, BannerTitle, BusinessId, EntityStatus, WebUrl};
    use crate::forms::banner::BannerForm;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Toast>>);

    impl Notifier for Recorder {
        fn notify(&self, toast: Toast) {
            self.0.borrow_mut().push(toast);
        }
    }

    struct FixedUploader(Result<String, String>);

    impl ImageUploader for FixedUploader {
        type Error = String;

        fn upload(&self, image: UploadImageForm) -> Result<String, String> {
            assert_eq!(image.content_type, "image/png");
            self.0.clone()
        }
    }

    fn banner(id: i32) -> Banner {
        let now = Utc::now().naive_utc();
        Banner {
            id: BannerId::new(id).unwrap(),
            business_id: BusinessId::new(1).unwrap(),
            title: BannerTitle::new("Sale").unwrap(),
            subtitle: None,
            image_url: WebUrl::new("/uploads/old.png").unwrap(),
            link_url: None,
            position: 0,
            status: EntityStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_required_field_never_calls_save() {
        let mut modal = MutationModal::<BannerForm>::default();
        modal.open_create();
        let called = Cell::new(false);

        let outcome = modal.submit(|_, _| {
            called.set(true);
            Ok::<(), ()>(())
        });

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert!(!called.get());
        assert!(modal.is_open());
        assert!(modal.error().is_some());
    }

    #[test]
    fn bad_url_is_reported_on_its_field() {
        let mut modal = MutationModal::<BannerForm>::default();
        modal.open_edit(&banner(5));
        if let Some(draft) = modal.draft_mut() {
            draft.link_url = Some("not a link".into());
        }

        let outcome = modal.submit(|_, _| Ok::<(), ()>(()));

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(
            modal.error().and_then(|err| err.field.as_deref()),
            Some("linkUrl")
        );
    }

    #[test]
    fn first_invalid_field_follows_layout() {
        let mut modal = MutationModal::<BannerForm>::default();
        modal.open_create();

        modal.submit(|_, _| Ok::<(), ()>(()));

        assert_eq!(
            modal.error().and_then(|err| err.field.as_deref()),
            Some("title")
        );
    }

    #[test]
    fn valid_draft_is_saved_and_closes() {
        let mut modal = MutationModal::<BannerForm>::default();
        modal.open_edit(&banner(5));
        if let Some(draft) = modal.draft_mut() {
            draft.title = "  Winter sale  ".into();
        }

        let mut saved = None;
        let outcome = modal.submit(|mode, payload| {
            saved = Some((mode, payload));
            Ok::<(), ()>(())
        });

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert!(!modal.is_open());
        let (mode, payload) = saved.unwrap();
        assert_eq!(mode, ModalMode::Edit(5));
        assert_eq!(payload.title.as_str(), "Winter sale");
    }

    #[test]
    fn failed_save_keeps_draft() {
        let mut modal = MutationModal::<BannerForm>::default();
        modal.open_edit(&banner(5));

        let outcome = modal.submit(|_, _| Err("boom"));

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(modal.mode(), Some(ModalMode::Edit(5)));
    }

    #[test]
    fn draft_resets_when_record_changes() {
        let mut modal = MutationModal::<BannerForm>::default();
        modal.open_edit(&banner(5));
        if let Some(draft) = modal.draft_mut() {
            draft.title = "Edited".into();
        }

        modal.open_edit(&banner(5));
        assert_eq!(modal.draft().map(|d| d.title.as_str()), Some("Edited"));

        modal.open_edit(&banner(6));
        assert_eq!(modal.draft().map(|d| d.title.as_str()), Some("Sale"));

        modal.close();
        modal.open_edit(&banner(6));
        assert_eq!(modal.draft().map(|d| d.title.as_str()), Some("Sale"));
    }

    #[test]
    fn upload_success_replaces_field() {
        let mut modal = MutationModal::<BannerForm>::default();
        modal.open_edit(&banner(5));
        let notifier = Recorder::default();
        let uploader = FixedUploader(Ok("/uploads/new.png".into()));

        let stored = modal.upload_image(&uploader, &notifier, b"png", "image/png", |draft, url| {
            draft.image_url = Some(url)
        });

        assert!(stored);
        assert_eq!(
            modal.draft().and_then(|d| d.image_url.as_deref()),
            Some("/uploads/new.png")
        );
        assert!(notifier.0.borrow().is_empty());
    }

    #[test]
    fn upload_failure_keeps_previous_value_and_toasts() {
        let mut modal = MutationModal::<BannerForm>::default();
        modal.open_edit(&banner(5));
        let notifier = Recorder::default();
        let uploader = FixedUploader(Err("storage offline".into()));

        let stored = modal.upload_image(&uploader, &notifier, b"png", "image/png", |draft, url| {
            draft.image_url = Some(url)
        });

        assert!(!stored);
        assert_eq!(
            modal.draft().and_then(|d| d.image_url.as_deref()),
            Some("/uploads/old.png")
        );
        let toasts = notifier.0.borrow();
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].message.contains("storage offline"));
    }
}
