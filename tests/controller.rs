use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use shopdesk::SERVICE_ACCESS_ROLE;
use shopdesk::controller::modal::{DraftForm, ModalMode, MutationModal, SubmitOutcome};
use shopdesk::controller::resource::{Categories, DiskUploader, ServiceResource};
use shopdesk::controller::{ListController, Notifier, Toast, ToastKind};
use shopdesk::domain::types::EntityStatus;
use shopdesk::forms::category::CategoryForm;
use shopdesk::models::auth::AuthenticatedUser;
use shopdesk::pagination::PageSize;
use shopdesk::repository::DieselRepository;

mod common;

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Toast>>>);

impl Notifier for Recorder {
    fn notify(&self, toast: Toast) {
        self.0.borrow_mut().push(toast);
    }
}

fn staff() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "7".to_string(),
        email: "staff@example.com".to_string(),
        business_id: 1,
        name: "Staff".to_string(),
        roles: vec![SERVICE_ACCESS_ROLE.to_string()],
        exp: 0,
    }
}

fn category(name: &str) -> CategoryForm {
    CategoryForm {
        name: name.to_string(),
        ..CategoryForm::default()
    }
}

type Controller = ListController<ServiceResource<Categories>, Recorder>;

fn controller(test_db: &common::TestDb, recorder: Recorder) -> Controller {
    let service = ServiceResource::new(DieselRepository::new(test_db.pool()), staff());
    let mut controller = ListController::new(service, recorder, "Category");
    controller.mount();
    controller
}

#[test]
fn deleting_last_row_moves_to_previous_page() {
    let test_db = common::TestDb::new("deleting_last_row_moves_to_previous_page.db");
    let recorder = Recorder::default();
    let mut list = controller(&test_db, recorder.clone());

    for n in 1..=6 {
        let payload = category(&format!("Category {n}")).into_payload().unwrap();
        list.save(ModalMode::Create, payload).unwrap();
    }
    assert_eq!(list.page().total_elements, 6);

    list.set_page_size(PageSize::new(5).unwrap());
    list.set_page(2);
    assert_eq!(list.page().content.len(), 1);

    let last = list.page().content[0].clone();
    list.request_delete(last);
    list.confirm();

    assert_eq!(list.state().filter.current_page, 1);
    assert_eq!(list.page().page_no, 1);
    assert_eq!(list.page().content.len(), 5);
    assert_eq!(list.page().total_elements, 5);
    assert!(
        recorder
            .0
            .borrow()
            .iter()
            .any(|toast| toast.message == "Category deleted")
    );
}

#[test]
fn status_toggle_waits_for_confirmation() {
    let test_db = common::TestDb::new("status_toggle_waits_for_confirmation.db");
    let mut list = controller(&test_db, Recorder::default());

    let payload = category("Mugs").into_payload().unwrap();
    list.save(ModalMode::Create, payload).unwrap();
    let mugs = list.page().content[0].clone();

    list.request_status_toggle(mugs.clone());
    list.cancel_confirm();
    list.confirm();
    assert_eq!(list.page().content[0].status, EntityStatus::Active);

    list.request_status_toggle(mugs);
    list.confirm();
    assert_eq!(list.page().content[0].status, EntityStatus::Inactive);

    list.set_status_filter(Some(EntityStatus::Active));
    assert!(list.page().content.is_empty());
}

#[test]
fn search_applies_after_debounce() {
    let test_db = common::TestDb::new("search_applies_after_debounce.db");
    let mut list = controller(&test_db, Recorder::default());

    for name in ["Mugs", "Plates", "Bowls"] {
        let payload = category(name).into_payload().unwrap();
        list.save(ModalMode::Create, payload).unwrap();
    }

    let start = Instant::now();
    list.type_search("pla", start);
    list.tick(start + Duration::from_millis(100));
    assert_eq!(list.page().total_elements, 3);

    list.tick(start + Duration::from_millis(400));
    assert_eq!(list.page().total_elements, 1);
    assert_eq!(list.page().content[0].name.as_str(), "Plates");
}

#[test]
fn failed_save_is_reported() {
    let test_db = common::TestDb::new("failed_save_is_reported.db");
    let recorder = Recorder::default();
    let mut list = controller(&test_db, recorder.clone());

    let payload = category("Mugs").into_payload().unwrap();
    let service = ServiceResource::<Categories>::new(
        DieselRepository::new(test_db.pool()),
        AuthenticatedUser {
            roles: vec![],
            ..staff()
        },
    );
    let mut forbidden = ListController::new(service, recorder.clone(), "Category");

    assert!(forbidden.save(ModalMode::Create, payload).is_err());
    assert!(
        recorder
            .0
            .borrow()
            .iter()
            .any(|toast| matches!(toast.kind, ToastKind::Error))
    );

    list.mount();
    assert_eq!(list.page().total_elements, 0);
}

#[test]
fn modal_uploads_image_then_saves() {
    let test_db = common::TestDb::new("modal_uploads_image_then_saves.db");
    let upload_dir = tempfile::TempDir::new().unwrap();
    let recorder = Recorder::default();
    let mut list = controller(&test_db, recorder.clone());
    let uploader = DiskUploader::new(staff(), upload_dir.path());

    let mut modal = MutationModal::<CategoryForm>::default();
    modal.open_create();
    modal.draft_mut().unwrap().name = "Teapots".to_string();

    assert!(!modal.upload_image(&uploader, &recorder, b"\x89PNG", "text/plain", |draft, url| {
        draft.image_url = Some(url);
    }));
    assert!(modal.draft().unwrap().image_url.is_none());

    assert!(modal.upload_image(&uploader, &recorder, b"\x89PNG", "image/png", |draft, url| {
        draft.image_url = Some(url);
    }));

    let outcome = modal.submit(|mode, payload| list.save(mode, payload));
    assert_eq!(outcome, SubmitOutcome::Saved);
    assert!(!modal.is_open());

    let saved = &list.page().content[0];
    let image_url = saved.image_url.as_ref().unwrap().to_string();
    assert!(image_url.starts_with("/uploads/"));
    assert!(
        upload_dir
            .path()
            .join(image_url.trim_start_matches("/uploads/"))
            .exists()
    );
}
