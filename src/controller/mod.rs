//! Generic paginated-resource controller shared by every admin table.
//!
//! A [`ListController`] owns the list state of one entity type, debounces the
//! search box, runs the confirmation flow for deletes and status toggles, and
//! reports every outcome through a [`Notifier`]. Entity specifics come from a
//! [`ResourceService`] implementation.

use std::fmt::Display;
use std::time::{Duration, Instant};

use crate::domain::Record;
use crate::domain::types::EntityStatus;
use crate::pagination::{ListPage, PageSize};

pub mod confirm;
pub mod debounce;
pub mod modal;
#[cfg(feature = "server")]
pub mod resource;
pub mod state;

use confirm::{ConfirmDialog, ConfirmIntent};
use debounce::SearchDebouncer;
use modal::ModalMode;
use state::{Effect, FetchParams, FetchRequest, FilterChange, ListAction, ListState};

/// Data access for one entity type.
pub trait ResourceService {
    type Record: Record + Clone;
    type Payload;
    type Error: Display;

    fn fetch(&self, params: &FetchParams) -> Result<ListPage<Self::Record>, Self::Error>;
    fn create(&self, payload: Self::Payload) -> Result<Self::Record, Self::Error>;
    fn update(&self, id: i32, payload: Self::Payload) -> Result<Self::Record, Self::Error>;
    fn update_status(&self, id: i32, status: EntityStatus) -> Result<Self::Record, Self::Error>;
    fn delete(&self, id: i32) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPosition {
    TopRight,
    TopCenter,
    BottomRight,
}

/// Transient notification shown after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub duration: Duration,
    pub position: ToastPosition,
}

impl Toast {
    pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);

    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration: Self::DEFAULT_DURATION,
            position: ToastPosition::TopRight,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }
}

pub trait Notifier {
    fn notify(&self, toast: Toast);
}

/// Notifier that only writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => log::warn!("{}", toast.message),
            ToastKind::Success | ToastKind::Info => log::info!("{}", toast.message),
        }
    }
}

pub struct ListController<S: ResourceService, N: Notifier> {
    service: S,
    notifier: N,
    label: &'static str,
    state: ListState<S::Record>,
    debouncer: SearchDebouncer,
    dialog: ConfirmDialog<S::Record>,
}

impl<S: ResourceService, N: Notifier> ListController<S, N> {
    /// `label` names the entity in toasts, e.g. "Product".
    pub fn new(service: S, notifier: N, label: &'static str) -> Self {
        Self {
            service,
            notifier,
            label,
            state: ListState::default(),
            debouncer: SearchDebouncer::default(),
            dialog: ConfirmDialog::default(),
        }
    }

    pub fn state(&self) -> &ListState<S::Record> {
        &self.state
    }

    pub fn page(&self) -> &ListPage<S::Record> {
        &self.state.page
    }

    pub fn dialog(&self) -> &ConfirmDialog<S::Record> {
        &self.dialog
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Initial load.
    pub fn mount(&mut self) {
        self.dispatch(ListAction::Refresh);
    }

    pub fn dispatch(&mut self, action: ListAction<S::Record>) {
        match self.state.reduce(action) {
            Effect::None => {}
            Effect::Fetch(request) | Effect::Navigate(request) => self.run_fetch(request),
        }
    }

    /// Issues a fetch without running it, for callers that complete
    /// requests out of band.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.state.begin_fetch()
    }

    /// Applies a fetch result; stale results are dropped.
    pub fn complete_fetch(
        &mut self,
        request: FetchRequest,
        result: Result<ListPage<S::Record>, S::Error>,
    ) {
        let action = match result {
            Ok(page) => ListAction::ListLoaded {
                ticket: request.ticket,
                page,
            },
            Err(err) => {
                if self.state.is_current(request.ticket) {
                    self.fail(&format!("Failed to load {} list", self.label), &err);
                }
                ListAction::FetchFailed {
                    ticket: request.ticket,
                }
            }
        };
        self.dispatch(action);
    }

    fn run_fetch(&mut self, request: FetchRequest) {
        let result = self.service.fetch(&request.params);
        self.complete_fetch(request, result);
    }

    fn fail(&self, context: &str, err: &S::Error) {
        log::error!("{context}: {err}");
        self.notifier.notify(Toast::error(format!("{context}: {err}")));
    }

    /// Records a keystroke in the search box.
    pub fn type_search(&mut self, value: impl Into<String>, now: Instant) {
        let value = value.into();
        self.state.filter.search_query = value.clone();
        self.debouncer.input(value, now);
    }

    /// Applies the search text once it has been quiet for the debounce window.
    pub fn tick(&mut self, now: Instant) {
        if let Some(term) = self.debouncer.poll(now) {
            self.dispatch(ListAction::FilterChanged(FilterChange::Search(term)));
        }
    }

    pub fn set_status_filter(&mut self, status: Option<EntityStatus>) {
        self.dispatch(ListAction::FilterChanged(FilterChange::Status(status)));
    }

    pub fn set_page(&mut self, page: usize) {
        self.dispatch(ListAction::PageChanged(page));
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.dispatch(ListAction::PageSizeChanged(size));
    }

    pub fn create(&mut self, payload: S::Payload) -> Result<(), S::Error> {
        match self.service.create(payload) {
            Ok(record) => {
                self.dispatch(ListAction::RecordCreated(record));
                self.notifier
                    .notify(Toast::success(format!("{} created", self.label)));
                Ok(())
            }
            Err(err) => {
                self.fail(&format!("Failed to create {}", self.label), &err);
                Err(err)
            }
        }
    }

    pub fn update(&mut self, id: i32, payload: S::Payload) -> Result<(), S::Error> {
        match self.service.update(id, payload) {
            Ok(record) => {
                self.dispatch(ListAction::RecordUpdated(record));
                self.notifier
                    .notify(Toast::success(format!("{} updated", self.label)));
                Ok(())
            }
            Err(err) => {
                self.fail(&format!("Failed to update {}", self.label), &err);
                Err(err)
            }
        }
    }

    /// Save callback for a [`modal::MutationModal`] bound to this list.
    pub fn save(&mut self, mode: ModalMode, payload: S::Payload) -> Result<(), S::Error> {
        match mode {
            ModalMode::Create => self.create(payload),
            ModalMode::Edit(id) => self.update(id, payload),
        }
    }

    pub fn request_delete(&mut self, record: S::Record) {
        self.dialog.open(ConfirmIntent::Delete, record);
    }

    pub fn request_status_toggle(&mut self, record: S::Record) {
        self.dialog.open(ConfirmIntent::ToggleStatus, record);
    }

    /// Closes the dialog and drops the held record.
    pub fn cancel_confirm(&mut self) {
        self.dialog.cancel();
    }

    /// Carries out the action held by the open dialog.
    pub fn confirm(&mut self) {
        let Some((intent, target)) = self.dialog.take() else {
            return;
        };
        let id = target.record_id();

        match intent {
            ConfirmIntent::Delete => match self.service.delete(id) {
                Ok(()) => {
                    self.dispatch(ListAction::RecordDeleted(id));
                    self.notifier
                        .notify(Toast::success(format!("{} deleted", self.label)));
                }
                Err(err) => self.fail(&format!("Failed to delete {}", self.label), &err),
            },
            ConfirmIntent::ToggleStatus => {
                let status = target.status().toggled();
                match self.service.update_status(id, status) {
                    Ok(record) => {
                        self.dispatch(ListAction::RecordUpdated(record));
                        self.notifier.notify(Toast::success(format!(
                            "{} is now {}",
                            self.label,
                            status.as_str().to_lowercase()
                        )));
                    }
                    Err(err) => {
                        self.fail(&format!("Failed to change {} status", self.label), &err);
                        self.dispatch(ListAction::Refresh);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::pagination::PAGE_SIZE_OPTIONS;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: i32,
        status: EntityStatus,
    }

    impl Record for Item {
        fn record_id(&self) -> i32 {
            self.id
        }

        fn status(&self) -> EntityStatus {
            self.status
        }
    }

    /// In-memory service over a shared vector, newest first.
    #[derive(Clone, Default)]
    struct FakeService {
        items: Rc<RefCell<Vec<Item>>>,
        fetches: Rc<RefCell<Vec<FetchParams>>>,
        fail_status: bool,
    }

    impl FakeService {
        fn with_items(count: i32) -> Self {
            let service = Self::default();
            *service.items.borrow_mut() = (1..=count)
                .rev()
                .map(|id| Item {
                    id,
                    status: EntityStatus::Active,
                })
                .collect();
            service
        }
    }

    impl ResourceService for FakeService {
        type Record = Item;
        type Payload = EntityStatus;
        type Error = String;

        fn fetch(&self, params: &FetchParams) -> Result<ListPage<Item>, String> {
            self.fetches.borrow_mut().push(params.clone());
            let items = self.items.borrow();
            let size = params.page_size.get();
            let content = items
                .iter()
                .skip((params.page_no - 1) * size)
                .take(size)
                .cloned()
                .collect();
            Ok(ListPage::new(content, params.page_no, size, items.len()))
        }

        fn create(&self, status: EntityStatus) -> Result<Item, String> {
            let mut items = self.items.borrow_mut();
            let id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
            let item = Item { id, status };
            items.insert(0, item.clone());
            Ok(item)
        }

        fn update(&self, id: i32, status: EntityStatus) -> Result<Item, String> {
            self.update_status(id, status)
        }

        fn update_status(&self, id: i32, status: EntityStatus) -> Result<Item, String> {
            if self.fail_status {
                return Err("database is locked".into());
            }
            let mut items = self.items.borrow_mut();
            let item = items
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| "not found".to_string())?;
            item.status = status;
            Ok(item.clone())
        }

        fn delete(&self, id: i32) -> Result<(), String> {
            self.items.borrow_mut().retain(|i| i.id != id);
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Toast>>>);

    impl Notifier for Recorder {
        fn notify(&self, toast: Toast) {
            self.0.borrow_mut().push(toast);
        }
    }

    fn controller(service: FakeService) -> (ListController<FakeService, Recorder>, Recorder) {
        let recorder = Recorder::default();
        let mut controller = ListController::new(service, recorder.clone(), "Banner");
        controller.mount();
        (controller, recorder)
    }

    #[test]
    fn page_size_change_always_returns_to_first_page() {
        for size in PAGE_SIZE_OPTIONS {
            let (mut controller, _) = controller(FakeService::with_items(60));
            controller.set_page(2);
            controller.set_page_size(PageSize::new(size).unwrap());

            assert_eq!(controller.state().filter.current_page, 1);
            let fetches = controller.service().fetches.borrow();
            let last = fetches.last().unwrap();
            assert_eq!(last.page_no, 1);
            assert_eq!(last.page_size.get(), size);
        }
    }

    #[test]
    fn create_prepends_and_counts() {
        let (mut controller, toasts) = controller(FakeService::with_items(3));
        let before = controller.page().total_elements;

        controller.create(EntityStatus::Active).unwrap();

        assert_eq!(controller.page().total_elements, before + 1);
        assert_eq!(controller.page().content[0].id, 4);
        assert_eq!(toasts.0.borrow().last().unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn deleting_sole_item_on_second_page_loads_first_page() {
        let (mut controller, _) = controller(FakeService::with_items(11));
        controller.set_page(2);
        assert_eq!(controller.page().content.len(), 1);
        let target = controller.page().content[0].clone();
        controller.service().fetches.borrow_mut().clear();

        controller.request_delete(target);
        controller.confirm();

        let fetches = controller.service().fetches.borrow();
        assert_eq!(fetches.len(), 1);
        assert_eq!(fetches[0].page_no, 1);
        assert_eq!(controller.state().filter.current_page, 1);
        assert_eq!(controller.page().content.len(), 10);
        assert!(controller.page().content.iter().all(|item| item.id != 1));
    }

    #[test]
    fn search_keystrokes_fetch_once_per_quiet_window() {
        let (mut controller, _) = controller(FakeService::with_items(3));
        let start = Instant::now();
        controller.service().fetches.borrow_mut().clear();

        for (offset, text) in [(0, "s"), (100, "sa"), (250, "sal"), (500, "sale")] {
            let now = start + Duration::from_millis(offset);
            controller.tick(now);
            controller.type_search(text, now);
        }
        controller.tick(start + Duration::from_millis(850));
        controller.tick(start + Duration::from_millis(900));
        controller.tick(start + Duration::from_millis(2000));

        let fetches = controller.service().fetches.borrow();
        assert_eq!(fetches.len(), 1);
        assert_eq!(fetches[0].search.as_deref(), Some("sale"));
        assert_eq!(fetches[0].page_no, 1);
    }

    #[test]
    fn status_toggle_flips_only_after_success() {
        let (mut controller, _) = controller(FakeService::with_items(2));
        let target = controller.page().content[0].clone();

        controller.request_status_toggle(target.clone());
        assert_eq!(controller.dialog().confirm_label(), Some("Disable"));
        assert_eq!(controller.page().content[0].status, EntityStatus::Active);

        controller.confirm();

        assert!(!controller.dialog().is_open());
        assert_eq!(controller.page().content[0].status, EntityStatus::Inactive);
    }

    #[test]
    fn cancelled_toggle_changes_nothing() {
        let (mut controller, _) = controller(FakeService::with_items(2));
        let target = controller.page().content[0].clone();

        controller.request_status_toggle(target);
        controller.cancel_confirm();
        controller.confirm();

        assert_eq!(controller.page().content[0].status, EntityStatus::Active);
    }

    #[test]
    fn failed_toggle_refetches_and_toasts() {
        let mut service = FakeService::with_items(2);
        service.fail_status = true;
        let (mut controller, toasts) = controller(service);
        let target = controller.page().content[0].clone();
        controller.service().fetches.borrow_mut().clear();

        controller.request_status_toggle(target);
        controller.confirm();

        assert_eq!(controller.service().fetches.borrow().len(), 1);
        assert_eq!(controller.page().content[0].status, EntityStatus::Active);
        let toasts = toasts.0.borrow();
        assert_eq!(toasts.last().unwrap().kind, ToastKind::Error);
        assert!(toasts.last().unwrap().message.contains("database is locked"));
    }

    #[test]
    fn out_of_order_responses_keep_latest() {
        let (mut controller, toasts) = controller(FakeService::with_items(30));
        let slow = controller.begin_fetch();
        let fast = controller.begin_fetch();

        let fast_page = ListPage::new(
            vec![Item {
                id: 99,
                status: EntityStatus::Active,
            }],
            1,
            10,
            1,
        );
        controller.complete_fetch(fast, Ok(fast_page));
        controller.complete_fetch(slow, Ok(ListPage::empty(10)));

        assert_eq!(controller.page().content[0].id, 99);
        assert!(!controller.state().loading);

        let stale = controller.begin_fetch();
        controller.begin_fetch();
        controller.complete_fetch(stale, Err("timeout".into()));
        assert!(toasts.0.borrow().is_empty());
    }
}
