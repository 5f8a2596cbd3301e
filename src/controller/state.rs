//! List state and the reducer that drives every paginated admin table.
//!
//! All transitions go through [`ListState::reduce`], which mutates the state
//! in place and returns the [`Effect`] the owner has to carry out. Fetches are
//! tagged with a [`FetchTicket`]; only the response for the most recently
//! issued ticket is applied.

use crate::domain::Record;
use crate::domain::types::EntityStatus;
use crate::pagination::{ListPage, PageSize, page_after_delete};

/// Monotonic token attached to every issued fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Parameters sent to the list service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchParams {
    pub search: Option<String>,
    pub status: Option<EntityStatus>,
    pub page_no: usize,
    pub page_size: PageSize,
}

/// A fetch the owner must perform and hand back with the same ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub params: FetchParams,
}

/// Search, status and pagination inputs of one table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListFilter {
    /// Raw text as typed.
    pub search_query: String,
    /// Text after the debounce window settled; this is what gets fetched.
    pub debounced_search_query: String,
    pub status_filter: Option<EntityStatus>,
    pub current_page: usize,
    pub items_per_page: PageSize,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            debounced_search_query: String::new(),
            status_filter: None,
            current_page: 1,
            items_per_page: PageSize::default(),
        }
    }
}

impl ListFilter {
    pub fn params(&self) -> FetchParams {
        let search = self.debounced_search_query.trim();
        FetchParams {
            search: (!search.is_empty()).then(|| search.to_string()),
            status: self.status_filter,
            page_no: self.current_page,
            page_size: self.items_per_page,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterChange {
    /// The debounced search text settled on a new value.
    Search(String),
    Status(Option<EntityStatus>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ListAction<T> {
    /// Reload the current page, e.g. on mount or to resynchronize.
    Refresh,
    ListLoaded {
        ticket: FetchTicket,
        page: ListPage<T>,
    },
    FetchFailed {
        ticket: FetchTicket,
    },
    RecordCreated(T),
    RecordUpdated(T),
    RecordDeleted(i32),
    FilterChanged(FilterChange),
    PageChanged(usize),
    PageSizeChanged(PageSize),
}

/// Work requested by the reducer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Fetch(FetchRequest),
    /// The current page became invalid; load the page carried by the request.
    Navigate(FetchRequest),
}

#[derive(Clone, Debug)]
pub struct ListState<T> {
    pub page: ListPage<T>,
    pub filter: ListFilter,
    pub loading: bool,
    issued: u64,
    latest: Option<FetchTicket>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        let filter = ListFilter::default();
        Self {
            page: ListPage::empty(filter.items_per_page.get()),
            filter,
            loading: false,
            issued: 0,
            latest: None,
        }
    }
}

impl<T: Record> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh ticket for the current filter and marks the list loading.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.issued += 1;
        let ticket = FetchTicket(self.issued);
        self.latest = Some(ticket);
        self.loading = true;
        FetchRequest {
            ticket,
            params: self.filter.params(),
        }
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest == Some(ticket)
    }

    pub fn reduce(&mut self, action: ListAction<T>) -> Effect {
        match action {
            ListAction::Refresh => Effect::Fetch(self.begin_fetch()),
            ListAction::ListLoaded { ticket, page } => {
                if !self.is_current(ticket) {
                    log::debug!("Dropping stale list response #{}", ticket.get());
                    return Effect::None;
                }
                self.page = page;
                self.loading = false;
                Effect::None
            }
            ListAction::FetchFailed { ticket } => {
                if self.is_current(ticket) {
                    self.loading = false;
                }
                Effect::None
            }
            ListAction::RecordCreated(record) => {
                self.page.content.insert(0, record);
                self.page.content.truncate(self.page.page_size);
                self.page.total_elements += 1;
                self.page.recompute();
                Effect::None
            }
            ListAction::RecordUpdated(record) => {
                let id = record.record_id();
                if let Some(slot) = self
                    .page
                    .content
                    .iter_mut()
                    .find(|item| item.record_id() == id)
                {
                    *slot = record;
                }
                Effect::None
            }
            ListAction::RecordDeleted(id) => {
                let items_on_page = self.page.content.len();
                self.page.content.retain(|item| item.record_id() != id);
                if self.page.content.len() == items_on_page {
                    return Effect::Fetch(self.begin_fetch());
                }
                self.page.total_elements = self.page.total_elements.saturating_sub(1);
                self.page.recompute();

                match page_after_delete(self.filter.current_page, items_on_page) {
                    Some(previous) => {
                        self.filter.current_page = previous;
                        Effect::Navigate(self.begin_fetch())
                    }
                    None => Effect::Fetch(self.begin_fetch()),
                }
            }
            ListAction::FilterChanged(FilterChange::Search(term)) => {
                if self.filter.debounced_search_query == term {
                    return Effect::None;
                }
                self.filter.debounced_search_query = term;
                self.filter.current_page = 1;
                Effect::Fetch(self.begin_fetch())
            }
            ListAction::FilterChanged(FilterChange::Status(status)) => {
                if self.filter.status_filter == status {
                    return Effect::None;
                }
                self.filter.status_filter = status;
                self.filter.current_page = 1;
                Effect::Fetch(self.begin_fetch())
            }
            ListAction::PageChanged(page) => {
                let page = page.max(1);
                if self.filter.current_page == page {
                    return Effect::None;
                }
                self.filter.current_page = page;
                Effect::Fetch(self.begin_fetch())
            }
            ListAction::PageSizeChanged(size) => {
                self.filter.items_per_page = size;
                self.filter.current_page = 1;
                Effect::Fetch(self.begin_fetch())
            }
        }
    }
}
