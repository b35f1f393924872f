//! Paginated user list.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::Backend;
use crate::context::ClientContext;
use crate::navigation::Route;
use crate::types::{Result, UserRow, UsersPage};

pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Page number from a `?page=` query. Missing, malformed or zero means 1.
pub fn page_from_query(query: &str) -> u32 {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Location of a users page.
pub fn page_path(page: u32) -> String {
    format!("{}?page={}", Route::Users.path(), page)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersState {
    pub items: Vec<UserRow>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub loading: bool,
    pub error: Option<String>,
}

impl UsersState {
    pub fn new(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            limit: limit.max(1),
            loading: false,
            error: None,
        }
    }

    /// Last page; there is always at least one.
    pub fn max_page(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.limit));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    /// Path for page `page`, or `None` when it is out of range.
    pub fn go(&self, page: u32) -> Option<String> {
        (1..=self.max_page()).contains(&page).then(|| page_path(page))
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.max_page()
    }

    fn begin(&mut self, page: u32) {
        self.page = page.max(1);
        self.loading = true;
        self.error = None;
    }

    fn loaded(&mut self, page: UsersPage) {
        self.items = page.items;
        self.total = page.total;
        self.loading = false;
    }

    fn failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

impl Default for UsersState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Loads user pages from a [`Backend`].
pub struct UserDirectory<B: Backend + ?Sized> {
    backend: Arc<B>,
    ctx: ClientContext,
    state: Arc<Mutex<UsersState>>,
}

impl<B: Backend + ?Sized> Clone for UserDirectory<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            ctx: self.ctx.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<B: Backend + ?Sized> UserDirectory<B> {
    pub fn new(backend: Arc<B>, ctx: ClientContext, page_size: u32) -> Self {
        Self {
            backend,
            ctx,
            state: Arc::new(Mutex::new(UsersState::new(page_size))),
        }
    }

    pub fn snapshot(&self) -> UsersState {
        self.state.lock().clone()
    }

    /// Fetch one page. Items from the previous page stay until the new ones arrive.
    ///
    /// A response for a page that is no longer the requested one is dropped.
    pub async fn load(&self, page: u32) -> Result<()> {
        let (page, limit) = {
            let mut state = self.state.lock();
            state.begin(page);
            (state.page, state.limit)
        };
        debug!(page, limit, "Loading users");

        let result = self.backend.list_users(page, limit).await;
        let mut state = self.state.lock();
        if state.page != page {
            debug!(page, current = state.page, "Dropping users for a page no longer shown");
            drop(state);
            if let Err(e) = &result {
                self.ctx.report(e);
            }
            return result.map(|_| ());
        }

        match result {
            Ok(users) => {
                state.loaded(users);
                Ok(())
            }
            Err(e) => {
                state.failed(e.user_message());
                drop(state);
                warn!(page, "Failed to load users: {}", e);
                self.ctx.report(&e);
                Err(e)
            }
        }
    }

    /// Load the page named by a `?page=` query.
    pub async fn load_from_query(&self, query: &str) -> Result<()> {
        self.load(page_from_query(query)).await
    }
}
