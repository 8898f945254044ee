use serde::Serialize;
use serde_json::Value;

use super::source::{PageRequest, PageSource};
use crate::records::{ClientMovement, normalize_page};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum LoadState {
    Idle,
    Loading { page: u32 },
    Loaded,
    Failed,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationOutcome {
    Appended { page: u32, rows: usize },
    Failed { page: u32 },
    /// The completion did not belong to the request currently in flight.
    Ignored,
}

/// Accumulates fetched pages and decides when the next one is due.
///
/// Rows are only ever appended. `has_more` is true while every page so far
/// came back full after dropping blank rows, so the next page number can be
/// derived from the loaded count alone.
#[derive(Debug)]
pub struct Paginator {
    page_size: u32,
    window_size: usize,
    movements: Vec<ClientMovement>,
    state: LoadState,
    has_more: bool,
    halted: bool,
    in_flight: Option<PageRequest>,
    next_sequence: u64,
}

impl Paginator {
    /// Both sizes are clamped to at least 1; an empty page is never full.
    pub fn new(page_size: u32, window_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            window_size: window_size.max(1),
            movements: Vec::new(),
            state: LoadState::Idle,
            has_more: true,
            halted: false,
            in_flight: None,
            next_sequence: 1,
        }
    }

    pub fn movements(&self) -> &[ClientMovement] {
        &self.movements
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading_more(&self) -> bool {
        self.in_flight.is_some() && self.is_initialized()
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, LoadState::Loaded | LoadState::Exhausted)
            || (matches!(self.state, LoadState::Loading { page } if page > 1))
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Starts the first-page request. Only valid from `Idle`.
    pub fn begin_initial(&mut self) -> Option<PageRequest> {
        if self.state != LoadState::Idle {
            return None;
        }
        let request = self.issue(1);
        self.state = LoadState::Loading { page: 1 };
        Some(request)
    }

    pub fn complete_initial(
        &mut self,
        request: &PageRequest,
        result: ClientResult<Vec<Value>>,
    ) -> ClientResult<usize> {
        if self.in_flight.as_ref() != Some(request) {
            return Err(ClientError::fetch_failed(
                request.page,
                "completion does not match the pending first-page request",
            ));
        }
        self.in_flight = None;

        match result {
            Ok(rows) => {
                self.movements = normalize_page(&rows);
                let retained = self.movements.len();
                self.settle_after_page(retained);
                tracing::info!(
                    rows = retained,
                    has_more = self.has_more,
                    "loaded first billing page"
                );
                Ok(retained)
            }
            Err(error) => {
                self.state = LoadState::Failed;
                Err(error)
            }
        }
    }

    /// Fetches page 1 and installs it as the base list.
    ///
    /// Any failure here is fatal for the session and is reported as
    /// `initial_load_failed`.
    pub fn load_initial<S: PageSource>(&mut self, source: &S) -> ClientResult<usize> {
        let Some(request) = self.begin_initial() else {
            return Err(ClientError::invalid_argument(
                "The first page was already requested for this session.",
            ));
        };
        let result = source.fetch_page(&request);
        self.complete_initial(&request, result).map_err(|error| {
            tracing::error!(source = %source.describe(), error = %error, "initial load failed");
            ClientError::initial_load_failed(&source.describe(), &error.message)
        })
    }

    /// Whether the table window at `window_page` is close enough to the end
    /// of the loaded rows to fetch the next page.
    pub fn should_continue(&self, window_page: usize) -> bool {
        if self.state != LoadState::Loaded || !self.has_more || self.halted {
            return false;
        }
        if self.in_flight.is_some() {
            return false;
        }
        let window_end = (window_page as i64).saturating_mul(self.window_size as i64);
        let threshold = self.movements.len() as i64 - self.window_size as i64;
        window_end >= threshold
    }

    /// `ceil(loaded / page_size) + 1`.
    pub fn next_page_number(&self) -> u32 {
        let loaded = self.movements.len() as u64;
        let size = u64::from(self.page_size);
        let fetched = loaded.div_ceil(size);
        u32::try_from(fetched + 1).unwrap_or(u32::MAX)
    }

    /// Reserves the continuation slot. Returns `None` when one is already in
    /// flight or nothing more can be fetched.
    pub fn begin_continuation(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() {
            tracing::debug!("continuation already in flight; ignoring trigger");
            return None;
        }
        if self.state != LoadState::Loaded || !self.has_more || self.halted {
            return None;
        }
        let page = self.next_page_number();
        let request = self.issue(page);
        self.state = LoadState::Loading { page };
        Some(request)
    }

    pub fn complete_continuation(
        &mut self,
        request: &PageRequest,
        result: ClientResult<Vec<Value>>,
    ) -> ContinuationOutcome {
        if self.in_flight.as_ref() != Some(request) {
            tracing::debug!(
                page = request.page,
                sequence = request.sequence,
                "discarding completion for a request that is not in flight"
            );
            return ContinuationOutcome::Ignored;
        }
        self.in_flight = None;

        match result {
            Ok(rows) => {
                let appended = normalize_page(&rows);
                let count = appended.len();
                self.movements.extend(appended);
                self.settle_after_page(count);
                tracing::info!(
                    page = request.page,
                    rows = count,
                    total = self.movements.len(),
                    has_more = self.has_more,
                    "appended billing page"
                );
                ContinuationOutcome::Appended {
                    page: request.page,
                    rows: count,
                }
            }
            Err(error) => {
                tracing::info!(
                    page = request.page,
                    error = %error,
                    "continuation fetch failed; keeping loaded rows"
                );
                self.halted = true;
                self.state = LoadState::Loaded;
                ContinuationOutcome::Failed { page: request.page }
            }
        }
    }

    /// Runs one continuation if the window at `window_page` calls for it.
    pub fn continue_from<S: PageSource>(
        &mut self,
        source: &S,
        window_page: usize,
    ) -> Option<ContinuationOutcome> {
        if !self.should_continue(window_page) {
            return None;
        }
        let request = self.begin_continuation()?;
        let result = source.fetch_page(&request);
        Some(self.complete_continuation(&request, result))
    }

    /// Keeps fetching until a short page, a failure, or nothing more to ask.
    /// Returns the number of pages appended.
    pub fn load_until_exhausted<S: PageSource>(&mut self, source: &S) -> usize {
        let mut appended_pages = 0;
        while let Some(request) = self.begin_continuation() {
            let result = source.fetch_page(&request);
            match self.complete_continuation(&request, result) {
                ContinuationOutcome::Appended { .. } => appended_pages += 1,
                ContinuationOutcome::Failed { .. } | ContinuationOutcome::Ignored => break,
            }
        }
        appended_pages
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        let request = PageRequest {
            page,
            limit: self.page_size,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.in_flight = Some(request);
        request
    }

    fn settle_after_page(&mut self, retained: usize) {
        self.has_more = retained == self.page_size as usize;
        self.state = if self.has_more {
            LoadState::Loaded
        } else {
            LoadState::Exhausted
        };
    }
}
