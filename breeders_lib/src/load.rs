//! Page loads: turn the current URL into a fetch that is already running.
//!
//! A load never awaits its fetch. It spawns it and hands back a [`Pending`]
//! handle so the caller can show the page shell immediately and decide for
//! itself when to wait. Failures are not intercepted here; they surface as
//! [`LoadState::Rejected`].

use std::future::Future;

use brapi_api::types::{ListResponse, Program};
use brapi_api::{Client, QueryParams};
use tokio::sync::oneshot::{self, error::TryRecvError};
use url::Url;

use crate::error::BreedersError;

/// Where a pending computation currently stands.
#[derive(Debug)]
pub enum LoadState<T> {
    Pending,
    Resolved(T),
    Rejected(BreedersError),
}

impl<T> From<Result<T, BreedersError>> for LoadState<T> {
    fn from(outcome: Result<T, BreedersError>) -> Self {
        match outcome {
            Ok(value) => LoadState::Resolved(value),
            Err(e) => LoadState::Rejected(e),
        }
    }
}

/// Handle to a computation running on the Tokio runtime.
///
/// Dropping the handle does not cancel the computation; its result is
/// simply discarded when it arrives.
#[derive(Debug)]
pub struct Pending<T> {
    rx: Option<oneshot::Receiver<Result<T, BreedersError>>>,
    state: LoadState<T>,
}

impl<T: Send + 'static> Pending<T> {
    /// Spawns `fut` and returns without waiting for it. Must be called from
    /// within a Tokio runtime.
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T, BreedersError>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            if tx.send(fut.await).is_err() {
                tracing::debug!("page load settled after its handle was dropped; result discarded");
            }
        });
        Self {
            rx: Some(rx),
            state: LoadState::Pending,
        }
    }
}

impl<T> Pending<T> {
    /// An already-settled handle.
    pub fn settled(outcome: Result<T, BreedersError>) -> Self {
        Self {
            rx: None,
            state: outcome.into(),
        }
    }

    /// Checks for a result without waiting.
    pub fn poll_state(&mut self) -> &LoadState<T> {
        if let Some(rx) = self.rx.as_mut() {
            match rx.try_recv() {
                Ok(outcome) => {
                    self.state = outcome.into();
                    self.rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    self.state = LoadState::Rejected(BreedersError::LoadAborted);
                    self.rx = None;
                }
            }
        }
        &self.state
    }

    /// Waits until the computation settles.
    pub async fn settle(&mut self) -> &LoadState<T> {
        if let Some(rx) = self.rx.take() {
            self.state = match rx.await {
                Ok(outcome) => outcome.into(),
                Err(_) => LoadState::Rejected(BreedersError::LoadAborted),
            };
        }
        &self.state
    }

    /// Waits for the computation and returns its outcome.
    pub async fn wait(self) -> Result<T, BreedersError> {
        match (self.rx, self.state) {
            (Some(rx), _) => rx.await.unwrap_or_else(|_| Err(BreedersError::LoadAborted)),
            (None, LoadState::Resolved(value)) => Ok(value),
            (None, LoadState::Rejected(e)) => Err(e),
            (None, LoadState::Pending) => Err(BreedersError::LoadAborted),
        }
    }
}

/// What a page load hands to the presentation layer.
#[derive(Debug)]
pub struct PageData<T> {
    pub promise: Pending<T>,
}

/// Loads the programs listing. The query string of `url` is forwarded to
/// `GET /programs` as-is.
///
/// Spawns the fetch, so it must be called from within a Tokio runtime.
pub fn load_programs(client: &Client, url: &Url) -> PageData<ListResponse<Program>> {
    let params = QueryParams::from_url(url);
    let client = client.clone();
    tracing::debug!("loading programs for {} ({} params)", url, params.len());
    PageData {
        promise: Pending::spawn(async move { Ok(client.programs(&params).await?) }),
    }
}

/// Loads a single program's detail page.
///
/// Spawns the fetch, so it must be called from within a Tokio runtime.
pub fn load_program(client: &Client, url: &Url, program_db_id: &str) -> PageData<Program> {
    let params = QueryParams::from_url(url);
    let client = client.clone();
    let id = program_db_id.to_string();
    tracing::debug!("loading program {} for {}", id, url);
    PageData {
        promise: Pending::spawn(async move { Ok(client.program(&id, &params).await?) }),
    }
}
