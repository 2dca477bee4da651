//! Query cache over the clip store.
//!
//! Readers get the cached [`ClipView`] right away and can subscribe to
//! every later view. Deletes and edits are applied to the view before the
//! store confirms them and rolled back if the store refuses.
//!
//! Consistency rules:
//! - a refresh that started before the view last changed is discarded
//! - a refresh that completes while a mutation is unconfirmed is discarded
//! - at most one unconfirmed mutation per clip id

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use cliptrim_clip_model::{ClipId, ClipRecord, MediaInfo};
use cliptrim_common::error::{CliptrimError, CliptrimResult};
use cliptrim_processing::MediaProber;

use crate::optimistic::{self, ClipView, Mutation, Settled, Speculation};
use crate::store::ClipStore;

/// Load state of one cached query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Never fetched.
    #[default]
    Idle,
    Loading,
    Ready,
    /// Last fetch failed with this message. Cached data, if any, is kept.
    Failed(String),
}

/// Cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The full clip list.
    Clips,
    /// Media info of one source.
    MediaInfo(String),
}

#[derive(Debug, Default)]
struct CacheState {
    view: ClipView,
    in_flight: HashSet<ClipId>,
    statuses: HashMap<QueryKey, FetchStatus>,
    media: HashMap<String, MediaInfo>,
}

struct Inner {
    store: Arc<dyn ClipStore>,
    prober: Arc<dyn MediaProber>,
    state: Mutex<CacheState>,
    views: watch::Sender<ClipView>,
}

/// Shared handle to the clip cache. Clones share state.
#[derive(Clone)]
pub struct ClipQueries {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ClipQueries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ClipQueries")
            .field("version", &state.view.version())
            .field("clips", &state.view.len())
            .field("in_flight", &state.in_flight.len())
            .finish()
    }
}

/// A mutation already visible in the cache, waiting on the store.
///
/// Dropping it does not cancel the write; the outcome is then only
/// reflected in the cache.
#[derive(Debug)]
pub struct PendingMutation {
    id: ClipId,
    task: JoinHandle<CliptrimResult<()>>,
}

impl PendingMutation {
    pub fn id(&self) -> &ClipId {
        &self.id
    }

    /// Wait for the store. On error the cache has already been rolled back.
    pub async fn confirmed(self) -> CliptrimResult<()> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(CliptrimError::persistence(format!(
                "store write for clip {} did not finish: {e}",
                self.id
            ))),
        }
    }
}

impl ClipQueries {
    pub fn new(store: Arc<dyn ClipStore>, prober: Arc<dyn MediaProber>) -> Self {
        let (views, _) = watch::channel(ClipView::empty());
        Self {
            inner: Arc::new(Inner {
                store,
                prober,
                state: Mutex::new(CacheState::default()),
                views,
            }),
        }
    }

    /// The cached view, without touching the store.
    pub fn cached(&self) -> ClipView {
        self.lock().view.clone()
    }

    /// The cached view. Inside a tokio runtime a refresh is started in the
    /// background; subscribers see its result.
    pub fn list_clips(&self) -> ClipView {
        if let Ok(handle) = Handle::try_current() {
            let this = self.clone();
            handle.spawn(async move {
                if let Err(e) = this.refresh().await {
                    tracing::warn!(error = %e, "Background clip refresh failed");
                }
            });
        }
        self.cached()
    }

    /// Reload the clip list from the store.
    ///
    /// Returns the view in effect afterwards, which is the previous one if
    /// the fetched data was stale.
    pub async fn refresh(&self) -> CliptrimResult<ClipView> {
        let started_at = {
            let mut state = self.lock();
            state.statuses.insert(QueryKey::Clips, FetchStatus::Loading);
            state.view.version()
        };

        let fetched = self.inner.store.get_all().await;

        let mut state = self.lock();
        match fetched {
            Ok(clips) => {
                state.statuses.insert(QueryKey::Clips, FetchStatus::Ready);
                if state.view.version() != started_at || !state.in_flight.is_empty() {
                    tracing::debug!(
                        started_at,
                        current = state.view.version(),
                        in_flight = state.in_flight.len(),
                        "Discarding stale clip refresh"
                    );
                    return Ok(state.view.clone());
                }
                let view = state.view.next(clips);
                Ok(self.publish(&mut state, view))
            }
            Err(e) => {
                state
                    .statuses
                    .insert(QueryKey::Clips, FetchStatus::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Store a new clip, then add it to the view.
    ///
    /// Not optimistic: the view only changes after the store accepted it.
    pub async fn insert_clip(&self, record: ClipRecord) -> CliptrimResult<ClipView> {
        let id = record.id().clone();
        self.inner.store.put(record.clone()).await?;

        let mut state = self.lock();
        let view = state.view.next(Mutation::Upsert(record).apply(state.view.clips()));
        tracing::info!(clip_id = %id, "Clip saved");
        Ok(self.publish(&mut state, view))
    }

    /// Remove a clip. The view changes immediately; the store write runs in
    /// the background.
    pub fn delete_clip(&self, id: &ClipId) -> CliptrimResult<PendingMutation> {
        self.start_mutation(Mutation::Remove(id.clone()))
    }

    /// Replace the clip with `record.id`. Same flow as [`Self::delete_clip`].
    pub fn replace_clip(&self, record: ClipRecord) -> CliptrimResult<PendingMutation> {
        self.start_mutation(Mutation::Upsert(record))
    }

    /// Receive every view published from now on.
    pub fn subscribe(&self) -> watch::Receiver<ClipView> {
        self.inner.views.subscribe()
    }

    pub fn status(&self, key: &QueryKey) -> FetchStatus {
        self.lock().statuses.get(key).cloned().unwrap_or_default()
    }

    /// Whether a mutation on `id` is waiting for the store.
    pub fn is_pending(&self, id: &ClipId) -> bool {
        self.lock().in_flight.contains(id)
    }

    /// Media info for a source, probed once and cached afterwards.
    pub async fn media_info(&self, uri: &str) -> CliptrimResult<MediaInfo> {
        let key = QueryKey::MediaInfo(uri.to_string());
        {
            let mut state = self.lock();
            if let Some(info) = state.media.get(uri) {
                return Ok(info.clone());
            }
            state.statuses.insert(key.clone(), FetchStatus::Loading);
        }

        let probed = self.inner.prober.probe(uri).await;

        let mut state = self.lock();
        match probed {
            Ok(info) => {
                state.media.insert(uri.to_string(), info.clone());
                state.statuses.insert(key, FetchStatus::Ready);
                Ok(info)
            }
            Err(e) => {
                tracing::warn!(uri, error = %e, "Probing media failed");
                state.statuses.insert(key, FetchStatus::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn start_mutation(&self, mutation: Mutation) -> CliptrimResult<PendingMutation> {
        let handle = Handle::try_current().map_err(|_| {
            CliptrimError::unsupported("clip mutations need a running tokio runtime")
        })?;
        let id = mutation.key().clone();

        let speculation = {
            let mut state = self.lock();
            if !state.in_flight.insert(id.clone()) {
                return Err(CliptrimError::conflict(format!(
                    "clip {id} already has a change in progress"
                )));
            }
            let speculation = optimistic::begin(&state.view, mutation);
            self.publish(&mut state, speculation.view.clone());
            speculation
        };
        tracing::debug!(clip_id = %id, "Applied optimistic change");

        let this = self.clone();
        let task = handle.spawn(async move { this.commit(speculation).await });
        Ok(PendingMutation { id, task })
    }

    async fn commit(&self, speculation: Speculation) -> CliptrimResult<()> {
        let outcome = match &speculation.mutation {
            Mutation::Remove(id) => self.inner.store.remove(id).await,
            Mutation::Upsert(record) => self.inner.store.put(record.clone()).await,
        };
        let id = speculation.mutation.key().clone();

        let mut state = self.lock();
        state.in_flight.remove(&id);
        match optimistic::settle(&state.view, speculation, outcome) {
            Settled::Committed => {
                tracing::debug!(clip_id = %id, "Store confirmed change");
                Ok(())
            }
            Settled::RolledBack { view, error } => {
                tracing::warn!(clip_id = %id, error = %error, "Store rejected change, rolling back");
                self.publish(&mut state, view);
                Err(error)
            }
        }
    }

    fn publish(&self, state: &mut CacheState, view: ClipView) -> ClipView {
        state.view = view.clone();
        self.inner.views.send_replace(view.clone());
        view
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
