use crate::config::DashboardConfig;
use crate::dashboard::DashboardView;
use crate::error::{DashboardError, Result};
use crate::paste::{apply_paste, set_cell, PasteAnchor, PasteLayout};
use crate::schema::{Dataset, DisplayPeriod, FigureField, SeriesKind, ViewMode};
use crate::share::{self, ShareLink};
use crate::storage::DatasetStore;
use log::{info, warn};

/// Where the session's dataset came from when it was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    SharedLink,
    Persisted,
    Fresh,
}

/// Application state: the dataset root plus the view selectors.
///
/// The dataset is only ever replaced as a whole. A session opened from a share
/// link is read-only and never writes to its store.
pub struct DashboardSession<S: DatasetStore> {
    dataset: Dataset,
    store: S,
    config: DashboardConfig,
    shared: bool,
    source: DataSource,
    pub view_mode: ViewMode,
    pub period: DisplayPeriod,
}

impl<S: DatasetStore> DashboardSession<S> {
    /// Opens a session from the entry query string.
    ///
    /// A share token wins when present and valid. Otherwise the persisted
    /// dataset is used, then a zero-filled one. The presence of the share
    /// parameter alone makes the session read-only.
    pub fn open(query: &str, store: S, config: DashboardConfig) -> Self {
        let token = ShareLink::token_from_query(query, &config.share_param);
        let shared = token.is_some();

        let shared_dataset = token.and_then(|token| match share::decode(&token) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                warn!("Ignoring invalid share token: {}", e);
                None
            }
        });

        let (dataset, source) = match shared_dataset {
            Some(dataset) => (dataset, DataSource::SharedLink),
            None => match store.load() {
                Some(dataset) => (dataset, DataSource::Persisted),
                None => (Dataset::zeroed(), DataSource::Fresh),
            },
        };

        info!(
            "Opened dashboard session from {:?} data (read-only: {})",
            source, shared
        );

        Self {
            dataset,
            store,
            config,
            shared,
            source,
            view_mode: ViewMode::default(),
            period: DisplayPeriod::default(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }

    pub fn source(&self) -> DataSource {
        self.source
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the dataset and persists it.
    pub fn commit(&mut self, dataset: Dataset) -> Result<()> {
        if self.shared {
            return Err(DashboardError::ReadOnlySharedView);
        }
        self.store.save(&dataset)?;
        self.dataset = dataset;
        Ok(())
    }

    /// Pastes a tab-separated block and commits the result. Returns the
    /// number of cells written.
    pub fn paste(&mut self, layout: &PasteLayout, anchor: PasteAnchor, text: &str) -> Result<usize> {
        if self.shared {
            return Err(DashboardError::ReadOnlySharedView);
        }
        let outcome = apply_paste(&self.dataset, layout, anchor, text);
        self.commit(outcome.dataset)?;
        Ok(outcome.applied)
    }

    pub fn edit_cell(
        &mut self,
        kind: SeriesKind,
        month: usize,
        field: FigureField,
        raw: &str,
    ) -> Result<()> {
        if self.shared {
            return Err(DashboardError::ReadOnlySharedView);
        }
        let next = set_cell(&self.dataset, kind, month, field, raw)?;
        self.commit(next)
    }

    pub fn share_token(&self) -> String {
        share::encode(&self.dataset)
    }

    pub fn share_url(&self, base_url: &str) -> String {
        ShareLink::build(base_url, &self.share_token(), &self.config.share_param)
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::build(&self.dataset, self.view_mode, self.period)
    }
}
