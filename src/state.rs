use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::DashboardConfig;
use crate::data::filter::{FilterState, FilteredView};
use crate::data::model::{Dataset, DatasetSource, Smoker};
use crate::feed::buffer::{generate_record, FeedBuffer, FeedSummary, SyntheticRecord};
use crate::feed::ticker::Ticker;
use crate::ui::table::TableState;

/// Which trend chart tab is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendTab {
    #[default]
    Smokers,
    NonSmokers,
}

impl TrendTab {
    pub fn smoker(self) -> Smoker {
        match self {
            TrendTab::Smokers => Smoker::Yes,
            TrendTab::NonSmokers => Smoker::No,
        }
    }
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything one dashboard session owns. Only the dataset is shared.
pub struct Session {
    pub config: DashboardConfig,

    /// Loaded once at startup, read-only.
    pub dataset: Arc<Dataset>,

    /// User-controlled filters.
    pub filters: FilterState,
    view: FilteredView,

    /// Rows passing the current filters (cached).
    pub visible_indices: Arc<[usize]>,

    feed: FeedBuffer,
    ticker: Ticker,
    rng: StdRng,

    /// Feed materialised after the latest tick. Every feed consumer reads
    /// this same snapshot.
    pub feed_snapshot: Vec<SyntheticRecord>,
    pub feed_summary: FeedSummary,

    pub table: TableState,
    pub trend_tab: TrendTab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Session {
    pub fn new(dataset: Arc<Dataset>, config: DashboardConfig) -> Self {
        Self::with_rng(dataset, config, StdRng::from_entropy())
    }

    pub fn with_rng(dataset: Arc<Dataset>, config: DashboardConfig, rng: StdRng) -> Self {
        let status_message = match &dataset.source {
            DatasetSource::Unavailable(reason) => Some(format!("No data loaded: {reason}")),
            DatasetSource::File { skipped } if *skipped > 0 => {
                Some(format!("{skipped} malformed rows were skipped"))
            }
            DatasetSource::File { .. } => None,
        };

        let mut session = Self {
            feed: FeedBuffer::new(config.feed_capacity),
            ticker: Ticker::new(config.update_interval),
            config,
            dataset,
            filters: FilterState::default(),
            view: FilteredView::default(),
            visible_indices: Arc::from(Vec::new()),
            rng,
            feed_snapshot: Vec::new(),
            feed_summary: FeedSummary::default(),
            table: TableState::default(),
            trend_tab: TrendTab::default(),
            status_message,
        };
        session.refilter();
        session
    }

    /// Bring `visible_indices` up to date with the filters.
    pub fn refilter(&mut self) {
        self.visible_indices = self.view.view(&self.dataset, &self.filters);
        if let Some(row) = self.table.selected_row {
            if !self.visible_indices.contains(&row) {
                self.table.selected_row = None;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Synthetic feed
    // -----------------------------------------------------------------------

    /// Run the feed timer. Returns `true` when a tick updated the feed.
    pub fn poll_feed(&mut self, now: Instant) -> bool {
        match self.ticker.poll(now) {
            Some(tick) => {
                log::debug!("Feed tick #{}", tick.seq);
                self.on_tick(Local::now().naive_local());
                true
            }
            None => false,
        }
    }

    /// Time until the next feed tick, for repaint scheduling.
    pub fn next_feed_in(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_next(now)
    }

    pub fn stop_feed(&mut self) {
        self.ticker.cancel();
        log::info!("Synthetic feed stopped");
    }

    /// Append one synthetic record, then re-materialise the snapshot.
    pub fn on_tick(&mut self, now: NaiveDateTime) {
        let record = generate_record(&mut self.rng, now);
        log::debug!(
            "New synthetic record: {} {:.1} at {}",
            record.smoker,
            record.expenditure,
            record.timestamp
        );
        if let Some(evicted) = self.feed.push(record) {
            log::trace!("Evicted synthetic record from {}", evicted.timestamp);
        }
        self.feed_snapshot = self.feed.snapshot();
        self.feed_summary = FeedSummary::from_records(&self.feed_snapshot);
    }

    /// Records held and the buffer capacity.
    pub fn feed_fill(&self) -> (usize, usize) {
        (self.feed.len(), self.feed.capacity())
    }

    pub fn feed_is_empty(&self) -> bool {
        self.feed.is_empty()
    }

    /// Snapshot records with the given smoker flag, oldest first.
    pub fn feed_records(&self, smoker: Smoker) -> impl Iterator<Item = &SyntheticRecord> {
        self.feed_snapshot.iter().filter(move |r| r.smoker == smoker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ExpenditureRecord, Gender};
    use chrono::NaiveDate;

    fn at(secs: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            + chrono::Duration::seconds(secs)
    }

    fn dataset() -> Arc<Dataset> {
        Arc::new(Dataset::from_records(vec![
            ExpenditureRecord {
                age: 40,
                gender: Gender::Male,
                expenditure: 1000.0,
                smoker: Smoker::Yes,
                region: "X".into(),
                timestamp: "T".into(),
            },
            ExpenditureRecord {
                age: 70,
                gender: Gender::Female,
                expenditure: 4000.0,
                smoker: Smoker::No,
                region: "Y".into(),
                timestamp: "T".into(),
            },
        ]))
    }

    fn session(seed: u64) -> Session {
        Session::with_rng(dataset(), DashboardConfig::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn starts_with_default_filters_applied() {
        let s = session(1);
        assert_eq!(&s.visible_indices[..], &[0]);
        assert!(s.feed_is_empty());
        assert!(s.feed_snapshot.is_empty());
        assert_eq!(s.feed_summary.smokers, "$0.00");
        assert_eq!(s.status_message, None);
    }

    #[test]
    fn refilter_follows_filter_changes() {
        let mut s = session(1);
        s.filters.age_range.set(18, 100);
        s.filters.expenditure_range.set(0.0, 5000.0);
        s.refilter();
        assert_eq!(&s.visible_indices[..], &[0, 1]);

        s.table.selected_row = Some(1);
        s.filters.toggle_gender(Gender::Female);
        s.refilter();
        assert_eq!(&s.visible_indices[..], &[0]);
        assert_eq!(s.table.selected_row, None);
    }

    #[test]
    fn ticks_fill_feed_up_to_capacity() {
        let mut s = session(3);
        for i in 0..25 {
            s.on_tick(at(i * 10));
            assert!(s.feed_snapshot.len() <= 10);
        }
        assert_eq!(s.feed_snapshot.len(), 10);
        assert_eq!(s.feed_fill(), (10, 10));
        assert!(!s.feed_is_empty());
        assert_eq!(s.feed_snapshot[0].timestamp, "2024-06-01 09:02:30");
        assert_eq!(s.feed_snapshot[9].timestamp, "2024-06-01 09:04:00");
    }

    #[test]
    fn summary_matches_snapshot() {
        let mut s = session(5);
        for i in 0..7 {
            s.on_tick(at(i));
        }
        let yes: f64 = s.feed_records(Smoker::Yes).map(|r| r.expenditure).sum();
        let no: f64 = s.feed_records(Smoker::No).map(|r| r.expenditure).sum();
        assert_eq!(s.feed_summary.smokers, format!("${yes:.2}"));
        assert_eq!(s.feed_summary.nonsmokers, format!("${no:.2}"));
    }

    #[test]
    fn sessions_do_not_share_feeds() {
        let ds = dataset();
        let mut a = Session::with_rng(Arc::clone(&ds), DashboardConfig::default(), StdRng::seed_from_u64(1));
        let b = Session::with_rng(ds, DashboardConfig::default(), StdRng::seed_from_u64(1));
        a.on_tick(at(0));
        a.on_tick(at(10));
        assert_eq!(a.feed_snapshot.len(), 2);
        assert!(b.feed_snapshot.is_empty());
    }

    #[test]
    fn poll_feed_ticks_immediately_then_waits() {
        let mut s = session(9);
        let start = Instant::now();
        assert!(s.poll_feed(start));
        assert_eq!(s.feed_snapshot.len(), 1);
        assert!(!s.poll_feed(start + Duration::from_secs(1)));
        assert_eq!(s.next_feed_in(start), Some(Duration::from_secs(10)));
        assert!(s.poll_feed(start + Duration::from_secs(10)));
        assert_eq!(s.feed_snapshot.len(), 2);

        s.stop_feed();
        assert!(!s.poll_feed(start + Duration::from_secs(60)));
        assert_eq!(s.next_feed_in(start), None);
    }

    #[test]
    fn unavailable_dataset_sets_status() {
        let s = Session::new(Arc::new(Dataset::empty("healthexp.csv is empty")), DashboardConfig::default());
        assert!(s.visible_indices.is_empty());
        assert_eq!(
            s.status_message.as_deref(),
            Some("No data loaded: healthexp.csv is empty")
        );
    }
}
