//! Live settlement monitor
//!
//! Subscribes to the three inputs of a settlement run and recomputes the
//! whole report whenever any of them changes:
//!
//! ```text
//! orders        ──▶ ┐
//! restaurants   ──▶ ├─ replace input ─▶ compute_at ─▶ latest slot ─▶ listener
//! adminSettings ──▶ ┘
//! ```
//!
//! Each snapshot replaces the held input wholesale. The latest report slot
//! is last-write-wins; a recompute started from newer inputs always lands
//! after one started from older inputs.

use std::sync::{Arc, Weak};

use chrono::{DateTime, FixedOffset, Local, TimeZone};
use parking_lot::{Mutex, RwLock};
use shared::{FinancialSettings, Order, Restaurant};

use crate::settlement::{DateFilter, SettlementReport, compute_at};
use crate::store::{RecordStore, Snapshot, SnapshotCallback, StorePath, Subscription};

/// Called after every recompute
pub type ReportListener = Arc<dyn Fn(&SettlementReport) + Send + Sync>;

/// Source of "now" for window resolution.
///
/// Windows are resolved in the zone the instant carries. `System` and
/// `Local` keep the local zone, so day boundaries follow DST changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clock {
    /// Local wall clock
    System,
    /// Pinned instant in the local zone
    Local(DateTime<Local>),
    /// Pinned instant in a fixed UTC offset
    Fixed(DateTime<FixedOffset>),
}

impl Clock {
    fn compute(&self, inputs: &Inputs) -> SettlementReport {
        match self {
            Self::System => run(inputs, &Local::now()),
            Self::Local(at) => run(inputs, at),
            Self::Fixed(at) => run(inputs, at),
        }
    }
}

fn run<Tz: TimeZone>(inputs: &Inputs, now: &DateTime<Tz>) -> SettlementReport {
    compute_at(
        &inputs.orders,
        &inputs.restaurants,
        &inputs.settings,
        inputs.filter,
        now,
    )
}

#[derive(Default)]
struct Inputs {
    orders: Vec<Order>,
    restaurants: Vec<Restaurant>,
    settings: FinancialSettings,
    filter: DateFilter,
}

struct MonitorState {
    inputs: Mutex<Inputs>,
    latest: RwLock<Option<Arc<SettlementReport>>>,
    listener: RwLock<Option<ReportListener>>,
    clock: RwLock<Clock>,
}

impl MonitorState {
    fn recompute(&self) {
        let report = {
            let inputs = self.inputs.lock();
            let report = Arc::new(self.clock.read().compute(&inputs));
            *self.latest.write() = Some(report.clone());
            report
        };

        let listener = self.listener.read().clone();
        if let Some(listener) = listener {
            listener(&report);
        }
    }

    fn apply(&self, change: impl FnOnce(&mut Inputs)) {
        change(&mut self.inputs.lock());
        self.recompute();
    }
}

/// Keeps a settlement report current against a record store
pub struct SettlementMonitor {
    state: Arc<MonitorState>,
    subscriptions: Vec<Subscription>,
}

impl SettlementMonitor {
    /// Subscribe to `orders`, `restaurants` and `adminSettings` using the
    /// local wall clock
    pub fn attach(store: &dyn RecordStore, filter: DateFilter) -> Self {
        Self::attach_with_clock(store, filter, Clock::System)
    }

    pub fn attach_with_clock(store: &dyn RecordStore, filter: DateFilter, clock: Clock) -> Self {
        let state = Arc::new(MonitorState {
            inputs: Mutex::new(Inputs {
                filter,
                ..Default::default()
            }),
            latest: RwLock::new(None),
            listener: RwLock::new(None),
            clock: RwLock::new(clock),
        });

        let subscriptions = vec![
            store.subscribe(
                &StorePath::orders(),
                Self::callback(&state, |inputs, snap| {
                    inputs.orders = snap.records();
                    tracing::debug!(count = inputs.orders.len(), "Orders snapshot");
                }),
            ),
            store.subscribe(
                &StorePath::restaurants(),
                Self::callback(&state, |inputs, snap| {
                    inputs.restaurants = snap.records();
                    tracing::debug!(count = inputs.restaurants.len(), "Restaurants snapshot");
                }),
            ),
            store.subscribe(
                &StorePath::admin_settings(),
                Self::callback(&state, |inputs, snap| {
                    inputs.settings = match snap.record::<FinancialSettings>() {
                        Ok(Some(settings)) => settings,
                        Ok(None) => FinancialSettings::default(),
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                "Unreadable settings record, using defaults"
                            );
                            FinancialSettings::default()
                        }
                    };
                }),
            ),
        ];

        tracing::info!(filter = %filter, "Settlement monitor attached");
        Self {
            state,
            subscriptions,
        }
    }

    fn callback(
        state: &Arc<MonitorState>,
        replace: impl Fn(&mut Inputs, &Snapshot) + Send + Sync + 'static,
    ) -> SnapshotCallback {
        let weak: Weak<MonitorState> = Arc::downgrade(state);
        Arc::new(move |snap: &Snapshot| {
            if let Some(state) = weak.upgrade() {
                state.apply(|inputs| replace(inputs, snap));
            }
        })
    }

    /// Most recent report
    pub fn latest(&self) -> Option<Arc<SettlementReport>> {
        self.state.latest.read().clone()
    }

    pub fn filter(&self) -> DateFilter {
        self.state.inputs.lock().filter
    }

    /// Switch the window and recompute
    pub fn set_filter(&self, filter: DateFilter) {
        tracing::debug!(filter = %filter, "Date filter changed");
        self.state.apply(|inputs| inputs.filter = filter);
    }

    /// Replace the clock and recompute
    pub fn set_clock(&self, clock: Clock) {
        *self.state.clock.write() = clock;
        self.state.recompute();
    }

    /// Register the listener called after every recompute. It is invoked
    /// once right away when a report already exists.
    pub fn on_report(&self, listener: ReportListener) {
        *self.state.listener.write() = Some(listener.clone());
        if let Some(report) = self.latest() {
            listener(&report);
        }
    }

    /// Recompute from the held inputs (e.g. after midnight)
    pub fn refresh(&self) {
        self.state.recompute();
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl Drop for SettlementMonitor {
    fn drop(&mut self) {
        // Subscriptions unregister themselves on drop
        self.subscriptions.clear();
        tracing::debug!("Settlement monitor detached");
    }
}
