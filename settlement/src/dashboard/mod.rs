//! Console dashboards
//!
//! - [`PlatformOverview`] - admin landing page counters
//! - [`RestaurantDashboard`] - partner landing page for one restaurant
//! - [`OrderBoard`] - LIVE / PAST order tabs
//! - [`UserLifetimeStats`] - customer detail figures

mod board;
mod customer;
mod overview;
mod restaurant;

pub use board::OrderBoard;
pub use customer::UserLifetimeStats;
pub use overview::{PlatformOverview, RECENT_ORDERS};
pub use restaurant::{
    NET_INCOME_SHARE, RestaurantDashboard, RestaurantLifetimeStats, RevenuePoint,
    estimated_net_income,
};
