//! Wallet session and transaction controller for the XMRT dashboard.
//!
//! `SessionController` turns UI commands into calls on the wallet, chain
//! and storage backends, and reports every outcome through a `View`.

mod busy;
mod clock;
mod command;
mod config;
mod controller;
mod error;
mod format;
mod notify;
mod session;
mod view;

#[cfg(test)]
mod testing;

pub use busy::BusyGuard;
pub use clock::{Clock, SystemClock};
pub use command::{Command, Dispatch};
pub use config::DashboardConfig;
pub use controller::{Backends, SessionController};
pub use error::SessionError;
pub use format::{
    BALANCE_PLACES, MIN_AMOUNT, NATIVE_DECIMALS, format_address, format_amount, format_units,
    parse_amount,
};
pub use notify::{NOTIFICATION_TTL_MS, NotificationCenter};
pub use session::{ConnectionState, Session};
pub use view::{ElementId, LOADING_LABEL, View};
