//! Client side of the Panchaea job dashboard: polls the server's status
//! endpoint, mirrors it into a [`ViewModel`] and raises toasts for new
//! warnings and errors.

pub mod error;
pub mod notify;
pub mod palette;
pub mod poller;
pub mod reconcile;
pub mod source;
pub mod toast;
pub mod view;

pub use error::FetchError;
pub use notify::{Notification, NotificationBus, NotificationStream, Severity, DISPLAY_DURATION};
pub use palette::{LoadMetric, NodeColor, StatusColor};
pub use poller::{PollOutcome, PollerConfig, PollerHandle, StatusPoller, DEFAULT_POLL_INTERVAL};
pub use reconcile::MAX_LOG_BATCH;
pub use source::{api_url, HttpStatusSource, StatusSource};
pub use toast::ToastTray;
pub use view::{NodeView, ViewModel, WorkUnitView};
