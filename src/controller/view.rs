//! The surface the controller draws on.
//!
//! [`DashboardView`] stands in for the page: named regions holding HTML
//! fragments, recent notifications, a loading banner and the current
//! section. [`ViewState`] is the in-memory implementation the web front
//! renders from. It is shared by every browser tab.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::views::{Fragment, Tone};

const NOTIFICATION_HISTORY: usize = 20;

/// Top-level navigation of the dashboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Section {
    #[default]
    Home,
    Download,
    Crawl,
    Analysis,
    Osint,
    Profiles,
    Database,
    ApiKeys,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Download => "Download",
            Section::Crawl => "Crawling",
            Section::Analysis => "Page Analysis",
            Section::Osint => "OSINT",
            Section::Profiles => "Profiles",
            Section::Database => "Database",
            Section::ApiKeys => "API Keys",
        }
    }
}

/// Page areas the controller renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    StatusIndicator,
    SystemStatus,
    Results,
    ProfilesList,
    DatabaseInfo,
    ApiKeysList,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub tone: Tone,
    pub message: String,
}

impl Notification {
    pub fn new(tone: Tone, message: impl Into<String>) -> Self {
        Self {
            tone,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Tone::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Tone::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Tone::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Tone::Info, message)
    }
}

/// Identifies one operation's entry in the loading banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken(pub u64);

pub trait DashboardView: Send + Sync {
    fn notify(&self, notification: Notification);

    fn render(&self, region: Region, fragment: Fragment);

    /// Show `message` until the returned token is passed to `end_loading`.
    /// Overlapping operations each hold their own entry; the banner shows
    /// the most recent one still running.
    fn begin_loading(&self, message: String) -> LoadToken;

    fn end_loading(&self, token: LoadToken);

    fn set_section(&self, section: Section);
}

#[derive(Debug, Clone, Default)]
pub struct ViewSnapshot {
    pub regions: HashMap<Region, Fragment>,
    /// Oldest first.
    pub notifications: Vec<Notification>,
    pub loading: Option<String>,
    pub section: Section,
}

impl ViewSnapshot {
    pub fn region(&self, region: Region) -> Fragment {
        self.regions.get(&region).cloned().unwrap_or_default()
    }
}

#[derive(Default)]
struct ViewInner {
    regions: HashMap<Region, Fragment>,
    notifications: VecDeque<Notification>,
    /// In start order.
    loads: Vec<(LoadToken, String)>,
    section: Section,
}

/// In-memory view shared between the controller and the web front.
pub struct ViewState {
    inner: RwLock<ViewInner>,
    next_load: AtomicU64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ViewInner::default()),
            next_load: AtomicU64::new(1),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ViewInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ViewInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let inner = self.read();
        ViewSnapshot {
            regions: inner.regions.clone(),
            notifications: inner.notifications.iter().cloned().collect(),
            loading: inner.loads.last().map(|(_, message)| message.clone()),
            section: inner.section,
        }
    }

    pub fn region(&self, region: Region) -> Fragment {
        self.read().regions.get(&region).cloned().unwrap_or_default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.read().notifications.iter().cloned().collect()
    }

    pub fn loading(&self) -> Option<String> {
        self.read().loads.last().map(|(_, message)| message.clone())
    }

    pub fn section(&self) -> Section {
        self.read().section
    }
}

impl DashboardView for ViewState {
    fn notify(&self, notification: Notification) {
        let mut inner = self.write();
        if inner.notifications.len() == NOTIFICATION_HISTORY {
            inner.notifications.pop_front();
        }
        inner.notifications.push_back(notification);
    }

    fn render(&self, region: Region, fragment: Fragment) {
        self.write().regions.insert(region, fragment);
    }

    fn begin_loading(&self, message: String) -> LoadToken {
        let token = LoadToken(self.next_load.fetch_add(1, Ordering::Relaxed));
        self.write().loads.push((token, message));
        token
    }

    fn end_loading(&self, token: LoadToken) {
        self.write().loads.retain(|(t, _)| *t != token);
    }

    fn set_section(&self, section: Section) {
        self.write().section = section;
    }
}
