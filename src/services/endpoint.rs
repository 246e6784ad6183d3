use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

/// Form endpoints of the backend that the dashboard submits to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Endpoint {
    DownloadSingle,
    AnalyzePage,
    CrawlBasic,
    CrawlOsint,
    OsintDomain,
    OsintEmail,
    OsintUsername,
}

/// How an endpoint answers: with the result itself, or with a `task_id`
/// that has to be polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Immediate,
    Job,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::DownloadSingle => "api/download/single",
            Endpoint::AnalyzePage => "api/analyze/page",
            Endpoint::CrawlBasic => "api/crawl/basic",
            Endpoint::CrawlOsint => "api/crawl/osint",
            Endpoint::OsintDomain => "api/osint/domain",
            Endpoint::OsintEmail => "api/osint/email",
            Endpoint::OsintUsername => "api/osint/username",
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            Endpoint::DownloadSingle | Endpoint::AnalyzePage => Mode::Immediate,
            _ => Mode::Job,
        }
    }

    /// Human-readable name used in notifications and result titles.
    pub fn label(self) -> &'static str {
        match self {
            Endpoint::DownloadSingle => "Page Download",
            Endpoint::AnalyzePage => "Page Analysis",
            Endpoint::CrawlBasic => "Basic Crawl",
            Endpoint::CrawlOsint => "OSINT Crawl",
            Endpoint::OsintDomain => "Domain Analysis",
            Endpoint::OsintEmail => "Email Analysis",
            Endpoint::OsintUsername => "Username Search",
        }
    }

    pub fn loading_text(self) -> &'static str {
        match self {
            Endpoint::DownloadSingle => "Downloading page...",
            Endpoint::AnalyzePage => "Analyzing page structure...",
            Endpoint::CrawlBasic => "Starting crawler...",
            Endpoint::CrawlOsint => "Starting OSINT crawler...",
            Endpoint::OsintDomain => "Collecting OSINT data for the domain...",
            Endpoint::OsintEmail => "Collecting OSINT data for the email...",
            Endpoint::OsintUsername => "Scanning social media profiles...",
        }
    }
}
