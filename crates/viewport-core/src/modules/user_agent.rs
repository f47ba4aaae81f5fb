//! User-agent classification.
//!
//! The detector only depends on the [`UserAgentClassifier`] strategy. How a
//! classifier is obtained (eagerly, lazily, from a plugin) is the business of
//! a [`ClassifierLoader`]; [`RegexClassifier`] is the built-in implementation.

use async_trait::async_trait;
use regex::Regex;
use std::sync::{Arc, OnceLock};
use tokio::sync::OnceCell;
use viewport_types::{DetectError, DeviceClass};

/// Result of classifying a user agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// `None` when the user agent is not recognized
    pub device_class: Option<DeviceClass>,
}

/// Turns a user-agent string into a coarse device class.
#[async_trait]
pub trait UserAgentClassifier: Send + Sync {
    async fn classify(&self, user_agent: &str) -> Result<Classification, DetectError>;
}

/// Supplies a classifier on first use.
#[async_trait]
pub trait ClassifierLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn UserAgentClassifier>, DetectError>;
}

/// Loader that hands out an already constructed classifier.
pub struct StaticLoader(Arc<dyn UserAgentClassifier>);

impl StaticLoader {
    pub fn new(classifier: Arc<dyn UserAgentClassifier>) -> Self {
        Self(classifier)
    }
}

#[async_trait]
impl ClassifierLoader for StaticLoader {
    async fn load(&self) -> Result<Arc<dyn UserAgentClassifier>, DetectError> {
        Ok(Arc::clone(&self.0))
    }
}

/// Loads a classifier at most once and caches it.
///
/// A failed load is not cached; the next call retries.
pub struct LazyClassifier {
    loader: Box<dyn ClassifierLoader>,
    cell: OnceCell<Arc<dyn UserAgentClassifier>>,
}

impl LazyClassifier {
    pub fn new(loader: impl ClassifierLoader + 'static) -> Self {
        Self { loader: Box::new(loader), cell: OnceCell::new() }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn get(&self) -> Result<Arc<dyn UserAgentClassifier>, DetectError> {
        self.cell.get_or_try_init(|| self.loader.load()).await.map(Arc::clone)
    }
}

impl Default for LazyClassifier {
    fn default() -> Self {
        Self::new(StaticLoader::new(Arc::new(RegexClassifier)))
    }
}

static BOT_REGEX: OnceLock<Regex> = OnceLock::new();
static TV_REGEX: OnceLock<Regex> = OnceLock::new();
static TABLET_REGEX: OnceLock<Regex> = OnceLock::new();
static MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();
static DESKTOP_REGEX: OnceLock<Regex> = OnceLock::new();

fn bot_regex() -> &'static Regex {
    BOT_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)(bot\b|bot/|crawl|spider|slurp|facebookexternalhit|bingpreview|headlesschrome|lighthouse|embedly)",
        )
        .expect("Bot regex is valid")
    })
}

fn tv_regex() -> &'static Regex {
    TV_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)(smart-?tv|googletv|appletv|hbbtv|netcast|roku|crkey|bravia|tizen.+tv|web0s|aft[bmst]\b|playstation|xbox)",
        )
        .expect("TV regex is valid")
    })
}

fn tablet_regex() -> &'static Regex {
    TABLET_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(ipad|tablet|playbook|kindle|silk/|nexus (7|9|10)\b|sm-t\d+|tab\s?\d)")
            .expect("Tablet regex is valid")
    })
}

fn mobile_regex() -> &'static Regex {
    MOBILE_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)(iphone|ipod|android.+mobile|windows phone|iemobile|blackberry|bb10|opera mini|kaios|mobi\b)",
        )
        .expect("Mobile regex is valid")
    })
}

fn desktop_regex() -> &'static Regex {
    DESKTOP_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(windows nt|macintosh|mac os x|x11|linux|cros)")
            .expect("Desktop regex is valid")
    })
}

/// Rule-based classifier covering bots, TVs and consoles, tablets, phones and desktops.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexClassifier;

impl RegexClassifier {
    pub fn classify_sync(&self, user_agent: &str) -> Classification {
        let ua = user_agent.trim();
        let device_class = if ua.is_empty() {
            None
        } else if bot_regex().is_match(ua) {
            Some(DeviceClass::Bot)
        } else if tv_regex().is_match(ua) {
            Some(DeviceClass::Tv)
        } else if tablet_regex().is_match(ua) {
            Some(DeviceClass::Tablet)
        } else if mobile_regex().is_match(ua) {
            Some(DeviceClass::Mobile)
        } else if ua.to_ascii_lowercase().contains("android") {
            // Android without a "Mobile" token is a tablet.
            Some(DeviceClass::Tablet)
        } else if desktop_regex().is_match(ua) {
            Some(DeviceClass::Desktop)
        } else {
            None
        };

        Classification { device_class }
    }
}

#[async_trait]
impl UserAgentClassifier for RegexClassifier {
    async fn classify(&self, user_agent: &str) -> Result<Classification, DetectError> {
        Ok(self.classify_sync(user_agent))
    }
}
