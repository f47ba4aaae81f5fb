//! Viewport manager: the current breakpoint as observable state.
//!
//! The manager never detects anything itself. Its caller seeds it with a
//! prior state or a detector result, and a media-query binder (or any other
//! caller) moves it afterwards. Every assignment is persisted to the
//! configured cookie on a best-effort basis.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;
use viewport_types::{ConfigError, ViewportOptions};

use super::cookie::CookieStore;
use super::logger::log_persistence_skipped;
use super::queries::{build_queries, MediaQueries};
use crate::reactive::{Computed, Observable, Subscription};

struct ManagerInner {
    options: Observable<ViewportOptions>,
    state: Observable<String>,
    queries: Computed<MediaQueries>,
    cookies: Option<Rc<dyn CookieStore>>,
    use_cookie: Cell<bool>,
}

/// Handle to shared breakpoint state. Clones observe and mutate the same state.
#[derive(Clone)]
pub struct ViewportManager {
    inner: Rc<ManagerInner>,
}

/// Builder for [`ViewportManager`].
pub struct ViewportManagerBuilder {
    options: ViewportOptions,
    initial_state: String,
    cookies: Option<Rc<dyn CookieStore>>,
    use_cookie: bool,
}

impl ViewportManagerBuilder {
    /// Seed state, e.g. a detector result or a previously serialized value.
    pub fn initial_state(mut self, breakpoint: impl Into<String>) -> Self {
        self.initial_state = breakpoint.into();
        self
    }

    /// Persistence medium. Without one, assignments are not persisted.
    pub fn cookie_store(mut self, store: Rc<dyn CookieStore>) -> Self {
        self.cookies = Some(store);
        self
    }

    pub fn use_cookie(mut self, enabled: bool) -> Self {
        self.use_cookie = enabled;
        self
    }

    pub fn build(self) -> Result<ViewportManager, ConfigError> {
        self.options.validate()?;

        let options = Observable::new(self.options);
        let queries = Computed::new(&options, |options: &ViewportOptions| {
            build_queries(&options.breakpoints, options.feature, options.boundary_delta)
        });

        Ok(ViewportManager {
            inner: Rc::new(ManagerInner {
                options,
                state: Observable::new(self.initial_state),
                queries,
                cookies: self.cookies,
                use_cookie: Cell::new(self.use_cookie),
            }),
        })
    }
}

/// Create a manager from validated options and an initial breakpoint.
pub fn create_viewport_manager(
    options: ViewportOptions,
    initial_state: impl Into<String>,
) -> Result<ViewportManager, ConfigError> {
    ViewportManager::builder(options).initial_state(initial_state).build()
}

impl ViewportManager {
    pub fn builder(options: ViewportOptions) -> ViewportManagerBuilder {
        ViewportManagerBuilder {
            options,
            initial_state: String::new(),
            cookies: None,
            use_cookie: true,
        }
    }

    /// Current breakpoint; the fallback while no state has been assigned.
    pub fn current_breakpoint(&self) -> String {
        let state = self.inner.state.get();
        if state.is_empty() {
            return self.inner.options.with(|options| options.fallback_breakpoint.clone());
        }
        state
    }

    /// Assign the current breakpoint and persist it.
    ///
    /// Names outside the table are accepted; comparisons treat them as unknown.
    pub fn set_current_breakpoint(&self, breakpoint: impl Into<String>) {
        let breakpoint = breakpoint.into();
        if self.inner.state.set(breakpoint.clone()) {
            debug!("[viewport] breakpoint changed to {}", breakpoint);
        }
        if self.inner.use_cookie.get() {
            self.persist(&breakpoint);
        }
    }

    fn persist(&self, breakpoint: &str) {
        let Some(store) = &self.inner.cookies else {
            return;
        };
        let cookie = self.inner.options.with(|options| options.cookie.clone());
        if !cookie.is_enabled() {
            return;
        }
        if let Err(e) = store.set(&cookie.name, breakpoint, &cookie) {
            log_persistence_skipped("write", &e);
        }
    }

    /// Enable or disable cookie persistence.
    ///
    /// Disabling removes the cookie; enabling writes the current breakpoint.
    pub fn set_use_cookie(&self, enabled: bool) {
        if self.inner.use_cookie.replace(enabled) == enabled {
            return;
        }
        if enabled {
            self.persist(&self.current_breakpoint());
            return;
        }
        let Some(store) = &self.inner.cookies else {
            return;
        };
        let cookie = self.inner.options.with(|options| options.cookie.clone());
        if !cookie.is_enabled() {
            return;
        }
        if let Err(e) = store.remove(&cookie.name, &cookie) {
            log_persistence_skipped("removal", &e);
        }
    }

    pub fn use_cookie(&self) -> bool {
        self.inner.use_cookie.get()
    }

    /// Configured width of `breakpoint`, if it is in the table.
    pub fn breakpoint_width(&self, breakpoint: &str) -> Option<u32> {
        self.inner.options.with(|options| options.breakpoints.width(breakpoint))
    }

    /// Built media queries, recomputed lazily after a reconfiguration.
    pub fn queries(&self) -> MediaQueries {
        self.inner.queries.get()
    }

    /// Positions of the current breakpoint and `breakpoint` in ascending order.
    fn positions(&self, breakpoint: &str) -> Option<(usize, usize)> {
        let current = self.current_breakpoint();
        self.inner.queries.with(|queries| {
            let current = queries.position(&current)?;
            let other = queries.position(breakpoint)?;
            Some((current, other))
        })
    }

    /// True if the current breakpoint is strictly wider than `breakpoint`.
    pub fn is_greater_than(&self, breakpoint: &str) -> bool {
        self.positions(breakpoint).is_some_and(|(current, other)| current > other)
    }

    /// True if the current breakpoint is wider than or equal to `breakpoint`.
    pub fn is_greater_or_equals(&self, breakpoint: &str) -> bool {
        self.is_greater_than(breakpoint) || self.matches_one(breakpoint)
    }

    /// True if the current breakpoint is strictly narrower than `breakpoint`.
    pub fn is_less_than(&self, breakpoint: &str) -> bool {
        self.positions(breakpoint).is_some_and(|(current, other)| current < other)
    }

    /// True if the current breakpoint is narrower than or equal to `breakpoint`.
    pub fn is_less_or_equals(&self, breakpoint: &str) -> bool {
        self.is_less_than(breakpoint) || self.matches_one(breakpoint)
    }

    /// Exact match against the current breakpoint.
    pub fn matches_one(&self, breakpoint: &str) -> bool {
        self.current_breakpoint() == breakpoint
    }

    /// True if the current breakpoint is any of `breakpoints`.
    pub fn matches(&self, breakpoints: &[&str]) -> bool {
        let current = self.current_breakpoint();
        breakpoints.iter().any(|breakpoint| *breakpoint == current)
    }

    /// Snapshot of the active options.
    pub fn options(&self) -> ViewportOptions {
        self.inner.options.get()
    }

    /// Replace the options. Queries and ordering refresh on next read.
    pub fn reconfigure(&self, options: ViewportOptions) -> Result<(), ConfigError> {
        options.validate()?;
        if self.inner.options.set(options) {
            debug!("[viewport] options replaced");
        }
        Ok(())
    }

    /// Observe breakpoint changes until the returned guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&str) + 'static) -> Subscription {
        self.inner.state.subscribe(move |breakpoint: &String| callback(breakpoint))
    }

    /// Observe reconfigurations until the returned guard is dropped.
    pub fn on_reconfigure(&self, callback: impl Fn(&ViewportOptions) + 'static) -> Subscription {
        self.inner.options.subscribe(callback)
    }
}

impl fmt::Debug for ViewportManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportManager")
            .field("breakpoint", &self.current_breakpoint())
            .field("use_cookie", &self.inner.use_cookie.get())
            .field("persistent", &self.inner.cookies.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cookie::MemoryCookieStore;
    use std::cell::RefCell;
    use viewport_types::{CookieError, CookieOptions, MediaFeature};

    fn three() -> ViewportOptions {
        let patch = viewport_types::ViewportOptionsOverride {
            breakpoints: Some(
                [("desktop", 1024), ("mobile", 320), ("tablet", 768)].into_iter().collect(),
            ),
            ..Default::default()
        };
        ViewportOptions::default().extend(&patch)
    }

    fn with_store(initial: &str) -> (ViewportManager, Rc<MemoryCookieStore>) {
        let store = Rc::new(MemoryCookieStore::new());
        let manager = ViewportManager::builder(three())
            .initial_state(initial)
            .cookie_store(store.clone())
            .build()
            .unwrap();
        (manager, store)
    }

    #[test]
    fn test_comparisons_after_assignment() {
        let manager = create_viewport_manager(three(), "desktop").unwrap();
        manager.set_current_breakpoint("tablet");

        assert!(manager.is_greater_than("mobile"));
        assert!(!manager.is_greater_than("desktop"));
        assert!(!manager.is_greater_than("nonexistent"));
        assert!(manager.is_less_than("desktop"));
        assert!(!manager.is_less_than("mobile"));
        assert!(!manager.is_less_than("nonexistent"));
        assert!(manager.matches_one("tablet"));
        assert!(manager.matches(&["mobile", "tablet"]));
        assert!(!manager.matches(&["mobile", "desktop"]));
    }

    #[test]
    fn test_or_equals_variants() {
        let manager = create_viewport_manager(three(), "tablet").unwrap();

        assert!(manager.is_greater_or_equals("tablet"));
        assert!(manager.is_greater_or_equals("mobile"));
        assert!(!manager.is_greater_or_equals("desktop"));
        assert!(manager.is_less_or_equals("tablet"));
        assert!(manager.is_less_or_equals("desktop"));
        assert!(!manager.is_less_or_equals("mobile"));
    }

    #[test]
    fn test_unknown_current_breakpoint_is_incomparable() {
        let manager = create_viewport_manager(three(), "tablet").unwrap();
        manager.set_current_breakpoint("watch");

        assert_eq!(manager.current_breakpoint(), "watch");
        assert!(!manager.is_greater_than("mobile"));
        assert!(!manager.is_less_than("desktop"));
        assert!(manager.matches_one("watch"));
    }

    #[test]
    fn test_empty_state_reads_as_fallback() {
        let manager = create_viewport_manager(three(), "").unwrap();
        assert_eq!(manager.current_breakpoint(), "desktop");
        assert!(manager.is_greater_than("tablet"));
    }

    #[test]
    fn test_ordering_ignores_declaration_order() {
        let mut options = three();
        options.breakpoints =
            [("xl", 1600), ("xs", 1), ("md", 900), ("sm", 600)].into_iter().collect();
        options.fallback_breakpoint = "md".to_string();
        options.default_breakpoints = Default::default();
        let manager = create_viewport_manager(options, "md").unwrap();

        assert!(manager.is_greater_than("sm"));
        assert!(manager.is_greater_than("xs"));
        assert!(manager.is_less_than("xl"));
    }

    #[test]
    fn test_breakpoint_width() {
        let manager = create_viewport_manager(three(), "mobile").unwrap();
        assert_eq!(manager.breakpoint_width("tablet"), Some(768));
        assert_eq!(manager.breakpoint_width("watch"), None);
    }

    #[test]
    fn test_rejects_misconfiguration() {
        let mut options = three();
        options.fallback_breakpoint = "watch".to_string();
        assert!(matches!(
            create_viewport_manager(options, "mobile"),
            Err(ConfigError::UnknownFallback { .. })
        ));
    }

    #[test]
    fn test_assignment_persists_cookie() {
        let (manager, store) = with_store("desktop");
        assert_eq!(store.write_count(), 0);

        manager.set_current_breakpoint("mobile");
        assert_eq!(store.get("viewport").as_deref(), Some("mobile"));
    }

    #[test]
    fn test_repeated_assignment_is_idempotent() {
        let (manager, store) = with_store("desktop");
        manager.set_current_breakpoint("tablet");
        let once = (store.get("viewport"), manager.is_greater_than("mobile"), manager.queries());

        manager.set_current_breakpoint("tablet");
        let twice = (store.get("viewport"), manager.is_greater_than("mobile"), manager.queries());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_cookie_round_trip_reseeds_identically() {
        let (original, store) = with_store("desktop");
        original.set_current_breakpoint("tablet");

        let restored = create_viewport_manager(three(), store.get("viewport").unwrap()).unwrap();
        for name in ["mobile", "tablet", "desktop", "nonexistent"] {
            assert_eq!(original.is_greater_than(name), restored.is_greater_than(name));
            assert_eq!(original.is_less_than(name), restored.is_less_than(name));
            assert_eq!(original.matches_one(name), restored.matches_one(name));
        }
    }

    #[test]
    fn test_no_store_or_blank_name_skips_persistence() {
        let manager = create_viewport_manager(three(), "desktop").unwrap();
        manager.set_current_breakpoint("mobile");
        assert_eq!(manager.current_breakpoint(), "mobile");

        let mut options = three();
        options.cookie = CookieOptions { name: String::new(), ..CookieOptions::default() };
        let store = Rc::new(MemoryCookieStore::new());
        let manager = ViewportManager::builder(options)
            .initial_state("desktop")
            .cookie_store(store.clone())
            .build()
            .unwrap();
        manager.set_current_breakpoint("mobile");
        assert_eq!(store.write_count(), 0);
    }

    struct RejectingStore;

    impl CookieStore for RejectingStore {
        fn get(&self, _name: &str) -> Option<String> {
            None
        }

        fn set(
            &self,
            name: &str,
            _value: &str,
            _options: &CookieOptions,
        ) -> Result<(), CookieError> {
            Err(CookieError::Rejected { name: name.to_string(), message: "sandboxed".to_string() })
        }

        fn remove(&self, _name: &str, _options: &CookieOptions) -> Result<(), CookieError> {
            Err(CookieError::Unavailable { message: "sandboxed".to_string() })
        }
    }

    #[test]
    fn test_persistence_failure_does_not_block_update() {
        let manager = ViewportManager::builder(three())
            .initial_state("desktop")
            .cookie_store(Rc::new(RejectingStore))
            .build()
            .unwrap();

        manager.set_current_breakpoint("mobile");
        assert_eq!(manager.current_breakpoint(), "mobile");
        manager.set_use_cookie(false);
        assert!(!manager.use_cookie());
    }

    #[test]
    fn test_use_cookie_toggle() {
        let (manager, store) = with_store("desktop");
        manager.set_current_breakpoint("tablet");

        manager.set_use_cookie(false);
        assert_eq!(store.get("viewport"), None);
        manager.set_current_breakpoint("mobile");
        assert_eq!(store.get("viewport"), None);

        manager.set_use_cookie(true);
        assert_eq!(store.get("viewport").as_deref(), Some("mobile"));
    }

    #[test]
    fn test_subscribers_see_changes() {
        let manager = create_viewport_manager(three(), "desktop").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = manager.subscribe(move |bp| sink.borrow_mut().push(bp.to_string()));

        manager.set_current_breakpoint("mobile");
        manager.set_current_breakpoint("mobile");
        manager.set_current_breakpoint("tablet");
        drop(subscription);
        manager.set_current_breakpoint("desktop");

        assert_eq!(*seen.borrow(), vec!["mobile", "tablet"]);
    }

    #[test]
    fn test_reconfigure_refreshes_queries_lazily() {
        let manager = create_viewport_manager(three(), "tablet").unwrap();
        let before = manager.queries();
        assert_eq!(
            before.get("desktop").map(|q| q.media_query.as_str()),
            Some("(min-width: 1024px)")
        );

        let mut options = three();
        options.feature = MediaFeature::MaxWidth;
        manager.reconfigure(options).unwrap();

        assert_eq!(
            manager.queries().get("desktop").map(|q| q.media_query.as_str()),
            Some("(min-width: 768.02px) and (max-width: 1024px)")
        );
    }

    #[test]
    fn test_reconfigure_changes_ordering() {
        let manager = create_viewport_manager(three(), "tablet").unwrap();
        assert!(manager.is_greater_than("mobile"));

        let mut options = three();
        options.breakpoints.insert("mobile", 900);
        manager.reconfigure(options).unwrap();

        assert!(manager.is_less_than("mobile"));
    }

    #[test]
    fn test_reconfigure_rejects_invalid_options() {
        let manager = create_viewport_manager(three(), "tablet").unwrap();
        let mut options = three();
        options.breakpoints = Default::default();

        assert_eq!(manager.reconfigure(options), Err(ConfigError::EmptyBreakpoints));
        assert_eq!(manager.queries().len(), 3);
    }
}
