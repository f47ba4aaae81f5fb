//! Media-query binder.
//!
//! Connects native viewport-size notifications to a [`ViewportManager`]. One
//! media-query list is created per breakpoint range; a list that flips to
//! matching assigns its breakpoint. Bindings live as long as the returned
//! [`BinderGuard`].

use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

use super::manager::ViewportManager;
use crate::reactive::Subscription;

/// Where the hosting code runs. Listeners are only attached on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionEnvironment {
    Server,
    Client,
}

/// Handle returned by [`MediaQueryList::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Callback receiving the new match state of a list.
pub type MediaListener = Box<dyn Fn(bool)>;

/// A live media query (the `MediaQueryList` of a browser).
pub trait MediaQueryList {
    fn matches(&self) -> bool;

    fn add_listener(&self, listener: MediaListener) -> ListenerId;

    fn remove_listener(&self, id: ListenerId);
}

/// Native capability creating live media queries.
pub trait MediaQuerySource {
    fn match_media(&self, query: &str) -> Box<dyn MediaQueryList>;
}

struct Binding {
    list: Box<dyn MediaQueryList>,
    listener: ListenerId,
}

fn attach(manager: &ViewportManager, source: &dyn MediaQuerySource) -> Vec<Binding> {
    let queries = manager.queries();
    let mut bindings = Vec::with_capacity(queries.len());

    for (name, range) in queries.iter() {
        let list = source.match_media(&range.media_query);
        if list.matches() {
            manager.set_current_breakpoint(name);
        }

        let target = manager.clone();
        let breakpoint = name.to_string();
        let listener = list.add_listener(Box::new(move |matches| {
            if matches {
                target.set_current_breakpoint(breakpoint.as_str());
            }
        }));
        bindings.push(Binding { list, listener });
    }

    debug!("[binder] attached {} media query listeners", bindings.len());
    bindings
}

fn detach(bindings: &mut Vec<Binding>) {
    for binding in bindings.drain(..) {
        binding.list.remove_listener(binding.listener);
    }
}

/// Keeps media-query listeners attached. Dropping it removes all of them.
#[must_use = "listeners are removed when the guard is dropped"]
pub struct BinderGuard {
    bindings: Rc<RefCell<Vec<Binding>>>,
    _reconfigure: Option<Subscription>,
}

impl BinderGuard {
    fn inert() -> Self {
        Self { bindings: Rc::new(RefCell::new(Vec::new())), _reconfigure: None }
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.bindings.borrow().len()
    }
}

impl Drop for BinderGuard {
    fn drop(&mut self) {
        detach(&mut self.bindings.borrow_mut());
    }
}

/// Bind one listener per breakpoint range of `manager`.
///
/// On [`ExecutionEnvironment::Server`] nothing is attached. On the client the
/// currently matching range is assigned immediately and listeners are
/// rebuilt whenever the manager is reconfigured.
pub fn bind_media_queries(
    env: ExecutionEnvironment,
    manager: &ViewportManager,
    source: Rc<dyn MediaQuerySource>,
) -> BinderGuard {
    if env == ExecutionEnvironment::Server {
        return BinderGuard::inert();
    }

    let bindings = Rc::new(RefCell::new(attach(manager, source.as_ref())));

    let target = manager.clone();
    let slots = Rc::clone(&bindings);
    let reconfigure = manager.on_reconfigure(move |_| {
        let mut stale = slots.take();
        detach(&mut stale);
        // Attaching assigns the breakpoint; state subscribers may read the guard.
        let fresh = attach(&target, source.as_ref());
        *slots.borrow_mut() = fresh;
    });

    BinderGuard { bindings, _reconfigure: Some(reconfigure) }
}
