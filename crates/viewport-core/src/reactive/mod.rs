//! Reactive state primitives used by the viewport manager.
//!
//! - [`Observable`]: a shared, version-tracked value with synchronous change
//!   notification.
//! - [`Subscription`]: RAII guard; dropping it unsubscribes.
//! - [`Computed`]: a value derived from an [`Observable`], cached and only
//!   recomputed on the first read after its source changed.
//!
//! Everything here is single-threaded (`Rc<RefCell<..>>`). Subscribers are held
//! as `Weak` callbacks and pruned during notification.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order, after the value is
//!    stored, with no borrow held (callbacks may read the observable).
//! 3. Setting a value equal to the current one is a no-op.
//! 4. `Computed::get()` never returns a stale value.

mod computed;
mod observable;

pub use computed::Computed;
pub use observable::{Observable, Subscription};
