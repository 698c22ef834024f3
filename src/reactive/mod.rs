//! Reactive module - Observable values and subscriptions
//!
//! Every write notifies subscribers synchronously, so a change and all of
//! its reactions complete before the writing call returns.

pub mod observable;

pub use observable::{Observable, Subscription};
