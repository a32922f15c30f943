//! Process-wide environment access behind a single mutex.
//!
//! Token resolution and endpoint overrides read the environment while tests
//! mutate it; routing both through one lock keeps them from racing.

use std::env;
use std::ffi::OsStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    // The guarded value is `()`, so a poisoned lock carries no broken state.
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Read an environment variable while holding the lock.
///
/// # Errors
///
/// Returns [`env::VarError`] when the variable is unset or not Unicode.
pub fn var<K: AsRef<OsStr>>(key: K) -> Result<String, env::VarError> {
    let _guard = lock();
    env::var(key)
}

/// Read a variable, treating unset, non-Unicode and empty values alike.
pub fn non_empty_var<K: AsRef<OsStr>>(key: K) -> Option<String> {
    var(key).ok().filter(|value| !value.is_empty())
}

/// Set an environment variable while holding the lock.
pub fn set_var<K: AsRef<OsStr>, V: AsRef<OsStr>>(key: K, value: V) {
    let _guard = lock();
    // SAFETY: every access in this crate goes through `ENV_LOCK`.
    unsafe { env::set_var(key, value) };
}

/// Remove an environment variable while holding the lock.
pub fn remove_var<K: AsRef<OsStr>>(key: K) {
    let _guard = lock();
    // SAFETY: every access in this crate goes through `ENV_LOCK`.
    unsafe { env::remove_var(key) };
}
