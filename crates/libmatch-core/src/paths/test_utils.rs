//! Environment isolation for tests that read `LIBMATCH_*` variables.
//!
//! Hold [`ENV_LOCK`] for the whole test, then change variables through
//! [`EnvVarGuard`].

use std::env;
use std::ffi::OsString;
use std::sync::Mutex;

pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Overrides one variable until dropped.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<OsString>,
}

impl EnvVarGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        Self::replace(key, Some(value))
    }

    pub fn remove(key: &'static str) -> Self {
        Self::replace(key, None)
    }

    fn replace(key: &'static str, value: Option<&str>) -> Self {
        let previous = env::var_os(key);
        write_var(key, value.map(OsString::from));
        Self { key, previous }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        write_var(self.key, self.previous.take());
    }
}

// Callers hold ENV_LOCK, so no other test thread touches the environment.
#[allow(unsafe_code)]
fn write_var(key: &str, value: Option<OsString>) {
    match value {
        Some(value) => unsafe { env::set_var(key, value) },
        None => unsafe { env::remove_var(key) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "LIBMATCH_TEST_GUARD_VAR";

    #[test]
    fn guard_restores_previous_state() {
        let _lock = ENV_LOCK.lock().unwrap();
        {
            let _outer = EnvVarGuard::set(KEY, "outer");
            {
                let _inner = EnvVarGuard::remove(KEY);
                assert!(env::var_os(KEY).is_none());
            }
            assert_eq!(env::var(KEY).unwrap(), "outer");
        }
        assert!(env::var_os(KEY).is_none());
    }
}
