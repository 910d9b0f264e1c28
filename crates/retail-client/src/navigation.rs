//! Navigation hook.
//!
//! The HTTP client has to send the user to the sign-in page on a 401 without
//! knowing anything about the view layer. The app hands it a [`Navigator`].

use std::sync::{Arc, Mutex};

use retail_core::SIGNIN_PATH;

/// Where the user currently is, and how to send them elsewhere.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}

/// Sends the user to sign in, unless they are already on the sign-in page.
///
/// Returns true when a redirect was issued.
pub fn redirect_to_signin(navigator: &dyn Navigator) -> bool {
    if navigator.current_path().contains(SIGNIN_PATH) {
        return false;
    }
    navigator.redirect(SIGNIN_PATH);
    true
}

/// Ignores every redirect. For headless use where no view is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn current_path(&self) -> String {
        String::new()
    }

    fn redirect(&self, _path: &str) {}
}

/// Tracks the current path and remembers every redirect.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    inner: Arc<Mutex<NavState>>,
}

#[derive(Debug, Default)]
struct NavState {
    path: String,
    redirects: Vec<String>,
}

impl RecordingNavigator {
    pub fn at(path: impl Into<String>) -> Self {
        RecordingNavigator {
            inner: Arc::new(Mutex::new(NavState {
                path: path.into(),
                redirects: Vec::new(),
            })),
        }
    }

    /// Moves to `path` without recording a redirect (a normal page change).
    pub fn visit(&self, path: impl Into<String>) {
        if let Ok(mut state) = self.inner.lock() {
            state.path = path.into();
        }
    }

    pub fn redirects(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|state| state.redirects.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.inner
            .lock()
            .map(|state| state.path.clone())
            .unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        if let Ok(mut state) = self.inner.lock() {
            state.path = path.to_string();
            state.redirects.push(path.to_string());
        }
    }
}
