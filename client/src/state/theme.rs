//! Theme preference store: explicit dark/light choice with follow-system
//! fallback.
//!
//! DESIGN
//! ======
//! The preference is tri-state (`Some(true)` dark, `Some(false)` light,
//! `None` follow the OS). The store never invents an explicit choice: only
//! `toggle_theme` moves out of follow-system, and nothing moves back. The
//! surrounding environment is injected as two small capabilities so the store
//! behaves identically in the browser, during SSR, and under test:
//!
//! - [`ExecutionContext`] — OS dark-mode query, the rendering surface's
//!   dark flag, and the OS preference-change subscription.
//! - [`PreferenceStore`] — persistence of the explicit choice across visits.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is fire-and-forget: a failed write leaves the in-memory
//! preference authoritative for the rest of the visit rather than surfacing
//! an error from a theme toggle.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::sync::{Arc, Mutex};

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::util::persistence;

/// `localStorage` key holding the explicit preference as a JSON boolean.
#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "notes_theme";

/// Media query string used for both the live query and the change watch.
#[cfg(feature = "hydrate")]
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Compute the effective theme from the explicit preference and the live OS
/// preference. `true` means dark.
#[must_use]
pub fn effective_theme(preference: Option<bool>, os_dark: bool) -> bool {
    preference.unwrap_or(os_dark)
}

// =============================================================================
// COLLABORATOR CAPABILITIES
// =============================================================================

/// Environment capability: OS theme query, surface application, change watch.
///
/// Two implementations exist: [`BrowserContext`] for hydrated clients and
/// [`InertContext`] for contexts without a display surface (SSR, tests that
/// want the no-op branch).
pub trait ExecutionContext: Send + Sync {
    /// Whether a real rendering surface is attached. All theme operations
    /// degrade to no-ops when this is `false`.
    fn is_interactive(&self) -> bool;

    /// Live OS dark-mode preference. `false` when unavailable.
    fn os_prefers_dark(&self) -> bool;

    /// Set the surface's dark flag (the `data-theme` attribute on `<html>`).
    fn set_surface_dark(&self, dark: bool);

    /// Subscribe to OS preference changes. The callback receives the new
    /// OS dark flag on every notification until the returned handle is
    /// cancelled.
    fn watch_os_preference(&self, on_change: Box<dyn Fn(bool) + Send + Sync>) -> WatchHandle;
}

/// Persistence capability for the explicit preference.
pub trait PreferenceStore: Send + Sync {
    /// Stored explicit preference, or `None` when the user never chose.
    fn load(&self) -> Option<bool>;

    /// Persist an explicit preference. Failures are swallowed.
    fn save(&self, dark: bool);
}

/// Cancellation handle for an OS preference watch.
///
/// Cancellation is idempotent: cleanup paths may run more than once, so the
/// underlying unsubscribe closure fires at most once.
pub struct WatchHandle {
    cancel: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl WatchHandle {
    /// Handle that unsubscribes by running `cancel`.
    #[must_use]
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self { cancel: Mutex::new(Some(Box::new(cancel))) }
    }

    /// Handle over no subscription; `cancel` does nothing.
    #[must_use]
    pub fn inert() -> Self {
        Self { cancel: Mutex::new(None) }
    }

    /// Unsubscribe. Safe to call repeatedly.
    pub fn cancel(&self) {
        let taken = self.cancel.lock().ok().and_then(|mut slot| slot.take());
        if let Some(unsubscribe) = taken {
            unsubscribe();
        }
    }
}

// =============================================================================
// NON-INTERACTIVE IMPLEMENTATIONS
// =============================================================================

/// Context for environments without a display surface. Queries report light,
/// applications are no-ops, and watches are inert.
#[derive(Clone, Copy, Debug, Default)]
pub struct InertContext;

impl ExecutionContext for InertContext {
    fn is_interactive(&self) -> bool {
        false
    }

    fn os_prefers_dark(&self) -> bool {
        false
    }

    fn set_surface_dark(&self, _dark: bool) {}

    fn watch_os_preference(&self, _on_change: Box<dyn Fn(bool) + Send + Sync>) -> WatchHandle {
        WatchHandle::inert()
    }
}

/// In-memory preference store for SSR and tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    value: Mutex<Option<bool>>,
}

impl PreferenceStore for InMemoryStore {
    fn load(&self) -> Option<bool> {
        self.value.lock().ok().and_then(|slot| *slot)
    }

    fn save(&self, dark: bool) {
        if let Ok(mut slot) = self.value.lock() {
            *slot = Some(dark);
        }
    }
}

// =============================================================================
// BROWSER IMPLEMENTATIONS (hydrate only)
// =============================================================================

/// Browser-backed context: `matchMedia`, `<html data-theme>`, and the
/// media-query change event.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserContext;

#[cfg(feature = "hydrate")]
thread_local! {
    // The live media-query listener. One watch is active at a time; the
    // closure must stay alive for as long as the subscription does.
    static ACTIVE_WATCH: std::cell::RefCell<
        Option<(web_sys::MediaQueryList, wasm_bindgen::closure::Closure<dyn FnMut(web_sys::MediaQueryListEvent)>)>,
    > = const { std::cell::RefCell::new(None) };
}

#[cfg(feature = "hydrate")]
impl ExecutionContext for BrowserContext {
    fn is_interactive(&self) -> bool {
        web_sys::window().is_some()
    }

    fn os_prefers_dark(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.match_media(DARK_QUERY).ok().flatten())
            .is_some_and(|mq| mq.matches())
    }

    fn set_surface_dark(&self, dark: bool) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = el.set_attribute("data-theme", if dark { "dark" } else { "light" });
        }
    }

    fn watch_os_preference(&self, on_change: Box<dyn Fn(bool) + Send + Sync>) -> WatchHandle {
        use wasm_bindgen::JsCast;

        let Some(mql) = web_sys::window().and_then(|w| w.match_media(DARK_QUERY).ok().flatten()) else {
            return WatchHandle::inert();
        };

        let closure = wasm_bindgen::closure::Closure::<dyn FnMut(web_sys::MediaQueryListEvent)>::new(
            move |ev: web_sys::MediaQueryListEvent| on_change(ev.matches()),
        );
        mql.set_onchange(Some(closure.as_ref().unchecked_ref()));
        ACTIVE_WATCH.with(|slot| *slot.borrow_mut() = Some((mql, closure)));

        WatchHandle::new(|| {
            ACTIVE_WATCH.with(|slot| {
                if let Some((mql, _closure)) = slot.borrow_mut().take() {
                    mql.set_onchange(None);
                }
            });
        })
    }
}

/// Preference store over `localStorage`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(feature = "hydrate")]
impl PreferenceStore for BrowserStore {
    fn load(&self) -> Option<bool> {
        persistence::read_json(STORAGE_KEY)
    }

    fn save(&self, dark: bool) {
        persistence::write_json(STORAGE_KEY, &dark);
    }
}

// =============================================================================
// THEME STORE
// =============================================================================

/// Dependency-injected theme store shared through the reactive context.
///
/// Holds the tri-state preference and an [`ArcRwSignal`] mirroring the theme
/// currently applied to the surface, so UI chrome can react to toggles and
/// OS changes without re-querying the environment.
#[derive(Clone)]
pub struct ThemeStore {
    preference: Arc<Mutex<Option<bool>>>,
    effective: ArcRwSignal<bool>,
    context: Arc<dyn ExecutionContext>,
    store: Arc<dyn PreferenceStore>,
}

impl ThemeStore {
    /// Build a store over the given collaborators, restoring any persisted
    /// explicit preference.
    #[must_use]
    pub fn new(context: Arc<dyn ExecutionContext>, store: Arc<dyn PreferenceStore>) -> Self {
        let preference = store.load();
        Self {
            preference: Arc::new(Mutex::new(preference)),
            effective: ArcRwSignal::new(effective_theme(preference, false)),
            context,
            store,
        }
    }

    /// Current explicit preference: `Some(true)` dark, `Some(false)` light,
    /// `None` follow-system.
    #[must_use]
    pub fn preference(&self) -> Option<bool> {
        // A poisoned lock degrades to follow-system rather than panicking.
        self.preference.lock().ok().and_then(|slot| *slot)
    }

    /// Effective theme right now: the explicit preference when set, the live
    /// OS preference otherwise. Light on non-interactive contexts.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        effective_theme(self.preference(), self.context.os_prefers_dark())
    }

    /// Reactive view of the theme last applied to the surface.
    #[must_use]
    pub fn effective(&self) -> ArcRwSignal<bool> {
        self.effective.clone()
    }

    /// Apply the current effective theme to the surface. Call once on client
    /// activation. No-op on non-interactive contexts.
    pub fn init_theme(&self) {
        if !self.context.is_interactive() {
            return;
        }
        self.apply(self.is_dark());
    }

    /// Flip the theme. Resolves follow-system against the theme currently
    /// displayed, so the result is always an explicit choice, applied and
    /// persisted immediately. No-op on non-interactive contexts.
    pub fn toggle_theme(&self) {
        if !self.context.is_interactive() {
            return;
        }
        let next = !self.is_dark();
        if let Ok(mut slot) = self.preference.lock() {
            *slot = Some(next);
        }
        self.store.save(next);
        self.apply(next);
    }

    /// Follow OS preference changes while no explicit choice is set.
    ///
    /// The preference is re-read on every notification, so an explicit choice
    /// made after subscribing is never clobbered by a later OS change. Invoke
    /// once; cancel the returned handle on cleanup.
    #[must_use]
    pub fn watch_system_preference(&self) -> WatchHandle {
        let preference = Arc::clone(&self.preference);
        let effective = self.effective.clone();
        let context = Arc::clone(&self.context);
        self.context.watch_os_preference(Box::new(move |os_dark| {
            let explicit = preference.lock().ok().and_then(|slot| *slot);
            if explicit.is_none() {
                context.set_surface_dark(os_dark);
                effective.set(os_dark);
            }
        }))
    }

    fn apply(&self, dark: bool) {
        self.context.set_surface_dark(dark);
        self.effective.set(dark);
    }
}
