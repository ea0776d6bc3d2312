use std::sync::{Arc, Mutex};

use super::*;

// =============================================================================
// Test doubles: scriptable OS/surface context and shared preference store.
// =============================================================================

type Listener = Box<dyn Fn(bool) + Send + Sync>;

#[derive(Default)]
struct FakeContext {
    os_dark: Mutex<bool>,
    applied: Mutex<Vec<bool>>,
    listener: Arc<Mutex<Option<Listener>>>,
    cancel_count: Arc<Mutex<u32>>,
}

impl FakeContext {
    fn with_os_dark(os_dark: bool) -> Arc<Self> {
        let ctx = Self::default();
        *ctx.os_dark.lock().unwrap() = os_dark;
        Arc::new(ctx)
    }

    fn applied(&self) -> Vec<bool> {
        self.applied.lock().unwrap().clone()
    }

    /// Simulate an OS theme-change notification.
    fn fire_os_change(&self, os_dark: bool) {
        *self.os_dark.lock().unwrap() = os_dark;
        let listener = self.listener.lock().unwrap();
        if let Some(on_change) = listener.as_ref() {
            on_change(os_dark);
        }
    }

    fn cancel_count(&self) -> u32 {
        *self.cancel_count.lock().unwrap()
    }
}

impl ExecutionContext for FakeContext {
    fn is_interactive(&self) -> bool {
        true
    }

    fn os_prefers_dark(&self) -> bool {
        *self.os_dark.lock().unwrap()
    }

    fn set_surface_dark(&self, dark: bool) {
        self.applied.lock().unwrap().push(dark);
    }

    fn watch_os_preference(&self, on_change: Listener) -> WatchHandle {
        *self.listener.lock().unwrap() = Some(on_change);
        let listener = Arc::clone(&self.listener);
        let cancel_count = Arc::clone(&self.cancel_count);
        WatchHandle::new(move || {
            *listener.lock().unwrap() = None;
            *cancel_count.lock().unwrap() += 1;
        })
    }
}

fn store_with(context: &Arc<FakeContext>, persisted: Arc<InMemoryStore>) -> ThemeStore {
    ThemeStore::new(Arc::clone(context) as Arc<dyn ExecutionContext>, persisted)
}

// =============================================================================
// effective_theme
// =============================================================================

#[test]
fn effective_theme_explicit_preference_wins() {
    assert!(effective_theme(Some(true), false));
    assert!(!effective_theme(Some(false), true));
}

#[test]
fn effective_theme_follow_system_mirrors_os() {
    assert!(effective_theme(None, true));
    assert!(!effective_theme(None, false));
}

// =============================================================================
// is_dark
// =============================================================================

#[test]
fn is_dark_follows_os_without_explicit_preference() {
    let ctx = FakeContext::with_os_dark(true);
    let theme = store_with(&ctx, Arc::new(InMemoryStore::default()));
    assert!(theme.is_dark());

    *ctx.os_dark.lock().unwrap() = false;
    assert!(!theme.is_dark());
}

#[test]
fn is_dark_ignores_os_once_explicit() {
    let persisted = Arc::new(InMemoryStore::default());
    persisted.save(true);
    let ctx = FakeContext::with_os_dark(false);
    let theme = store_with(&ctx, persisted);
    assert!(theme.is_dark());
}

// =============================================================================
// init_theme
// =============================================================================

#[test]
fn init_theme_applies_current_effective_theme() {
    let ctx = FakeContext::with_os_dark(true);
    let theme = store_with(&ctx, Arc::new(InMemoryStore::default()));
    theme.init_theme();
    assert_eq!(ctx.applied(), vec![true]);
    assert!(theme.effective().get_untracked());
}

// =============================================================================
// toggle_theme
// =============================================================================

#[test]
fn first_toggle_negates_displayed_theme() {
    // OS is light, nothing explicit: displayed theme is light, so the first
    // toggle lands on explicit dark.
    let persisted = Arc::new(InMemoryStore::default());
    let ctx = FakeContext::with_os_dark(false);
    let theme = store_with(&ctx, Arc::clone(&persisted));

    theme.toggle_theme();
    assert_eq!(theme.preference(), Some(true));
    assert!(theme.is_dark());
    assert_eq!(ctx.applied(), vec![true]);
    assert_eq!(persisted.load(), Some(true));
}

#[test]
fn second_toggle_flips_back_to_explicit_light() {
    let persisted = Arc::new(InMemoryStore::default());
    let ctx = FakeContext::with_os_dark(false);
    let theme = store_with(&ctx, Arc::clone(&persisted));

    theme.toggle_theme();
    theme.toggle_theme();
    assert_eq!(theme.preference(), Some(false));
    assert!(!theme.is_dark());
    assert_eq!(ctx.applied(), vec![true, false]);
    assert_eq!(persisted.load(), Some(false));
}

#[test]
fn first_toggle_resolves_against_live_os_state() {
    // OS is dark at toggle time: displayed is dark, toggle lands on light.
    let ctx = FakeContext::with_os_dark(true);
    let theme = store_with(&ctx, Arc::new(InMemoryStore::default()));

    theme.toggle_theme();
    assert_eq!(theme.preference(), Some(false));
}

#[test]
fn toggle_never_returns_to_follow_system() {
    let ctx = FakeContext::with_os_dark(false);
    let theme = store_with(&ctx, Arc::new(InMemoryStore::default()));
    for _ in 0..4 {
        theme.toggle_theme();
        assert!(theme.preference().is_some());
    }
}

// =============================================================================
// watch_system_preference
// =============================================================================

#[test]
fn os_change_reapplies_while_following_system() {
    let ctx = FakeContext::with_os_dark(false);
    let theme = store_with(&ctx, Arc::new(InMemoryStore::default()));

    let _handle = theme.watch_system_preference();
    ctx.fire_os_change(true);

    assert!(theme.is_dark());
    assert_eq!(ctx.applied(), vec![true]);
    assert!(theme.effective().get_untracked());
}

#[test]
fn os_change_never_overrides_explicit_preference() {
    let persisted = Arc::new(InMemoryStore::default());
    persisted.save(true);
    let ctx = FakeContext::with_os_dark(true);
    let theme = store_with(&ctx, persisted);
    theme.init_theme();

    let _handle = theme.watch_system_preference();
    ctx.fire_os_change(false);

    assert!(theme.is_dark());
    // Only the init application; the OS notification must not touch the surface.
    assert_eq!(ctx.applied(), vec![true]);
}

#[test]
fn os_change_rechecks_preference_at_fire_time() {
    // Explicit choice made *after* subscribing must win over a later
    // notification; the callback may not capture a stale preference.
    let ctx = FakeContext::with_os_dark(false);
    let theme = store_with(&ctx, Arc::new(InMemoryStore::default()));

    let _handle = theme.watch_system_preference();
    theme.toggle_theme();
    ctx.fire_os_change(false);

    assert_eq!(theme.preference(), Some(true));
    assert!(theme.is_dark());
    assert_eq!(ctx.applied(), vec![true]);
}

#[test]
fn cancel_unsubscribes_and_is_idempotent() {
    let ctx = FakeContext::with_os_dark(false);
    let theme = store_with(&ctx, Arc::new(InMemoryStore::default()));

    let handle = theme.watch_system_preference();
    handle.cancel();
    handle.cancel();

    assert_eq!(ctx.cancel_count(), 1);
    ctx.fire_os_change(true);
    assert_eq!(ctx.applied(), Vec::<bool>::new());
}

// =============================================================================
// Persistence round-trip
// =============================================================================

#[test]
fn preference_survives_restart_via_store() {
    let persisted = Arc::new(InMemoryStore::default());
    let ctx = FakeContext::with_os_dark(false);
    let theme = store_with(&ctx, Arc::clone(&persisted));
    theme.toggle_theme();
    assert_eq!(theme.preference(), Some(true));

    // "Restart": a fresh store over the same persistence layer.
    let ctx2 = FakeContext::with_os_dark(false);
    let revived = store_with(&ctx2, persisted);
    assert_eq!(revived.preference(), Some(true));
    assert!(revived.is_dark());
}

// =============================================================================
// Non-interactive context
// =============================================================================

#[test]
fn inert_context_defaults_to_light() {
    let theme = ThemeStore::new(Arc::new(InertContext), Arc::new(InMemoryStore::default()));
    assert!(!theme.is_dark());
}

#[test]
fn inert_context_operations_are_noops() {
    let persisted: Arc<dyn PreferenceStore> = Arc::new(InMemoryStore::default());
    let theme = ThemeStore::new(Arc::new(InertContext), Arc::clone(&persisted));

    theme.init_theme();
    theme.toggle_theme();

    assert_eq!(theme.preference(), None);
    assert_eq!(persisted.load(), None);
}

#[test]
fn inert_watch_handle_cancels_safely() {
    let theme = ThemeStore::new(Arc::new(InertContext), Arc::new(InMemoryStore::default()));
    let handle = theme.watch_system_preference();
    handle.cancel();
    handle.cancel();
}
