//! Dashboard page: the signed-in notes workspace.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It loads the note list once the
//! session resolves and hosts the theme toggle; the route guard redirects
//! unauthenticated visitors to `/auth` before any note content is requested.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::net::types::{Note, NotePayload};
use crate::state::auth::AuthState;
use crate::state::theme::ThemeStore;

const MAX_TITLE_LEN: usize = 200;

fn validate_note_title(title: &str) -> Result<String, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Give the note a title first.");
    }
    if title.len() > MAX_TITLE_LEN {
        return Err("That title is too long.");
    }
    Ok(title.to_owned())
}

/// Insert `note` at the front, or replace it in place when the id is already
/// listed.
fn upsert_note(notes: &mut Vec<Note>, note: Note) {
    if let Some(existing) = notes.iter_mut().find(|n| n.id == note.id) {
        *existing = note;
    } else {
        notes.insert(0, note);
    }
}

fn remove_note(notes: &mut Vec<Note>, note_id: &str) {
    notes.retain(|n| n.id != note_id);
}

/// Dashboard page — note list, editor, theme toggle, and sign-out.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let theme = expect_context::<ThemeStore>();

    let notes = RwSignal::new(Vec::<Note>::new());
    let selected = RwSignal::new(None::<String>);
    let title = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    // Load the list once, after the session query resolves to a user.
    let requested_list = RwSignal::new(false);
    Effect::new(move || {
        let state = auth.get();
        if requested_list.get() || state.loading || state.user.is_none() {
            return;
        }
        requested_list.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::list_notes().await {
                Ok(list) => notes.set(list),
                Err(e) => info.set(e),
            }
        });
    });

    let select_note = move |note: &Note| {
        selected.set(Some(note.id.clone()));
        title.set(note.title.clone());
        body.set(note.body.clone());
        info.set(String::new());
    };

    let on_new = move |_| {
        selected.set(None);
        title.set(String::new());
        body.set(String::new());
        info.set(String::new());
    };

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let title_value = match validate_note_title(&title.get()) {
            Ok(v) => v,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        let payload = NotePayload { title: title_value, body: body.get() };
        let target = selected.get();
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = match target.as_deref() {
                Some(note_id) => crate::net::api::update_note(note_id, &payload).await,
                None => crate::net::api::create_note(&payload).await,
            };
            match result {
                Ok(saved) => {
                    selected.set(Some(saved.id.clone()));
                    notes.update(|list| upsert_note(list, saved));
                    info.set("Saved.".to_owned());
                }
                Err(e) => info.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (payload, target);
    };

    let on_delete = move |note_id: String| {
        if busy.get() {
            return;
        }
        busy.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_note(&note_id).await {
                Ok(()) => {
                    notes.update(|list| remove_note(list, &note_id));
                    if selected.get_untracked().as_deref() == Some(note_id.as_str()) {
                        selected.set(None);
                        title.set(String::new());
                        body.set(String::new());
                    }
                }
                Err(e) => info.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = note_id;
    };

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            crate::net::api::logout().await;
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/auth");
            }
        });
    };

    let effective = theme.effective();
    let toggle = theme.clone();
    let on_toggle_theme = move |_| toggle.toggle_theme();

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>"Notes"</h1>
                <div class="dashboard-header__actions">
                    <button class="chrome-button" on:click=on_toggle_theme>
                        {
                            let effective = effective.clone();
                            move || if effective.get() { "Light mode" } else { "Dark mode" }
                        }
                    </button>
                    <button class="chrome-button" on:click=on_logout>
                        "Sign out"
                    </button>
                </div>
            </header>
            <Show
                when=move || auth.get().session_present()
                fallback=|| view! { <p class="dashboard-loading">"Loading..."</p> }
            >
                <div class="dashboard-body">
                    <aside class="note-list">
                        <button class="chrome-button" on:click=on_new>
                            "New note"
                        </button>
                        <For
                            each=move || notes.get()
                            key=|note| (note.id.clone(), note.updated_at.clone())
                            children=move |note: Note| {
                                let open = note.clone();
                                let delete_id = note.id.clone();
                                view! {
                                    <div class="note-list__row">
                                        <button class="note-list__open" on:click=move |_| select_note(&open)>
                                            {note.title.clone()}
                                        </button>
                                        <button class="note-list__delete" on:click=move |_| on_delete(delete_id.clone())>
                                            "Delete"
                                        </button>
                                    </div>
                                }
                            }
                        />
                    </aside>
                    <form class="note-editor" on:submit=on_save>
                        <input
                            class="note-editor__title"
                            type="text"
                            placeholder="Title"
                            prop:value=move || title.get()
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                        <textarea
                            class="note-editor__body"
                            placeholder="Write something..."
                            prop:value=move || body.get()
                            on:input=move |ev| body.set(event_target_value(&ev))
                        ></textarea>
                        <button class="auth-button" type="submit" disabled=move || busy.get()>
                            "Save"
                        </button>
                        <Show when=move || !info.get().is_empty()>
                            <p class="note-editor__message">{move || info.get()}</p>
                        </Show>
                    </form>
                </div>
            </Show>
        </div>
    }
}
