//! Application roster and per-application window content.
//!
//! Content here is deliberately static mock-up material; the session layer
//! treats every application as an opaque surface identified by its
//! [`AppId`].

use desk_contract::AppId;
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Launcher entry for one application.
pub struct AppDescriptor {
    /// Application this entry launches.
    pub id: AppId,
    /// Launcher label.
    pub label: &'static str,
}

/// Launcher entries in display order.
pub fn dock_roster() -> Vec<AppDescriptor> {
    AppId::ALL
        .into_iter()
        .map(|id| AppDescriptor {
            id,
            label: id.title(),
        })
        .collect()
}

/// Resolves an application to its window body.
pub fn app_content(id: AppId) -> View {
    match id {
        AppId::Finder => view! { <FinderContent /> }.into_view(),
        AppId::Safari => view! { <SafariContent /> }.into_view(),
        AppId::Gmail => view! { <GmailContent /> }.into_view(),
        AppId::GitHub => view! { <ProfileContent service="GitHub" handle="@justinrayshort" /> }
            .into_view(),
        AppId::LinkedIn => view! { <ProfileContent service="LinkedIn" handle="Justin Short" /> }
            .into_view(),
    }
}

#[component]
fn FinderContent() -> impl IntoView {
    let folders = ["Documents", "Projects", "Pictures", "Downloads"];
    view! {
        <div class="app-finder">
            <ul class="app-finder-sidebar">
                {folders
                    .into_iter()
                    .map(|name| view! { <li>{name}</li> })
                    .collect_view()}
            </ul>
            <div class="app-finder-body">
                <p>"No items selected"</p>
            </div>
        </div>
    }
}

#[component]
fn SafariContent() -> impl IntoView {
    view! {
        <div class="app-safari">
            <div class="app-safari-toolbar">
                <input type="text" readonly placeholder="Search or enter website name" />
            </div>
            <div class="app-safari-body">
                <p>"Favorites"</p>
            </div>
        </div>
    }
}

#[component]
fn GmailContent() -> impl IntoView {
    view! {
        <div class="app-gmail">
            <div class="app-gmail-list">
                <p class="app-gmail-subject">"Welcome"</p>
                <p class="app-gmail-preview">"Thanks for stopping by."</p>
            </div>
            <div class="app-gmail-reading">
                <p>"Select a conversation to read it here."</p>
            </div>
        </div>
    }
}

#[component]
fn ProfileContent(service: &'static str, handle: &'static str) -> impl IntoView {
    view! {
        <div class="app-profile">
            <h2>{service}</h2>
            <p class="app-profile-handle">{handle}</p>
            <p>"Profile highlights load here."</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn roster_matches_the_registered_applications() {
        let roster = dock_roster();
        assert_eq!(roster.len(), AppId::ALL.len());
        assert_eq!(roster[0].id, AppId::Finder);
        assert_eq!(roster[0].label, "Finder");
    }
}
