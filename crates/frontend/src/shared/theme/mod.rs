//! Application themes.
//!
//! The active theme is a value created once by the application and passed
//! explicitly to the shell. The initial value comes from localStorage, then
//! from `ui.theme` in the application config.

use contracts::system::app_config::UiConfig;
use leptos::prelude::*;
use web_sys::window;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    Dark,
    #[default]
    Light,
    Forest,
}

impl Theme {
    /// Name used for the CSS file and localStorage
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Forest => "forest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::Forest => "Forest",
        }
    }

    pub fn css_path(&self) -> String {
        format!("/static/themes/{0}/{0}.css", self.as_str())
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            "forest" => Some(Theme::Forest),
            _ => None,
        }
    }

    pub fn all() -> [Theme; 3] {
        [Theme::Dark, Theme::Light, Theme::Forest]
    }

    /// Stored preference, else the configured default
    pub fn initial(config: &UiConfig) -> Self {
        Self::resolve(load_theme_from_storage(), config)
    }

    fn resolve(stored: Option<Theme>, config: &UiConfig) -> Self {
        stored
            .or_else(|| config.theme.as_deref().and_then(Theme::parse))
            .unwrap_or_default()
    }
}

const THEME_STORAGE_KEY: &str = "app-theme";

fn load_theme_from_storage() -> Option<Theme> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(THEME_STORAGE_KEY).ok().flatten())
        .and_then(|s| Theme::parse(&s))
}

fn save_theme_to_storage(theme: Theme) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(THEME_STORAGE_KEY, theme.as_str());
    }
}

/// Swap the theme stylesheet and tag the body
pub fn apply_theme_css(theme: Theme) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    let Some(head) = document.head() else {
        return;
    };

    if let Ok(Some(existing)) = document.query_selector("#theme-stylesheet") {
        existing.remove();
    }

    if let Ok(link) = document.create_element("link") {
        let _ = link.set_attribute("id", "theme-stylesheet");
        let _ = link.set_attribute("rel", "stylesheet");
        let _ = link.set_attribute("href", &theme.css_path());
        let _ = head.append_child(&link);
    }

    if let Some(body) = document.body() {
        let _ = body.set_attribute("data-theme", theme.as_str());
    }
}

/// Theme buttons; writes the choice back into `theme`
#[component]
pub fn ThemeSelector(theme: RwSignal<Theme>) -> impl IntoView {
    let select_theme = move |next: Theme| {
        theme.set(next);
        save_theme_to_storage(next);
        apply_theme_css(next);
    };

    view! {
        <div class="theme-selector">
            {Theme::all().into_iter().map(|option| {
                view! {
                    <button
                        type="button"
                        class=move || if theme.get() == option { "theme-dropdown-item active" } else { "theme-dropdown-item" }
                        on:click=move |_| select_theme(option)
                    >
                        {option.display_name()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme() {
        assert_eq!(Theme::parse("forest"), Some(Theme::Forest));
        assert_eq!(Theme::parse("neon"), None);
        assert_eq!(Theme::Dark.css_path(), "/static/themes/dark/dark.css");
    }

    #[test]
    fn test_configured_theme_used_without_storage() {
        let config = UiConfig {
            theme: Some("dark".into()),
        };
        assert_eq!(Theme::resolve(None, &config), Theme::Dark);
        assert_eq!(Theme::resolve(Some(Theme::Forest), &config), Theme::Forest);
        assert_eq!(Theme::resolve(None, &UiConfig::default()), Theme::Light);
    }
}
