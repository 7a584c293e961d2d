/// Color palettes and per-element styles
use crate::preferences::{Preferences, SortColumn, SortPreference, ThemeKey, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background_color: &'static str,
    pub title_color: &'static str,
    pub url_title_color: &'static str,
    pub updated_ago_text_color: &'static str,
    pub primary_color: &'static str,
    pub dark: bool,
}

pub const CLASSIC_MODE: Palette = Palette {
    background_color: "#ffffff",
    title_color: "#202124",
    url_title_color: "#5f6368",
    updated_ago_text_color: "#80868b",
    primary_color: "#1a73e8",
    dark: false,
};

pub const DARK_MODE: Palette = Palette {
    background_color: "#2b2b2b",
    title_color: "#e8eaed",
    url_title_color: "#bdc1c6",
    updated_ago_text_color: "#9aa0a6",
    primary_color: "#8ab4f8",
    dark: true,
};

impl Palette {
    pub fn for_theme(theme: ThemeKey) -> Palette {
        match theme {
            ThemeKey::ClassicMode => CLASSIC_MODE,
            ThemeKey::DarkMode => DARK_MODE,
        }
    }
}

/// Header controls that light up when they match the current preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderControl {
    Tree,
    Active,
    Title,
    Site,
}

/// Every kind of element the theme colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCategory {
    Body,
    TopHeader,
    NewTabButton,
    Footer,
    SearchBar,
    ActionsPopup,
    ActionsPopupItem,
    HeaderButton(HeaderControl),
    HeaderIcon(HeaderControl),
    SearchIcon,
    MoreVertIcon,
    HorizontalDots,
    CloseTabIcon,
    UrlTitle,
    UpdatedAgo,
    SiteWrapper,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeStyles {
    pub palette: Palette,
    sort_by: SortPreference,
    view_mode: ViewMode,
}

impl ThemeStyles {
    pub fn resolve(preferences: &Preferences) -> Self {
        ThemeStyles {
            palette: Palette::for_theme(preferences.theme),
            sort_by: preferences.sort_by,
            view_mode: preferences.view_mode,
        }
    }

    pub fn is_highlighted(&self, control: HeaderControl) -> bool {
        let column = self.sort_by.map(|key| key.column());
        match control {
            HeaderControl::Tree => self.view_mode == ViewMode::Tree,
            HeaderControl::Active => column == Some(SortColumn::Active),
            HeaderControl::Title => column == Some(SortColumn::Title),
            HeaderControl::Site => column == Some(SortColumn::Site),
        }
    }

    /// Inline style for an element category
    pub fn style(&self, category: ElementCategory) -> String {
        let p = &self.palette;
        match category {
            ElementCategory::Body
            | ElementCategory::TopHeader
            | ElementCategory::Footer => format!("background-color: {};", p.background_color),
            ElementCategory::NewTabButton
            | ElementCategory::HorizontalDots
            | ElementCategory::CloseTabIcon => format!("color: {};", p.title_color),
            ElementCategory::SearchBar => {
                format!("background-color: {}; color: {};", p.background_color, p.title_color)
            }
            ElementCategory::ActionsPopup => {
                format!("background-color: {};", if p.dark { "#555" } else { "#eee" })
            }
            ElementCategory::ActionsPopupItem => {
                format!("color: {};", if p.dark { "white" } else { "#333" })
            }
            ElementCategory::HeaderButton(control) | ElementCategory::HeaderIcon(control) => {
                let color = if self.is_highlighted(control) {
                    p.primary_color
                } else {
                    p.title_color
                };
                format!("color: {};", color)
            }
            ElementCategory::SearchIcon | ElementCategory::MoreVertIcon => {
                format!("color: {};", p.primary_color)
            }
            ElementCategory::UrlTitle => format!("color: {};", p.url_title_color),
            ElementCategory::UpdatedAgo => {
                format!("color: {};", p.updated_ago_text_color)
            }
            ElementCategory::SiteWrapper => {
                format!("background-color: {};", if p.dark { "#404040" } else { "#eee" })
            }
        }
    }

    /// Class list of a row's inner wrapper
    pub fn row_class(&self, selected: bool) -> String {
        let mode = if self.palette.dark {
            "tab-info-wrapper-dark-mode"
        } else {
            "tab-info-wrapper-white-mode"
        };
        if selected {
            format!("tab-info-wrapper {} focused-tab-info-wrapper", mode)
        } else {
            format!("tab-info-wrapper {}", mode)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::SortKey;

    fn styles(theme: ThemeKey, sort_by: SortPreference, view_mode: ViewMode) -> ThemeStyles {
        ThemeStyles::resolve(&Preferences {
            theme,
            sort_by,
            view_mode,
        })
    }

    #[test]
    fn test_palette_per_theme() {
        assert_eq!(Palette::for_theme(ThemeKey::ClassicMode), CLASSIC_MODE);
        assert_eq!(Palette::for_theme(ThemeKey::DarkMode), DARK_MODE);
    }

    #[test]
    fn test_background_categories() {
        let s = styles(ThemeKey::DarkMode, Some(SortKey::ActiveAsc), ViewMode::List);

        for category in [ElementCategory::Body, ElementCategory::TopHeader, ElementCategory::Footer] {
            assert_eq!(s.style(category), "background-color: #2b2b2b;");
        }
        assert_eq!(
            s.style(ElementCategory::SearchBar),
            "background-color: #2b2b2b; color: #e8eaed;"
        );
        assert_eq!(s.style(ElementCategory::ActionsPopup), "background-color: #555;");
        assert_eq!(s.style(ElementCategory::SiteWrapper), "background-color: #404040;");
    }

    #[test]
    fn test_header_highlight_follows_sort_and_view() {
        let s = styles(ThemeKey::ClassicMode, Some(SortKey::SiteDesc), ViewMode::Tree);

        assert!(s.is_highlighted(HeaderControl::Tree));
        assert!(s.is_highlighted(HeaderControl::Site));
        assert!(!s.is_highlighted(HeaderControl::Active));
        assert!(!s.is_highlighted(HeaderControl::Title));
        assert_eq!(
            s.style(ElementCategory::HeaderButton(HeaderControl::Site)),
            "color: #1a73e8;"
        );
        assert_eq!(
            s.style(ElementCategory::HeaderIcon(HeaderControl::Active)),
            "color: #202124;"
        );
    }

    #[test]
    fn test_unsorted_highlights_no_column() {
        let s = styles(ThemeKey::ClassicMode, None, ViewMode::List);

        assert!(!s.is_highlighted(HeaderControl::Active));
        assert!(!s.is_highlighted(HeaderControl::Title));
        assert!(!s.is_highlighted(HeaderControl::Site));
        assert!(!s.is_highlighted(HeaderControl::Tree));
    }

    #[test]
    fn test_row_class_toggle() {
        let dark = styles(ThemeKey::DarkMode, None, ViewMode::List);
        let classic = styles(ThemeKey::ClassicMode, None, ViewMode::List);

        assert_eq!(dark.row_class(false), "tab-info-wrapper tab-info-wrapper-dark-mode");
        assert_eq!(
            classic.row_class(true),
            "tab-info-wrapper tab-info-wrapper-white-mode focused-tab-info-wrapper"
        );
    }
}
