/// User preferences read from storage on every rebuild
use serde::{Deserialize, Serialize};

/// Named color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeKey {
    #[default]
    ClassicMode,
    DarkMode,
}

impl ThemeKey {
    /// Unknown keys fall back to the classic palette
    pub fn parse(value: &str) -> ThemeKey {
        match value {
            "dark_mode" => ThemeKey::DarkMode,
            _ => ThemeKey::ClassicMode,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeKey::ClassicMode => "classic_mode",
            ThemeKey::DarkMode => "dark_mode",
        }
    }

    pub fn toggled(&self) -> ThemeKey {
        match self {
            ThemeKey::ClassicMode => ThemeKey::DarkMode,
            ThemeKey::DarkMode => ThemeKey::ClassicMode,
        }
    }
}

/// Attribute a sort key orders by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Active,
    Title,
    Site,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    ActiveAsc,
    ActiveDesc,
    TitleAsc,
    TitleDesc,
    SiteAsc,
    SiteDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::ActiveAsc,
        SortKey::ActiveDesc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::SiteAsc,
        SortKey::SiteDesc,
    ];

    pub fn parse(value: &str) -> Option<SortKey> {
        SortKey::ALL.into_iter().find(|key| key.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::ActiveAsc => "ACTIVE_ASC",
            SortKey::ActiveDesc => "ACTIVE_DESC",
            SortKey::TitleAsc => "TITLE_ASC",
            SortKey::TitleDesc => "TITLE_DESC",
            SortKey::SiteAsc => "SITE_ASC",
            SortKey::SiteDesc => "SITE_DESC",
        }
    }

    pub fn column(&self) -> SortColumn {
        match self {
            SortKey::ActiveAsc | SortKey::ActiveDesc => SortColumn::Active,
            SortKey::TitleAsc | SortKey::TitleDesc => SortColumn::Title,
            SortKey::SiteAsc | SortKey::SiteDesc => SortColumn::Site,
        }
    }

    /// Key selected by clicking a column header: flips direction when the
    /// column is already the sort column, otherwise starts at `*_ASC`
    pub fn next_for_column(current: Option<SortKey>, column: SortColumn) -> SortKey {
        match (current, column) {
            (Some(SortKey::ActiveAsc), SortColumn::Active) => SortKey::ActiveDesc,
            (Some(SortKey::TitleAsc), SortColumn::Title) => SortKey::TitleDesc,
            (Some(SortKey::SiteAsc), SortColumn::Site) => SortKey::SiteDesc,
            (_, SortColumn::Active) => SortKey::ActiveAsc,
            (_, SortColumn::Title) => SortKey::TitleAsc,
            (_, SortColumn::Site) => SortKey::SiteAsc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Tree,
}

impl ViewMode {
    pub fn parse(value: &str) -> ViewMode {
        match value {
            "tree" => ViewMode::Tree,
            _ => ViewMode::List,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Tree => "tree",
        }
    }

    pub fn toggled(&self) -> ViewMode {
        match self {
            ViewMode::List => ViewMode::Tree,
            ViewMode::Tree => ViewMode::List,
        }
    }
}

/// Stored sort preference
///
/// `None` means a value is stored but not one of the six known keys; such
/// lists keep the browser's tab order.
pub type SortPreference = Option<SortKey>;

#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub theme: ThemeKey,
    pub sort_by: SortPreference,
    pub view_mode: ViewMode,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: ThemeKey::default(),
            sort_by: Some(SortKey::ActiveAsc),
            view_mode: ViewMode::default(),
        }
    }
}

impl Preferences {
    /// Build preferences from the raw stored values; missing values take
    /// their defaults
    pub fn from_values(theme: Option<&str>, sort_by: Option<&str>, view_mode: Option<&str>) -> Self {
        let defaults = Preferences::default();
        Preferences {
            theme: theme.map(ThemeKey::parse).unwrap_or(defaults.theme),
            sort_by: sort_by.map(SortKey::parse).unwrap_or(defaults.sort_by),
            view_mode: view_mode.map(ViewMode::parse).unwrap_or(defaults.view_mode),
        }
    }
}
