use serde::{Deserialize, Serialize};

/// A closed set of options submitted by code and displayed by label.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn code(self) -> &'static str;

    fn label(self) -> &'static str;

    fn from_code(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|choice| choice.code() == raw)
    }

    /// `(code, label)` options in declaration order.
    fn choices() -> Vec<(&'static str, &'static str)> {
        Self::ALL
            .iter()
            .map(|choice| (choice.code(), choice.label()))
            .collect()
    }
}

/// Integer-coerced choices compare by numeric value, so `"02"` selects `2`.
fn from_integer_code<T: Choice>(raw: &str) -> Option<T> {
    let value: i64 = raw.trim().parse().ok()?;
    T::ALL
        .iter()
        .copied()
        .find(|choice| choice.code().parse::<i64>().ok() == Some(value))
}

/// Where a campaign renders on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignPosition {
    Header,
    Sidebar,
    BeforePost,
    AfterPost,
}

impl Choice for CampaignPosition {
    const ALL: &'static [Self] = &[
        Self::Header,
        Self::Sidebar,
        Self::BeforePost,
        Self::AfterPost,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::Header => "0",
            Self::Sidebar => "1",
            Self::BeforePost => "2",
            Self::AfterPost => "3",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::Sidebar => "Sidebar",
            Self::BeforePost => "Before post",
            Self::AfterPost => "After post",
        }
    }

    fn from_code(raw: &str) -> Option<Self> {
        from_integer_code(raw)
    }
}

/// Banner placement relative to the campaign text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerLocation {
    Top,
    Right,
    Bottom,
    Left,
}

impl Choice for BannerLocation {
    const ALL: &'static [Self] = &[Self::Top, Self::Right, Self::Bottom, Self::Left];

    fn code(self) -> &'static str {
        match self {
            Self::Top => "0",
            Self::Right => "1",
            Self::Bottom => "2",
            Self::Left => "3",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Right => "Right",
            Self::Bottom => "Bottom",
            Self::Left => "Left",
        }
    }

    fn from_code(raw: &str) -> Option<Self> {
        from_integer_code(raw)
    }
}

/// What happens when a visitor clicks a campaign action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignActionType {
    Link,
    RsvpYes,
    RsvpNo,
    RsvpMaybe,
    Form,
    Dismiss,
}

impl Choice for CampaignActionType {
    const ALL: &'static [Self] = &[
        Self::Link,
        Self::RsvpYes,
        Self::RsvpNo,
        Self::RsvpMaybe,
        Self::Form,
        Self::Dismiss,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::Link => "L",
            Self::RsvpYes => "Y",
            Self::RsvpNo => "N",
            Self::RsvpMaybe => "M",
            Self::Form => "F",
            Self::Dismiss => "D",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Link => "Follow link",
            Self::RsvpYes => "RSVP Yes",
            Self::RsvpNo => "RSVP No",
            Self::RsvpMaybe => "RSVP Maybe",
            Self::Form => "Show a form",
            Self::Dismiss => "Dismiss campaign",
        }
    }
}

/// Button style of a campaign action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Default,
    Primary,
    Success,
    Info,
    Warning,
    Danger,
}

impl Choice for ActionCategory {
    const ALL: &'static [Self] = &[
        Self::Default,
        Self::Primary,
        Self::Success,
        Self::Info,
        Self::Warning,
        Self::Danger,
    ];

    fn code(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Primary => "primary",
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Primary => "Primary",
            Self::Success => "Success",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Danger => "Danger",
        }
    }
}
