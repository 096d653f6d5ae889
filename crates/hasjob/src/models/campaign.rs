use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::board::BoardId;
use super::choices::{ActionCategory, BannerLocation, CampaignActionType, CampaignPosition};
use super::flags::{FlagSelection, UserFlagValues};

/// A scheduled promotional unit shown to job board visitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub public: bool,
    pub position: CampaignPosition,
    /// Higher wins when several campaigns compete for the same slot.
    pub priority: i32,
    pub boards: Vec<BoardId>,
    pub geonameids: Vec<u64>,
    pub user_required: Option<bool>,
    pub flags: FlagSelection,
    pub content: CampaignContent,
    pub actions: Vec<CampaignAction>,
}

impl Campaign {
    /// Public and inside its `[start_at, end_at)` window.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.public && self.start_at <= now && now < self.end_at
    }

    /// Login-state and flag targeting for a viewer.
    pub fn targets_user(&self, logged_in: bool, user_flags: Option<&UserFlagValues>) -> bool {
        if let Some(required) = self.user_required {
            if required != logged_in {
                return false;
            }
        }
        if self.flags.is_empty() {
            return true;
        }
        match user_flags {
            Some(values) => self.flags.matches(values),
            None => false,
        }
    }

    /// Public actions in display order.
    pub fn visible_actions(&self) -> Vec<&CampaignAction> {
        let mut actions: Vec<_> = self.actions.iter().filter(|action| action.public).collect();
        actions.sort_by_key(|action| action.seq);
        actions
    }
}

/// Text and banner shown inside a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignContent {
    pub subject: Option<String>,
    pub blurb: Option<String>,
    pub description: Option<String>,
    pub banner_image: Option<String>,
    pub banner_location: BannerLocation,
}

/// A call-to-action button attached to a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignAction {
    pub title: String,
    pub icon: Option<String>,
    pub public: bool,
    #[serde(rename = "type")]
    pub action_type: CampaignActionType,
    pub group: Option<String>,
    pub category: ActionCategory,
    pub message: Option<String>,
    pub link: Option<String>,
    pub form: Option<String>,
    pub seq: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::flags::UserFlag;
    use chrono::TimeZone;

    fn campaign() -> Campaign {
        Campaign {
            title: "Hiring fair".to_string(),
            start_at: Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
            end_at: Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap(),
            public: true,
            position: CampaignPosition::Header,
            priority: 0,
            boards: Vec::new(),
            geonameids: Vec::new(),
            user_required: None,
            flags: FlagSelection::new(),
            content: CampaignContent {
                subject: None,
                blurb: None,
                description: None,
                banner_image: None,
                banner_location: BannerLocation::Top,
            },
            actions: Vec::new(),
        }
    }

    fn action(title: &str, seq: i32, public: bool) -> CampaignAction {
        CampaignAction {
            title: title.to_string(),
            icon: None,
            public,
            action_type: CampaignActionType::Link,
            group: None,
            category: ActionCategory::Default,
            message: None,
            link: Some("https://hasjob.co".to_string()),
            form: None,
            seq,
        }
    }

    #[test]
    fn live_window_is_half_open() {
        let campaign = campaign();
        assert!(campaign.is_live(campaign.start_at));
        assert!(!campaign.is_live(campaign.end_at));

        let mut hidden = campaign.clone();
        hidden.public = false;
        assert!(!hidden.is_live(campaign.start_at));
    }

    #[test]
    fn user_required_matches_login_state() {
        let mut campaign = campaign();
        assert!(campaign.targets_user(false, None));

        campaign.user_required = Some(true);
        assert!(campaign.targets_user(true, None));
        assert!(!campaign.targets_user(false, None));
    }

    #[test]
    fn flag_targeting_needs_user_flags() {
        let mut campaign = campaign();
        campaign.flags.set(UserFlag::IsEmployerAlltime, Some(true));
        assert!(!campaign.targets_user(false, None));

        let mut values = UserFlagValues::new();
        values.insert(UserFlag::IsEmployerAlltime, true);
        assert!(campaign.targets_user(true, Some(&values)));
    }

    #[test]
    fn visible_actions_are_public_and_sequenced() {
        let mut campaign = campaign();
        campaign.actions = vec![
            action("Later", 3, true),
            action("Hidden", 1, false),
            action("First", 2, true),
        ];
        let titles: Vec<_> = campaign
            .visible_actions()
            .into_iter()
            .map(|action| action.title.as_str())
            .collect();
        assert_eq!(titles, ["First", "Later"]);
    }
}
