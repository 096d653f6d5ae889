use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Audience a user flag describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagCategory {
    User,
    Candidate,
    Employer,
    Lurker,
    Admin,
}

macro_rules! user_flags {
    ($($variant:ident => ($key:literal, $category:ident, $title:literal),)+) => {
        /// Named boolean attributes computed for every user and used for campaign targeting.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum UserFlag {
            $($variant,)+
        }

        impl UserFlag {
            pub const ALL: &'static [UserFlag] = &[$(UserFlag::$variant,)+];

            pub fn key(self) -> &'static str {
                match self {
                    $(UserFlag::$variant => $key,)+
                }
            }

            pub fn category(self) -> FlagCategory {
                match self {
                    $(UserFlag::$variant => FlagCategory::$category,)+
                }
            }

            pub fn title(self) -> &'static str {
                match self {
                    $(UserFlag::$variant => $title,)+
                }
            }
        }
    };
}

user_flags! {
    IsNewSinceDay => ("is_new_since_day", User, "Is a new user (joined <= a day ago)"),
    IsNewSinceMonth => ("is_new_since_month", User, "Is a new user (joined <= a month ago)"),
    IsNotNew => ("is_not_new", User, "Is not a new user (joined > a month ago)"),
    IsCandidateAlltime => ("is_candidate_alltime", Candidate, "Is a candidate (applied at any time)"),
    IsCandidateDay => ("is_candidate_day", Candidate, "Is a candidate (applied <= a day ago)"),
    IsCandidateMonth => ("is_candidate_month", Candidate, "Is a candidate (applied <= a month ago)"),
    IsCandidatePast => ("is_candidate_past", Candidate, "Is a candidate (applied > a month ago)"),
    HasJobapplicationResponseAlltime => ("has_jobapplication_response_alltime", Candidate, "Is a candidate who received a response (at any time)"),
    HasJobapplicationResponseDay => ("has_jobapplication_response_day", Candidate, "Is a candidate who received a response (in <= a day)"),
    HasJobapplicationResponseMonth => ("has_jobapplication_response_month", Candidate, "Is a candidate who received a response (in <= a month)"),
    HasJobapplicationResponsePast => ("has_jobapplication_response_past", Candidate, "Is a candidate who received a response (in > a month)"),
    IsEmployerAlltime => ("is_employer_alltime", Employer, "Is an employer (posted at any time)"),
    IsEmployerDay => ("is_employer_day", Employer, "Is an employer (posted <= a day ago)"),
    IsEmployerMonth => ("is_employer_month", Employer, "Is an employer (posted <= a month ago)"),
    IsEmployerPast => ("is_employer_past", Employer, "Is an employer (posted > a month ago)"),
    HasJobpostUnconfirmedAlltime => ("has_jobpost_unconfirmed_alltime", Employer, "Is an employer who did not confirm a post (at any time)"),
    HasJobpostUnconfirmedDay => ("has_jobpost_unconfirmed_day", Employer, "Is an employer who did not confirm a post (posted <= a day ago)"),
    HasJobpostUnconfirmedMonth => ("has_jobpost_unconfirmed_month", Employer, "Is an employer who did not confirm a post (posted <= a month ago)"),
    HasRespondedCandidateAlltime => ("has_responded_candidate_alltime", Candidate, "Is an employer who responded to a candidate (at any time)"),
    HasRespondedCandidateDay => ("has_responded_candidate_day", Candidate, "Is an employer who responded to a candidate (in <= a day)"),
    HasRespondedCandidateMonth => ("has_responded_candidate_month", Candidate, "Is an employer who responded to a candidate (in <= a month)"),
    HasRespondedCandidatePast => ("has_responded_candidate_past", Candidate, "Is an employer who responded to a candidate (in > a month)"),
    IsNewLurkerWithinDay => ("is_new_lurker_within_day", Lurker, "Is a lurker (joined <= a day ago)"),
    IsNewLurkerWithinMonth => ("is_new_lurker_within_month", Lurker, "Is a lurker (joined <= a month ago)"),
    IsLurkerSincePast => ("is_lurker_since_past", Lurker, "Is a lurker (joined > a month ago)"),
    IsLurkerSinceAlltime => ("is_lurker_since_alltime", Lurker, "Is a lurker"),
    IsInactiveSinceDay => ("is_inactive_since_day", Lurker, "Is inactive (for a day+)"),
    IsInactiveSinceMonth => ("is_inactive_since_month", Lurker, "Is inactive (for a month+)"),
    HasBoards => ("has_boards", Admin, "Has a sub-board"),
}

/// One row of the campaign form's flag matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagChoice {
    pub key: &'static str,
    pub category: FlagCategory,
    pub title: &'static str,
}

/// Flag matrix rows in catalog order.
pub fn flag_choices() -> Vec<FlagChoice> {
    UserFlag::ALL
        .iter()
        .map(|flag| FlagChoice {
            key: flag.key(),
            category: flag.category(),
            title: flag.title(),
        })
        .collect()
}

/// Flag values computed for one user.
pub type UserFlagValues = BTreeMap<UserFlag, bool>;

/// Targeting flags chosen for a campaign. Flags left at "N/A" are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSelection(BTreeMap<UserFlag, bool>);

impl FlagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` clears the flag back to "N/A".
    pub fn set(&mut self, flag: UserFlag, value: Option<bool>) {
        match value {
            Some(value) => {
                self.0.insert(flag, value);
            }
            None => {
                self.0.remove(&flag);
            }
        }
    }

    pub fn get(&self, flag: UserFlag) -> Option<bool> {
        self.0.get(&flag).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every selected flag must equal the user's value; unknown flags read as false.
    pub fn matches(&self, user_flags: &UserFlagValues) -> bool {
        self.0
            .iter()
            .all(|(flag, wanted)| user_flags.get(flag).copied().unwrap_or(false) == *wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keys_are_unique() {
        let keys: std::collections::BTreeSet<_> =
            UserFlag::ALL.iter().map(|flag| flag.key()).collect();
        assert_eq!(keys.len(), 29);
        assert_eq!(UserFlag::HasBoards.category(), FlagCategory::Admin);
    }

    #[test]
    fn flag_choices_follow_catalog_order() {
        let rows = flag_choices();
        assert_eq!(rows.len(), UserFlag::ALL.len());
        assert_eq!(
            rows[0],
            FlagChoice {
                key: "is_new_since_day",
                category: FlagCategory::User,
                title: "Is a new user (joined <= a day ago)",
            }
        );
        assert_eq!(rows[28].key, "has_boards");
    }

    #[test]
    fn empty_selection_matches_everyone() {
        assert!(FlagSelection::new().matches(&UserFlagValues::new()));
    }

    #[test]
    fn selection_requires_every_flag_to_match() {
        let mut selection = FlagSelection::new();
        selection.set(UserFlag::IsCandidateAlltime, Some(true));
        selection.set(UserFlag::IsEmployerAlltime, Some(false));

        let mut user = UserFlagValues::new();
        user.insert(UserFlag::IsCandidateAlltime, true);
        assert!(selection.matches(&user));

        user.insert(UserFlag::IsEmployerAlltime, true);
        assert!(!selection.matches(&user));
    }

    #[test]
    fn clearing_a_flag_removes_it_from_targeting() {
        let mut selection = FlagSelection::new();
        selection.set(UserFlag::HasBoards, Some(true));
        selection.set(UserFlag::HasBoards, None);
        assert!(selection.is_empty());
        assert_eq!(selection.get(UserFlag::HasBoards), None);
    }
}
