//! Onboarding form state and its localStorage-backed draft.
//!
//! The draft and completion flag live next to the session keys so a user who
//! navigates away mid-onboarding resumes where they left off.

#[cfg(test)]
#[path = "onboarding_test.rs"]
mod onboarding_test;

use crate::net::types::Profile;

#[cfg(feature = "csr")]
const DRAFT_KEY: &str = "onboardingDraft";
#[cfg(feature = "csr")]
const COMPLETED_KEY: &str = "onboardingCompleted";

/// Department choices offered by the onboarding form.
pub const DEPARTMENTS: [&str; 20] = [
    "건축학과",
    "건축공학과",
    "토목공학과",
    "환경공학과",
    "기계공학부",
    "메카트로닉스공학과",
    "선박해양공학과",
    "항공우주공학과",
    "전기공학과",
    "전자공학과",
    "전파정보통신공학과",
    "컴퓨터융합학부",
    "인공지능학과",
    "신소재공학과",
    "응용화학공학과",
    "유기재료공학과",
    "자율운항시스템공학과",
    "에너지공학과",
    "정보통신융합학부",
    "반도체융합학과",
];

pub const GRADES: [&str; 4] = ["1학년", "2학년", "3학년", "4학년"];

pub const STATUSES: [&str; 3] = ["재학", "휴학", "졸업"];

/// Editable onboarding form. Serializable so drafts round-trip through
/// localStorage.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OnboardingForm {
    pub department: String,
    pub grade: String,
    pub status: String,
    pub category_ids: Vec<i64>,
    pub keywords: Vec<String>,
    #[serde(skip)]
    pub new_keyword: String,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self {
            department: DEPARTMENTS[0].to_owned(),
            grade: GRADES[0].to_owned(),
            status: STATUSES[0].to_owned(),
            category_ids: Vec::new(),
            keywords: Vec::new(),
            new_keyword: String::new(),
        }
    }
}

impl OnboardingForm {
    #[must_use]
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            department: profile.department.clone(),
            grade: profile.grade.clone(),
            status: profile.status.clone(),
            category_ids: profile.category_ids.clone(),
            keywords: profile.keywords.clone(),
            new_keyword: String::new(),
        }
    }

    #[must_use]
    pub fn to_profile(&self) -> Profile {
        Profile {
            department: self.department.clone(),
            grade: self.grade.clone(),
            status: self.status.clone(),
            category_ids: self.category_ids.clone(),
            keywords: self.keywords.clone(),
        }
    }

    pub fn toggle_category(&mut self, category_id: i64) {
        if let Some(pos) = self.category_ids.iter().position(|&id| id == category_id) {
            self.category_ids.remove(pos);
        } else {
            self.category_ids.push(category_id);
        }
    }

    /// Move the pending keyword into the list. Empty and duplicate keywords
    /// are dropped. Returns whether anything was added.
    pub fn add_keyword(&mut self) -> bool {
        let keyword = self.new_keyword.trim().to_owned();
        if keyword.is_empty() || self.keywords.contains(&keyword) {
            return false;
        }
        self.keywords.push(keyword);
        self.new_keyword.clear();
        true
    }

    pub fn remove_keyword(&mut self, keyword: &str) {
        self.keywords.retain(|k| k != keyword);
    }
}

/// Load the saved draft, if any.
#[must_use]
pub fn load_draft() -> Option<OnboardingForm> {
    #[cfg(feature = "csr")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(DRAFT_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Persist the form as the current draft.
pub fn save_draft(form: &OnboardingForm) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            if let Ok(raw) = serde_json::to_string(form) {
                let _ = storage.set_item(DRAFT_KEY, &raw);
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = form;
    }
}

pub fn clear_draft() {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(DRAFT_KEY);
        }
    }
}

/// Whether the user has completed onboarding on this device.
#[must_use]
pub fn onboarding_completed() -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(COMPLETED_KEY).ok().flatten())
            .is_some_and(|v| v == "true")
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}

pub fn mark_onboarding_completed() {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(COMPLETED_KEY, "true");
        }
    }
}
