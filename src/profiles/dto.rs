use serde::Deserialize;

use crate::profiles::repo::ProfileFields;

/// All six fields are free text; missing inputs come through as empty.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub preferred_name: String,
    #[serde(default)]
    pub pronouns: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub fun_fact: String,
    #[serde(default)]
    pub learning_needs: String,
}

impl ProfileForm {
    pub fn into_fields(self) -> ProfileFields {
        ProfileFields {
            preferred_name: self.preferred_name.trim().to_string(),
            pronouns: self.pronouns.trim().to_string(),
            major: self.major.trim().to_string(),
            goals: self.goals.trim().to_string(),
            fun_fact: self.fun_fact.trim().to_string(),
            learning_needs: self.learning_needs.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}
