use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct School {
    pub id: Uuid,
    pub school_name: String,
    pub conference: String,
    pub location: String,
    /// Men's basketball
    pub mbb: bool,
    /// Women's basketball
    pub wbb: bool,
    /// Football
    pub fb: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSchool {
    pub school_name: String,
    pub conference: String,
    pub location: String,
    #[serde(default)]
    pub mbb: bool,
    #[serde(default)]
    pub wbb: bool,
    #[serde(default)]
    pub fb: bool,
}

impl NewSchool {
    pub fn into_school(self, id: Uuid) -> School {
        School {
            id,
            school_name: self.school_name,
            conference: self.conference,
            location: self.location,
            mbb: self.mbb,
            wbb: self.wbb,
            fb: self.fb,
        }
    }
}
