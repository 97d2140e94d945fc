//! Player profile record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Avatar service used for generated avatars
const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// Oldest accepted age
const MAX_AGE: u32 = 130;

/// Local player profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
    pub age: Option<u32>,
    /// `Name#1234`
    pub gamer_tag: String,
    /// Avatar reference (URL)
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl PlayerProfile {
    /// Create a new profile
    ///
    /// `tag_number` becomes the numeric suffix of the gamer tag and is
    /// clamped into `1000..=9999`.
    pub fn create(name: &str, age: u32, tag_number: u32) -> Result<Self, ProfileError> {
        let clean: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        if clean.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if age == 0 || age > MAX_AGE {
            return Err(ProfileError::InvalidAge(age));
        }

        let gamer_tag = format!("{}#{}", clean, tag_number.clamp(1000, 9999));
        let created_at = Utc::now();

        Ok(Self {
            id: format!("player-{}", created_at.timestamp_millis()),
            name: name.trim().to_string(),
            age: Some(age),
            avatar: format!("{}{}", AVATAR_BASE_URL, gamer_tag),
            gamer_tag,
            created_at,
        })
    }

    /// Map a uniform roll in `[0, 1)` to a 4-digit tag number
    pub fn tag_number_from_roll(roll: f64) -> u32 {
        1000 + (roll.clamp(0.0, 0.999_999) * 9000.0).floor() as u32
    }
}
