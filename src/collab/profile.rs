//! User profile — display data and the chosen persona.
//!
//! The persona is a presentation hint, not a progression input: it records
//! which goal the user declared at onboarding but never gates cards or
//! tracks.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// The goal the user declared at onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Ugc,
    Influencer,
    Viral,
    Seller,
}

impl Persona {
    pub const ALL: [Persona; 4] = [
        Persona::Ugc,
        Persona::Influencer,
        Persona::Viral,
        Persona::Seller,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Ugc => "ugc",
            Persona::Influencer => "influencer",
            Persona::Viral => "viral",
            Persona::Seller => "seller",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ugc" => Ok(Persona::Ugc),
            "influencer" => Ok(Persona::Influencer),
            "viral" => Ok(Persona::Viral),
            "seller" => Ok(Persona::Seller),
            other => Err(ProfileError::UnknownPersona(other.to_string())),
        }
    }
}

/// A stored profile record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub persona: Option<Persona>,
    /// Unix epoch milliseconds of the last update.
    pub updated_at: i64,
}

/// Storage seam for profiles, keyed by user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, ProfileError>;
    async fn set(&self, user_id: &str, profile: UserProfile) -> Result<(), ProfileError>;
}

/// In-memory profile store, the default for local single-user runs.
#[derive(Default)]
pub struct MemoryProfile {
    profiles: Mutex<HashMap<String, UserProfile>>,
}

impl MemoryProfile {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfile {
    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, ProfileError> {
        let profiles = self
            .profiles
            .lock()
            .map_err(|_| ProfileError::Storage("profile lock poisoned".into()))?;
        Ok(profiles.get(user_id).cloned())
    }

    async fn set(&self, user_id: &str, profile: UserProfile) -> Result<(), ProfileError> {
        let mut profiles = self
            .profiles
            .lock()
            .map_err(|_| ProfileError::Storage("profile lock poisoned".into()))?;
        profiles.insert(user_id.to_string(), profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_parses_case_insensitively() {
        assert_eq!("UGC".parse::<Persona>().unwrap(), Persona::Ugc);
        assert_eq!(" seller ".parse::<Persona>().unwrap(), Persona::Seller);
        assert!("creator".parse::<Persona>().is_err());
    }

    #[test]
    fn persona_round_trips_through_display() {
        for p in Persona::ALL {
            assert_eq!(p.as_str().parse::<Persona>().unwrap(), p);
        }
    }

    #[test]
    fn persona_serializes_lowercase() {
        let json = serde_json::to_string(&Persona::Influencer).unwrap();
        assert_eq!(json, "\"influencer\"");
    }

    #[tokio::test]
    async fn memory_profile_get_set() {
        let store = MemoryProfile::new();
        assert!(store.get("u1").await.unwrap().is_none());

        let profile = UserProfile {
            display_name: Some("Ada".into()),
            persona: Some(Persona::Viral),
            updated_at: 1,
        };
        store.set("u1", profile.clone()).await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), Some(profile));
        assert!(store.get("u2").await.unwrap().is_none());
    }
}
