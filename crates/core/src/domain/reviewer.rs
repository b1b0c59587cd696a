use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const TRAIT_MAX: u8 = 100;

/// The seven personality axes of a synthetic reviewer, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonalityTraits {
    pub introvert_extrovert: u8,
    pub analytical_creative: u8,
    pub busy_free_time: u8,
    pub disorganized_organized: u8,
    pub independent_cooperative: u8,
    pub environmentalist: u8,
    pub safe_risky: u8,
}

impl PersonalityTraits {
    pub fn in_range(&self) -> bool {
        self.values().iter().all(|v| *v <= TRAIT_MAX)
    }

    /// Clamp every trait into [0, 100].
    pub fn clamp(&mut self) {
        for v in [
            &mut self.introvert_extrovert,
            &mut self.analytical_creative,
            &mut self.busy_free_time,
            &mut self.disorganized_organized,
            &mut self.independent_cooperative,
            &mut self.environmentalist,
            &mut self.safe_risky,
        ] {
            *v = (*v).min(TRAIT_MAX);
        }
    }

    fn values(&self) -> [u8; 7] {
        [
            self.introvert_extrovert,
            self.analytical_creative,
            self.busy_free_time,
            self.disorganized_organized,
            self.independent_cooperative,
            self.environmentalist,
            self.safe_risky,
        ]
    }
}

/// A synthetic reviewer identity produced by phase 2. `id` is the
/// correlation key reviews refer back to through `bot_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewerProfile {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    pub age: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub education_level: String,
    pub personality: PersonalityTraits,
    pub backstory: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traits(v: u8) -> PersonalityTraits {
        PersonalityTraits {
            introvert_extrovert: v,
            analytical_creative: v,
            busy_free_time: v,
            disorganized_organized: v,
            independent_cooperative: v,
            environmentalist: v,
            safe_risky: v,
        }
    }

    #[test]
    fn test_traits_range_check() {
        assert!(traits(100).in_range());
        assert!(!traits(101).in_range());
    }

    #[test]
    fn test_traits_clamp() {
        let mut t = traits(250);
        t.clamp();
        assert!(t.in_range());
        assert_eq!(t.safe_risky, 100);
    }

    #[test]
    fn test_profile_round_trip() {
        let profile = ReviewerProfile {
            id: 1,
            name: "Ana García".to_string(),
            avatar: "https://example.com/a.png".to_string(),
            bio: "Short bio".to_string(),
            age: 34,
            location: "Madrid".to_string(),
            gender: "Female".to_string(),
            education_level: "Masters".to_string(),
            personality: traits(50),
            backstory: "Long backstory".to_string(),
        };

        let json = serde_json::to_string(&profile).unwrap();
        let back: ReviewerProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
