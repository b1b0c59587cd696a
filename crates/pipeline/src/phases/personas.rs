//! Phase 2: generate the synthetic reviewer panel.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use agents::{extract, AgentExecutor, TaskSpec};
use reviewsim_core::ReviewerProfile;

use crate::error::Result;
use crate::prompts;
use crate::store::ArtifactStore;

/// Models sometimes wrap the array in an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfilesPayload {
    Wrapped { profiles: Vec<ReviewerProfile> },
    Bare(Vec<ReviewerProfile>),
}

impl ProfilesPayload {
    fn into_profiles(self) -> Vec<ReviewerProfile> {
        match self {
            Self::Wrapped { profiles } => profiles,
            Self::Bare(profiles) => profiles,
        }
    }
}

pub async fn run(
    executor: &dyn AgentExecutor,
    store: &ArtifactStore,
    num_reviewers: u32,
    parameters: Option<&Value>,
    model: Option<&str>,
) -> Result<Vec<ReviewerProfile>> {
    info!(num_reviewers, "phase 2: generating reviewer profiles");

    // Zero reviewers is a valid request and never reaches the model.
    if num_reviewers == 0 {
        store.save_reviewers(&[]).await?;
        return Ok(Vec::new());
    }

    let agent = prompts::persona_designer();
    let task = TaskSpec::new(
        prompts::persona_generation_task(num_reviewers, parameters),
        prompts::PERSONAS_EXPECTED,
    );
    let output = executor.execute(&agent, &task, model).await?;

    let profiles = match extract::coerce::<ProfilesPayload>(&output) {
        Ok(payload) => validate(payload.into_profiles(), num_reviewers),
        Err(e) => {
            warn!(error = %e, "profile generation output unusable, persisting empty panel");
            Vec::new()
        }
    };

    store.save_reviewers(&profiles).await?;
    Ok(profiles)
}

/// Enforce panel invariants: the requested count, unique ids, and traits
/// inside [0, 100]. A wrong count discards the whole panel; id and trait
/// problems are repaired in place.
fn validate(mut profiles: Vec<ReviewerProfile>, requested: u32) -> Vec<ReviewerProfile> {
    if profiles.len() != requested as usize {
        warn!(
            requested,
            received = profiles.len(),
            "profile count mismatch, discarding panel"
        );
        return Vec::new();
    }

    let mut seen = HashSet::new();
    if !profiles.iter().all(|p| seen.insert(p.id)) {
        warn!("duplicate profile ids, reassigning sequentially");
        for (i, profile) in profiles.iter_mut().enumerate() {
            profile.id = i as u32 + 1;
        }
    }

    for profile in &mut profiles {
        if !profile.personality.in_range() {
            warn!(id = profile.id, "personality traits out of range, clamping");
            profile.personality.clamp();
        }
    }

    profiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewsim_core::PersonalityTraits;

    fn profile(id: u32) -> ReviewerProfile {
        ReviewerProfile {
            id,
            name: format!("Reviewer {id}"),
            avatar: String::new(),
            bio: String::new(),
            age: 30,
            location: String::new(),
            gender: String::new(),
            education_level: String::new(),
            personality: PersonalityTraits {
                introvert_extrovert: 50,
                analytical_creative: 50,
                busy_free_time: 50,
                disorganized_organized: 50,
                independent_cooperative: 50,
                environmentalist: 50,
                safe_risky: 50,
            },
            backstory: "history".to_string(),
        }
    }

    #[test]
    fn test_count_mismatch_discards_panel() {
        assert!(validate(vec![profile(1)], 3).is_empty());
        assert_eq!(validate(vec![profile(1), profile(2)], 2).len(), 2);
    }

    #[test]
    fn test_duplicate_ids_are_reassigned() {
        let out = validate(vec![profile(1), profile(1), profile(2)], 3);
        let ids: Vec<u32> = out.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_wrapped_payload_accepted() {
        let json = r#"{"profiles": [{"id": 1, "name": "A", "age": 30,
            "personality": {"introvert_extrovert": 1, "analytical_creative": 1,
            "busy_free_time": 1, "disorganized_organized": 1,
            "independent_cooperative": 1, "environmentalist": 1, "safe_risky": 1},
            "backstory": "b"}]}"#;
        let payload: ProfilesPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.into_profiles().len(), 1);
    }
}
