use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LegisService, Result};
use legis_storage::models::Profile;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OnboardingRequest {
	pub company_size: Option<String>,
	pub industry: Option<String>,
	pub state: Option<String>,
	#[serde(default)]
	pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingResponse {
	pub session_id: Uuid,
}

impl LegisService {
	/// Stores the profile under a fresh session id. Profiles are never rewritten.
	pub async fn create_profile(&self, req: OnboardingRequest) -> Result<OnboardingResponse> {
		let session_id = Uuid::new_v4();
		let profile = profile_from_request(req);

		self.profiles.save_profile(session_id, &profile).await?;

		tracing::info!(
			%session_id,
			state = profile.state.as_deref().unwrap_or_default(),
			categories = profile.categories.len(),
			"Profile created."
		);

		Ok(OnboardingResponse { session_id })
	}
}

fn profile_from_request(req: OnboardingRequest) -> Profile {
	let mut categories = Vec::new();

	for category in req.categories {
		let category = category.trim().to_lowercase();

		if !category.is_empty() && !categories.contains(&category) {
			categories.push(category);
		}
	}

	Profile {
		company_size: non_blank(req.company_size),
		industry: non_blank(req.industry),
		state: non_blank(req.state),
		categories,
	}
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_fields_and_duplicate_categories_are_dropped() {
		let profile = profile_from_request(OnboardingRequest {
			company_size: Some("  ".to_string()),
			industry: Some(" Retail ".to_string()),
			state: Some("ny".to_string()),
			categories: vec![
				"Private Sector Use".to_string(),
				"private sector use ".to_string(),
				String::new(),
			],
		});

		assert_eq!(profile.company_size, None);
		assert_eq!(profile.industry.as_deref(), Some("Retail"));
		assert_eq!(profile.state.as_deref(), Some("ny"));
		assert_eq!(profile.categories, vec!["private sector use".to_string()]);
	}
}
