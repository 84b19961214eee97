use std::{cmp::Ordering, collections::BTreeSet};

use time::{Date, OffsetDateTime, macros::format_description};

use crate::candidate::{Candidate, ScoredCandidate};
use legis_config::Ranking;
use legis_domain::jurisdiction::normalize_jurisdiction;

/// Per-request inputs of the composite score.
#[derive(Debug, Clone)]
pub struct ScoringContext {
	/// Normalized user jurisdiction. Empty when the profile has none.
	pub jurisdiction: String,
	pub preferred_categories: BTreeSet<String>,
	pub today: Date,
}
impl ScoringContext {
	pub fn new(
		cfg: &Ranking,
		jurisdiction: &str,
		profile_categories: &[String],
		augmented_query: &str,
	) -> Self {
		Self {
			jurisdiction: normalize_jurisdiction(jurisdiction),
			preferred_categories: preferred_categories(cfg, profile_categories, augmented_query),
			today: OffsetDateTime::now_utc().date(),
		}
	}
}

/// Profile categories win. Without them, hiring-flavoured queries fall back to the configured
/// default categories.
pub fn preferred_categories(
	cfg: &Ranking,
	profile_categories: &[String],
	augmented_query: &str,
) -> BTreeSet<String> {
	let declared: BTreeSet<String> = profile_categories
		.iter()
		.map(|category| category.trim().to_lowercase())
		.filter(|category| !category.is_empty())
		.collect();

	if !declared.is_empty() {
		return declared;
	}

	let query = augmented_query.to_lowercase();

	if cfg.hiring_terms.iter().any(|term| query.contains(term.as_str())) {
		return cfg.hiring_default_categories.iter().cloned().collect();
	}

	BTreeSet::new()
}

/// `exp(-days / tau)` for a leading `YYYY-MM-DD` date, zero when the date is missing or invalid.
pub fn recency_boost(date: Option<&str>, today: Date, tau_days: f32) -> f32 {
	let Some(parsed) = date.and_then(parse_leading_date) else {
		return 0.0;
	};
	let days = (today - parsed).whole_days() as f64;
	let boost = (-days / tau_days as f64).exp() as f32;

	if boost.is_finite() { boost } else { 0.0 }
}

pub fn composite_score(cfg: &Ranking, ctx: &ScoringContext, candidate: &Candidate) -> f32 {
	let similarity = if candidate.similarity.is_finite() { candidate.similarity } else { 0.0 };
	let same_jurisdiction = !ctx.jurisdiction.is_empty()
		&& normalize_jurisdiction(&candidate.jurisdiction) == ctx.jurisdiction;
	let category_match = !ctx.preferred_categories.is_disjoint(&candidate.categories);
	let recency = recency_boost(candidate.date.as_deref(), ctx.today, cfg.recency_tau_days);

	cfg.similarity_weight * similarity
		+ cfg.jurisdiction_weight * indicator(same_jurisdiction)
		+ cfg.category_weight * indicator(category_match)
		+ cfg.recency_weight * recency
}

/// Scores every candidate and sorts descending. The sort is stable, so equal scores keep merge
/// order.
pub fn score_candidates(
	cfg: &Ranking,
	ctx: &ScoringContext,
	candidates: Vec<Candidate>,
) -> Vec<ScoredCandidate> {
	let mut scored: Vec<ScoredCandidate> = candidates
		.into_iter()
		.map(|candidate| {
			let score = composite_score(cfg, ctx, &candidate);

			ScoredCandidate { candidate, score }
		})
		.collect();

	scored.sort_by(|a, b| cmp_f32_desc(a.score, b.score));

	scored
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

fn indicator(flag: bool) -> f32 {
	if flag { 1.0 } else { 0.0 }
}

fn parse_leading_date(raw: &str) -> Option<Date> {
	let trimmed = raw.trim();
	let head = trimmed.get(..10)?;

	Date::parse(head, format_description!("[year]-[month]-[day]")).ok()
}
