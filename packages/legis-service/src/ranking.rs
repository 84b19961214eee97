mod merge;
mod score;
mod select;

pub use merge::merge_candidates;
pub use score::{
	ScoringContext, cmp_f32_desc, composite_score, preferred_categories, recency_boost,
	score_candidates,
};
pub use select::{SelectionOutcome, select_candidates};
