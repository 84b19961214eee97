use crate::candidate::ScoredCandidate;
use legis_config::Selection;
use legis_domain::jurisdiction::normalize_jurisdiction;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
	/// Non-empty, score-descending.
	Selected(Vec<ScoredCandidate>),
	/// Strict mode found nothing in the user's jurisdiction.
	NoneInJurisdiction,
	NoneFound,
}
impl SelectionOutcome {
	pub fn len(&self) -> usize {
		match self {
			Self::Selected(items) => items.len(),
			Self::NoneInJurisdiction | Self::NoneFound => 0,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Applies the jurisdiction policy to a score-sorted list. `jurisdiction` must already be
/// normalized; empty means the user has none.
pub fn select_candidates(
	cfg: &Selection,
	jurisdiction: &str,
	scored: Vec<ScoredCandidate>,
) -> SelectionOutcome {
	let max = cfg.max_results as usize;

	if jurisdiction.is_empty() {
		return finish(scored.into_iter().take(max).collect());
	}

	let in_jurisdiction =
		|item: &ScoredCandidate| normalize_jurisdiction(&item.candidate.jurisdiction) == jurisdiction;

	if cfg.strict_jurisdiction {
		let selected: Vec<_> = scored.into_iter().filter(in_jurisdiction).take(max).collect();

		if selected.is_empty() {
			return SelectionOutcome::NoneInJurisdiction;
		}

		return SelectionOutcome::Selected(selected);
	}
	if !scored.iter().any(in_jurisdiction) {
		return finish(scored.into_iter().take(max).collect());
	}

	let mut inside = 0_usize;
	let mut outside = 0_usize;
	let mut selected = Vec::new();

	for item in scored {
		let (slot, quota) = if in_jurisdiction(&item) {
			(&mut inside, cfg.blend_in_jurisdiction as usize)
		} else {
			(&mut outside, cfg.blend_out_of_jurisdiction as usize)
		};

		if *slot < quota {
			*slot += 1;

			selected.push(item);
		}
		if inside + outside >= max {
			break;
		}
	}

	finish(selected)
}

fn finish(selected: Vec<ScoredCandidate>) -> SelectionOutcome {
	if selected.is_empty() {
		SelectionOutcome::NoneFound
	} else {
		SelectionOutcome::Selected(selected)
	}
}
