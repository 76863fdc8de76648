use std::fmt::Write;

use fiche_domain::{ResultsState, SearchPhase, TreeRow};

pub const ABOUT: &str = "\
fiche is a small search client. It sends a query to a ranked search index, lists the hits in
rank order and fills in each hit's title and description from the page itself while you read.
Every query you run and every article you open is kept in a local history tree, so a research
session can be picked up again later.";

pub fn results(state: &ResultsState) -> String {
	match state.phase {
		SearchPhase::Idle => return "No search yet.".to_string(),
		SearchPhase::Searching => return format!("Searching for \"{}\"...", state.query),
		SearchPhase::Error =>
			return state.error.clone().unwrap_or_else(|| "Search failed.".to_string()),
		SearchPhase::Partial | SearchPhase::Complete => {},
	}

	if state.results.is_empty() {
		return format!("No results for \"{}\".", state.query);
	}

	let mut out = String::new();

	for (i, result) in state.results.iter().enumerate() {
		let _ = writeln!(out, "{:>3}. {}", i + 1, result.title);
		let _ = writeln!(out, "     {}", result.url);

		if !result.description.is_empty() {
			let _ = writeln!(out, "     {}", result.description);
		}
	}
	if state.phase == SearchPhase::Partial {
		let pending = state.results.iter().filter(|result| !result.enriched).count();
		let _ = writeln!(out, "     ({pending} still loading)");
	}

	out.trim_end().to_string()
}

/// Numbers rows from 1 so `go`, `rm` and `fold` can address them.
pub fn history(rows: &[TreeRow], open: bool) -> String {
	if !open {
		return "History is hidden. Use `sidebar` to show it.".to_string();
	}
	if rows.is_empty() {
		return "History is empty.".to_string();
	}

	let mut out = String::new();

	for (i, row) in rows.iter().enumerate() {
		match row {
			TreeRow::Query { label, active, expanded, has_children, .. } => {
				let marker = match (has_children, expanded) {
					(false, _) => " ",
					(true, true) => "-",
					(true, false) => "+",
				};
				let active = if *active { " *" } else { "" };
				let _ = writeln!(out, "{:>3}. [{marker}] {label}{active}", i + 1);
			},
			TreeRow::Article { title, url, .. } => {
				let _ = writeln!(out, "{:>3}.       {title} <{url}>", i + 1);
			},
		}
	}

	out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
	use fiche_domain::{NodeId, SearchResult};

	use super::*;

	#[test]
	fn partial_results_show_pending_count() {
		let mut enriched = SearchResult::new("https://site/b", "Bee");

		enriched.description = "About bees".to_string();
		enriched.enriched = true;

		let state = ResultsState {
			query: "cats".to_string(),
			generation: 1,
			phase: SearchPhase::Partial,
			loading: false,
			error: None,
			results: vec![SearchResult::new("https://site/a", "A"), enriched],
		};
		let text = results(&state);

		assert!(text.contains("  1. A\n     https://site/a"));
		assert!(text.contains("  2. Bee\n     https://site/b\n     About bees"));
		assert!(text.ends_with("(1 still loading)"));
	}

	#[test]
	fn errors_render_their_message() {
		let state = ResultsState {
			phase: SearchPhase::Error,
			error: Some("Error fetching results".to_string()),
			..ResultsState::default()
		};

		assert_eq!(results(&state), "Error fetching results");
	}

	#[test]
	fn history_rows_mark_active_and_folded_queries() {
		let query = NodeId::from("q1");
		let rows = vec![
			TreeRow::Query {
				id: query.clone(),
				label: "cats".to_string(),
				active: true,
				expanded: true,
				has_children: true,
			},
			TreeRow::Article {
				id: NodeId::from("a1"),
				parent_id: query,
				title: "Cat".to_string(),
				url: "https://site/cat".to_string(),
			},
			TreeRow::Query {
				id: NodeId::from("q2"),
				label: "dogs".to_string(),
				active: false,
				expanded: false,
				has_children: true,
			},
		];

		assert_eq!(
			history(&rows, true),
			"  1. [-] cats *\n  2.       Cat <https://site/cat>\n  3. [+] dogs"
		);
		assert_eq!(history(&[], false), "History is hidden. Use `sidebar` to show it.");
	}
}
