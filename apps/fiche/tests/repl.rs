use serde_json::json;

use fiche::{Repl, Step};
use fiche_testkit::FakeProviders;

async fn say(repl: &mut Repl, line: &str) -> String {
	match repl.handle_line(line).await {
		Step::Continue(output) => output,
		Step::Quit => panic!("Unexpected quit after `{line}`."),
	}
}

#[tokio::test]
async fn search_open_and_history_round_trip_through_the_repl() {
	let providers = FakeProviders::start().await.expect("Failed to start fake providers.");
	let path = fiche_testkit::temp_path("fiche_repl_history", "json");
	let cfg = providers.config(path.clone());

	providers.add_summary("Cat", "Cat", "Small carnivore.");
	providers.add_document(
		"dogs",
		"text/html",
		"<html><head><title>Dogs</title></head><body><p>Loyal.</p></body></html>",
	);
	providers.set_search_payload(json!([
		[0.9, providers.article_url("Cat")],
		[0.4, providers.page_url("dogs")],
	]));

	let mut repl = Repl::from_config(&cfg);
	let first = say(&mut repl, "cats").await;

	assert!(first.contains("  1. Cat"));
	assert!(first.contains("  2. Dogs"));

	repl.controller().orchestrator().settled().await;

	let settled = say(&mut repl, "results").await;

	assert!(settled.contains("Small carnivore."));
	assert!(settled.contains("Loyal."));
	assert_eq!(say(&mut repl, "open 2").await, "");
	assert_eq!(say(&mut repl, "open 9").await, "No result 9.");

	let history = say(&mut repl, "history").await;

	assert!(history.contains("  1. [-] cats *"));
	assert!(history.contains(&format!("  2.       Dogs <{}>", providers.page_url("dogs"))));
	assert_eq!(say(&mut repl, "fold 1").await, "  1. [+] cats *");
	assert_eq!(say(&mut repl, "fold 1").await.lines().count(), 2);
	assert_eq!(say(&mut repl, "rm 2").await, "  1. [ ] cats *");

	let replay = say(&mut repl, "go 1").await;

	assert!(replay.contains("  1. Cat"));
	assert_eq!(providers.search_hits(), 2);
	assert_eq!(say(&mut repl, "sidebar").await, "History is hidden. Use `sidebar` to show it.");
	assert!(matches!(repl.handle_line("quit").await, Step::Quit));

	let reopened = Repl::from_config(&cfg);

	assert_eq!(reopened.controller().session().history.len(), 1);

	let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn provider_failures_are_shown_and_not_recorded() {
	let providers = FakeProviders::start().await.expect("Failed to start fake providers.");
	let path = fiche_testkit::temp_path("fiche_repl_failure", "json");
	let mut repl = Repl::from_config(&providers.config(path.clone()));

	providers.fail_search(true);

	assert_eq!(say(&mut repl, "search cats").await, "Error fetching results");
	assert_eq!(say(&mut repl, "history").await, "History is empty.");
	assert_eq!(say(&mut repl, "go 1").await, "No history row 1.");
	assert_eq!(say(&mut repl, "open").await, "`open` expects a number.");

	let _ = std::fs::remove_file(path);
}
