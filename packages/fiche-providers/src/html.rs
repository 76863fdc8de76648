//! Title and description extraction from HTML documents.
//!
//! The description cascade is a pure function over [`DocumentView`], so it can be exercised
//! without a parser: meta `description`, then `og:description`, then `twitter:description`,
//! then the first paragraph inside `article`, `main`, or `body`, in that order.

use scraper::{Html, Selector};

pub const META_DESCRIPTION_KEYS: [&str; 3] = ["description", "og:description", "twitter:description"];
pub const PARAGRAPH_CONTAINERS: [&str; 3] = ["article", "main", "body"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
	pub title: String,
	pub description: String,
}

/// Read-only queries the description cascade needs from a parsed document.
pub trait DocumentView {
	fn title(&self) -> Option<String>;

	/// Content of the first `<meta>` whose `name` or `property` equals `key`.
	fn meta_content(&self, key: &str) -> Option<String>;

	/// Text of the first non-empty `<p>` inside the first matching `container`.
	fn first_paragraph(&self, container: &str) -> Option<String>;
}

pub struct HtmlDocument {
	html: Html,
}
impl HtmlDocument {
	pub fn parse(source: &str) -> Self {
		Self { html: Html::parse_document(source) }
	}
}

impl DocumentView for HtmlDocument {
	fn title(&self) -> Option<String> {
		let selector = Selector::parse("title").ok()?;
		let element = self.html.select(&selector).next()?;

		non_empty(collapse_whitespace(&element.text().collect::<String>()))
	}

	fn meta_content(&self, key: &str) -> Option<String> {
		let selector = Selector::parse("meta").ok()?;

		self.html.select(&selector).find_map(|element| {
			let element = element.value();
			let matches = ["name", "property"].iter().any(|attr| {
				element.attr(attr).map(|value| value.trim().eq_ignore_ascii_case(key)).unwrap_or(false)
			});

			if !matches {
				return None;
			}

			element.attr("content").and_then(|content| non_empty(collapse_whitespace(content)))
		})
	}

	fn first_paragraph(&self, container: &str) -> Option<String> {
		let container_selector = Selector::parse(container).ok()?;
		let paragraph_selector = Selector::parse("p").ok()?;
		let element = self.html.select(&container_selector).next()?;

		element.select(&paragraph_selector).find_map(|paragraph| {
			non_empty(collapse_whitespace(&paragraph.text().collect::<String>()))
		})
	}
}

pub fn describe(doc: &impl DocumentView) -> DocumentMetadata {
	let title = doc.title().unwrap_or_default();
	let description = META_DESCRIPTION_KEYS
		.iter()
		.find_map(|key| doc.meta_content(key))
		.or_else(|| {
			PARAGRAPH_CONTAINERS.iter().find_map(|container| doc.first_paragraph(container))
		})
		.unwrap_or_default();

	DocumentMetadata { title, description }
}

pub fn extract_document_metadata(bytes: &[u8]) -> DocumentMetadata {
	let source = String::from_utf8_lossy(bytes);

	describe(&HtmlDocument::parse(&source))
}

fn collapse_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: String) -> Option<String> {
	if text.is_empty() { None } else { Some(text) }
}
