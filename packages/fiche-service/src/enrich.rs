use fiche_config::{DocumentProviderConfig, SummaryProviderConfig};
use fiche_providers::{
	document,
	html::{self, DocumentMetadata},
	summary,
};

use crate::{BoxFuture, MetadataEnricher};

/// Resolves encyclopedia URLs through the summary endpoint and everything else by fetching
/// and parsing the document itself.
pub struct HttpEnricher {
	summary: SummaryProviderConfig,
	document: DocumentProviderConfig,
}
impl HttpEnricher {
	pub fn new(summary: SummaryProviderConfig, document: DocumentProviderConfig) -> Self {
		Self { summary, document }
	}

	async fn try_enrich(&self, url: &str) -> fiche_providers::Result<DocumentMetadata> {
		if let Some(title) = summary::article_title(&self.summary, url) {
			let fetched = summary::fetch_summary(&self.summary, &title).await?;

			return Ok(DocumentMetadata { title: fetched.title, description: fetched.extract });
		}

		let bytes = document::fetch_document(&self.document, url).await?;

		Ok(html::extract_document_metadata(&bytes))
	}
}

impl MetadataEnricher for HttpEnricher {
	fn enrich<'a>(&'a self, url: &'a str) -> BoxFuture<'a, DocumentMetadata> {
		Box::pin(async move {
			match self.try_enrich(url).await {
				Ok(metadata) => metadata,
				Err(err) => {
					tracing::debug!(%url, error = %err, "Enrichment failed; using empty metadata.");

					DocumentMetadata::default()
				},
			}
		})
	}
}
