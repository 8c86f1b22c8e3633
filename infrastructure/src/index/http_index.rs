//! HTTP adapter for a text-query similarity service.
//!
//! The service owns the embedding model: it receives raw question texts,
//! embeds them itself and returns ranked ids and documents, one group per
//! query text. The collection is addressed by the name from `[index]`.
//!
//! Contract:
//!
//! ```text
//! POST {endpoint}/api/v1/collections/{collection}/query
//! {"query_texts": [..], "n_results": N, "include": ["documents"]}
//!
//! 200 {"ids": [[..]], "documents": [[..]]}
//! ```
//!
//! This is not the Chroma REST API. Chroma addresses collections by id and
//! expects client-side embeddings, so a small proxy is needed in front of it.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use verse_rag_application::{IndexError, IndexQueryResult, SimilarityIndex};
use verse_rag_domain::VerseId;

/// Similarity index served over HTTP.
#[derive(Clone)]
pub struct HttpSimilarityIndex {
    client: Client,
    query_url: String,
}

impl HttpSimilarityIndex {
    pub fn new(endpoint: &str, collection: &str, timeout: Duration) -> Result<Self, IndexError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IndexError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            query_url: query_url(endpoint, collection),
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }
}

fn query_url(endpoint: &str, collection: &str) -> String {
    format!(
        "{}/api/v1/collections/{}/query",
        endpoint.trim_end_matches('/'),
        collection
    )
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query_texts: &'a [String],
    n_results: usize,
    include: [&'static str; 1],
}

#[derive(Deserialize)]
struct QueryResponse {
    ids: Vec<Vec<VerseId>>,
    #[serde(default)]
    documents: Option<Vec<Vec<Option<String>>>>,
}

fn convert_response(response: QueryResponse) -> Result<IndexQueryResult, IndexError> {
    let documents: Vec<Vec<String>> = match response.documents {
        Some(groups) => groups
            .into_iter()
            .map(|group| group.into_iter().map(Option::unwrap_or_default).collect())
            .collect(),
        None => response.ids.iter().map(|g| vec![String::new(); g.len()]).collect(),
    };

    if documents.len() != response.ids.len() {
        return Err(IndexError::InvalidResponse(format!(
            "{} id groups but {} document groups",
            response.ids.len(),
            documents.len()
        )));
    }

    Ok(IndexQueryResult::new(documents, response.ids))
}

fn map_transport_error(err: reqwest::Error) -> IndexError {
    if err.is_timeout() {
        IndexError::Timeout
    } else if err.is_connect() {
        IndexError::Connection(err.to_string())
    } else if err.is_decode() {
        IndexError::InvalidResponse(err.to_string())
    } else {
        IndexError::RequestFailed(err.to_string())
    }
}

#[async_trait]
impl SimilarityIndex for HttpSimilarityIndex {
    async fn query(
        &self,
        query_texts: &[String],
        n_results: usize,
    ) -> Result<IndexQueryResult, IndexError> {
        debug!(
            "Querying {} with {} text(s), n_results={}",
            self.query_url,
            query_texts.len(),
            n_results
        );

        let request = QueryRequest {
            query_texts,
            n_results,
            include: ["documents"],
        };

        let response = self
            .client
            .post(&self.query_url)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IndexError::RequestFailed(format!(
                "HTTP {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                body.trim()
            )));
        }

        let parsed: QueryResponse = response.json().await.map_err(map_transport_error)?;
        convert_response(parsed)
    }
}
