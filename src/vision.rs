//! Safe-search classification client
//!
//! Thin adapter over the Google Cloud Vision `images:annotate` REST
//! endpoint. The image bytes are shipped as-is (base64 in the request
//! body) and the provider's safe-search verdict comes back as five
//! likelihood levels. No local decoding or validation happens here beyond
//! rejecting an empty payload; the provider is treated as an opaque
//! oracle, and failures are surfaced to the caller without retries.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const SAFE_SEARCH_FEATURE: &str = "SAFE_SEARCH_DETECTION";

/// Vision client errors
#[derive(Debug, Error)]
pub enum VisionError {
    /// Upload contained no bytes
    #[error("empty image upload")]
    EmptyImage,

    /// Network communication error (includes request timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The provider returned an error response
    #[error("vision API error {0}: {1}")]
    Api(u16, String),

    /// Failed to interpret the provider's response
    #[error("parse error: {0}")]
    Parse(String),
}

/// Safe-search likelihood levels for one image
///
/// Each field is the ordinal value of the provider's Likelihood enum:
/// UNKNOWN=0, VERY_UNLIKELY=1, UNLIKELY=2, POSSIBLE=3, LIKELY=4,
/// VERY_LIKELY=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeSearchScores {
    pub adult: i64,
    pub spoof: i64,
    pub medical: i64,
    pub violence: i64,
    pub racy: i64,
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateEntry>,
}

#[derive(Debug, Serialize)]
struct AnnotateEntry {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateResult>,
}

#[derive(Debug, Deserialize)]
struct AnnotateResult {
    #[serde(rename = "safeSearchAnnotation")]
    safe_search_annotation: Option<SafeSearchAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Debug, Deserialize)]
struct SafeSearchAnnotation {
    adult: Option<String>,
    spoof: Option<String>,
    medical: Option<String>,
    violence: Option<String>,
    racy: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Map a likelihood name to its ordinal level
///
/// A missing field decodes as UNKNOWN (the proto default). An
/// unrecognized name is a parse error rather than a silent zero.
fn likelihood_level(value: Option<&str>) -> Result<i64, VisionError> {
    let Some(value) = value else {
        return Ok(0);
    };
    match value {
        "UNKNOWN" => Ok(0),
        "VERY_UNLIKELY" => Ok(1),
        "UNLIKELY" => Ok(2),
        "POSSIBLE" => Ok(3),
        "LIKELY" => Ok(4),
        "VERY_LIKELY" => Ok(5),
        other => Err(VisionError::Parse(format!(
            "unrecognized likelihood: {other}"
        ))),
    }
}

fn scores_from_annotation(
    annotation: &SafeSearchAnnotation,
) -> Result<SafeSearchScores, VisionError> {
    Ok(SafeSearchScores {
        adult: likelihood_level(annotation.adult.as_deref())?,
        spoof: likelihood_level(annotation.spoof.as_deref())?,
        medical: likelihood_level(annotation.medical.as_deref())?,
        violence: likelihood_level(annotation.violence.as_deref())?,
        racy: likelihood_level(annotation.racy.as_deref())?,
    })
}

/// Safe-search classification client
pub struct VisionClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl VisionClient {
    /// Create a new client with a bounded request timeout
    ///
    /// The timeout caps the whole annotate round-trip; a hung provider
    /// surfaces as a network error instead of blocking the request.
    pub fn new(
        base_url: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, VisionError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VisionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            api_key,
        })
    }

    /// Classify image bytes into the five safe-search levels
    pub async fn classify(&self, image: &[u8]) -> Result<SafeSearchScores, VisionError> {
        if image.is_empty() {
            return Err(VisionError::EmptyImage);
        }

        let request = AnnotateRequest {
            requests: vec![AnnotateEntry {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    feature_type: SAFE_SEARCH_FEATURE,
                }],
            }],
        };

        let url = format!("{}/images:annotate", self.base_url.trim_end_matches('/'));

        tracing::debug!(bytes = image.len(), url = %url, "Requesting safe-search annotation");

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| VisionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(VisionError::Api(status.as_u16(), error_text));
        }

        let annotate: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| VisionError::Parse(e.to_string()))?;

        let result = annotate
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| VisionError::Parse("empty annotate response".to_string()))?;

        // A per-image error arrives inside a 200 response
        if let Some(err) = result.error {
            return Err(VisionError::Api(err.code as u16, err.message));
        }

        let annotation = result.safe_search_annotation.ok_or_else(|| {
            VisionError::Parse("response missing safeSearchAnnotation".to_string())
        })?;

        let scores = scores_from_annotation(&annotation)?;

        tracing::info!(
            adult = scores.adult,
            racy = scores.racy,
            "Safe-search annotation successful"
        );

        Ok(scores)
    }
}
