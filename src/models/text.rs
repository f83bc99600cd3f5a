use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// The inference endpoint answers with either a list of candidates or a
/// single object depending on the hosted model.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InferenceResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl InferenceResponse {
    pub fn into_text(self) -> Option<String> {
        match self {
            InferenceResponse::Batch(mut candidates) => {
                if candidates.is_empty() {
                    None
                } else {
                    Some(candidates.remove(0).generated_text)
                }
            }
            InferenceResponse::Single(candidate) => Some(candidate.generated_text),
        }
    }
}
