use serde::{Deserialize, Serialize};

/// A documentation page after HTML extraction: readable text only, with the
/// page title when one was present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentPage {
    pub title: String,
    pub text: String,
}
