use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Structured recipe produced by the external analysis step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeAnalysis {
    pub title: String,
    pub ingredients: Vec<String>,
    /// Free-form instruction text. Callers should pass this through
    /// [`crate::sanitize::sanitize_instructions`] before storing or
    /// displaying it.
    pub instructions: String,
}

/// The language-model collaborator that turns extracted metadata into a
/// structured recipe. Consumed as a black box; this crate defines the
/// seam and never calls it itself.
#[async_trait]
pub trait RecipeAnalyzer {
    async fn analyze(
        &self,
        title: &str,
        description: &str,
        comments: &[String],
    ) -> Result<RecipeAnalysis, Box<dyn std::error::Error + Send + Sync>>;
}
