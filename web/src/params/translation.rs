use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct TranslateParams {
    /// Target language label, e.g. "Spanish"
    pub(crate) target_language: String,
}
