use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateParams {
    pub(crate) title: String,
    pub(crate) content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct CreateFromImageParams {
    pub(crate) title: String,
    /// Base64-encoded image bytes
    pub(crate) image_data: String,
    pub(crate) mime_type: String,
    /// Declared size in bytes; validated against the 16 MiB ceiling before
    /// the payload is decoded
    pub(crate) file_size: u64,
}
