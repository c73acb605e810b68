//! Turns a binary story file into a script the interpreter page can load.

use crate::utils::{BundleError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoryFormat {
    /// `processBase64Zcode('...');`, for a `?story=` URL or a default story.
    #[default]
    Base64Zcode,
    /// A document-ready handler calling `GiLoad.load_run`, for a `<script>` tag.
    GiLoad,
}

pub fn encode_story(contents: &[u8], format: StoryFormat) -> String {
    let encoded = STANDARD.encode(contents);
    match format {
        StoryFormat::Base64Zcode => format!("processBase64Zcode('{}');\n", encoded),
        StoryFormat::GiLoad => format!(
            "$(document).ready(function() {{\n  GiLoad.load_run(null, '{}', 'base64');\n}});\n",
            encoded
        ),
    }
}

pub async fn convert_story_file(path: &Path, format: StoryFormat) -> Result<String> {
    let contents = tokio::fs::read(path)
        .await
        .map_err(|e| BundleError::read(path, e))?;
    Ok(encode_story(&contents, format))
}
