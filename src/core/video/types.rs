use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Video service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read photo {path}: {source}")]
    Photo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid multipart field: {0}")]
    Multipart(String),
}

pub type Result<T> = std::result::Result<T, SubmitError>;

// ============================================================================
// Enumerated choices
// ============================================================================

/// Narration voices offered by the video service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    pub const ALL: [Voice; 6] = [
        Voice::Alloy,
        Voice::Echo,
        Voice::Fable,
        Voice::Onyx,
        Voice::Nova,
        Voice::Shimmer,
    ];

    /// Wire value sent in the multipart body.
    pub fn id(self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Voice::Alloy => "Alloy",
            Voice::Echo => "Echo",
            Voice::Fable => "Fable",
            Voice::Onyx => "Onyx",
            Voice::Nova => "Nova",
            Voice::Shimmer => "Shimmer",
        }
    }
}

/// Caption fonts bundled with the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    TimesBold,
    TimesBoldItalic,
    TimesItalic,
    TimesNewRoman,
    TimesNewRomanBold,
    TimesNewRomanBoldItalic,
    TimesNewRomanItalic,
    TimesRoman,
}

impl Font {
    pub const ALL: [Font; 8] = [
        Font::TimesBold,
        Font::TimesBoldItalic,
        Font::TimesItalic,
        Font::TimesNewRoman,
        Font::TimesNewRomanBold,
        Font::TimesNewRomanBoldItalic,
        Font::TimesNewRomanItalic,
        Font::TimesRoman,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Font::TimesBold => "Times-Bold",
            Font::TimesBoldItalic => "Times-Bold-Italic",
            Font::TimesItalic => "Times-Italic",
            Font::TimesNewRoman => "Times-New-Roman",
            Font::TimesNewRomanBold => "Times-New-Roman-Bold",
            Font::TimesNewRomanBoldItalic => "Times-New-Roman-Bold-Italic",
            Font::TimesNewRomanItalic => "Times-New-Roman-Italic",
            Font::TimesRoman => "Times-Roman",
        }
    }
}

/// Highest preset background index.
pub const MAX_TEMPLATE: u8 = 7;

/// Preset background descriptions, indexed by template number.
pub const TEMPLATES: [(&str, &str); 8] = [
    ("Plain white background", "bg_white"),
    ("Blue background", "bg_blue"),
    ("Blue gradient background", "bg_bluegrad"),
    ("Dark gradient background", "bg_darkgrad"),
    ("Dark gradient background", "bg_darkgrad"),
    ("Gradient background", "bg_gradainat normal"),
    ("Olive background", "bg_olive"),
    ("Purple background", "bg_purple"),
];

// ============================================================================
// Form variants
// ============================================================================

/// Multipart field names for one form layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldNames {
    pub text: &'static str,
    pub display_name: &'static str,
    pub handle: &'static str,
    pub voice: &'static str,
    pub photo: &'static str,
    /// (font color, background color, font); `None` when styling is not sent.
    pub styling: Option<(&'static str, &'static str, &'static str)>,
    /// `None` when the template is implicit.
    pub template: Option<&'static str>,
}

/// The two form layouts the video service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Every option on offer, 256-character text.
    #[default]
    Classic,
    /// Reduced step-by-step flow, 512-character text.
    Stepwise,
}

impl Variant {
    pub fn max_text_len(self) -> usize {
        match self {
            Variant::Classic => 256,
            Variant::Stepwise => 512,
        }
    }

    pub fn field_names(self) -> FieldNames {
        match self {
            Variant::Classic => FieldNames {
                text: "text",
                display_name: "profile_name",
                handle: "username",
                voice: "voice_name",
                photo: "logo",
                styling: Some(("color", "bgcolor", "font")),
                template: Some("temp"),
            },
            Variant::Stepwise => FieldNames {
                text: "text",
                display_name: "display_name",
                handle: "username",
                voice: "voice",
                photo: "photo",
                styling: None,
                template: None,
            },
        }
    }
}

// ============================================================================
// Request / response
// ============================================================================

/// An image to attach as the profile photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Bundled fallback photo, used whenever the user supplies none.
pub const DEFAULT_PHOTO_NAME: &str = "xlogo.jpg";
pub const DEFAULT_PHOTO_MIME: &str = "image/jpeg";
pub const DEFAULT_PHOTO: &[u8] = include_bytes!("../../../assets/xlogo.jpg");

impl PhotoFile {
    pub fn default_photo() -> Self {
        Self {
            file_name: DEFAULT_PHOTO_NAME.to_string(),
            mime: DEFAULT_PHOTO_MIME.to_string(),
            bytes: DEFAULT_PHOTO.to_vec(),
        }
    }

    /// Read an image from disk, guessing the mime type from its extension.
    pub async fn load(path: &std::path::Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|source| SubmitError::Photo {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        Ok(Self {
            mime: mime_for(path).to_string(),
            file_name,
            bytes,
        })
    }
}

fn mime_for(path: &std::path::Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Caption styling. Blank strings are sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Styling {
    pub font_color: String,
    pub background_color: String,
    pub font: Option<Font>,
}

/// Everything collected by the wizard, consumed by exactly one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRequest {
    pub variant: Variant,
    pub text: String,
    pub display_name: String,
    pub handle: String,
    pub styling: Styling,
    pub voice: Option<Voice>,
    pub template: Option<u8>,
    pub photo: Option<PhotoFile>,
}

impl VideoRequest {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            text: String::new(),
            display_name: String::new(),
            handle: String::new(),
            styling: Styling::default(),
            voice: None,
            template: match variant {
                Variant::Classic => Some(0),
                Variant::Stepwise => None,
            },
            photo: None,
        }
    }
}

/// Where the generated video can be found: a URL or a storage blob name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference(pub String);

impl VideoReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_url(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

/// Success body. The two variants name the field differently.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub video_blob_name: Option<String>,
}

impl GenerateResponse {
    pub fn into_reference(self) -> VideoReference {
        VideoReference(
            self.video_url
                .or(self.video_blob_name)
                .unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_ids_are_lowercase_labels() {
        for voice in Voice::ALL {
            assert_eq!(voice.id(), voice.label().to_lowercase());
        }
    }

    #[test]
    fn test_variant_text_bounds() {
        assert_eq!(Variant::Classic.max_text_len(), 256);
        assert_eq!(Variant::Stepwise.max_text_len(), 512);
    }

    #[test]
    fn test_classic_sends_template_zero_by_default() {
        assert_eq!(VideoRequest::new(Variant::Classic).template, Some(0));
        assert_eq!(VideoRequest::new(Variant::Stepwise).template, None);
    }

    #[test]
    fn test_default_photo_is_jpeg() {
        let photo = PhotoFile::default_photo();
        assert_eq!(photo.file_name, "xlogo.jpg");
        assert_eq!(photo.mime, "image/jpeg");
        assert_eq!(&photo.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(mime_for(std::path::Path::new("a/b/me.PNG")), "image/png");
        assert_eq!(mime_for(std::path::Path::new("me.jpeg")), "image/jpeg");
        assert_eq!(mime_for(std::path::Path::new("me")), "application/octet-stream");
    }

    #[test]
    fn test_response_accepts_either_key() {
        let a: GenerateResponse =
            serde_json::from_str(r#"{"video_url": "https://x/y.mp4"}"#).unwrap();
        assert_eq!(a.into_reference().as_str(), "https://x/y.mp4");

        let b: GenerateResponse =
            serde_json::from_str(r#"{"video_blob_name": "videos/abc.mp4"}"#).unwrap();
        let reference = b.into_reference();
        assert_eq!(reference.as_str(), "videos/abc.mp4");
        assert!(!reference.is_url());
    }

    #[test]
    fn test_response_without_reference_is_empty() {
        let r: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(r.into_reference().as_str(), "");
    }

    #[tokio::test]
    async fn test_photo_load_missing_file() {
        let err = PhotoFile::load(std::path::Path::new("/definitely/not/here.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Photo { .. }));
    }
}
