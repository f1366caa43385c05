use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Image encodings the agent runtime accepts
///
/// `Other` only arises from a data url whose declared subtype is outside the
/// supported set; it is passed through untouched.
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Other(String),
}

impl ImageFormat {
    /// Map a file extension, falling back to png for anything unrecognized
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "png" => ImageFormat::Png,
            "gif" => ImageFormat::Gif,
            "webp" => ImageFormat::Webp,
            _ => ImageFormat::Png,
        }
    }

    /// Take a declared mime subtype as-is
    pub fn from_subtype(subtype: &str) -> Self {
        match subtype {
            "jpeg" => ImageFormat::Jpeg,
            "png" => ImageFormat::Png,
            "gif" => ImageFormat::Gif,
            "webp" => ImageFormat::Webp,
            other => ImageFormat::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Other(subtype) => subtype,
        }
    }

    pub fn mime_type(&self) -> String {
        format!("image/{}", self.as_str())
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ImageFormat::Other(_))
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A unit of content in the shape the agent runtime expects
pub enum ContentBlock {
    Text(String),
    Image { format: ImageFormat, bytes: Vec<u8> },
}

impl ContentBlock {
    pub fn text<S: Into<String>>(text: S) -> Self {
        ContentBlock::Text(text.into())
    }

    pub fn image(format: ImageFormat, bytes: Vec<u8>) -> Self {
        ContentBlock::Image { format, bytes }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// What gets handed to the agent runtime for a single user turn
pub enum NormalizedContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl NormalizedContent {
    pub fn text<S: Into<String>>(text: S) -> Self {
        NormalizedContent::Text(text.into())
    }
}
