use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::domain::is_valid_url;

pub const MIME_VIDEO_MP4: &str = "video/mp4";
pub const MIME_VIDEO_WEBM: &str = "video/webm";
pub const MIME_VIDEO_3GPP: &str = "video/3gpp";
pub const MIME_VIDEO_X_FLV: &str = "video/x-flv";
pub const MIME_VIDEO_MPEG: &str = "video/mpeg";

pub const MIME_IMAGE_JPEG: &str = "image/jpeg";
pub const MIME_IMAGE_PNG: &str = "image/png";
pub const MIME_IMAGE_GIF: &str = "image/gif";

pub const MIME_TEXT_HTML: &str = "text/html";

type MimeTable = HashMap<&'static str, &'static str>;

static VIDEO_MIMES: Lazy<MimeTable> = Lazy::new(|| {
    HashMap::from([
        (".mp4", MIME_VIDEO_MP4),
        (".m4v", MIME_VIDEO_MP4),
        (".mp4v", MIME_VIDEO_MP4),
        (".webm", MIME_VIDEO_WEBM),
        (".3gp", MIME_VIDEO_3GPP),
        (".3gpp", MIME_VIDEO_3GPP),
        (".flv", MIME_VIDEO_X_FLV),
        (".m1v", MIME_VIDEO_MPEG),
        (".m2v", MIME_VIDEO_MPEG),
        (".mod", MIME_VIDEO_MPEG),
        (".mp2v", MIME_VIDEO_MPEG),
        (".mpa", MIME_VIDEO_MPEG),
        (".mpe", MIME_VIDEO_MPEG),
        (".mpeg", MIME_VIDEO_MPEG),
        (".mpg", MIME_VIDEO_MPEG),
        (".mpv2", MIME_VIDEO_MPEG),
    ])
});

static IMAGE_MIMES: Lazy<MimeTable> = Lazy::new(|| {
    HashMap::from([
        (".gif", MIME_IMAGE_GIF),
        (".png", MIME_IMAGE_PNG),
        (".jpeg", MIME_IMAGE_JPEG),
        (".jpg", MIME_IMAGE_JPEG),
    ])
});

static HTML_MIMES: Lazy<MimeTable> =
    Lazy::new(|| HashMap::from([(".html", MIME_TEXT_HTML), (".htm", MIME_TEXT_HTML)]));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
    Html,
}

impl MediaKind {
    fn table(self) -> &'static MimeTable {
        match self {
            Self::Video => &*VIDEO_MIMES,
            Self::Image => &*IMAGE_MIMES,
            Self::Html => &*HTML_MIMES,
        }
    }
}

/// Looks up the MIME type of the file a path or URL points at, by its
/// extension. Matching is case sensitive, and query strings are not stripped:
/// `clip.mp4?t=1` has the extension `.mp4?t=1`.
pub fn get_mime(kind: MediaKind, source: &str) -> Option<&'static str> {
    let ext = file_ext(source)?;
    kind.table().get(ext).copied()
}

pub fn get_video_mime(source: &str) -> Option<&'static str> {
    get_mime(MediaKind::Video, source)
}

pub fn get_image_mime(source: &str) -> Option<&'static str> {
    get_mime(MediaKind::Image, source)
}

pub fn get_html_mime(source: &str) -> Option<&'static str> {
    get_mime(MediaKind::Html, source)
}

/// The URL must pass [`is_valid_url`] and point at a file of `kind`.
pub fn is_valid_media_url(kind: MediaKind, url: &str) -> bool {
    is_valid_url(url) && get_mime(kind, url).is_some()
}

pub fn is_valid_video_url(url: &str) -> bool {
    is_valid_media_url(MediaKind::Video, url)
}

pub fn is_valid_image_url(url: &str) -> bool {
    is_valid_media_url(MediaKind::Image, url)
}

pub fn is_valid_html_url(url: &str) -> bool {
    is_valid_media_url(MediaKind::Html, url)
}

/// Extension of the last path segment, including the leading dot.
fn file_ext(source: &str) -> Option<&str> {
    let name = match source.rfind('/') {
        Some(idx) => &source[idx + 1..],
        None => source,
    };
    name.rfind('.').map(|idx| &name[idx..])
}
