use std::collections::HashMap;

/// A leaf MIME part (text, HTML or attachment)
#[derive(Debug, Clone)]
pub struct MimePart {
    /// Content-Type header value, including parameters
    pub content_type: String,
    /// Content-Disposition header value (e.g., "attachment")
    pub content_disposition: Option<String>,
    /// Content-Transfer-Encoding (e.g., "base64", "quoted-printable")
    pub encoding: Option<String>,
    /// Raw body content (may be encoded)
    pub body: Vec<u8>,
}

impl Default for MimePart {
    fn default() -> Self {
        MimePart {
            content_type: "text/plain".to_string(),
            content_disposition: None,
            encoding: None,
            body: Vec::new(),
        }
    }
}

impl MimePart {
    /// Lowercased media type without parameters, e.g. `text/html`
    pub fn mime_type(&self) -> String {
        let media = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        if media.is_empty() {
            "text/plain".to_string()
        } else {
            media
        }
    }

    /// Whether the part is a textual body a reader would see
    pub fn is_text_body(&self) -> bool {
        let media = self.mime_type();
        (media == "text/plain" || media == "text/html") && !self.is_attachment()
    }

    pub fn is_attachment(&self) -> bool {
        self.content_disposition
            .as_deref()
            .map(|d| d.to_lowercase().contains("attachment"))
            .unwrap_or(false)
    }
}

/// Parsed email with its leaf parts in document order
#[derive(Debug, Clone, Default)]
pub struct ParsedEmail {
    /// Top-level headers, keyed by lowercased name
    pub headers: HashMap<String, String>,
    /// True when the message was split on a multipart boundary
    pub is_multipart: bool,
    /// Leaf parts, depth-first. A single-part message has exactly one.
    pub parts: Vec<MimePart>,
}

impl ParsedEmail {
    /// First non-attachment `text/plain` or `text/html` part
    pub fn first_text_part(&self) -> Option<&MimePart> {
        self.parts.iter().find(|p| p.is_text_body())
    }
}
