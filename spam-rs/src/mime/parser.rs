use base64::{engine::general_purpose, Engine as _};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::types::{MimePart, ParsedEmail};

/// Multipart nesting deeper than this is treated as opaque text
const MAX_MULTIPART_DEPTH: usize = 16;

/// MIME message parser
pub struct MimeParser;

impl MimeParser {
    /// Parse a raw email message into its leaf parts
    pub fn parse(message: &[u8]) -> ParsedEmail {
        let message_str = String::from_utf8_lossy(message);

        let (headers_str, body_str) = Self::split_headers_body(&message_str);
        let headers = Self::parse_headers(headers_str);

        let mut parsed = ParsedEmail {
            headers: headers.clone(),
            ..Default::default()
        };

        let root = Self::part_from_headers(&headers, body_str);
        if let Some(boundary) = Self::multipart_boundary(&root) {
            parsed.is_multipart = true;
            Self::parse_multipart(&boundary, body_str, 1, &mut parsed.parts);
        } else {
            parsed.parts.push(root);
        }

        parsed
    }

    /// Extract the decoded body a filter should look at.
    ///
    /// Multipart messages yield the first non-attachment `text/plain` or
    /// `text/html` part, or `None` when there is none. Single-part messages
    /// yield their payload whatever the content type.
    pub fn extract_body(message: &[u8]) -> Option<Vec<u8>> {
        if message.is_empty() {
            return None;
        }

        let parsed = Self::parse(message);
        let part = if parsed.is_multipart {
            parsed.first_text_part()
        } else {
            parsed.parts.first()
        };

        match part {
            Some(part) => Some(Self::decode_body(part)),
            None => {
                debug!("No textual part found in multipart message");
                None
            }
        }
    }

    /// Split message into headers and body.
    ///
    /// The header block ends at the first blank line, which is dropped, or at
    /// the first line that is not a header, which starts the body.
    fn split_headers_body(message: &str) -> (&str, &str) {
        let mut offset = 0;

        for line in message.split_inclusive('\n') {
            let content = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
            if content.is_empty() {
                return (&message[..offset], &message[offset + line.len()..]);
            }
            if !Self::is_header_line(content) {
                return (&message[..offset], &message[offset..]);
            }
            offset += line.len();
        }

        // Only headers, no body
        (message, "")
    }

    /// `name: value`, a folded continuation or an mbox `From ` envelope line.
    ///
    /// Header names are printable ASCII without spaces.
    fn is_header_line(line: &str) -> bool {
        if line.starts_with(' ') || line.starts_with('\t') || line.starts_with("From ") {
            return true;
        }
        match line.find(':') {
            Some(colon_pos) => line[..colon_pos].bytes().all(|b| (0x21..=0x7e).contains(&b)),
            None => false,
        }
    }

    /// Parse email headers into HashMap
    fn parse_headers(headers_str: &str) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        let mut current_header: Option<(String, String)> = None;

        for line in headers_str.lines() {
            if line.starts_with(' ') || line.starts_with('\t') {
                // Continuation of previous header (folded header)
                if let Some((_, ref mut value)) = current_header {
                    value.push(' ');
                    value.push_str(line.trim());
                }
            } else if line.starts_with("From ") {
                // mbox envelope, not a header
                continue;
            } else if let Some(colon_pos) = line.find(':') {
                if let Some((name, value)) = current_header.take() {
                    headers.entry(name.to_lowercase()).or_insert(value);
                }

                let name = line[..colon_pos].trim().to_string();
                if name.is_empty() {
                    continue;
                }
                let value = line[colon_pos + 1..].trim().to_string();
                current_header = Some((name, value));
            }
        }

        if let Some((name, value)) = current_header {
            headers.entry(name.to_lowercase()).or_insert(value);
        }

        headers
    }

    fn part_from_headers(headers: &HashMap<String, String>, body: &str) -> MimePart {
        let mut part = MimePart::default();

        if let Some(content_type) = headers.get("content-type") {
            part.content_type = content_type.clone();
        }
        part.content_disposition = headers.get("content-disposition").cloned();
        part.encoding = headers.get("content-transfer-encoding").cloned();
        part.body = body.as_bytes().to_vec();

        part
    }

    /// Boundary of a multipart part, if it is one and declares a boundary
    fn multipart_boundary(part: &MimePart) -> Option<String> {
        if !part.mime_type().starts_with("multipart/") {
            return None;
        }
        Self::extract_parameter(&part.content_type, "boundary").filter(|b| !b.is_empty())
    }

    /// Split a multipart body and collect its leaf parts depth-first
    fn parse_multipart(boundary: &str, body: &str, depth: usize, parts: &mut Vec<MimePart>) {
        let boundary_marker = format!("--{}", boundary);

        // The first section is the preamble, which carries no content
        for section in body.split(boundary_marker.as_str()).skip(1) {
            // Closing delimiter
            if section.starts_with("--") {
                break;
            }

            // Drop the remainder of the boundary line
            let section = match section.find('\n') {
                Some(pos) => &section[pos + 1..],
                None => continue,
            };

            // The line break before the next delimiter belongs to the delimiter
            let section = section
                .strip_suffix("\r\n")
                .or_else(|| section.strip_suffix('\n'))
                .unwrap_or(section);

            let (part_headers_str, part_body) = Self::split_headers_body(section);
            let part_headers = Self::parse_headers(part_headers_str);
            let part = Self::part_from_headers(&part_headers, part_body);

            match Self::multipart_boundary(&part) {
                Some(inner) if depth < MAX_MULTIPART_DEPTH => {
                    Self::parse_multipart(&inner, part_body, depth + 1, parts);
                }
                _ => parts.push(part),
            }
        }
    }

    /// Extract parameter value from header (e.g., filename="file.txt")
    fn extract_parameter(header: &str, param_name: &str) -> Option<String> {
        let prefix = format!("{}=", param_name);
        for part in header.split(';').skip(1) {
            let part = part.trim();
            if part.to_lowercase().starts_with(&prefix) {
                let value = &part[prefix.len()..];
                let value = value.trim_matches('"').trim_matches('\'');
                return Some(value.to_string());
            }
        }
        None
    }

    /// Decode message body based on Content-Transfer-Encoding
    fn decode_body(part: &MimePart) -> Vec<u8> {
        let encoding = part
            .encoding
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .unwrap_or_default();

        match encoding.as_str() {
            "base64" => Self::decode_base64(&part.body).unwrap_or_else(|| {
                warn!("Invalid base64 body, using raw payload");
                part.body.clone()
            }),
            "quoted-printable" => decode_quoted_printable(&part.body),
            // 7bit, 8bit, binary - no decoding needed
            _ => part.body.clone(),
        }
    }

    /// Decode base64 content, `None` when it is not valid base64
    fn decode_base64(content: &[u8]) -> Option<Vec<u8>> {
        let cleaned: Vec<u8> = content
            .iter()
            .filter(|&&b| !b.is_ascii_whitespace())
            .copied()
            .collect();

        general_purpose::STANDARD
            .decode(&cleaned)
            .or_else(|_| general_purpose::STANDARD_NO_PAD.decode(&cleaned))
            .ok()
    }
}

/// Decode quoted-printable content.
///
/// `=XX` (either hex case) becomes one byte and `=` at the end of a line is a
/// soft line break. Any other `=` is kept as-is.
pub fn decode_quoted_printable(content: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(content.len());
    let mut i = 0;

    while i < content.len() {
        let byte = content[i];
        if byte != b'=' {
            result.push(byte);
            i += 1;
            continue;
        }

        match (content.get(i + 1), content.get(i + 2)) {
            (Some(b'\n'), _) => i += 2,
            (Some(b'\r'), Some(b'\n')) => i += 3,
            (Some(&hi), Some(&lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                result.push((hex_value(hi) << 4) | hex_value(lo));
                i += 3;
            }
            _ => {
                result.push(b'=');
                i += 1;
            }
        }
    }

    result
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
