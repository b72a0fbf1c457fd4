use crate::http::request::Request;
use std::collections::HashMap;

const HEADER_SEPARATOR: &str = ": ";

/// Parses a buffered request.
///
/// Never fails: missing request-line tokens become empty strings, header
/// lines without `": "` are skipped, and only the first line after the
/// blank separator is kept as the body. Invalid UTF-8 is replaced lossily.
pub fn parse_http_request(buf: &[u8]) -> Request {
    let text = String::from_utf8_lossy(buf);
    let lines: Vec<&str> = split_lines(&text).collect();

    let mut request = Request::default();

    let Some(request_line) = lines.first() else {
        return request;
    };

    let mut parts = request_line.split_whitespace();
    request.method = parts.next().unwrap_or_default().to_string();
    request.path = parts.next().unwrap_or_default().to_string();

    // Headers
    let mut headers = HashMap::new();
    let mut i = 1;

    while i < lines.len() && !lines[i].is_empty() {
        if let Some((key, value)) = lines[i].split_once(HEADER_SEPARATOR) {
            headers.insert(key.to_string(), value.to_string());
        }
        i += 1;
    }

    request.headers = headers;

    // Body: the one line after the separator, if the separator was seen
    if let Some(body) = lines.get(i + 1) {
        request.body = body.to_string();
    }

    request
}

/// Byte offset just past the blank line ending the header block.
///
/// Uses the same line rule as the parser: lines end at `\n`, one trailing
/// `\r` is ignored, and the first empty line after the request line ends the
/// headers. `\r\n\r\n`, `\n\n`, `\n\r\n` and `\r\n\n` all qualify.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    let mut start = 0;
    let mut index = 0;

    while let Some(pos) = buf[start..].iter().position(|&b| b == b'\n') {
        let end = start + pos;
        let line = &buf[start..end];
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        if index > 0 && line.is_empty() {
            return Some(end + 1);
        }

        start = end + 1;
        index += 1;
    }

    None
}

/// Splits on `\n` and drops one trailing `\r` per line. A final `\n` does
/// not produce an extra empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n').map(|line| {
        let line = line.strip_suffix('\n').unwrap_or(line);
        line.strip_suffix('\r').unwrap_or(line)
    })
}
