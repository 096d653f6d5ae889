//! Coercers and validators shared by the campaign form schemas.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use url::Url;

use crate::models::choices::Choice;

pub const NOT_A_VALID_CHOICE: &str = "Not a valid choice";
pub const NOT_A_VALID_INTEGER: &str = "Not a valid integer value";
pub const NOT_A_VALID_DATETIME: &str = "Not a valid datetime value";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const TRUTHY: &[&str] = &["1", "t", "true", "y", "yes", "on"];
const FALSY: &[&str] = &["0", "f", "false", "n", "no", "off"];

pub fn strip(raw: Option<&str>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
}

pub fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// Trimmed value, or `None` when absent or blank.
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    none_if_empty(strip(raw))
}

/// Checkbox semantics: absent, empty and `false` are unchecked.
pub fn checkbox(raw: Option<&str>) -> bool {
    match raw {
        None => false,
        Some(value) => !matches!(value, "" | "false"),
    }
}

/// Tri-state coercion: recognised truthy/falsy words map to a bool,
/// everything else (including `None`, `N/A` and blanks) means unset.
pub fn getbool(raw: Option<&str>) -> Option<bool> {
    let value = raw?.trim().to_ascii_lowercase();
    if TRUTHY.contains(&value.as_str()) {
        Some(true)
    } else if FALSY.contains(&value.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Blank input is `Ok(None)`; anything else must parse as an integer.
pub fn integer(raw: Option<&str>) -> Result<Option<i64>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| NOT_A_VALID_INTEGER.to_string()),
    }
}

/// Parse a timezone-aware timestamp. Values without an offset are read in
/// `timezone`. Multiple values are joined with a space (separate date and
/// time inputs).
pub fn datetime(values: &[String], timezone: &FixedOffset) -> Result<DateTime<Utc>, String> {
    let joined = values.join(" ");
    parse_datetime(joined.trim(), timezone).ok_or_else(|| NOT_A_VALID_DATETIME.to_string())
}

fn parse_datetime(raw: &str, timezone: &FixedOffset) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Some(aware.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS.iter().find_map(|format| {
        let naive = NaiveDateTime::parse_from_str(raw, format).ok()?;
        timezone
            .from_local_datetime(&naive)
            .single()
            .map(|local| local.with_timezone(&Utc))
    })
}

/// Blank input is `Ok(None)`; anything else must name one of `T`'s codes.
pub fn choice<T: Choice>(raw: Option<&str>) -> Result<Option<T>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => T::from_code(value)
            .map(Some)
            .ok_or_else(|| NOT_A_VALID_CHOICE.to_string()),
    }
}

pub fn max_length(value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!("{max} characters maximum"))
    } else {
        Ok(())
    }
}

pub fn invalid_url_message(raw: &str) -> String {
    format!("The URL “{raw}” is not valid")
}

/// Absolute http(s) URL with a host.
pub fn web_url(raw: &str) -> Result<Url, String> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(url),
        _ => Err(invalid_url_message(raw)),
    }
}

fn linked_url_is_valid(raw: &str) -> bool {
    if raw.starts_with("mailto:") || raw.starts_with("tel:") {
        return Url::parse(raw).is_ok();
    }
    web_url(raw).is_ok()
}

const LINK_ATTRIBUTES: &[&str] = &["href", "src"];

/// Values of `href` and `src` attributes in an HTML fragment, in document
/// order. Only attributes of start tags count; text content and attributes
/// such as `data-src` are ignored. In-page anchors are skipped.
pub fn linked_urls(html: &str) -> Vec<&str> {
    let mut urls = Vec::new();
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        let tag = &rest[open + 1..];
        if !tag.starts_with(|c: char| c.is_ascii_alphabetic()) {
            rest = tag;
            continue;
        }
        let consumed = scan_start_tag(tag, &mut urls);
        rest = &tag[consumed..];
    }

    urls
}

/// Collect link attributes of one start tag. Returns the bytes consumed,
/// up to and including the closing `>`.
fn scan_start_tag<'a>(tag: &'a str, urls: &mut Vec<&'a str>) -> usize {
    let bytes = tag.as_bytes();
    let skip_whitespace = |mut pos: usize| {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        pos
    };

    let mut pos = bytes
        .iter()
        .position(|b| b.is_ascii_whitespace() || matches!(b, b'>' | b'/'))
        .unwrap_or(bytes.len());

    loop {
        while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b'/') {
            pos += 1;
        }
        match bytes.get(pos) {
            None => return bytes.len(),
            Some(b'>') => return pos + 1,
            Some(_) => {}
        }

        let name_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'=' | b'>' | b'/')
        {
            pos += 1;
        }
        let name = &tag[name_start..pos];

        pos = skip_whitespace(pos);
        if bytes.get(pos) != Some(&b'=') {
            continue;
        }
        let (value, next) = attribute_value(tag, skip_whitespace(pos + 1));
        pos = next;

        if LINK_ATTRIBUTES
            .iter()
            .any(|attribute| name.eq_ignore_ascii_case(attribute))
        {
            let value = value.trim();
            if !value.is_empty() && !value.starts_with('#') {
                urls.push(value);
            }
        }
    }
}

/// Quoted or bare attribute value starting at `start`, and the position after it.
fn attribute_value(tag: &str, start: usize) -> (&str, usize) {
    let rest = &tag[start..];
    match rest.chars().next() {
        Some(quote @ ('"' | '\'')) => match rest[1..].find(quote) {
            Some(end) => (&rest[1..1 + end], start + end + 2),
            None => (&rest[1..], tag.len()),
        },
        _ => {
            let end = rest
                .find(|c: char| c.is_ascii_whitespace() || c == '>')
                .unwrap_or(rest.len());
            (&rest[..end], start + end)
        }
    }
}

/// One message per link in `html` that is not a well-formed URL.
pub fn all_urls_valid(html: &str) -> Vec<String> {
    linked_urls(html)
        .into_iter()
        .filter(|url| !linked_url_is_valid(url))
        .map(invalid_url_message)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::choices::{ActionCategory, CampaignPosition};
    use chrono::Timelike;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).expect("valid offset")
    }

    #[test]
    fn checkbox_follows_browser_semantics() {
        assert!(!checkbox(None));
        assert!(!checkbox(Some("")));
        assert!(!checkbox(Some("false")));
        assert!(checkbox(Some("y")));
        assert!(checkbox(Some("on")));
    }

    #[test]
    fn getbool_is_tri_state() {
        assert_eq!(getbool(Some("True")), Some(true));
        assert_eq!(getbool(Some("off")), Some(false));
        assert_eq!(getbool(Some("None")), None);
        assert_eq!(getbool(Some("")), None);
        assert_eq!(getbool(None), None);
    }

    #[test]
    fn integer_distinguishes_blank_from_garbage() {
        assert_eq!(integer(None), Ok(None));
        assert_eq!(integer(Some("  ")), Ok(None));
        assert_eq!(integer(Some(" -4 ")), Ok(Some(-4)));
        assert_eq!(integer(Some("four")), Err(NOT_A_VALID_INTEGER.to_string()));
    }

    #[test]
    fn naive_datetimes_use_form_timezone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("valid offset");
        let parsed =
            datetime(&["2026-10-19 10:30".to_string()], &ist).expect("naive datetime parses");
        assert_eq!(parsed.to_rfc3339(), "2026-10-19T05:00:00+00:00");
    }

    #[test]
    fn offset_datetimes_keep_their_offset() {
        let parsed = datetime(&["2026-10-19T10:30:00-04:00".to_string()], &utc())
            .expect("rfc3339 parses");
        assert_eq!(parsed.hour(), 14);
    }

    #[test]
    fn split_date_and_time_inputs_are_joined() {
        let parsed = datetime(&["2026-10-19".to_string(), "08:15".to_string()], &utc())
            .expect("split input parses");
        assert_eq!(parsed.minute(), 15);
    }

    #[test]
    fn blank_or_garbage_datetimes_fail() {
        assert!(datetime(&[], &utc()).is_err());
        assert!(datetime(&["tomorrow".to_string()], &utc()).is_err());
    }

    #[test]
    fn choice_rejects_unknown_codes() {
        assert_eq!(choice::<CampaignPosition>(Some("")), Ok(None));
        assert_eq!(
            choice::<ActionCategory>(Some("primary")),
            Ok(Some(ActionCategory::Primary))
        );
        assert_eq!(
            choice::<ActionCategory>(Some("purple")),
            Err(NOT_A_VALID_CHOICE.to_string())
        );
    }

    #[test]
    fn max_length_counts_characters() {
        assert!(max_length(&"é".repeat(250), 250).is_ok());
        assert_eq!(
            max_length(&"a".repeat(251), 250),
            Err("250 characters maximum".to_string())
        );
    }

    #[test]
    fn web_url_requires_http_scheme_and_host() {
        assert!(web_url("https://hasjob.co/apply").is_ok());
        assert!(web_url("ftp://hasjob.co").is_err());
        assert!(web_url("hasjob.co/apply").is_err());
    }

    #[test]
    fn extracts_links_from_rich_text() {
        let html = r#"<p><a href="https://hasjob.co">Jobs</a> <img SRC='http://img.example/x.png'> <a href=#top>up</a> <a href=/relative>rel</a></p>"#;
        assert_eq!(
            linked_urls(html),
            ["https://hasjob.co", "http://img.example/x.png", "/relative"]
        );
    }

    #[test]
    fn spaced_attributes_are_still_links() {
        let html = "<a href = \"javascript:alert(1)\">x</a><img\n  src =\thttps://hasjob.co/a.png>";
        assert_eq!(
            linked_urls(html),
            ["javascript:alert(1)", "https://hasjob.co/a.png"]
        );
        assert_eq!(
            all_urls_valid(html),
            ["The URL “javascript:alert(1)” is not valid"]
        );
    }

    #[test]
    fn only_link_attributes_of_tags_are_checked() {
        let html = r#"<img data-src="lazy-1" src="https://hasjob.co/a.png"><p title='see src=x'>set href=here in text</p>"#;
        assert_eq!(linked_urls(html), ["https://hasjob.co/a.png"]);
        assert!(all_urls_valid(html).is_empty());
    }

    #[test]
    fn stray_angle_brackets_and_closing_tags_are_not_tags() {
        let html = r#"<p>1 < 2 and href=nope</p><br/><a class=btn HREF="https://hasjob.co">ok</a>"#;
        assert_eq!(linked_urls(html), ["https://hasjob.co"]);
    }

    #[test]
    fn flags_only_broken_links() {
        let html = r#"<a href="mailto:jobs@hasjob.co">mail</a><a href="not a url">bad</a>"#;
        assert_eq!(all_urls_valid(html), ["The URL “not a url” is not valid"]);
    }
}
