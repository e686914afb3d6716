// PurelyHR time-off export (XML) into a PTO dataset

use std::fmt;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use rollcall_recon::model::{columns, Dataset, Record};

const APPROVED: &str = "Approved";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PtoXmlError {
    /// The document did not parse; nothing is returned.
    Malformed(String),
    /// Parsed fine but held no usable approved request.
    NoApprovedRequests,
}

impl fmt::Display for PtoXmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(msg) => write!(f, "PTO XML parsing failed: {msg}"),
            Self::NoApprovedRequests => write!(f, "no approved PTO requests found in XML"),
        }
    }
}

impl std::error::Error for PtoXmlError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Date,
    First,
    Last,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"TimeOffDate" => Some(Self::Date),
            b"Firstname" => Some(Self::First),
            b"Lastname" => Some(Self::Last),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Request {
    status: Option<String>,
    date: Option<String>,
    first: Option<String>,
    last: Option<String>,
}

impl Request {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Date => &mut self.date,
            Field::First => &mut self.first,
            Field::Last => &mut self.last,
        }
    }

    /// Approved and carrying all three values.
    fn into_record(self) -> Option<Record> {
        if self.status.as_deref() != Some(APPROVED) {
            return None;
        }
        let date = self.date.filter(|s| !s.trim().is_empty())?;
        let first = self.first.filter(|s| !s.trim().is_empty())?;
        let last = self.last.filter(|s| !s.trim().is_empty())?;
        Some(
            Record::new()
                .with(columns::FIRST_NAME, first.trim())
                .with(columns::LAST_NAME, last.trim())
                .with(columns::DATE, date.trim())
                .with(columns::STATUS, APPROVED),
        )
    }
}

/// Parse pasted PurelyHR XML.
///
/// Anything before the `<?xml` declaration (page chrome copied along with
/// the source) is dropped. The first `TimeOffDate`/`Firstname`/`Lastname`
/// inside each `<Request>` is used, at any depth.
pub fn parse_pto_xml(input: &str) -> Result<Dataset, PtoXmlError> {
    let mut xml = input.trim();
    if !xml.starts_with("<?xml") {
        if let Some(start) = xml.find("<?xml") {
            xml = &xml[start..];
        }
    }

    // Text is split around entity references; values are trimmed once
    // assembled, never per event.
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut saw_element = false;
    let mut current: Option<Request> = None;
    let mut capture: Option<(Field, usize, String)> = None;
    let mut rows = Dataset::new();
    let mut skipped = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                saw_element = true;
                depth += 1;
                let name = e.local_name();
                if name.as_ref() == b"Request" {
                    if current.is_none() {
                        current = Some(Request { status: status_attr(e), ..Default::default() });
                    }
                } else if capture.is_none() {
                    if let (Some(req), Some(field)) = (current.as_mut(), Field::from_tag(name.as_ref())) {
                        if req.slot(field).is_none() {
                            capture = Some((field, depth, String::new()));
                        }
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                saw_element = true;
                // <Request/> has no children to read
                if e.local_name().as_ref() == b"Request" && current.is_none() {
                    skipped += 1;
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some((_, _, text)) = capture.as_mut() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some((_, _, text)) = capture.as_mut() {
                    text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::GeneralRef(ref e)) => {
                if let Some((_, _, text)) = capture.as_mut() {
                    let name = String::from_utf8_lossy(e).into_owned();
                    let resolved = resolve_entity(&name)
                        .ok_or_else(|| PtoXmlError::Malformed(format!("unknown entity &{name};")))?;
                    text.push(resolved);
                }
            }
            Ok(Event::End(ref e)) => {
                if capture.as_ref().is_some_and(|(_, at, _)| *at == depth) {
                    if let (Some((field, _, text)), Some(req)) = (capture.take(), current.as_mut()) {
                        *req.slot(field) = Some(text);
                    }
                }
                if e.local_name().as_ref() == b"Request" {
                    if let Some(req) = current.take() {
                        match req.into_record() {
                            Some(row) => rows.push(row),
                            None => skipped += 1,
                        }
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(PtoXmlError::Malformed(format!(
                    "at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
        }
        buf.clear();
    }

    if !saw_element {
        return Err(PtoXmlError::Malformed("no XML elements found".to_string()));
    }
    if depth != 0 {
        return Err(PtoXmlError::Malformed("unexpected end of document".to_string()));
    }

    log::debug!("pto xml: {} approved request(s), {} skipped", rows.len(), skipped);
    if rows.is_empty() {
        return Err(PtoXmlError::NoApprovedRequests);
    }
    Ok(rows)
}

fn status_attr(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"Status")
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TimeOffRequests>
  <Request Status="Approved">
    <TimeOffDate>2025-10-09</TimeOffDate>
    <Employee>
      <Firstname> Sam </Firstname>
      <Lastname>Lee</Lastname>
    </Employee>
  </Request>
  <Request Status="Pending">
    <TimeOffDate>2025-10-10</TimeOffDate>
    <Firstname>Jane</Firstname>
    <Lastname>Doe</Lastname>
  </Request>
  <Request Status="Approved">
    <TimeOffDate>2025-10-11</TimeOffDate>
    <Firstname>Ann</Firstname>
  </Request>
  <Request Status="Approved">
    <TimeOffDate>2025-10-12</TimeOffDate>
    <Firstname>Mary</Firstname>
    <Lastname>O&apos;Neil</Lastname>
  </Request>
</TimeOffRequests>"#;

    #[test]
    fn keeps_complete_approved_requests() {
        let rows = parse_pto_xml(EXPORT).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text("First Name"), "Sam");
        assert_eq!(rows[0].text("Last Name"), "Lee");
        assert_eq!(rows[0].text("Date"), "2025-10-09");
        assert_eq!(rows[0].text("Status"), "Approved");
        assert_eq!(rows[1].text("Last Name"), "O'Neil");
    }

    #[test]
    fn leading_page_chrome_is_dropped() {
        let pasted = format!("view-source:https://hr.example/export\n{EXPORT}");
        assert_eq!(parse_pto_xml(&pasted).unwrap().len(), 2);
    }

    #[test]
    fn malformed_returns_no_partial_list() {
        let broken = r#"<?xml version="1.0"?>
<TimeOffRequests>
  <Request Status="Approved">
    <TimeOffDate>2025-10-09</TimeOffDate>
    <Firstname>Sam</Firstname>
    <Lastname>Lee</Lastname>
  </Request>
  <Request Status="Approved">
    <Firstname>Jane</Lastname>
"#;
        assert!(matches!(parse_pto_xml(broken), Err(PtoXmlError::Malformed(_))));
    }

    #[test]
    fn unclosed_document_is_malformed() {
        let truncated = r#"<?xml version="1.0"?><TimeOffRequests><Request Status="Approved">"#;
        assert!(matches!(parse_pto_xml(truncated), Err(PtoXmlError::Malformed(_))));
    }

    #[test]
    fn plain_text_is_malformed() {
        assert!(matches!(parse_pto_xml("no export here"), Err(PtoXmlError::Malformed(_))));
    }

    #[test]
    fn nothing_approved_is_reported() {
        let xml = r#"<?xml version="1.0"?>
<TimeOffRequests>
  <Request Status="Denied">
    <TimeOffDate>2025-10-09</TimeOffDate>
    <Firstname>Sam</Firstname>
    <Lastname>Lee</Lastname>
  </Request>
</TimeOffRequests>"#;
        assert_eq!(parse_pto_xml(xml), Err(PtoXmlError::NoApprovedRequests));
    }

    #[test]
    fn entity_keeps_surrounding_spaces() {
        let xml = r#"<?xml version="1.0"?>
<TimeOffRequests>
  <Request Status="Approved">
    <TimeOffDate>2025-10-09</TimeOffDate>
    <Firstname>Mary &amp; Jo</Firstname>
    <Lastname> Smith </Lastname>
  </Request>
</TimeOffRequests>"#;
        let rows = parse_pto_xml(xml).unwrap();
        assert_eq!(rows[0].text("First Name"), "Mary & Jo");
        assert_eq!(rows[0].text("Last Name"), "Smith");
    }

    #[test]
    fn entities_resolve() {
        assert_eq!(resolve_entity("amp"), Some('&'));
        assert_eq!(resolve_entity("#233"), Some('é'));
        assert_eq!(resolve_entity("#xE9"), Some('é'));
        assert_eq!(resolve_entity("nbsp"), None);
    }
}
