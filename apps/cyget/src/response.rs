//! XML response files
//!
//! ```xml
//! <packages>
//!   <package name="bash"/>
//!   <package name="gcc-core" spec="prev"/>
//! </packages>
//! ```

use cyget_errors::{Error, RequestError};
use cyget_resolver::Request;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// Read the package requests listed in a response file
///
/// Only `<package>` elements directly under the root element count.
///
/// # Errors
///
/// Returns [`RequestError::InvalidResponseFile`] if the file cannot be read,
/// is not well-formed XML, or has a `<package>` without a `name`.
pub async fn load(path: &Path) -> Result<Vec<Request>, Error> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| invalid(path, &e.to_string()))?;
    parse(&text).map_err(|message| invalid(path, &message))
}

fn invalid(path: &Path, message: &str) -> Error {
    RequestError::InvalidResponseFile {
        path: path.display().to_string(),
        message: message.to_string(),
    }
    .into()
}

fn parse(text: &str) -> Result<Vec<Request>, String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut requests = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(element) => {
                if depth == 1 && element.name().as_ref() == b"package" {
                    requests.push(package(&element)?);
                }
                saw_root = true;
                depth += 1;
            }
            Event::Empty(element) => {
                if depth == 1 && element.name().as_ref() == b"package" {
                    requests.push(package(&element)?);
                }
                saw_root = true;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err("no root element found".to_string());
    }
    if depth != 0 {
        return Err("unexpected end of file inside an element".to_string());
    }
    Ok(requests)
}

fn package(element: &BytesStart<'_>) -> Result<Request, String> {
    let mut name = None;
    let mut spec = None;

    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        let value = attribute
            .unescape_value()
            .map_err(|e| e.to_string())?
            .into_owned();
        match attribute.key.as_ref() {
            b"name" => name = Some(value),
            b"spec" => spec = Some(value),
            _ => {}
        }
    }

    let name = name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| "<package> element without a 'name' attribute".to_string())?;
    Ok(Request { name, spec })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_packages() {
        let requests = parse(
            r#"<?xml version="1.0"?>
            <packages>
              <package name="bash"/>
              <package name="gcc-core" spec="prev"></package>
              <group><package name="nested"/></group>
            </packages>"#,
        )
        .unwrap();

        assert_eq!(
            requests,
            vec![Request::new("bash"), Request::with_spec("gcc-core", "prev")]
        );
    }

    #[test]
    fn test_category_token() {
        let requests = parse(r#"<packages><package name="@Base"/></packages>"#).unwrap();
        assert_eq!(requests[0].category(), Some("Base"));
    }

    #[test]
    fn test_missing_name() {
        assert!(parse(r#"<packages><package spec="test"/></packages>"#).is_err());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(parse("<packages><package name=\"a\"></packages>").is_err());
        assert!(parse("").is_err());
        assert!(parse("<packages>").is_err());
    }

    #[tokio::test]
    async fn test_unreadable_file() {
        let err = load(Path::new("/nonexistent/response.xml")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Request(RequestError::InvalidResponseFile { .. })
        ));
    }
}
