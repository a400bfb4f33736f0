//! `awsQuery` XML response and error formatting.

use std::io;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use ruststack_iam_model::action::IamAction;
use ruststack_iam_model::error::IamError;

use crate::body::IamResponseBody;
use crate::operation::IamResponse;

/// The IAM XML namespace.
pub const IAM_XMLNS: &str = "https://iam.amazonaws.com/doc/2010-05-08/";

/// Content type for IAM XML responses.
pub const CONTENT_TYPE: &str = "text/xml";

/// Format an IAM error document.
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <ErrorResponse xmlns="https://iam.amazonaws.com/doc/2010-05-08/">
///   <Error>
///     <Type>Sender</Type>
///     <Code>InvalidAction</Code>
///     <Message>Could not find operation Foo for version 2010-05-08</Message>
///   </Error>
///   <RequestId>4fbd1d24-...</RequestId>
/// </ErrorResponse>
/// ```
#[must_use]
pub fn error_to_xml(error: &IamError, request_id: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(256);
    if let Err(e) = write_error_xml(&mut buf, error, request_id) {
        tracing::error!(error = %e, "failed to serialize IAM error XML");
        buf.clear();
    }
    buf
}

fn write_error_xml(buf: &mut Vec<u8>, error: &IamError, request_id: &str) -> io::Result<()> {
    let mut writer = Writer::new(buf);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("ErrorResponse")
        .with_attribute(("xmlns", IAM_XMLNS))
        .write_inner_content(|w| {
            w.create_element("Error").write_inner_content(|e| {
                e.create_element("Type")
                    .write_text_content(BytesText::new(error.code.fault()))?;
                e.create_element("Code")
                    .write_text_content(BytesText::new(error.code.as_str()))?;
                e.create_element("Message")
                    .write_text_content(BytesText::new(&error.message))?;
                Ok(())
            })?;
            w.create_element("RequestId")
                .write_text_content(BytesText::new(request_id))?;
            Ok(())
        })?;

    Ok(())
}

/// Format a success document for `action`.
#[must_use]
pub fn success_to_xml(action: IamAction, response: &IamResponse, request_id: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(512);
    if let Err(e) = write_success_xml(&mut buf, action, response, request_id) {
        tracing::error!(error = %e, %action, "failed to serialize IAM response XML");
        buf.clear();
    }
    buf
}

fn write_success_xml(
    buf: &mut Vec<u8>,
    action: IamAction,
    response: &IamResponse,
    request_id: &str,
) -> io::Result<()> {
    let mut writer = Writer::new(buf);
    let root = format!("{action}Response");
    let result = format!("{action}Result");

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element(root.as_str())
        .with_attribute(("xmlns", IAM_XMLNS))
        .write_inner_content(|w| {
            if let Some(xml) = response.result.as_deref() {
                w.create_element(result.as_str()).write_inner_content(|r| {
                    r.write_event(Event::Text(BytesText::from_escaped(xml)))?;
                    Ok(())
                })?;
            }
            w.create_element("ResponseMetadata").write_inner_content(|m| {
                m.create_element("RequestId")
                    .write_text_content(BytesText::new(request_id))?;
                Ok(())
            })?;
            Ok(())
        })?;

    Ok(())
}

/// Convert an `IamError` into a complete HTTP error response.
#[must_use]
pub fn error_to_response(error: &IamError, request_id: &str) -> http::Response<IamResponseBody> {
    http::Response::builder()
        .status(error.status_code)
        .header("content-type", CONTENT_TYPE)
        .header("x-amzn-requestid", request_id)
        .body(IamResponseBody::from_bytes(error_to_xml(error, request_id)))
        .expect("valid error response")
}

/// Build a success response for `action`.
#[must_use]
pub fn xml_response(
    action: IamAction,
    response: &IamResponse,
    request_id: &str,
) -> http::Response<IamResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("content-type", CONTENT_TYPE)
        .header("x-amzn-requestid", request_id)
        .body(IamResponseBody::from_bytes(success_to_xml(
            action, response, request_id,
        )))
        .expect("valid XML response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_format_error_xml() {
        let xml = error_to_xml(&IamError::invalid_action("Foo"), "req-1");
        let xml = std::str::from_utf8(&xml).expect("valid UTF-8");

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(
            "<ErrorResponse xmlns=\"https://iam.amazonaws.com/doc/2010-05-08/\">"
        ));
        assert!(xml.contains("<Type>Sender</Type>"));
        assert!(xml.contains("<Code>InvalidAction</Code>"));
        assert!(xml.contains("<Message>Could not find operation Foo for version 2010-05-08</Message>"));
        assert!(xml.contains("<RequestId>req-1</RequestId>"));
    }

    #[test]
    fn test_should_escape_error_message() {
        let err = IamError::validation("name <admin> & co");
        let xml = error_to_xml(&err, "req-2");
        let xml = std::str::from_utf8(&xml).expect("valid UTF-8");
        assert!(xml.contains("name &lt;admin&gt; &amp; co"));
    }

    #[test]
    fn test_should_wrap_result_in_action_elements() {
        let response = IamResponse::with_result("<Role><RoleName>admin</RoleName></Role>");
        let xml = success_to_xml(IamAction::GetRole, &response, "req-3");
        let xml = std::str::from_utf8(&xml).expect("valid UTF-8");

        assert!(xml.contains("<GetRoleResponse xmlns=\"https://iam.amazonaws.com/doc/2010-05-08/\">"));
        assert!(xml.contains(
            "<GetRoleResult><Role><RoleName>admin</RoleName></Role></GetRoleResult>"
        ));
        assert!(xml.contains("<ResponseMetadata><RequestId>req-3</RequestId></ResponseMetadata>"));
        assert!(xml.ends_with("</GetRoleResponse>"));
    }

    #[test]
    fn test_should_omit_empty_result() {
        let xml = success_to_xml(IamAction::DeleteRole, &IamResponse::empty(), "req-4");
        let xml = std::str::from_utf8(&xml).expect("valid UTF-8");
        assert!(!xml.contains("DeleteRoleResult"));
        assert!(xml.contains("<DeleteRoleResponse"));
    }

    #[test]
    fn test_should_build_error_response_with_status() {
        let resp = error_to_response(&IamError::missing_action(), "req-5");
        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers().get("content-type").unwrap(), CONTENT_TYPE);
        assert_eq!(resp.headers().get("x-amzn-requestid").unwrap(), "req-5");
    }
}
