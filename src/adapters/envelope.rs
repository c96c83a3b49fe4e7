//! SOAP 1.1 envelope encoding and decoding.
//!
//! Requests follow the layout of a ksoap2 serialization envelope with
//! `dotNet = false`: typed arguments without a namespace, wrapped in a
//! namespaced operation element.

use crate::domain::soap::{SoapObject, SoapRequest, SoapValue};
use crate::utils::error::{ClientError, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SOAP_ENC_NS: &str = "http://schemas.xmlsoap.org/soap/encoding/";
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// 將請求序列化為 SOAP 1.1 XML
pub fn encode_request(request: &SoapRequest) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    let mut envelope = BytesStart::new("v:Envelope");
    envelope.push_attribute(("xmlns:i", XSI_NS));
    envelope.push_attribute(("xmlns:d", XSD_NS));
    envelope.push_attribute(("xmlns:c", SOAP_ENC_NS));
    envelope.push_attribute(("xmlns:v", SOAP_ENV_NS));
    writer.write_event(Event::Start(envelope))?;
    writer.write_event(Event::Empty(BytesStart::new("v:Header")))?;
    writer.write_event(Event::Start(BytesStart::new("v:Body")))?;

    let operation = format!("n0:{}", request.operation);
    let mut op = BytesStart::new(operation.as_str());
    op.push_attribute(("xmlns:n0", request.namespace.as_str()));
    writer.write_event(Event::Start(op))?;

    for (name, value) in &request.params {
        let (xsi_type, text) = match value {
            SoapValue::Text(s) => ("d:string", s.clone()),
            SoapValue::Long(n) => ("d:long", n.to_string()),
        };
        let mut param = BytesStart::new(name.as_str());
        param.push_attribute(("i:type", xsi_type));
        writer.write_event(Event::Start(param))?;
        writer.write_event(Event::Text(BytesText::new(&text)))?;
        writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    }

    writer.write_event(Event::End(BytesEnd::new(operation.as_str())))?;
    writer.write_event(Event::End(BytesEnd::new("v:Body")))?;
    writer.write_event(Event::End(BytesEnd::new("v:Envelope")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| ClientError::MalformedEnvelope {
        message: format!("request is not valid UTF-8: {}", e),
    })
}

/// Parses a response envelope and returns the first element inside `Body`.
///
/// A `Fault` element in the body is returned as [`ClientError::SoapFault`].
pub fn decode_response(xml: &str) -> Result<SoapObject> {
    let envelope = parse_tree(xml)?;
    if envelope.name != "Envelope" {
        return Err(malformed(format!(
            "expected Envelope root, found <{}>",
            envelope.name
        )));
    }

    let body = envelope
        .properties
        .into_iter()
        .find(|p| p.name == "Body")
        .ok_or_else(|| malformed("missing Body element".to_string()))?;

    let content = body
        .properties
        .into_iter()
        .next()
        .ok_or_else(|| malformed("empty Body element".to_string()))?;

    if content.name == "Fault" {
        return Err(ClientError::SoapFault {
            code: content.property_as_string("faultcode"),
            message: content.property_as_string("faultstring"),
        });
    }

    Ok(content)
}

/// 以 local name 建立元素樹（忽略命名空間前綴與屬性）
fn parse_tree(xml: &str) -> Result<SoapObject> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<SoapObject> = Vec::new();
    let mut root: Option<SoapObject> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(SoapObject::new(local_name(&e))),
            Event::Empty(e) => attach(&mut stack, &mut root, SoapObject::new(local_name(&e)))?,
            Event::Text(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.unescape().map_err(quick_xml::Error::from)?);
                }
            }
            Event::CData(e) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| malformed("unbalanced closing tag".to_string()))?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed(format!(
            "document ended inside <{}>",
            stack.last().map(|n| n.name.as_str()).unwrap_or_default()
        )));
    }

    root.ok_or_else(|| malformed("empty document".to_string()))
}

fn attach(stack: &mut [SoapObject], root: &mut Option<SoapObject>, node: SoapObject) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.properties.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(malformed(format!("second root element <{}>", node.name)));
    }
    *root = Some(node);
    Ok(())
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn malformed(message: String) -> ClientError {
    ClientError::MalformedEnvelope { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://ws.demo.example.com";

    #[test]
    fn test_encode_request_without_params() {
        let xml = encode_request(&SoapRequest::new(NS, "getComptes")).unwrap();

        assert!(xml.starts_with("<v:Envelope "));
        assert!(xml.contains(r#"xmlns:v="http://schemas.xmlsoap.org/soap/envelope/""#));
        assert!(xml.contains("<v:Header/>"));
        assert!(xml.contains(r#"<n0:getComptes xmlns:n0="http://ws.demo.example.com"></n0:getComptes>"#));
        assert!(xml.ends_with("</v:Body></v:Envelope>"));
    }

    #[test]
    fn test_encode_request_typed_params() {
        let request = SoapRequest::new(NS, "createCompte")
            .with_param("solde", SoapValue::Text("120.5".to_string()))
            .with_param("type", SoapValue::Text("SAVINGS".to_string()));
        let xml = encode_request(&request).unwrap();

        assert!(xml.contains(r#"<solde i:type="d:string">120.5</solde><type i:type="d:string">SAVINGS</type>"#));

        let delete = SoapRequest::new(NS, "deleteCompte").with_param("id", SoapValue::Long(42));
        let xml = encode_request(&delete).unwrap();
        assert!(xml.contains(r#"<id i:type="d:long">42</id>"#));
    }

    #[test]
    fn test_encode_request_escapes_text() {
        let request =
            SoapRequest::new(NS, "createCompte").with_param("type", SoapValue::Text("A<B&C".to_string()));
        let xml = encode_request(&request).unwrap();
        assert!(xml.contains("A&lt;B&amp;C"));
    }

    #[test]
    fn test_decode_response_returns_body_content() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns2:getComptesResponse xmlns:ns2="http://ws.demo.example.com">
      <return>
        <id>1</id>
        <solde>250.75</solde>
        <dateCreation>2024-02-01T09:30:00+01:00</dateCreation>
        <type>CHECKING</type>
      </return>
      <return>
        <id>2</id>
        <type/>
      </return>
    </ns2:getComptesResponse>
  </soap:Body>
</soap:Envelope>"#;

        let body = decode_response(xml).unwrap();

        assert_eq!(body.name, "getComptesResponse");
        assert_eq!(body.property_count(), 2);
        let first = &body.properties[0];
        assert_eq!(first.property_as_string("solde"), "250.75");
        assert_eq!(first.property_as_string("dateCreation"), "2024-02-01T09:30:00+01:00");
        let second = &body.properties[1];
        assert!(second.has_property("type"));
        assert_eq!(second.property_as_string("type"), "");
        assert!(!second.has_property("solde"));
    }

    #[test]
    fn test_decode_response_unescapes_text() {
        let xml = r#"<Envelope><Body><r><v>a &amp; b</v><w><![CDATA[x<y]]></w></r></Body></Envelope>"#;
        let body = decode_response(xml).unwrap();
        assert_eq!(body.property_as_string("v"), "a & b");
        assert_eq!(body.property_as_string("w"), "x<y");
    }

    #[test]
    fn test_decode_response_fault() {
        let xml = r#"<S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/">
  <S:Body>
    <S:Fault>
      <faultcode>S:Server</faultcode>
      <faultstring>Compte introuvable</faultstring>
    </S:Fault>
  </S:Body>
</S:Envelope>"#;

        match decode_response(xml) {
            Err(ClientError::SoapFault { code, message }) => {
                assert_eq!(code, "S:Server");
                assert_eq!(message, "Compte introuvable");
            }
            other => panic!("expected SoapFault, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_response_malformed() {
        assert!(matches!(
            decode_response("<Envelope><Header/></Envelope>"),
            Err(ClientError::MalformedEnvelope { .. })
        ));
        assert!(matches!(
            decode_response("<Envelope><Body></Body></Envelope>"),
            Err(ClientError::MalformedEnvelope { .. })
        ));
        assert!(matches!(
            decode_response("<html><body>502 Bad Gateway</body></html>"),
            Err(ClientError::MalformedEnvelope { .. })
        ));
        assert!(decode_response("<Envelope><Body><r>").is_err());
        assert!(decode_response("").is_err());
    }
}
