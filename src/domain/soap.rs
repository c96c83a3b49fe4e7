/// An argument value of a SOAP operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SoapValue {
    /// Serialized as `xsd:string`.
    Text(String),
    /// Serialized as `xsd:long`.
    Long(i64),
}

/// 一次 SOAP 操作請求：命名空間、操作名稱與依序排列的參數
#[derive(Debug, Clone, PartialEq)]
pub struct SoapRequest {
    pub namespace: String,
    pub operation: String,
    pub params: Vec<(String, SoapValue)>,
}

impl SoapRequest {
    pub fn new(namespace: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            operation: operation.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: SoapValue) -> Self {
        self.params.push((name.into(), value));
        self
    }
}

/// An element of a SOAP response, matched by local name.
///
/// Child elements are kept in document order as `properties`. Leaf elements
/// carry their unescaped text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoapObject {
    pub name: String,
    pub text: String,
    pub properties: Vec<SoapObject>,
}

impl SoapObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, property: SoapObject) -> Self {
        self.properties.push(property);
        self
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// First property with the given name.
    pub fn property(&self, name: &str) -> Option<&SoapObject> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Text of the named property, or an empty string when it is absent.
    pub fn property_as_string(&self, name: &str) -> String {
        self.property(name)
            .map(|p| p.text.clone())
            .unwrap_or_default()
    }

    /// 具有子元素，或完全沒有內容的元素，都視為結構化紀錄
    pub fn is_record(&self) -> bool {
        !self.properties.is_empty() || self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_lookup() {
        let record = SoapObject::new("return")
            .with_property(SoapObject::leaf("id", "7"))
            .with_property(SoapObject::leaf("solde", "120.5"));

        assert_eq!(record.property_count(), 2);
        assert!(record.has_property("id"));
        assert!(!record.has_property("type"));
        assert_eq!(record.property_as_string("solde"), "120.5");
        assert_eq!(record.property_as_string("type"), "");
    }

    #[test]
    fn test_is_record() {
        assert!(SoapObject::new("return").is_record());
        assert!(SoapObject::new("return")
            .with_property(SoapObject::leaf("id", "1"))
            .is_record());
        assert!(!SoapObject::leaf("return", "plain text").is_record());
    }

    #[test]
    fn test_request_builder_keeps_param_order() {
        let request = SoapRequest::new("http://ws.demo.example.com", "createCompte")
            .with_param("solde", SoapValue::Text("1.0".to_string()))
            .with_param("type", SoapValue::Text("SAVINGS".to_string()));

        let names: Vec<&str> = request.params.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["solde", "type"]);
    }
}
