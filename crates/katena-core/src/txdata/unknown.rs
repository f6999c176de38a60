//! Pass-through for payload types this build does not know.

use serde_json::value::RawValue;

/// A `{type, value}` payload with an unregistered tag.
///
/// When decoded from the wire the whole `{type, value}` object is kept as
/// the exact JSON text it was read from, so encoding the payload again
/// reproduces the input byte for byte. Signing always uses the compact
/// form of `value`.
#[derive(Debug, Clone)]
pub struct UnknownTxData {
    type_tag: String,
    value: Box<RawValue>,
    document: Option<Box<RawValue>>,
}

impl UnknownTxData {
    pub fn new(type_tag: impl Into<String>, value: Box<RawValue>) -> Self {
        Self {
            type_tag: type_tag.into(),
            value,
            document: None,
        }
    }

    /// Remember the `{type, value}` text this payload was decoded from.
    pub(crate) fn with_document(mut self, document: Box<RawValue>) -> Self {
        self.document = Some(document);
        self
    }

    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// First dotted segment of the tag.
    pub fn namespace(&self) -> &str {
        self.type_tag
            .split('.')
            .next()
            .unwrap_or(self.type_tag.as_str())
    }

    /// `value` exactly as received.
    pub fn value(&self) -> &RawValue {
        &self.value
    }

    /// `value` with insignificant whitespace removed. Member order, number
    /// spelling and string escapes are left as received.
    pub fn compact_value(&self) -> Result<Box<RawValue>, serde_json::Error> {
        RawValue::from_string(compact_json(self.value.get()))
    }

    /// The full `{type, value}` text, if this payload came off the wire.
    pub fn document(&self) -> Option<&RawValue> {
        self.document.as_deref()
    }
}

impl PartialEq for UnknownTxData {
    fn eq(&self, other: &Self) -> bool {
        self.type_tag == other.type_tag
            && self.value.get() == other.value.get()
            && self.document().map(RawValue::get) == other.document().map(RawValue::get)
    }
}

impl Eq for UnknownTxData {}

/// Strip whitespace outside string literals. `json` must be valid JSON.
fn compact_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in json.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else {
            match c {
                ' ' | '\t' | '\n' | '\r' => {}
                '"' => {
                    in_string = true;
                    out.push(c);
                }
                _ => out.push(c),
            }
        }
    }
    out
}
