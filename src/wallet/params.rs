//! Request parameters and the falsy filter.
//!
//! # Responsibilities
//! - Hold an ordered list of form fields for one request
//! - Decide which values are "unset" and must not be transmitted
//! - Render values into their form-encoded text
//!
//! # Design Decisions
//! - Insertion order is kept so the wire body is stable
//! - Filtering is a single named step applied to every request, never per operation
//! - The remote API tells "absent" apart from "present with default", so the
//!   falsy set is exact: `""`, `"0"`, `0`, `0.0`, `false` and null

/// A single scalar form value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl ParamValue {
    /// Returns true when the value counts as unset and is dropped before sending.
    pub fn is_falsy(&self) -> bool {
        match self {
            ParamValue::Str(s) => s.is_empty() || s == "0",
            ParamValue::Int(i) => *i == 0,
            ParamValue::Float(f) => *f == 0.0,
            ParamValue::Bool(b) => !b,
            ParamValue::Null => true,
        }
    }

    /// Form text for this value. `None` for null.
    pub fn to_form_value(&self) -> Option<String> {
        match self {
            ParamValue::Str(s) => Some(s.clone()),
            ParamValue::Int(i) => Some(i.to_string()),
            ParamValue::Float(f) => Some(f.to_string()),
            ParamValue::Bool(true) => Some("1".to_string()),
            ParamValue::Bool(false) => Some(String::new()),
            ParamValue::Null => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<&String> for ParamValue {
    fn from(v: &String) -> Self {
        ParamValue::Str(v.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        // Values past i64::MAX are not meaningful to the API; keep the text exact anyway.
        i64::try_from(v)
            .map(ParamValue::Int)
            .unwrap_or_else(|_| ParamValue::Str(v.to_string()))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ParamValue::Null, Into::into)
    }
}

/// Ordered form fields for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field. An existing field of the same name is removed first, so
    /// the new value lands at the end.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        self.entries.retain(|(k, _)| *k != name);
        self.entries.push((name, value.into()));
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Drop every falsy field.
    pub fn retain_truthy(&mut self) {
        self.entries.retain(|(_, v)| !v.is_falsy());
    }

    /// Field names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs ready for `application/x-www-form-urlencoded` encoding. Null fields are skipped.
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.to_form_value().map(|text| (k.clone(), text)))
            .collect()
    }
}
