//! Attribute values carried by schema objects

use crate::structure::DatabaseObject;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A numeric attribute in whatever width the snapshot source produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    UInt(u64),
    Float(f64),
    Decimal(Decimal),
}

impl Numeric {
    /// Normalize to an arbitrary-precision decimal
    ///
    /// Returns `None` for non-finite floats.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Int(v) => Some(Decimal::from(*v)),
            Self::UInt(v) => Some(Decimal::from(*v)),
            Self::Float(v) => Decimal::from_f64_retain(*v),
            Self::Decimal(d) => Some(*d),
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::UInt(v) => *v as f64,
            Self::Float(v) => *v,
            Self::Decimal(d) => d.to_string().parse().unwrap_or(f64::NAN),
        }
    }

    /// Compare by value, so `1`, `1.0` and `1u64` are all equal
    pub fn numerically_equal(&self, other: &Numeric) -> bool {
        match (self.to_decimal(), other.to_decimal()) {
            (Some(a), Some(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Decimal(d) => write!(f, "{}", d),
        }
    }
}

/// A column data type as reported by the database
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    /// Bare type name, e.g. `varchar`
    pub type_name: String,

    /// Length or precision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_size: Option<u32>,

    /// Scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_digits: Option<u32>,
}

fn data_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([^()]+?)\s*\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\)\s*$")
            .expect("data type pattern is valid")
    })
}

impl DataType {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            column_size: None,
            decimal_digits: None,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.column_size = Some(size);
        self
    }

    pub fn with_digits(mut self, digits: u32) -> Self {
        self.decimal_digits = Some(digits);
        self
    }

    /// Parse a rendered type such as `numeric(10, 2)`
    ///
    /// Anything that doesn't look parameterized is kept whole as the type name.
    pub fn parse(rendered: &str) -> Self {
        match data_type_pattern().captures(rendered) {
            Some(caps) => Self {
                type_name: caps[1].to_string(),
                column_size: caps.get(2).and_then(|m| m.as_str().parse().ok()),
                decimal_digits: caps.get(3).and_then(|m| m.as_str().parse().ok()),
            },
            None => Self::new(rendered.trim()),
        }
    }

    /// Whether the rendered form carries parameters in parentheses
    pub fn has_parameters(&self) -> bool {
        self.column_size.is_some()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.column_size, self.decimal_digits) {
            (Some(size), Some(digits)) => write!(f, "{}({},{})", self.type_name, size, digits),
            (Some(size), None) => write!(f, "{}({})", self.type_name, size),
            _ => write!(f, "{}", self.type_name),
        }
    }
}

/// Sequence metadata of an auto-increment column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AutoIncrementInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_with: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment_by: Option<i64>,
}

impl fmt::Display for AutoIncrementInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AUTO INCREMENT")?;
        if let Some(start) = self.start_with {
            write!(f, " START WITH {}", start)?;
        }
        if let Some(increment) = self.increment_by {
            write!(f, " INCREMENT BY {}", increment)?;
        }
        Ok(())
    }
}

/// The value of one attribute of a schema object
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Bool(bool),
    Number(Numeric),
    DataType(DataType),
    AutoIncrement(AutoIncrementInfo),
    Object(DatabaseObject),
    List(Vec<AttrValue>),
}

impl AttrValue {
    /// Short type label used in contract-violation messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::DataType(_) => "dataType",
            Self::AutoIncrement(_) => "autoIncrement",
            Self::Object(_) => "object",
            Self::List(_) => "list",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DatabaseObject> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether both values hold the same variant
    pub fn same_variant(&self, other: &AttrValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Build a list value from objects
    pub fn objects<I>(objects: I) -> Self
    where
        I: IntoIterator<Item = DatabaseObject>,
    {
        Self::List(objects.into_iter().map(AttrValue::Object).collect())
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::DataType(t) => write!(f, "{}", t),
            Self::AutoIncrement(info) => write!(f, "{}", info),
            Self::Object(o) => write!(f, "{}", o),
            Self::List(items) => {
                let rendered: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "{}", rendered.join(", "))
            }
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Number(Numeric::Int(v))
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Number(Numeric::Float(v))
    }
}

impl From<Decimal> for AttrValue {
    fn from(d: Decimal) -> Self {
        Self::Number(Numeric::Decimal(d))
    }
}

impl From<DataType> for AttrValue {
    fn from(t: DataType) -> Self {
        Self::DataType(t)
    }
}

impl From<DatabaseObject> for AttrValue {
    fn from(o: DatabaseObject) -> Self {
        Self::Object(o)
    }
}

impl From<serde_json::Value> for AttrValue {
    /// JSON nulls become empty text; callers filter them out beforehand
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Text(String::new()),
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Number(Numeric::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Self::Number(Numeric::UInt(u))
                } else {
                    Self::Number(Numeric::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(AttrValue::from).collect())
            }
            other @ serde_json::Value::Object(_) => Self::Text(other.to_string()),
        }
    }
}
