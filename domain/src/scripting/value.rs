//! Host-side dynamic values.
//!
//! [`HostValue`] is the host half of the scripting boundary. Guest values are
//! converted into it on the way out of the VM and converted back on the way
//! in; the Lua representation lives entirely in the infrastructure layer.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::core::error::ScriptError;

/// Host-side map, keyed by stringified guest keys.
pub type HostMap = BTreeMap<String, HostValue>;

type HostFn = dyn Fn(Vec<HostValue>) -> Result<HostValue, ScriptError> + Send + Sync;

/// A named host function that guest code (or the host) can invoke.
///
/// Cloning is cheap; clones share the same underlying function.
#[derive(Clone)]
pub struct HostCallable {
    name: Arc<str>,
    func: Arc<HostFn>,
}

impl HostCallable {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Vec<HostValue>) -> Result<HostValue, ScriptError> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: Vec<HostValue>) -> Result<HostValue, ScriptError> {
        (self.func)(args)
    }
}

impl fmt::Debug for HostCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostCallable({})", self.name)
    }
}

/// Two callables are equal only when they share the same function.
impl PartialEq for HostCallable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

/// A dynamically typed host value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    #[default]
    Absent,
    Boolean(bool),
    Number(f64),
    String(String),
    Sequence(Vec<HostValue>),
    Map(HostMap),
    Callable(HostCallable),
}

impl HostValue {
    /// Short type name used in diagnostics (`"number"`, `"map"`, ...)
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Map(_) => "map",
            Self::Callable(_) => "callable",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HostMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&HostCallable> {
        match self {
            Self::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Guest truthiness: only absent and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Absent | Self::Boolean(false))
    }
}

/// Format a number the way guest code prints it: integral values carry no
/// fractional part, everything else follows C's `%.14g`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n == f64::INFINITY {
        "inf".to_string()
    } else if n == f64::NEG_INFINITY {
        "-inf".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        (n as i64).to_string()
    } else {
        format_general(n)
    }
}

fn format_general(n: f64) -> String {
    let scientific = format!("{:.13e}", n);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..14).contains(&exponent) {
        let precision = (13 - exponent) as usize;
        trim_fraction(&format!("{:.*}", precision, n)).to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Map entries in display order: integer-like keys first, numerically,
/// then the rest in key order.
fn display_order(map: &HostMap) -> Vec<(&String, &HostValue)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| key_rank(a).cmp(&key_rank(b)));
    entries
}

fn key_rank(key: &str) -> (u8, i64, &str) {
    match key.parse::<i64>() {
        Ok(index) => (0, index, ""),
        Err(_) => (1, 0, key),
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "nil"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::String(s) => write!(f, "{}", s),
            Self::Sequence(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "}}")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in display_order(map).into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                write!(f, "}}")
            }
            Self::Callable(c) => write!(f, "function: {}", c.name()),
        }
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for HostValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for HostValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(items: Vec<HostValue>) -> Self {
        Self::Sequence(items)
    }
}

impl From<HostMap> for HostValue {
    fn from(map: HostMap) -> Self {
        Self::Map(map)
    }
}

impl From<HostCallable> for HostValue {
    fn from(c: HostCallable) -> Self {
        Self::Callable(c)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Absent)
    }
}
