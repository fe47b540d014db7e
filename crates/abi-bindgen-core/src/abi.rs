//! Read-only views over an interface description.
//!
//! The collector never rewrites an ABI; these helpers only look at one for
//! listings.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbiItemKind {
    Function,
    Event,
    Error,
    Constructor,
    Fallback,
    Receive,
    Unknown,
}

impl AbiItemKind {
    /// Entries without a `type` are functions.
    pub fn of(item: &Value) -> Self {
        match item.get("type").and_then(Value::as_str) {
            None | Some("function") => AbiItemKind::Function,
            Some("event") => AbiItemKind::Event,
            Some("error") => AbiItemKind::Error,
            Some("constructor") => AbiItemKind::Constructor,
            Some("fallback") => AbiItemKind::Fallback,
            Some("receive") => AbiItemKind::Receive,
            Some(_) => AbiItemKind::Unknown,
        }
    }
}

impl fmt::Display for AbiItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbiItemKind::Function => "function",
            AbiItemKind::Event => "event",
            AbiItemKind::Error => "error",
            AbiItemKind::Constructor => "constructor",
            AbiItemKind::Fallback => "fallback",
            AbiItemKind::Receive => "receive",
            AbiItemKind::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Entry counts of one interface description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AbiSummary {
    pub functions: usize,
    pub events: usize,
    pub errors: usize,
    pub has_constructor: bool,
    pub has_fallback: bool,
    pub has_receive: bool,
    pub unknown: usize,
}

impl AbiSummary {
    pub fn from_abi(abi: &Value) -> Self {
        let mut summary = Self::default();
        for item in abi.as_array().into_iter().flatten() {
            match AbiItemKind::of(item) {
                AbiItemKind::Function => summary.functions += 1,
                AbiItemKind::Event => summary.events += 1,
                AbiItemKind::Error => summary.errors += 1,
                AbiItemKind::Constructor => summary.has_constructor = true,
                AbiItemKind::Fallback => summary.has_fallback = true,
                AbiItemKind::Receive => summary.has_receive = true,
                AbiItemKind::Unknown => summary.unknown += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.functions
            + self.events
            + self.errors
            + usize::from(self.has_constructor)
            + usize::from(self.has_fallback)
            + usize::from(self.has_receive)
            + self.unknown
    }
}

impl fmt::Display for AbiSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} functions, {} events, {} errors",
            self.functions, self.events, self.errors
        )
    }
}

/// Canonical signatures of the named entries, e.g. `function transfer(address,uint256)`.
pub fn signatures(abi: &Value) -> Vec<String> {
    abi.as_array()
        .into_iter()
        .flatten()
        .filter_map(|item| {
            let kind = AbiItemKind::of(item);
            if !matches!(
                kind,
                AbiItemKind::Function | AbiItemKind::Event | AbiItemKind::Error
            ) {
                return None;
            }
            let name = item.get("name")?.as_str()?;
            let params = param_types(item.get("inputs"));
            Some(format!("{} {}({})", kind, name, params.join(",")))
        })
        .collect()
}

fn param_types(params: Option<&Value>) -> Vec<String> {
    params
        .and_then(Value::as_array)
        .map(|list| list.iter().map(canonical_type).collect())
        .unwrap_or_default()
}

// Tuples are spelled out from their components; array suffixes carry over.
fn canonical_type(param: &Value) -> String {
    let ty = param.get("type").and_then(Value::as_str).unwrap_or("");
    match ty.strip_prefix("tuple") {
        Some(suffix) => format!(
            "({}){}",
            param_types(param.get("components")).join(","),
            suffix
        ),
        None => ty.to_string(),
    }
}
