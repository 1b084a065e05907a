use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ScopedName identifies a declaration: a module name plus a local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String", into = "String")]
pub struct ScopedName {
    pub module_name: String,
    pub name: String,
}

impl ScopedName {
    pub fn new(module_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            name: name.into(),
        }
    }

    /// Parse a scoped name from its canonical dotted form: `module.path.Name`.
    ///
    /// The final segment is the local name; everything before it is the
    /// module name. A bare name parses with an empty module name.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        match s.rfind('.') {
            Some(pos) => {
                let (module_name, name) = (&s[..pos], &s[pos + 1..]);
                if module_name.is_empty() || name.is_empty() {
                    return None;
                }
                Some(Self::new(module_name, name))
            }
            None => Some(Self::new("", s)),
        }
    }
}

impl fmt::Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module_name.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.module_name, self.name)
        }
    }
}

impl From<ScopedName> for String {
    fn from(sn: ScopedName) -> String {
        sn.to_string()
    }
}

impl TryFrom<String> for ScopedName {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        ScopedName::parse(&s).ok_or_else(|| format!("invalid scoped name: {:?}", s))
    }
}
