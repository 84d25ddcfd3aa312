use std::{
    fmt::{self, Display},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// One value of the two-element boolean domain.
///
/// `TruthValue` is used both as a truth-table cell value and as a variable
/// assignment. The ordering places [`False`] before [`True`], which is also
/// the order in which slot domains and table rows are enumerated.
///
/// [`False`]: TruthValue::False
/// [`True`]: TruthValue::True
pub enum TruthValue {
    False,
    True,
}

impl TruthValue {
    const fn variants<'a>() -> &'a [Self] {
        &[Self::False, Self::True]
    }

    fn matches(&self, s: &str) -> bool {
        match self {
            Self::False => matches!(s, "F" | "f" | "false" | "False" | "0"),
            Self::True => matches!(s, "T" | "t" | "true" | "True" | "1"),
        }
    }

    pub fn is_true(self) -> bool {
        self == Self::True
    }

    pub fn is_false(self) -> bool {
        self == Self::False
    }
}

impl From<bool> for TruthValue {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl From<TruthValue> for bool {
    fn from(value: TruthValue) -> Self {
        value == TruthValue::True
    }
}

impl Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::False => "F",
            Self::True => "T",
        })
    }
}

impl FromStr for TruthValue {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .find(|variant| variant.matches(s))
            .ok_or_else(|| anyhow::anyhow!("cannot parse {s} as truth value"))
            .copied()
    }
}
