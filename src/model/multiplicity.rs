//! Cardinality bounds such as `"1"`, `"0..1"` or `"1..*"`.
//!
//! Bounds are kept as opaque strings: `"*"`, empty strings and non-numeric
//! values pass through untouched. The only rejected shape is one with more
//! than one `..` separator.

use crate::model::ModelError;

const RANGE_SEP: &str = "..";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiplicity {
    pub min: String,
    pub max: String,
}

impl Multiplicity {
    /// Bounds of a class that is not the source of any aggregation.
    pub fn unset() -> Self {
        Self {
            min: "0".to_string(),
            max: "0".to_string(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if !raw.contains(RANGE_SEP) {
            return Ok(Self {
                min: raw.to_string(),
                max: raw.to_string(),
            });
        }

        let parts: Vec<&str> = raw.split(RANGE_SEP).collect();
        match parts.as_slice() {
            [min, max] => Ok(Self {
                min: min.to_string(),
                max: max.to_string(),
            }),
            _ => Err(ModelError::Multiplicity {
                raw: raw.to_string(),
            }),
        }
    }
}

impl Default for Multiplicity {
    fn default() -> Self {
        Self::unset()
    }
}

impl std::fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}{}{}", self.min, RANGE_SEP, self.max)
        }
    }
}
