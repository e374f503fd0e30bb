use std::fmt;

use compact_str::CompactString;
use serde::Serialize;

use crate::utils::Location;

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ident {
    pub name: CompactString,
    pub start: Location,
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
