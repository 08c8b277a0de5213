use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Output format of `MapFormatter`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// The same symbols the level parser reads.
    Ascii,
    Xsb,
}

impl Default for Format {
    fn default() -> Self {
        Format::Ascii
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Format::Ascii => write!(f, "ascii"),
            Format::Xsb => write!(f, "xsb"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascii" => Ok(Format::Ascii),
            "xsb" => Ok(Format::Xsb),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}
