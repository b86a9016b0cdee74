use std::fmt;
use std::str::FromStr;

/// Wire values of the `iterator` attribute on iteration requests.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IteratorType {
    Start,
    Continue,
    Stop,
}

#[derive(Debug)]
pub struct ValueNotInEnumeration(pub String);

impl fmt::Display for ValueNotInEnumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value {:?} is not in enumeration", self.0)
    }
}

impl std::error::Error for ValueNotInEnumeration {}

impl FromStr for IteratorType {
    type Err = ValueNotInEnumeration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Start" => Ok(Self::Start),
            "Continue" => Ok(Self::Continue),
            "Stop" => Ok(Self::Stop),
            _ => Err(ValueNotInEnumeration(s.to_string())),
        }
    }
}

impl fmt::Display for IteratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Start => "Start",
            Self::Continue => "Continue",
            Self::Stop => "Stop",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_text_round_trips() {
        for text in ["Start", "Continue", "Stop"] {
            let parsed: IteratorType = text.parse().unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }

    #[test]
    fn unknown_text_is_rejected() {
        assert!("start".parse::<IteratorType>().is_err());
        assert!("".parse::<IteratorType>().is_err());
    }
}
