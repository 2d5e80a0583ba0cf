//! Tri-state presence of optional wire identifiers.
//!
//! `None` and `""` are both unset; the empty string is the caller's way of
//! detaching a relation. Anything else, including whitespace, is set and is
//! validated as an id downstream.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence<'a> {
    Unset,
    Set(&'a str),
}

impl<'a> Presence<'a> {
    pub fn is_set(self) -> bool {
        matches!(self, Presence::Set(_))
    }

    pub fn value(self) -> Option<&'a str> {
        match self {
            Presence::Set(v) => Some(v),
            Presence::Unset => None,
        }
    }
}

pub fn classify(value: Option<&str>) -> Presence<'_> {
    match value {
        None | Some("") => Presence::Unset,
        Some(v) => Presence::Set(v),
    }
}
