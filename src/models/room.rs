//! Room model.

use serde::{Deserialize, Serialize};

use super::SessionKind;

/// A physical room.
///
/// `kind` decides which sessions may use it: lab blocks only go to
/// `Lab` rooms. Capacity is carried but not checked by placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Display name. Filler rooms (library, ground) are found by name.
    #[serde(default)]
    pub name: String,
    /// Lecture room or lab.
    #[serde(rename = "type")]
    pub kind: SessionKind,
    /// Seats.
    #[serde(default)]
    pub capacity: u32,
}

impl Room {
    /// Creates a room.
    pub fn new(id: impl Into<String>, kind: SessionKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            kind,
            capacity: 0,
        }
    }

    /// Creates a lecture room.
    pub fn theory(id: impl Into<String>) -> Self {
        Self::new(id, SessionKind::Theory)
    }

    /// Creates a lab room.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, SessionKind::Lab)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builder() {
        let r = Room::lab("r5").with_name("IT LAB 1").with_capacity(35);
        assert_eq!(r.kind, SessionKind::Lab);
        assert_eq!(r.name, "IT LAB 1");
        assert_eq!(r.capacity, 35);

        let t = Room::theory("r1");
        assert_eq!(t.kind, SessionKind::Theory);
    }
}
