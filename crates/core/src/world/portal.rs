use serde::{Deserialize, Serialize};

use crate::types::{Rect, WorldId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub rect: Rect,
    pub name: String,
    pub teleport_to: WorldId,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PortalRegistry {
    portals: Vec<Portal>,
}

impl PortalRegistry {
    pub fn new(portals: Vec<Portal>) -> Self {
        Self { portals }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Portal> {
        self.portals.iter()
    }

    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }

    /// First portal, in authoring order, whose rectangle overlaps `body`.
    pub fn find_overlapping(&self, body: Rect) -> Option<&Portal> {
        self.portals.iter().find(|portal| portal.rect.intersects(body))
    }
}
