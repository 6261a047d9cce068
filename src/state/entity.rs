use crate::codec::WorldPos;

/// One placed entity decoded from an area file. Immutable once created; the
/// container's stable list owns it for the rest of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaEntity {
    pub template_path: String,
    pub position: WorldPos,
}

impl AreaEntity {
    pub fn new(template_path: impl Into<String>, position: WorldPos) -> Self {
        Self {
            template_path: template_path.into(),
            position,
        }
    }
}
