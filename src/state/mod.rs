pub mod container;
pub mod entity;
pub mod queue;

pub use container::{AreaContainer, AreaLoader};
pub use entity::AreaEntity;
pub use queue::{publish_queue, PublishQueue, PublishSender};
