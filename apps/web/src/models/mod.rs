pub mod grounded;
pub mod roadmap;

pub use grounded::{Citation, GroundedInfo, WebSource};
pub use roadmap::RoadmapNode;
