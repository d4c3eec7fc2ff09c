//! Hardware abstraction traits
//!
//! These traits define the interface between the sequencing logic and
//! whatever owns the physical (or simulated) devices. The core never
//! constructs devices; it only looks them up by name through a
//! [`DeviceRegistry`].

pub mod actuator;
pub mod coupler;
pub mod fabricator;
pub mod registry;
pub mod status;
pub mod tool_group;

pub use actuator::LinearActuator;
pub use coupler::Coupler;
pub use fabricator::Fabricator;
pub use registry::{DeviceKind, DeviceRegistry};
pub use status::{StatusHeader, StatusSink};
pub use tool_group::{GroupMember, MemberKind, ToolGroup};
