//! Host-free core of the Appreciate controller.
//!
//! Everything here is a pure function of intensity (plus a caller-supplied
//! RNG) so the channel drivers in the front-end crate stay thin.

pub mod animation;
pub mod constants;
pub mod intensity;
pub mod kinematics;
pub mod mapping;

pub use animation::*;
pub use constants::*;
pub use intensity::*;
pub use kinematics::*;
pub use mapping::*;
