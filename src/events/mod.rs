//! Input paths feeding the controller: desktop key holds and VR hand motion.

pub mod hands;
pub mod keyboard;

pub use keyboard::is_appreciate_key;
