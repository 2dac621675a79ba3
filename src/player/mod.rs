//! Player-related modules
//! Contains the free-look camera and input state.

pub mod camera;
pub mod input;

// Re-export commonly used types
pub use camera::Camera;
pub use input::{InputState, MoveDir};
