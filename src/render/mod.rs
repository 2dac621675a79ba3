//! Rendering-related modules
//! Contains OBJ parsing, background mesh loading, texture decoding and frustum culling.

pub mod face_index;
pub mod frustum;
pub mod mesh_loader;
pub mod obj_parser;
pub mod texture;

// Re-export commonly used types
pub use face_index::{FaceGrammar, FaceIndexResolver};
pub use frustum::{Frustum, Plane, get_intersections, get_intersections_as_int};
pub use mesh_loader::{LoadEvent, LoadObserver, LoadRequest, LoadResult, LoadStatus, LoadedModel, LoaderBusy, MeshLoader};
pub use obj_parser::{ObjParser, ParsedObj, parse_obj};
pub use texture::{TextureImage, load_texture};
