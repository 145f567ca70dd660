//! Scene description files.
//!
//! A description is a JSON document naming materials, a tree of nodes and
//! the render parameters. It mirrors the scripting calls the scenes were
//! originally written with: every node has a `type`, an optional material,
//! a list of transform operations applied in order, and children.
//!
//! ```json
//! {
//!   "materials": { "red": { "kd": [1, 0, 0], "ks": [0.5, 0.5, 0.5], "shininess": 25 } },
//!   "root": {
//!     "name": "root", "type": "node",
//!     "children": [
//!       { "name": "ball", "type": "sphere", "material": "red",
//!         "transforms": [ { "translate": [0, 0, -5] } ] }
//!     ]
//!   },
//!   "render": { "output": "ball.png", "width": 256, "height": 256,
//!               "eye": [0, 0, 0], "view": [0, 0, -1], "up": [0, 1, 0], "fov": 50 }
//! }
//! ```

mod loader;
mod types;

pub use loader::*;
pub use types::*;
