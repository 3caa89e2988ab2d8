//! Cube-sphere field assembly and mesh construction.
//!
//! Turns a scalar field stored on the six tiles of an FV3 cubed-sphere grid
//! into renderable geometry: either one geodetic quadrilateral per cell or
//! a flattened "cross" atlas of the six faces.
//!
//! # Architecture
//!
//! ```text
//! TileSource / MultiTileSource        VertexSource
//!              │                            │
//!              ▼                            ▼
//!       FieldAssembler                 GridAtlas
//!  (level slice, - baseline)      (radians -> degrees)
//!              │                            │
//!              ▼                            │
//!        reduce(average)                    │
//!              │                            │
//!      ┌───────┴────────┐                   │
//!      ▼                ▼                   │
//!  Normalizer    build_polygons ◄───────────┘
//!                build_cross
//!                       │
//!                       ▼
//!                   renderer
//! ```
//!
//! Every stage consumes its whole input and produces a new value; nothing
//! is mutated after construction.
//!
//! # Example
//!
//! ```ignore
//! use cubesphere::{build_mesh, FieldAssembler, FieldInput, GridAtlas, RenderConfig};
//!
//! let field = FieldAssembler::new(FieldInput::Combined(Box::new(source)))
//!     .assemble("T", 72)?;
//! let grid = GridAtlas::new(grid_dir).load(field.edge())?;
//! let rendered = build_mesh(field, Some(&grid), &RenderConfig::default())?;
//! ```

pub mod assemble;
pub mod atlas;
pub mod config;
pub mod cross;
pub mod error;
pub mod mesh;
pub mod normalize;
pub mod pipeline;
pub mod reduce;
pub mod source;
pub mod tile;

// Re-export commonly used types at crate root
pub use assemble::FieldAssembler;
pub use atlas::{GridAtlas, LonLat, RadianVertices, VertexGrid};
pub use config::{MeshLayout, RenderConfig};
pub use cross::{build_cross, CrossAtlas, TilePlacement, CROSS_LAYOUT, NO_DATA};
pub use error::{CubeSphereError, Result};
pub use mesh::{build_polygons, Polygon};
pub use normalize::{NormalizationMode, Normalizer, ValueRange};
pub use pipeline::{build_mesh, Mesh, RenderedMesh};
pub use reduce::{reduce, AveragedField};
pub use source::{
    FieldInput, MemoryMultiTileSource, MemoryTileSource, MemoryVertexSource, MultiTileSource,
    TileSource, VertexSource,
};
pub use tile::{Field, TileSlice, TILE_COUNT};
