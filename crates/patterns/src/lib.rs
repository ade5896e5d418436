mod color;
mod event;
mod intent;
mod model;
mod render;
mod state;
mod themegen;

pub use color::Rgba;
pub use event::BackgroundsEvent;
pub use intent::BackgroundsIntent;
pub use model::{randomize_blobs, randomize_geometric_points, BackgroundsModel};
pub use render::{render, Brush, CanvasSize, DrawPrimitive, TileMode};
pub use state::{
    default_blobs, default_geometric_points, BackgroundsState, GeometricPoint, GradientBlob,
    PatternType,
};
pub use themegen::{generate_theme, GenerationError};
