/// Pixel grid, stroke cursor and dirty-cell tracking
pub mod canvas;

/// Startup configuration
pub mod config;

/// Per-frame stroke logic
pub mod driver;

/// Graphics primitives, such as color
pub mod graphics;

/// Pointer and button sampling
pub mod input;

/// Points, boxes and the overlap test
pub mod layout;

/// Paint targets for canvas render passes
pub mod render;
