// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod ids;
pub mod input;
pub mod model;
pub mod query;
pub mod render;
pub mod state;
pub mod weather;

pub use ids::*;
pub use input::*;
pub use model::*;
pub use query::*;
pub use render::*;
pub use state::*;
pub use weather::*;
