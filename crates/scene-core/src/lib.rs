// File: crates/scene-core/src/lib.rs
// Summary: Core library entry point; exports the aggregation, geometry and scene-stepping API.

pub mod aggregate;
pub mod chart;
pub mod deck;
pub mod error;
pub mod grid;
pub mod primitive;
pub mod record;
pub mod renderer;
pub mod scale;
pub mod scene;
pub mod series;
pub mod svg;
pub mod theme;
pub mod types;

pub use aggregate::{aggregate, bucketize, mean, pivot_series, position_matcher, sample_stddev, single_series};
pub use aggregate::{AggregateResult, Buckets, GroupKey, KeyPart, Reducer, RoleMatcher};
pub use chart::{Annotation, ChartDescriptor, RenderOptions};
pub use deck::{Filter, Grouping, Measure, Role, SceneDeck, ScenePlan};
pub use error::{SceneError, SceneResult};
pub use primitive::{Anchor, Frame, FrameStatus, Primitive};
pub use record::{CsvDirSource, DataSource, MemorySource, Record, Table};
pub use renderer::{Completion, LoadTicket, SceneLoad, SceneRenderer};
pub use scale::{nice_ceil, project, Domain, LinearScale, Projection};
pub use scene::{transition, Action, SceneState};
pub use series::{Mark, Series, SeriesPoint};
pub use svg::render_svg;
pub use theme::{Color, OrdinalPalette, Theme};
pub use types::{Insets, PlotRect, ScreenPoint};
