//! chart_sync: incremental synchronization of remote point series into a
//! renderable chart model, with full, "new rows only" and single-point
//! playback update modes.

pub mod activity;
pub mod colors;
pub mod config;
pub mod data_types;
pub mod decimation;
pub mod error;
pub mod model;
pub mod player;
pub mod reader;
pub mod render;
pub mod source;
pub mod sync;
pub mod utils;

pub use activity::{ActivityEntry, ActivityLog};
pub use colors::{ColorAssigner, PALETTE};
pub use config::SyncConfig;
pub use data_types::{ChartConfig, Color, Cursor, FetchMode, Point, RenderDataset, Series, Snapshot, Ticks};
pub use decimation::SamplingMode;
pub use error::{RenderError, SyncError};
pub use model::{ChartModelBuilder, MergeOutcome, Telemetry};
pub use player::{PlayerState, StreamPlayer};
pub use reader::SeriesReader;
pub use render::{RenderCommand, RenderEngine};
pub use source::{HttpSource, SeriesSource};
pub use sync::ChartSync;
