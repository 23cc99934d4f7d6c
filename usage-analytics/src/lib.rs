pub mod analysis;
pub mod config;
pub mod degree_days;
pub mod hourly;
pub mod insights;
pub mod observability;
pub mod pipeline;
pub mod recommend;
pub mod regression;
pub mod report;
pub mod sources;
pub mod transform;
pub mod unify;

pub use analysis::{analyze, analyze_detailed, analyze_with, RegimeAnalysis, RegimeCounts};
pub use pipeline::{Envelope, Pipeline};
pub use recommend::{recommend, recommend_with};
pub use unify::{unify, unify_with};
