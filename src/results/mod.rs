//! Result store: the experiment document, loaded once and read-only afterwards.

mod error;
mod keyed;
mod resolve;
mod source;
mod tree;

pub use error::LoadError;
pub use keyed::Keyed;
pub use resolve::{ModelPath, resolve};
pub use source::{DEFAULT_REPORT_SOURCE, ReportSource, load};
pub use tree::{
    ClassEntry, ClassScores, Fold, LossReport, MetricValue, ModelMap, ModelResult, REPORT_FOLD,
    ResultTree, ScenarioMap, Summary,
};
