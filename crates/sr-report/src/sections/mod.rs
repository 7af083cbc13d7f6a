//! Report section data structures.

pub mod analysis;
pub mod guidelines;
pub mod overview;

pub use analysis::{MachineSection, StoreSection, WindowAnalysis, WindowDeltaTable};
pub use guidelines::{Guideline, GuidelinesSection};
pub use overview::{InputSummary, OverviewSection, StoreMachines, WindowSpan};
