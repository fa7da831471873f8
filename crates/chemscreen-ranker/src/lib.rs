//! chemscreen-ranker: Composite screening score and library ranking.

pub mod normalise;
pub mod weights;
pub mod scorer;

pub use normalise::normalize;
pub use scorer::{CompositeScorer, ScoredCompound, ScreeningCandidate, ScreeningReport};
pub use weights::ScreeningWeights;
