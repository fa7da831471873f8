//! chemscreen-molecules: descriptor records and the rule-based side of screening.
//!
//! 1. `DescriptorRecord` with documented fallback values for missing descriptors
//! 2. Lipinski / Veber / Ghose rule assessors
//! 3. Radar profile normalisation for property display
//! 4. The reference compound library and its summary statistics

pub mod descriptors;
pub mod rules;
pub mod profile;
pub mod library;

pub use descriptors::DescriptorRecord;
pub use library::{compound_library, CompoundEntry};
pub use rules::{assess_all, assess_ghose, assess_lipinski, assess_veber, RuleAssessment};
