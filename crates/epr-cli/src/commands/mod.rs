pub mod group;
pub mod inspect;
pub mod mandates;
pub mod summarize;
