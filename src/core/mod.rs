pub mod big5;
pub mod pipeline;
pub mod reading;
pub mod resonance;
pub mod resonance_pipeline;
pub mod signal;
pub mod spiral;

pub use crate::domain::model::{
    CalendarDate, ReadingResult, ResonanceResult, SignalParameters, SpiralPoint, TraitScores,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
