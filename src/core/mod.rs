pub mod assistant;
pub mod catalog;
pub mod comparison;
pub mod playbook;
pub mod projection;
pub mod risk;
pub mod summary;

pub use crate::domain::model::{
    Brand, BrandModelKey, SimulationInput, SimulationResult, SummaryRequest, SummaryResponse,
};
pub use crate::domain::ports::{ChatResponder, ConfigProvider, SummarySource};
pub use crate::utils::error::Result;
