pub mod plans;
pub mod reports;
pub mod tester;

pub use plans::{PlanInput, load_config, resolve_plan_inputs};
pub use tester::*;
