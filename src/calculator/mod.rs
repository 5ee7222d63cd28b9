// Calculator module: interest engine, rate selection and the calculator store.

pub mod interest;
pub mod selection;
pub mod state;

pub use interest::InterestMethod;
pub use state::CalculatorState;
