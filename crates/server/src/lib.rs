pub mod routes;
pub mod startup;
pub mod errors;
pub mod observability;

pub use routes::AppState;
pub use startup::run;
