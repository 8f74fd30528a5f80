pub mod controller;
pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod surface;

pub use controller::{AppController, AppSnapshot};
pub use error::EngineError;
pub use orchestrator::PhraseOrchestrator;
pub use outcome::{BatchOutcome, PlaceFailure, PlaceResult};
pub use surface::drive_surface;
