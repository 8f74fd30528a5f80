pub mod extract;
pub mod generator;
pub mod google;
pub mod prompt;
pub mod provider;

pub mod mock;

pub use generator::PhraseGenerator;
pub use google::GeminiProvider;
pub use mock::{MockReply, MockTextProvider};
pub use provider::{GenerateOptions, TextGenProvider};
