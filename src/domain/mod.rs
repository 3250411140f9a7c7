mod engine_selection;
mod engine_type;
mod object_key;
mod transcript_result;
mod transcript_word;

pub use engine_selection::EngineSelection;
pub use engine_type::EngineType;
pub use object_key::ObjectKey;
pub use transcript_result::TranscriptResult;
pub use transcript_word::TranscriptWord;
