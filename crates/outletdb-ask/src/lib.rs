//! Natural-language outlet questions.
//!
//! A [`QuestionInterpreter`] turns a free-text question into a feature key and
//! a location; [`answer_question`] filters a listing with that result.

pub mod answer;
pub mod error;
pub mod gemini;
pub mod interpret;

pub use answer::{answer_question, is_supported_location, AskAnswer, SUPPORTED_LOCATIONS};
pub use error::AskError;
pub use gemini::GeminiInterpreter;
pub use interpret::{
    interpret_or_default, interpreter_from_config, parse_answer, Interpretation,
    QuestionInterpreter, UnconfiguredInterpreter,
};
