mod quiz_vm;

pub use quiz_vm::{AnswerOutcome, OptionHighlight, QuizVm};
