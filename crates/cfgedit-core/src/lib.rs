pub mod brackets;
pub mod buffer;
pub mod cursor;
pub mod diff;
pub mod editor;
pub mod file_type;
pub mod highlight;
pub mod metrics;
pub mod search;
pub mod stats;
pub mod suggest;
pub mod validator;

pub use buffer::TextBuffer;
pub use cursor::{Cursor, Position};
pub use diff::{apply_diff, diff, ChangeKind, DiffLine, DiffSummary};
pub use editor::{Editor, Viewport};
pub use file_type::FileType;
pub use highlight::{tokenize, Token, TokenKind};
pub use metrics::{LineLayout, Monospace, TextMeasure};
pub use search::{SearchEngine, SearchMatch, SearchOptions};
pub use stats::TextStats;
pub use suggest::suggest;
pub use validator::{validate, ErrorCategory, ErrorKind, ValidationError};
