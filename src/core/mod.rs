pub mod parser;
pub mod render;
pub mod source;
pub mod status;

pub use parser::{parse_status_output, parse_status_reader, StatusParser};
pub use render::{render_prompt, Palette};
pub use source::{GitStatusSource, ReaderSource, StatusSource};
pub use status::{ChangeCounts, ChangeKind, RepoStatus};
