pub mod decode;
pub mod error;
pub mod event;
pub mod model;
pub mod normalize;
pub mod order;
pub mod service;
pub mod unwrap;

pub use decode::decode;
pub use error::{AgentlogError, Result};
pub use event::AgentEvent;
pub use model::{
    Block, BlockKind, DecodedRecord, FormattedLog, Icon, LogTone, RawRecord, RenderOptions,
    block_key,
};
pub use order::order;
pub use service::{
    decode_transcript, parse_records, read_records, read_transcript_raw,
    render_transcript_markdown, transcript_to_raw_json,
};
pub use unwrap::unwrap_double_encoded;
