use std::fs;
use std::path::Path;

use crate::decode::decode;
use crate::error::{AgentlogError, Result};
use crate::model::{Block, DecodedRecord, RawRecord, RenderOptions};
use crate::order::order;

pub fn read_records(path: &Path) -> Result<Vec<RawRecord>> {
    let raw = read_transcript_raw(path)?;
    parse_records(path, &raw)
}

pub fn read_transcript_raw(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| AgentlogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.is_empty() {
        return Err(AgentlogError::EmptyTranscript {
            path: path.to_path_buf(),
        });
    }

    String::from_utf8(bytes).map_err(|_| AgentlogError::NonUtf8Transcript {
        path: path.to_path_buf(),
    })
}

/// Parses one `RawRecord` per non-blank JSONL line.
pub fn parse_records(path: &Path, raw_jsonl: &str) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();

    for (line_idx, line) in raw_jsonl.lines().enumerate() {
        let line_no = line_idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record = serde_json::from_str::<RawRecord>(trimmed).map_err(|source| {
            tracing::debug!("rejecting record line {line_no} in {}", path.display());
            AgentlogError::InvalidRecordLine {
                path: path.to_path_buf(),
                line: line_no,
                source,
            }
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Orders the records for display and decodes each one independently.
pub fn decode_transcript(records: Vec<RawRecord>) -> Vec<DecodedRecord> {
    order(records)
        .into_iter()
        .map(|record| {
            let log = decode(&record.content);
            DecodedRecord {
                id: record.id,
                created_at: record.created_at,
                sequence: record.sequence,
                log,
            }
        })
        .collect()
}

pub fn render_transcript_markdown(records: &[DecodedRecord], options: RenderOptions) -> String {
    let mut output = String::new();
    output.push_str("# Transcript\n\n");
    output.push_str(&format!("- Records: `{}`\n", records.len()));
    let errors = records.iter().filter(|record| record.log.has_error()).count();
    output.push_str(&format!("- Errors: `{errors}`\n\n"));

    if records.is_empty() {
        output.push_str("_No records found._\n");
        return output;
    }

    for (idx, record) in records.iter().enumerate() {
        output.push_str(&format!(
            "## {}. {} ({})\n\n",
            idx + 1,
            record.log.category,
            record.log.tone
        ));
        output.push_str(&format!(
            "- Record: `{}` @ `{}` #{}\n\n",
            record.id,
            record.created_at.to_rfc3339(),
            record.sequence
        ));

        for block in &record.log.blocks {
            render_block(&mut output, block, options);
        }
        output.push('\n');
    }

    output
}

fn render_block(output: &mut String, block: &Block, options: RenderOptions) {
    output.push_str(&format!("- [{}]", block.icon));
    if let Some(label) = &block.label {
        output.push_str(&format!(" **{label}**"));
    }

    let body = if options.expand {
        block.full_text()
    } else {
        block.preview.as_str()
    };

    if body.contains('\n') || (options.expand && block.expandable) {
        if let Some(extra) = block.extra.as_deref().filter(|_| !options.expand) {
            output.push_str(&format!(" _{extra}_"));
        }
        output.push_str("\n\n```\n");
        output.push_str(body);
        if !body.ends_with('\n') {
            output.push('\n');
        }
        output.push_str("```\n");
        return;
    }

    if !body.is_empty() {
        output.push(' ');
        output.push_str(body);
    }
    if let Some(extra) = block.extra.as_deref().filter(|_| !options.expand) {
        output.push_str(&format!(" _{extra}_"));
    }
    output.push('\n');
}

pub fn transcript_to_raw_json(records: &[DecodedRecord]) -> Result<String> {
    serde_json::to_string_pretty(records)
        .map(|json| format!("{json}\n"))
        .map_err(|err| AgentlogError::Serialization(err.to_string()))
}
