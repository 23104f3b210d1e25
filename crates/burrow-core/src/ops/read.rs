//! Bounded file reading

use crate::config::consts;
use crate::error::{BurrowError, Result};
use crate::workspace::Workspace;
use encoding_rs::{Decoder, DecoderResult, Encoding};
use std::io::ErrorKind;

#[derive(Debug, Clone)]
pub struct ReadOptions {
    pub files: Vec<String>,
    pub include_line_numbers: bool,
    pub max_lines_per_file: Option<usize>,
    pub encoding: String,
}

impl ReadOptions {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            include_line_numbers: false,
            max_lines_per_file: None,
            encoding: consts::read::ENCODING.to_string(),
        }
    }
}

/// Resolves a WHATWG encoding label such as `utf-8`, `latin1` or `shift_jis`
pub fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| BurrowError::invalid(format!("unknown encoding '{label}'")))
}

/// Reads every file in `options.files`
///
/// All-or-nothing: the first file that fails validation, reading or
/// decoding aborts the call with an error naming it.
pub fn read_files(workspace: &Workspace, options: &ReadOptions) -> Result<String> {
    if options.files.is_empty() {
        return Err(BurrowError::invalid("No files provided"));
    }
    if options.max_lines_per_file == Some(0) {
        return Err(BurrowError::invalid("max_lines_per_file must be >= 1"));
    }
    let encoding = lookup_encoding(&options.encoding)?;

    let validator = workspace.validator();
    let multiple = options.files.len() > 1;
    let mut parts = Vec::with_capacity(options.files.len());
    for file in &options.files {
        let path = validator
            .validate(file)
            .map_err(|_| BurrowError::rejected(file))?;
        let bytes = std::fs::read(&path).map_err(|e| read_error(file, e))?;
        let text = decode(&bytes, encoding).ok_or_else(|| BurrowError::DecodeFailure {
            path: file.clone(),
            encoding: options.encoding.clone(),
        })?;

        let content = format_content(&text, options.include_line_numbers, options.max_lines_per_file);
        if multiple {
            parts.push(format!("=== File: {file} ===\n{content}\n"));
        } else {
            parts.push(content);
        }
    }
    Ok(parts.join("\n"))
}

fn read_error(file: &str, error: std::io::Error) -> BurrowError {
    match error.kind() {
        ErrorKind::NotFound => BurrowError::NotFound(file.to_string()),
        ErrorKind::PermissionDenied => BurrowError::PermissionDenied(file.to_string()),
        _ => BurrowError::ReadFailed {
            path: file.to_string(),
            source: error,
        },
    }
}

/// Decodes dropping malformed sequences; `None` when nothing survives
///
/// Replacement characters that are validly encoded in the file are kept.
fn decode(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut text = String::with_capacity(output_capacity(&decoder, bytes.len()));
    let mut rest = bytes;
    loop {
        let (result, read) = decoder.decode_to_string_without_replacement(rest, &mut text, true);
        rest = &rest[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::Malformed(_, _) => continue,
            DecoderResult::OutputFull => text.reserve(output_capacity(&decoder, rest.len())),
        }
    }
    if text.is_empty() && !bytes.is_empty() {
        return None;
    }
    Some(text)
}

fn output_capacity(decoder: &Decoder, input_len: usize) -> usize {
    decoder
        .max_utf8_buffer_length_without_replacement(input_len)
        .unwrap_or(input_len)
        .max(16)
}

fn format_content(text: &str, line_numbers: bool, max_lines: Option<usize>) -> String {
    let width = consts::read::LINE_NUMBER_WIDTH;
    let number = |i: usize, line: &str| {
        if line_numbers {
            format!("{:>width$}: {line}", i + 1)
        } else {
            line.to_string()
        }
    };

    let Some(max_lines) = max_lines else {
        if !line_numbers {
            return text.to_string();
        }
        return text
            .split('\n')
            .enumerate()
            .map(|(i, line)| number(i, line))
            .collect::<Vec<_>>()
            .join("\n");
    };

    let mut lines: Vec<String> = text
        .lines()
        .take(max_lines)
        .enumerate()
        .map(|(i, line)| number(i, line))
        .collect();
    if text.lines().nth(max_lines).is_some() {
        lines.push(format!("... (truncated after {max_lines} lines)"));
    }
    lines.join("\n")
}
