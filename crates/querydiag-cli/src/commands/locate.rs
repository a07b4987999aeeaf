use crate::OutputFormat;
use anyhow::{bail, Result};
use colored::Colorize;
use querydiag::{DiagnosticFormatter, ErrorContext, Label, Position};
use std::path::PathBuf;

pub struct LocateArgs {
    pub input: PathBuf,
    pub offset: Option<usize>,
    pub description: String,
    pub label: Option<Label>,
    pub format: OutputFormat,
}

/// Map the mutually exclusive `--label` / `--label-key` flags to a label
pub fn label_from_flags(label: Option<String>, label_key: Option<String>) -> Option<Label> {
    match (label, label_key) {
        (Some(text), _) => Some(Label::Literal(text)),
        (None, Some(key)) => Some(Label::ResourceKey(key)),
        (None, None) => None,
    }
}

pub fn run(formatter: &DiagnosticFormatter, args: &LocateArgs) -> Result<()> {
    let text = super::read_input(&args.input)?;
    println!("{}", render(formatter, &text, args)?);
    Ok(())
}

/// The formatter treats a bad offset as a caller bug; report it as a usage error instead
fn check_offset(text: &str, offset: Option<usize>) -> Result<()> {
    if let Some(offset) = offset {
        let text_len = text.chars().count();
        if offset > text_len {
            bail!("Offset {offset} is past the end of the query ({text_len} chars)");
        }
    }
    Ok(())
}

fn render(formatter: &DiagnosticFormatter, text: &str, args: &LocateArgs) -> Result<String> {
    check_offset(text, args.offset)?;

    let ctx = ErrorContext {
        text,
        offset: args.offset,
        label: args.label.as_ref(),
    };
    let error = formatter.create_from_context(ctx, args.description.as_str(), None);

    let output = match args.format {
        OutputFormat::Human => {
            let mut output = format!("{} {}", "✗".red(), error.to_string().bold());
            if let Some(position) = error.position() {
                let normalized = formatter.normalize(text);
                if let Some(excerpt) = render_excerpt(&normalized, position) {
                    output.push('\n');
                    output.push_str(&excerpt);
                }
            }
            output
        }
        OutputFormat::Json => serde_json::to_string_pretty(&error.snapshot())?,
    };

    Ok(output)
}

/// Show the offending line with a caret under the error column.
///
/// Returns `None` when the position points past the last line, which happens
/// for offsets into trailing line feeds.
fn render_excerpt(normalized: &str, position: Position) -> Option<String> {
    let source_line = normalized.split('\n').nth(position.line - 1)?;
    let gutter = position.line.to_string();
    let padding = " ".repeat(gutter.len());
    let caret_indent = " ".repeat(position.column - 1);

    Some(format!(
        "{padding} |\n{gutter} | {source_line}\n{padding} | {caret_indent}{}",
        "^".red().bold()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY: &str = "SELECT *\nFROM X";

    fn args(offset: Option<usize>, format: OutputFormat) -> LocateArgs {
        LocateArgs {
            input: PathBuf::from("-"),
            offset,
            description: "Unknown table".to_string(),
            label: None,
            format,
        }
    }

    #[test]
    fn test_offset_at_end_is_accepted() {
        colored::control::set_override(false);

        let output = render(&DiagnosticFormatter::new(), QUERY, &args(Some(15), OutputFormat::Human))
            .unwrap();
        assert!(output.starts_with("✗ Unknown table near line 2, column 7."));
    }

    #[test]
    fn test_offset_past_end_is_a_usage_error() {
        let err = render(&DiagnosticFormatter::new(), QUERY, &args(Some(16), OutputFormat::Human))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Offset 16 is past the end of the query (15 chars)"
        );
    }

    #[test]
    fn test_json_output_is_a_snapshot() {
        let output = render(&DiagnosticFormatter::new(), QUERY, &args(Some(14), OutputFormat::Json))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "version": 1,
                "message": "Unknown table near line 2, column 6.",
                "description": "Unknown table",
                "contextPhrase": "line 2, column 6",
                "line": 2,
                "column": 6,
            })
        );
    }

    #[test]
    fn test_json_output_without_offset() {
        let output =
            render(&DiagnosticFormatter::new(), QUERY, &args(None, OutputFormat::Json)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["message"], "Unknown table.");
        assert_eq!(value["line"], 0);
    }

    #[test]
    fn test_label_from_flags() {
        assert_eq!(
            label_from_flags(Some("WHERE clause".to_string()), None),
            Some(Label::Literal("WHERE clause".to_string()))
        );
        assert_eq!(
            label_from_flags(None, Some("ctx.where".to_string())),
            Some(Label::ResourceKey("ctx.where".to_string()))
        );
        assert_eq!(label_from_flags(None, None), None);
    }

    #[test]
    fn test_render_excerpt() {
        colored::control::set_override(false);

        let excerpt = render_excerpt(QUERY, Position::new(2, 6)).unwrap();
        assert_eq!(excerpt, "  |\n2 | FROM X\n  |      ^");
    }

    #[test]
    fn test_render_excerpt_past_last_line() {
        assert_eq!(render_excerpt("SELECT", Position::new(2, 1)), None);
    }
}
