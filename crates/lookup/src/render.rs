use crate::error::{LookupError, Result};
use crate::result::LookupResult;

/// How a [`LookupResult`] is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// A single JSON object.
    Structured { pretty: bool },
    /// Headed grid tables, one per non-empty category.
    Formatted,
}

/// Whether this build can produce formatted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCapability {
    Available,
    Unavailable,
}

impl TableCapability {
    pub const fn current() -> Self {
        if cfg!(feature = "tables") {
            TableCapability::Available
        } else {
            TableCapability::Unavailable
        }
    }

    pub const fn is_available(self) -> bool {
        matches!(self, TableCapability::Available)
    }
}

pub fn render_json(result: &LookupResult, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(text)
}

/// Render `result` in `mode`. Formatted output fails when the table renderer is compiled out.
pub fn render(result: &LookupResult, mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Structured { pretty } => render_json(result, pretty),
        OutputMode::Formatted => render_formatted(result),
    }
}

#[cfg(feature = "tables")]
fn render_formatted(result: &LookupResult) -> Result<String> {
    Ok(crate::table::render_tables(result))
}

#[cfg(not(feature = "tables"))]
fn render_formatted(_result: &LookupResult) -> Result<String> {
    Err(LookupError::RendererUnavailable)
}

/// Fail early, before any lookup work, if `mode` cannot be rendered by this build.
pub fn ensure_renderable(mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Formatted if !TableCapability::current().is_available() => {
            Err(LookupError::RendererUnavailable)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LookupResult {
        LookupResult {
            definitions: vec!["feeling joy".into()],
            synonyms: vec!["glad".into(), "happy".into()],
            ..LookupResult::default()
        }
    }

    #[test]
    fn compact_json_is_one_line_with_every_key() {
        let text = render(&sample(), OutputMode::Structured { pretty: false }).unwrap();
        assert!(!text.contains('\n'));
        assert!(text.starts_with(r#"{"definitions":["feeling joy"],"pos_tags":[]"#));
        assert!(text.ends_with(r#""verb_frames":[],"examples":[]}"#));
    }

    #[test]
    fn pretty_json_parses_back_to_the_same_result() {
        let text = render_json(&sample(), true).unwrap();
        assert!(text.contains("\n  \"synonyms\": ["));
        let parsed: LookupResult = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn structured_output_is_always_renderable() {
        assert!(ensure_renderable(OutputMode::Structured { pretty: true }).is_ok());
    }

    #[cfg(feature = "tables")]
    #[test]
    fn formatted_output_uses_tables() {
        assert!(TableCapability::current().is_available());
        let text = render(&sample(), OutputMode::Formatted).unwrap();
        assert!(text.starts_with("\nDEFINITIONS\n"));
        assert!(text.contains("\nSYNONYMS\n"));
    }

    #[cfg(not(feature = "tables"))]
    #[test]
    fn formatted_output_fails_without_tables() {
        assert!(matches!(
            ensure_renderable(OutputMode::Formatted),
            Err(LookupError::RendererUnavailable)
        ));
        assert!(render(&sample(), OutputMode::Formatted).is_err());
    }
}
