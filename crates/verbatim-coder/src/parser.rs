//! Parse model output into analysis records
//!
//! The model is asked for blocks of the form
//!
//! ```text
//! Thème : <theme>
//! Sous-thème : <sub-theme>
//! Verbatim : "<quotation>"
//! ```
//!
//! Parsing is a line-oriented state machine. A theme label opens a block,
//! sub-theme and verbatim labels fill it, and a line without a label
//! continues the field labelled just before it. A blank line ends the
//! continuation. Blocks missing a field are dropped.

use tracing::debug;
use verbatim_domain::AnalysisRecord;

/// Records recovered from one model response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    /// Complete records, in block order
    pub records: Vec<AnalysisRecord>,

    /// Blocks that were opened but lacked a field
    pub dropped_blocks: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Theme,
    SubTheme,
    Verbatim,
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Label(Field, &'a str),
    Text(&'a str),
}

#[derive(Debug, Default)]
struct Block {
    theme: String,
    sub_theme: String,
    verbatim: String,
}

impl Block {
    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Theme => &mut self.theme,
            Field::SubTheme => &mut self.sub_theme,
            Field::Verbatim => &mut self.verbatim,
        }
    }

    fn finish(self) -> Option<AnalysisRecord> {
        AnalysisRecord::try_new(self.theme, self.sub_theme, strip_quotes(&self.verbatim))
    }
}

/// Parser state between lines
#[derive(Debug, Default)]
struct State {
    block: Option<Block>,
    continuing: Option<Field>,
}

/// Parse a raw model response
pub fn parse_response(response: &str) -> ParsedResponse {
    let mut parsed = ParsedResponse::default();
    let mut state = State::default();

    for raw in response.lines() {
        match classify(raw) {
            Line::Blank => state.continuing = None,
            Line::Label(Field::Theme, value) => {
                if let Some(block) = state.block.take() {
                    flush(block, &mut parsed);
                }
                state.block = Some(Block {
                    theme: value.to_string(),
                    ..Block::default()
                });
                state.continuing = Some(Field::Theme);
            }
            Line::Label(field, value) => {
                // Sub-theme or verbatim before any theme still opens a block,
                // which is dropped later unless a theme follows in the same block
                let block = state.block.get_or_insert_with(Block::default);
                let target = block.field_mut(field);
                *target = value.to_string();
                state.continuing = Some(field);
                if field == Field::Verbatim && close_quotation(target) {
                    state.continuing = None;
                }
            }
            Line::Text(text) => {
                if let (Some(block), Some(field)) = (state.block.as_mut(), state.continuing) {
                    let target = block.field_mut(field);
                    if !target.is_empty() {
                        target.push(' ');
                    }
                    target.push_str(text);
                    if field == Field::Verbatim && close_quotation(target) {
                        state.continuing = None;
                    }
                }
            }
        }
    }

    if let Some(block) = state.block.take() {
        flush(block, &mut parsed);
    }

    parsed
}

fn flush(block: Block, parsed: &mut ParsedResponse) {
    match block.finish() {
        Some(record) => parsed.records.push(record),
        None => {
            debug!("Dropping incomplete block");
            parsed.dropped_blocks += 1;
        }
    }
}

/// Classify one line of model output
fn classify(raw: &str) -> Line<'_> {
    let line = raw
        .trim()
        .trim_start_matches(['-', '*', '•', '#', '_'])
        .trim();

    if line.is_empty() {
        return Line::Blank;
    }

    if let Some((label, value)) = line.split_once(':') {
        if let Some(field) = label_field(label) {
            let value = value.trim().trim_matches(['*', '_']).trim();
            return Line::Label(field, value);
        }
    }

    Line::Text(line)
}

/// Recognise a field label such as `Thème`, `**Sous-thème 2**` or `Verbatim`
fn label_field(label: &str) -> Option<Field> {
    let normalized: String = label
        .chars()
        .filter(|c| !matches!(c, '*' | '_'))
        .map(|c| match c {
            'è' | 'é' | 'ê' | 'È' | 'É' | 'Ê' => 'e',
            other => other.to_ascii_lowercase(),
        })
        .collect();
    let normalized = normalized
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start_matches(['.', ')'])
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .trim();

    match normalized {
        "theme" => Some(Field::Theme),
        "sous-theme" | "sous theme" | "sub-theme" | "sub theme" | "subtheme" => {
            Some(Field::SubTheme)
        }
        "verbatim" | "quote" | "citation" => Some(Field::Verbatim),
        _ => None,
    }
}

/// Cut a quoted verbatim right after its closing mark
///
/// Returns true when the value opens with a quotation mark that is closed,
/// in which case anything after the last closing mark is commentary and is
/// removed. Unquoted values and still-open quotations are left untouched.
fn close_quotation(value: &mut String) -> bool {
    let Some(opener) = value.chars().next() else {
        return false;
    };
    let closers: &[char] = match opener {
        '"' => &['"'],
        '“' => &['”', '"'],
        '«' => &['»'],
        _ => return false,
    };

    let body_start = opener.len_utf8();
    match value[body_start..].rfind(closers) {
        Some(pos) => {
            let end = body_start + pos;
            let closer_len = value[end..].chars().next().map_or(0, char::len_utf8);
            value.truncate(end + closer_len);
            true
        }
        None => false,
    }
}

/// Strip surrounding quotation marks from a verbatim
fn strip_quotes(value: &str) -> &str {
    value
        .trim()
        .trim_matches(['"', '“', '”', '«', '»'])
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(theme: &str, sub_theme: &str, verbatim: &str) -> AnalysisRecord {
        AnalysisRecord::try_new(theme, sub_theme, verbatim).unwrap()
    }

    #[test]
    fn test_single_block() {
        let parsed = parse_response("Thème : A\nSous-thème : B\nVerbatim : \"C\"");
        assert_eq!(parsed.records, vec![record("A", "B", "C")]);
        assert_eq!(parsed.dropped_blocks, 0);
    }

    #[test]
    fn test_multiple_blocks_keep_order() {
        let response = "\
Thème : Parcours scolaire
Sous-thème : Orientation
Verbatim : \"J'ai choisi la fac un peu par défaut.\"

Thème : Vie étudiante
Sous-thème : Logement
Verbatim : \"Je vis encore chez mes parents.\"";

        let parsed = parse_response(response);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].theme, "Parcours scolaire");
        assert_eq!(parsed.records[1].verbatim, "Je vis encore chez mes parents.");
    }

    #[test]
    fn test_block_missing_verbatim_is_dropped() {
        let response = "\
Thème : A
Sous-thème : B

Thème : D
Sous-thème : E
Verbatim : \"F\"";

        let parsed = parse_response(response);
        assert_eq!(parsed.records, vec![record("D", "E", "F")]);
        assert_eq!(parsed.dropped_blocks, 1);
    }

    #[test]
    fn test_error_placeholder_yields_nothing() {
        let parsed = parse_response("[Erreur lors de l'analyse : Communication error: timeout]");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.dropped_blocks, 0);
    }

    #[test]
    fn test_preamble_is_ignored() {
        let response = "Voici l'analyse demandée.\n\nThème : A\nSous-thème : B\nVerbatim : C";
        let parsed = parse_response(response);
        assert_eq!(parsed.records, vec![record("A", "B", "C")]);
    }

    #[test]
    fn test_wrapped_verbatim_is_joined() {
        let response = "Thème : A\nSous-thème : B\nVerbatim : \"Une phrase longue\nqui continue ici.\"";
        let parsed = parse_response(response);
        assert_eq!(parsed.records[0].verbatim, "Une phrase longue qui continue ici.");
    }

    #[test]
    fn test_text_after_blank_line_is_not_appended() {
        let response = "Thème : A\nSous-thème : B\nVerbatim : \"C\"\n\nCe passage montre une hésitation.";
        let parsed = parse_response(response);
        assert_eq!(parsed.records, vec![record("A", "B", "C")]);
    }

    #[test]
    fn test_commentary_after_closed_quote_is_not_appended() {
        let response = "Thème : A\nSous-thème : B\nVerbatim : \"C.\"\nCe passage montre une hésitation.";
        let parsed = parse_response(response);
        assert_eq!(parsed.records, vec![record("A", "B", "C.")]);
    }

    #[test]
    fn test_commentary_after_wrapped_quote_is_not_appended() {
        let response = "Thème : A\nSous-thème : B\nVerbatim : « Je savais\npas trop. »\nL'étudiant hésite.";
        let parsed = parse_response(response);
        assert_eq!(parsed.records[0].verbatim, "Je savais pas trop.");
    }

    #[test]
    fn test_commentary_on_the_quote_line_is_cut() {
        let response = "Thème : A\nSous-thème : B\nVerbatim : \"C.\" (ton ironique)";
        let parsed = parse_response(response);
        assert_eq!(parsed.records[0].verbatim, "C.");
    }

    #[test]
    fn test_unquoted_verbatim_still_continues() {
        let response = "Thème : A\nSous-thème : B\nVerbatim : une phrase\nsur deux lignes";
        let parsed = parse_response(response);
        assert_eq!(parsed.records[0].verbatim, "une phrase sur deux lignes");
    }

    #[test]
    fn test_close_quotation() {
        let mut value = "\"Il m'a dit \"non\" hier.\" remarque".to_string();
        assert!(close_quotation(&mut value));
        assert_eq!(value, "\"Il m'a dit \"non\" hier.\"");

        let mut open = "\"pas encore fermé".to_string();
        assert!(!close_quotation(&mut open));
        assert_eq!(open, "\"pas encore fermé");

        let mut unquoted = "texte libre".to_string();
        assert!(!close_quotation(&mut unquoted));
    }

    #[test]
    fn test_markdown_and_numbering_tolerated() {
        let response = "\
1.
**Thème 1 :** Famille
- **Sous-thème :** Soutien financier
- **Verbatim :** « Mes parents paient mon loyer. »";

        let parsed = parse_response(response);
        assert_eq!(parsed.records, vec![record("Famille", "Soutien financier", "Mes parents paient mon loyer.")]);
    }

    #[test]
    fn test_unaccented_and_english_labels() {
        let response = "Theme: Work\nSub-theme: Part-time job\nVerbatim: “I work weekends.”";
        let parsed = parse_response(response);
        assert_eq!(parsed.records, vec![record("Work", "Part-time job", "I work weekends.")]);
    }

    #[test]
    fn test_repeated_label_last_wins() {
        let response = "Thème : A\nSous-thème : B1\nSous-thème : B2\nVerbatim : C";
        let parsed = parse_response(response);
        assert_eq!(parsed.records[0].sub_theme, "B2");
    }

    #[test]
    fn test_verbatim_colon_inside_quote_is_kept() {
        let response = "Thème : A\nSous-thème : B\nVerbatim : \"Il m'a dit : vas-y.\"";
        let parsed = parse_response(response);
        assert_eq!(parsed.records[0].verbatim, "Il m'a dit : vas-y.");
    }

    #[test]
    fn test_fields_before_theme_are_dropped() {
        let parsed = parse_response("Sous-thème : B\nVerbatim : C");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.dropped_blocks, 1);
    }

    #[test]
    fn test_empty_quotes_count_as_missing() {
        let parsed = parse_response("Thème : A\nSous-thème : B\nVerbatim : \"\"");
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn test_label_field_recognition() {
        assert_eq!(label_field("Thème"), Some(Field::Theme));
        assert_eq!(label_field("THÈME 3"), Some(Field::Theme));
        assert_eq!(label_field("Sous-thème"), Some(Field::SubTheme));
        assert_eq!(label_field("Verbatim "), Some(Field::Verbatim));
        assert_eq!(label_field("2. Thème"), Some(Field::Theme));
        assert_eq!(label_field("Quote"), Some(Field::Verbatim));
        assert_eq!(label_field("Il m'a dit"), None);
    }

    #[test]
    fn test_empty_response() {
        assert_eq!(parse_response(""), ParsedResponse::default());
    }
}
