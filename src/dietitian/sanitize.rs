use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(r"(?m)^\s*#{1,6}\s*").unwrap();
    static ref EMPHASIS_RE: Regex = Regex::new(r"\*{1,2}|_{2}|`").unwrap();
    static ref BULLET_RE: Regex = Regex::new(r"(?m)^\s*[-•]\s+").unwrap();
    static ref BLANK_RUN_RE: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Strip the markdown the model tends to emit despite instructions and
/// collapse excess blank lines.
pub fn sanitize_reply(raw: &str) -> String {
    let text = HEADING_RE.replace_all(raw, "");
    let text = EMPHASIS_RE.replace_all(&text, "");
    let text = BULLET_RE.replace_all(&text, "");
    let text = BLANK_RUN_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emphasis_and_headings() {
        let raw = "## Plan\n**Breakfast**: oats with *berries*";
        assert_eq!(sanitize_reply(raw), "Plan\nBreakfast: oats with berries");
    }

    #[test]
    fn strips_bullets_and_backticks() {
        let raw = "- eat `protein`\n- drink water";
        assert_eq!(sanitize_reply(raw), "eat protein\ndrink water");
    }

    #[test]
    fn collapses_blank_runs_and_trims() {
        let raw = "\n\nline one\n\n\n\nline two\n";
        assert_eq!(sanitize_reply(raw), "line one\n\nline two");
    }

    #[test]
    fn plain_text_passes_through() {
        let raw = "Aim for 2000 kcal today.";
        assert_eq!(sanitize_reply(raw), raw);
    }
}
