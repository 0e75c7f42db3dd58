use super::state::FormSnapshot;

pub const TITLE: &str = "GitHub Query Form";
pub const INPUT_LABEL: &str = "GitHub URL:";
pub const PLACEHOLDER: &str = "Enter GitHub URL";

/// Renders the form as terminal text.
pub fn render(snapshot: &FormSnapshot) -> String {
    let input = if snapshot.input.is_empty() {
        PLACEHOLDER
    } else {
        snapshot.input.as_str()
    };

    let mut out = format!("{}\n{} {}\n\n", TITLE, INPUT_LABEL, input);
    if snapshot.loading {
        out.push_str("Loading...\n");
    } else {
        out.push_str("Answer:\n");
        out.push_str(&snapshot.answer);
        out.push('\n');
    }
    out
}
