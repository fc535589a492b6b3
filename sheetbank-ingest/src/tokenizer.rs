//! Single-line CSV splitting.
//!
//! Quoted regions protect commas; `""` is a literal quote anywhere in the line.
//! An unterminated quote runs to the end of the line.

pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut in_quote = false;
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quote = !in_quote,
            ',' if !in_quote => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());

    cells
}
