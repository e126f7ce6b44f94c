/// Splits text into lines, keeping each line's terminator.
///
/// A trailing fragment without `\n` is still a line; empty input has none.
pub fn split_lines_keep_ends(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

pub fn trim_line_end(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

pub fn replace_separator(line: &str, separator: char) -> String {
    line.chars()
        .map(|ch| if ch == separator { ' ' } else { ch })
        .collect()
}
