use std::io::{BufRead, Read};

/// Reads one line without its terminator; `None` at end of input.
pub fn next_line<T: BufRead>(reader: &mut T) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Reads one UTF-8 encoded character; `None` at end of input.
/// Malformed sequences read as U+FFFD.
pub fn next_char<T: Read>(reader: &mut T) -> std::io::Result<Option<char>> {
    let mut buf = [0u8; 4];
    if reader.read(&mut buf[..1])? == 0 {
        return Ok(None);
    }
    let width = match buf[0] {
        b if b < 0x80 => 1,
        b if b >= 0xF0 => 4,
        b if b >= 0xE0 => 3,
        b if b >= 0xC0 => 2,
        _ => 1,
    };
    if width > 1 {
        reader.read_exact(&mut buf[1..width])?;
    }
    Ok(Some(
        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER),
    ))
}
