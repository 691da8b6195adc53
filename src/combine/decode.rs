use std::{fs, io, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

/// Reads a whole file as text: UTF-8 first, Latin-1 when that fails.
/// Only I/O can fail; every byte sequence decodes as Latin-1.
pub fn read_text(path: &Path) -> io::Result<(String, TextEncoding)> {
    let bytes = fs::read(path)?;
    Ok(decode(bytes))
}

pub fn decode(bytes: Vec<u8>) -> (String, TextEncoding) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, TextEncoding::Utf8),
        Err(e) => (latin1(e.as_bytes()), TextEncoding::Latin1),
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_utf8_is_kept_verbatim() {
        let (text, enc) = decode("é 中文 ".as_bytes().to_vec());
        assert_eq!(text, "é 中文 ");
        assert_eq!(enc, TextEncoding::Utf8);
    }

    #[test]
    fn invalid_utf8_maps_every_byte() {
        let bytes = vec![b'a', 0xE9, b'b', 0xFF, 0x00];
        let (text, enc) = decode(bytes);
        assert_eq!(enc, TextEncoding::Latin1);
        assert_eq!(text, "a\u{e9}b\u{ff}\u{0}");
        assert_eq!(text.chars().count(), 5);
    }
}
