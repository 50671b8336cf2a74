//! Corpus reading: encoding detection and line iteration
//!
//! Files are memory-mapped and split into lines lazily, so a corpus is never
//! held in memory as decoded text. Line terminators (`\n`, `\r\n`) are removed
//! before a line is handed out.

use anyhow::Context;
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Bytes sampled for encoding detection
const SAMPLE_SIZE: usize = 64 * 1024;

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    pub encoding: &'static Encoding,
    /// Length of the byte order mark at the start of the file
    pub bom_len: usize,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            bom_len: 0,
        }
    }
}

/// Detect the encoding of a file by sampling its content
pub fn detect_encoding(path: &Path) -> anyhow::Result<EncodingInfo> {
    let file = File::open(path).with_context(|| format!("cannot open {:?}", path))?;
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    BufReader::new(file)
        .take(SAMPLE_SIZE as u64)
        .read_to_end(&mut sample)
        .with_context(|| format!("cannot read {:?}", path))?;

    Ok(detect_sample(&sample))
}

fn detect_sample(sample: &[u8]) -> EncodingInfo {
    if sample.is_empty() {
        return EncodingInfo::default();
    }

    if let Some((encoding, bom_len)) = Encoding::for_bom(sample) {
        return EncodingInfo { encoding, bom_len };
    }

    // nothing to tell apart; the rest of the file is taken as UTF-8
    if sample.is_ascii() {
        return EncodingInfo::default();
    }

    // a full sample may end inside a multibyte sequence
    let mut detector = EncodingDetector::new();
    detector.feed(sample, sample.len() < SAMPLE_SIZE);

    EncodingInfo {
        encoding: detector.guess(None, true),
        bom_len: 0,
    }
}

/// Memory-mapped line iterator over one corpus file
pub struct CorpusReader {
    /// `None` for empty files, which cannot be mapped
    mmap: Option<memmap2::Mmap>,
    encoding: &'static Encoding,
    position: usize,
    lossy_lines: u64,
}

impl CorpusReader {
    /// Open a file, detecting its encoding
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let info = detect_encoding(path)?;
        let file = File::open(path).with_context(|| format!("cannot open {:?}", path))?;
        let len = file
            .metadata()
            .with_context(|| format!("cannot stat {:?}", path))?
            .len();

        let mmap = if len == 0 {
            None
        } else {
            // SAFETY: the map is read-only; a file truncated underneath us is
            // outside what the tool supports, as with any mmap reader
            Some(unsafe { memmap2::Mmap::map(&file) }.with_context(|| format!("cannot map {:?}", path))?)
        };

        log::debug!("{:?}: {} ({} bytes)", path, info.encoding.name(), len);

        Ok(Self {
            mmap,
            encoding: info.encoding,
            position: info.bom_len,
            lossy_lines: 0,
        })
    }

    /// Total size of the file in bytes
    pub fn size(&self) -> usize {
        self.mmap.as_ref().map_or(0, |m| m.len())
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Lines that needed replacement characters to decode
    pub fn lossy_lines(&self) -> u64 {
        self.lossy_lines
    }

    /// Width of one code unit; newlines are searched unit by unit
    fn unit_width(&self) -> usize {
        if self.encoding == UTF_16LE || self.encoding == UTF_16BE {
            2
        } else {
            1
        }
    }

    /// Offset of the next newline unit in `rest`
    fn find_newline(&self, rest: &[u8]) -> Option<usize> {
        if self.encoding == UTF_16LE {
            rest.chunks_exact(2).position(|u| u == [b'\n', 0]).map(|i| i * 2)
        } else if self.encoding == UTF_16BE {
            rest.chunks_exact(2).position(|u| u == [0, b'\n']).map(|i| i * 2)
        } else {
            memchr::memchr(b'\n', rest)
        }
    }

    fn is_carriage_return(&self, unit: &[u8]) -> bool {
        if self.encoding == UTF_16LE {
            unit == [b'\r', 0]
        } else if self.encoding == UTF_16BE {
            unit == [0, b'\r']
        } else {
            unit == [b'\r']
        }
    }
}

impl Iterator for CorpusReader {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let mmap = self.mmap.as_ref()?;
        if self.position >= mmap.len() {
            return None;
        }

        let width = self.unit_width();
        let rest = &mmap[self.position..];
        let (mut line, consumed) = match self.find_newline(rest) {
            Some(end) => (&rest[..end], end + width),
            None => (rest, rest.len()),
        };
        self.position += consumed;

        if line.len() >= width && self.is_carriage_return(&line[line.len() - width..]) {
            line = &line[..line.len() - width];
        }

        let (decoded, had_errors) = self.encoding.decode_without_bom_handling(line);
        if had_errors {
            if self.lossy_lines == 0 {
                log::warn!("invalid {} sequences, decoding lossily", self.encoding.name());
            }
            self.lossy_lines += 1;
        }

        Some(decoded.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn corpus(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_utf8_detection() {
        let file = corpus("Hello, World!\nПривет мир!\n".as_bytes());
        let info = detect_encoding(file.path()).unwrap();
        assert_eq!(info.encoding, UTF_8);
        assert_eq!(info.bom_len, 0);
    }

    #[test]
    fn test_line_terminators_are_stripped() {
        let file = corpus(b"line1\nline2\r\n\nline3");
        let lines: Vec<_> = CorpusReader::open(file.path()).unwrap().collect();
        assert_eq!(lines, vec!["line1", "line2", "", "line3"]);
    }

    #[test]
    fn test_utf8_bom_is_skipped() {
        let file = corpus(b"\xEF\xBB\xBFpassword\n123456\n");
        let lines: Vec<_> = CorpusReader::open(file.path()).unwrap().collect();
        assert_eq!(lines, vec!["password", "123456"]);
    }

    #[test]
    fn test_utf16le() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "pass\r\nwörd\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let file = corpus(&bytes);

        let reader = CorpusReader::open(file.path()).unwrap();
        assert_eq!(reader.encoding(), UTF_16LE);
        let lines: Vec<_> = reader.collect();
        assert_eq!(lines, vec!["pass", "wörd"]);
    }

    #[test]
    fn test_utf8_char_split_at_sample_boundary() {
        let mut bytes = "café\n".as_bytes().to_vec();
        bytes.resize(SAMPLE_SIZE - 1, b'a');
        bytes.extend_from_slice("é\nnaïve\n".as_bytes());
        let file = corpus(&bytes);

        let reader = CorpusReader::open(file.path()).unwrap();
        assert_eq!(reader.encoding(), UTF_8);
        let lines: Vec<_> = reader.collect();
        assert_eq!(lines.first().map(String::as_str), Some("café"));
        assert_eq!(lines.last().map(String::as_str), Some("naïve"));
        assert!(lines.iter().all(|l| !l.contains('Ã')));
    }

    #[test]
    fn test_ascii_sample_reads_later_utf8() {
        let mut bytes = vec![b'a'; SAMPLE_SIZE];
        bytes.extend_from_slice("\nmotdepassé\n".as_bytes());
        let file = corpus(&bytes);

        let mut reader = CorpusReader::open(file.path()).unwrap();
        assert_eq!(reader.encoding(), UTF_8);
        assert_eq!(reader.nth(1).as_deref(), Some("motdepassé"));
        assert_eq!(reader.lossy_lines(), 0);
    }

    #[test]
    fn test_legacy_single_byte_still_detected() {
        let file = corpus(b"caf\xE9\nna\xEFve\nm\xFCnchen\n");
        let mut reader = CorpusReader::open(file.path()).unwrap();
        assert_ne!(reader.encoding(), UTF_8);
        assert_eq!(reader.by_ref().count(), 3);
        assert_eq!(reader.lossy_lines(), 0);
    }

    #[test]
    fn test_empty_file() {
        let file = corpus(b"");
        let mut reader = CorpusReader::open(file.path()).unwrap();
        assert_eq!(reader.size(), 0);
        assert_eq!(reader.next(), None);
    }

    #[test]
    fn test_position_reaches_size() {
        let file = corpus(b"abc\ndef\n");
        let mut reader = CorpusReader::open(file.path()).unwrap();
        while reader.next().is_some() {}
        assert_eq!(reader.position(), reader.size());
    }

    #[test]
    fn test_missing_file() {
        assert!(CorpusReader::open(Path::new("/nonexistent/wordlist.txt")).is_err());
    }
}
