//! Percent-encoding for configuration file and stanza names in property paths.
//!
//! Stanza names such as `monitor:///var/log/messages` or `tcp://9997` contain
//! slashes that would otherwise split the path under `/services/properties`.
//!
//! ```
//! use splunkd_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("monitor:///var/log"), "monitor:%2F%2F%2Fvar%2Flog");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters percent-encoded inside one path segment.
///
/// Colons stay literal: splunkd stanza names (`target-broker:deploymentServer`)
/// are addressed with them unescaped.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b';')
    .add(b'[')
    .add(b']');

pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_unchanged() {
        assert_eq!(encode_path_segment("inputs"), "inputs");
        assert_eq!(encode_path_segment("default"), "default");
        assert_eq!(
            encode_path_segment("target-broker:deploymentServer"),
            "target-broker:deploymentServer"
        );
    }

    #[test]
    fn test_stanza_with_scheme_and_path() {
        assert_eq!(encode_path_segment("tcp://9997"), "tcp:%2F%2F9997");
        assert_eq!(
            encode_path_segment("monitor://C:\\logs\\app log.txt"),
            "monitor:%2F%2FC:%5Clogs%5Capp%20log.txt"
        );
    }

    #[test]
    fn test_percent_and_query_chars() {
        assert_eq!(encode_path_segment("100%"), "100%25");
        assert_eq!(encode_path_segment("a?b#c"), "a%3Fb%23c");
    }

    #[test]
    fn test_unicode_bytes() {
        assert_eq!(encode_path_segment("caf\u{00e9}"), "caf%C3%A9");
    }
}
