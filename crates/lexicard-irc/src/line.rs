//! Zero-copy borrowed IRC lines.
//!
//! A [`Line`] holds references into the raw input, so parsing a chat line
//! allocates only the parameter list. Tag values are unescaped on demand.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use crate::error::ParseError;
use crate::tags::unescape_tag_value;

/// A borrowed IRC line: `[@tags] [:prefix] COMMAND [params] [:trailing]`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Line<'a> {
    /// Raw IRCv3 tags string (without the leading `@`), if present.
    pub tags: Option<&'a str>,
    /// Raw prefix (without the leading `:`), if present.
    pub prefix: Option<&'a str>,
    command: &'a str,
    params: Vec<&'a str>,
}

impl<'a> Line<'a> {
    /// Parse a raw line. A trailing `\r\n` is ignored.
    #[must_use = "parsing result should be handled"]
    pub fn parse(raw: &'a str) -> Result<Line<'a>, ParseError> {
        let mut rest = raw.trim_end_matches(['\r', '\n']);
        if rest.trim().is_empty() {
            return Err(ParseError::EmptyLine);
        }

        let tags = match rest.strip_prefix('@') {
            Some(tagged) => {
                let (tags, after) = tagged.split_once(' ').ok_or(ParseError::MissingCommand)?;
                rest = after.trim_start_matches(' ');
                Some(tags)
            }
            None => None,
        };

        let prefix = match rest.strip_prefix(':') {
            Some(prefixed) => {
                let (prefix, after) = prefixed
                    .split_once(' ')
                    .ok_or(ParseError::MissingCommand)?;
                rest = after.trim_start_matches(' ');
                Some(prefix)
            }
            None => None,
        };

        let (command, mut rest) = rest.split_once(' ').unwrap_or((rest, ""));
        if command.is_empty() {
            return Err(ParseError::MissingCommand);
        }
        if !command.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ParseError::InvalidCommand(command.to_string()));
        }

        let mut params = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing);
                break;
            }
            match rest.split_once(' ') {
                Some((param, after)) => {
                    params.push(param);
                    rest = after;
                }
                None => {
                    params.push(rest);
                    break;
                }
            }
        }

        Ok(Line {
            tags,
            prefix,
            command,
            params,
        })
    }

    /// The command name as sent (numerics included).
    #[inline]
    pub fn command(&self) -> &'a str {
        self.command
    }

    /// Whether the command matches `name`, ignoring ASCII case.
    #[inline]
    pub fn is_command(&self, name: &str) -> bool {
        self.command.eq_ignore_ascii_case(name)
    }

    /// All parameters, the trailing one included.
    #[inline]
    pub fn params(&self) -> &[&'a str] {
        &self.params
    }

    /// A specific parameter by index.
    #[inline]
    pub fn param(&self, index: usize) -> Option<&'a str> {
        self.params.get(index).copied()
    }

    /// The last parameter, which carries the message text for PRIVMSG.
    #[inline]
    pub fn trailing(&self) -> Option<&'a str> {
        self.params.last().copied()
    }

    /// Iterate over all tags as raw `(key, value)` pairs.
    ///
    /// Tags without a value yield an empty string.
    pub fn tags_iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.tags
            .into_iter()
            .flat_map(|tags| tags.split(';'))
            .filter(|tag| !tag.is_empty())
            .map(|tag| tag.split_once('=').unwrap_or((tag, "")))
    }

    /// The unescaped value of a tag, if present.
    pub fn tag_value(&self, key: &str) -> Option<Cow<'a, str>> {
        let (_, value) = self.tags_iter().find(|(k, _)| *k == key)?;
        if value.contains('\\') {
            Some(Cow::Owned(unescape_tag_value(value)))
        } else {
            Some(Cow::Borrowed(value))
        }
    }

    /// The nickname part of a `nick!user@host` prefix.
    ///
    /// Returns `None` when there is no prefix or the prefix is a server name.
    pub fn source_nickname(&self) -> Option<&'a str> {
        let prefix = self.prefix?;
        match prefix.find(['!', '@']) {
            Some(end) => Some(&prefix[..end]),
            None if prefix.contains('.') => None,
            None => Some(prefix),
        }
    }
}

impl Display for Line<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(tags) = self.tags {
            write!(f, "@{} ", tags)?;
        }
        if let Some(prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        f.write_str(self.command)?;
        let count = self.params.len();
        for (i, param) in self.params.iter().enumerate() {
            let last = i + 1 == count;
            if last && (param.is_empty() || param.contains(' ') || param.starts_with(':')) {
                write!(f, " :{}", param)?;
            } else {
                write!(f, " {}", param)?;
            }
        }
        Ok(())
    }
}
