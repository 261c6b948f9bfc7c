//! Key-value list with message (KVLM)
//!
//! The metadata format shared by commit and tag objects:
//!
//! ```text
//! tree 29ff16c9c14e2652b22f8b78bb08a5a07930c147
//! parent 206941306e8a8af65b66eaaaea388a7ae24d49a0
//! author Jane Doe <jane@example.com> 1527025023 +0200
//! gpgsig -----BEGIN PGP SIGNATURE-----
//!  iQIzBAABCAAdFiEExwXquOM8bWb4Q2zVGxM2FxoLkGQFAlsEjZQACgkQGxM2FxoL
//!  -----END PGP SIGNATURE-----
//!
//! Commit message
//! ```
//!
//! Keys keep their first-insertion order and may repeat; a repeated key collects its
//! values in appearance order. Lines starting with a single space continue the previous
//! value. The first blank line ends the header; everything after it is the message.

use crate::errors::VfError;
use bytes::Bytes;

/// Ordered, duplicate-aware key-value list followed by a free-text message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Kvlm {
    fields: Vec<(Bytes, Vec<Bytes>)>,
    message: Bytes,
}

impl Kvlm {
    pub fn new(message: impl Into<Bytes>) -> Self {
        Kvlm {
            fields: Vec::new(),
            message: message.into(),
        }
    }

    /// Append a value for `key`
    ///
    /// A key that is already present keeps its position and gains another value.
    pub fn insert(&mut self, key: impl Into<Bytes>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, values)) => values.push(value),
            None => self.fields.push((key, vec![value])),
        }
    }

    /// All values recorded for `key`, in appearance order
    pub fn get(&self, key: &[u8]) -> Option<&[Bytes]> {
        self.fields
            .iter()
            .find(|(existing, _)| existing.as_ref() == key)
            .map(|(_, values)| values.as_slice())
    }

    /// The first value recorded for `key`
    pub fn first(&self, key: &[u8]) -> Option<&Bytes> {
        self.get(key).and_then(|values| values.first())
    }

    /// Like [`Kvlm::first`], decoded as UTF-8
    pub fn first_str(&self, key: &[u8]) -> anyhow::Result<Option<&str>> {
        self.first(key)
            .map(|value| std::str::from_utf8(value))
            .transpose()
            .map_err(Into::into)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Bytes> {
        self.fields.iter().map(|(key, _)| key)
    }

    pub fn message(&self) -> &Bytes {
        &self.message
    }

    pub fn parse(raw: &[u8]) -> anyhow::Result<Self> {
        let mut kvlm = Kvlm::default();
        let mut cursor = 0;

        loop {
            let space = find_byte(raw, b' ', cursor);
            let newline = find_byte(raw, b'\n', cursor).ok_or_else(|| {
                VfError::MalformedKvlm("header is not terminated by a blank line".into())
            })?;

            match space {
                Some(space) if space < newline => {
                    let key = &raw[cursor..space];

                    // the value ends at the first newline not followed by a continuation space
                    let mut end = newline;
                    while raw.get(end + 1) == Some(&b' ') {
                        end = find_byte(raw, b'\n', end + 1).ok_or_else(|| {
                            VfError::MalformedKvlm(format!(
                                "unterminated value for key {}",
                                String::from_utf8_lossy(key)
                            ))
                        })?;
                    }

                    let value = unfold(&raw[space + 1..end]);
                    kvlm.insert(Bytes::copy_from_slice(key), value);

                    cursor = end + 1;
                }
                _ => {
                    if newline != cursor {
                        return Err(VfError::MalformedKvlm(format!(
                            "header line without a value at byte {cursor}"
                        ))
                        .into());
                    }

                    let message = &raw[newline + 1..];
                    let message = message.strip_suffix(b"\n").unwrap_or(message);
                    kvlm.message = Bytes::copy_from_slice(message);

                    return Ok(kvlm);
                }
            }
        }
    }

    pub fn serialize(&self) -> Bytes {
        let mut raw = Vec::new();

        for (key, values) in &self.fields {
            for value in values {
                raw.extend_from_slice(key);
                raw.push(b' ');
                raw.extend_from_slice(&fold(value));
                raw.push(b'\n');
            }
        }

        raw.push(b'\n');
        raw.extend_from_slice(&self.message);
        raw.push(b'\n');

        Bytes::from(raw)
    }
}

fn find_byte(raw: &[u8], needle: u8, from: usize) -> Option<usize> {
    raw.get(from..)?
        .iter()
        .position(|&byte| byte == needle)
        .map(|offset| from + offset)
}

// "\n " -> "\n"
fn unfold(value: &[u8]) -> Bytes {
    let mut unfolded = Vec::with_capacity(value.len());
    let mut i = 0;

    while i < value.len() {
        unfolded.push(value[i]);
        if value[i] == b'\n' && value.get(i + 1) == Some(&b' ') {
            i += 1;
        }
        i += 1;
    }

    Bytes::from(unfolded)
}

// "\n" -> "\n "
fn fold(value: &[u8]) -> Vec<u8> {
    let mut folded = Vec::with_capacity(value.len());

    for &byte in value {
        folded.push(byte);
        if byte == b'\n' {
            folded.push(b' ');
        }
    }

    folded
}
