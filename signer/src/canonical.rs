// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Sorted, percent-decoded form of a URL used as the string to sign.

use std::fmt::Write;

use http::Uri;
use smallpics_core::{Error, Result};

/// Keys that carry a signature and are never part of the string to sign.
const SIGNATURE_KEYS: [&str; 2] = ["s", "signature"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryParam {
    /// Decoded, flattened and lower-cased key.
    key: String,
    /// Decoded value.
    value: String,
    /// The segment as it appeared in the URL.
    raw: String,
}

/// A URL split into the parts that take part in canonical signing.
#[derive(Debug, Clone)]
pub(crate) struct CanonicalUrl {
    /// `scheme://authority`
    base: String,
    path: String,
    params: Vec<QueryParam>,
    signatures: Vec<(String, String)>,
}

impl CanonicalUrl {
    /// Parse a URL, dropping signature parameters from its query.
    ///
    /// Array style keys (`a[]`, `a[0]`) are flattened to their base name and
    /// the last value wins. Keys are lower-cased and sorted by byte order.
    ///
    /// A `#` inside the query is a literal part of its value (`bg=#ffffff`).
    /// A `#` before the query is rejected.
    pub fn parse(url: &str) -> Result<Self> {
        let (head, query) = match url.split_once('?') {
            Some((head, query)) => (head, Some(query)),
            None => (url, None),
        };
        if head.contains('#') {
            return Err(Error::malformed_url(format!(
                "url \"{url}\" contains '#' outside its query"
            )));
        }

        // `Uri` treats `#` as the start of a fragment, escape it to keep the
        // whole query under validation.
        let uri: Uri = url.replace('#', "%23").parse()?;
        let scheme = uri
            .scheme_str()
            .ok_or_else(|| Error::malformed_url(format!("url \"{url}\" has no scheme")))?;
        let authority = uri
            .authority()
            .ok_or_else(|| Error::malformed_url(format!("url \"{url}\" has no host")))?;

        let mut params: Vec<QueryParam> = Vec::new();
        let mut signatures = Vec::new();
        for segment in query.unwrap_or_default().split('&') {
            let Some((k, v)) = form_urlencoded::parse(segment.as_bytes()).next() else {
                continue;
            };
            let key = flatten_key(&k).to_lowercase();
            if SIGNATURE_KEYS.contains(&key.as_str()) {
                signatures.push((key, v.into_owned()));
                continue;
            }

            let param = QueryParam {
                key,
                value: v.into_owned(),
                raw: segment.to_string(),
            };
            match params.iter_mut().find(|p| p.key == param.key) {
                Some(existing) => *existing = param,
                None => params.push(param),
            }
        }
        // Vec::sort_by is stable.
        params.sort_by(|a, b| a.key.as_bytes().cmp(b.key.as_bytes()));

        Ok(Self {
            base: format!("{scheme}://{authority}"),
            path: uri.path().to_string(),
            params,
            signatures,
        })
    }

    /// Build the string to sign.
    ///
    /// ## Format
    ///
    /// ```text
    /// scheme://authority + decoded path [+ "?" + k=v&k=v...]
    /// ```
    pub fn string_to_sign(&self) -> Result<String> {
        let mut s = String::with_capacity(self.base.len() + self.path.len() + 64);
        s.write_str(&self.base)?;
        s.write_str(&percent_encoding::percent_decode_str(&self.path).decode_utf8_lossy())?;

        for (idx, p) in self.params.iter().enumerate() {
            s.write_str(if idx == 0 { "?" } else { "&" })?;
            write!(&mut s, "{}={}", p.key, p.value)?;
        }

        Ok(s)
    }

    /// Rebuild the URL with the original query segments in sorted order,
    /// followed by `param=signature`.
    pub fn to_signed_url(&self, param: &str, signature: &str) -> String {
        let mut s = format!("{}{}?", self.base, self.path);
        for p in &self.params {
            s.push_str(&p.raw);
            s.push('&');
        }
        s.push_str(param);
        s.push('=');
        s.push_str(signature);
        s
    }

    /// The last signature found under `param`, if any.
    pub fn signature(&self, param: &str) -> Option<&str> {
        self.signatures
            .iter()
            .rev()
            .find(|(k, _)| k == param)
            .map(|(_, v)| v.as_str())
    }
}

/// Strip the index of array style keys: `a[]` and `a[0]` become `a`.
fn flatten_key(key: &str) -> &str {
    match key.find('[') {
        Some(idx) if idx > 0 && key.ends_with(']') => &key[..idx],
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallpics_core::ErrorKind;
    use test_case::test_case;

    #[test_case("https://images.example.com/images/image.jpg?w=300&h=400", "https://images.example.com/images/image.jpg?h=400&w=300"; "sorted")]
    #[test_case("https://images.example.com/images/image.jpg?", "https://images.example.com/images/image.jpg"; "empty query")]
    #[test_case("https://images.example.com/images/image.jpg", "https://images.example.com/images/image.jpg"; "no query")]
    #[test_case("https://images.example.com/images/unicode-%E9%BD%90%E8%89%B2-0.png?fm=avif", "https://images.example.com/images/unicode-齐色-0.png?fm=avif"; "decoded path")]
    #[test_case("https://images.example.com/a.jpg?mark=logo%20v2.png&W=1", "https://images.example.com/a.jpg?mark=logo v2.png&w=1"; "decoded value lower key")]
    #[test_case("https://images.example.com/a.jpg?w=1&s=abc&signature=def", "https://images.example.com/a.jpg?w=1"; "drops signatures")]
    #[test_case("https://images.example.com/a.jpg?a%5B%5D=1&b=2&a%5B%5D=3", "https://images.example.com/a.jpg?a=3&b=2"; "flattens arrays")]
    #[test_case("https://images.example.com/a.jpg?bg=&w=1", "https://images.example.com/a.jpg?bg=&w=1"; "empty value")]
    fn test_string_to_sign(url: &str, expected: &str) {
        let canonical = CanonicalUrl::parse(url).unwrap();
        assert_eq!(canonical.string_to_sign().unwrap(), expected);
    }

    #[test]
    fn test_to_signed_url_keeps_raw_segments() {
        let canonical = CanonicalUrl::parse(
            "https://images.example.com/images/unicode-%E9%BD%90%E8%89%B2-0.png?mark=logo%20v2.png&fm=avif",
        )
        .unwrap();
        assert_eq!(
            canonical.to_signed_url("s", "sig"),
            "https://images.example.com/images/unicode-%E9%BD%90%E8%89%B2-0.png?fm=avif&mark=logo%20v2.png&s=sig"
        );

        let canonical = CanonicalUrl::parse("https://images.example.com/a.jpg?").unwrap();
        assert_eq!(
            canonical.to_signed_url("signature", "sig"),
            "https://images.example.com/a.jpg?signature=sig"
        );
    }

    #[test]
    fn test_hash_in_query_is_kept() {
        let canonical =
            CanonicalUrl::parse("https://images.example.com/a.jpg?w=300&bg=#ffffff&q=80").unwrap();
        assert_eq!(
            canonical.string_to_sign().unwrap(),
            "https://images.example.com/a.jpg?bg=#ffffff&q=80&w=300"
        );
        assert_eq!(
            canonical.to_signed_url("s", "sig"),
            "https://images.example.com/a.jpg?bg=#ffffff&q=80&w=300&s=sig"
        );

        let canonical =
            CanonicalUrl::parse("https://images.example.com/a.jpg?bg=%23ffffff&w=1").unwrap();
        assert_eq!(
            canonical.string_to_sign().unwrap(),
            "https://images.example.com/a.jpg?bg=#ffffff&w=1"
        );
    }

    #[test]
    fn test_signature_lookup() {
        let canonical =
            CanonicalUrl::parse("https://images.example.com/a.jpg?w=1&s=abc&s=def").unwrap();
        assert_eq!(canonical.signature("s"), Some("def"));
        assert_eq!(canonical.signature("signature"), None);
    }

    #[test_case("images/image.jpg"; "relative")]
    #[test_case("https://images.example.com/a b.jpg"; "space")]
    #[test_case(""; "empty")]
    #[test_case("https://images.example.com/a.jpg#top"; "fragment without query")]
    #[test_case("https://images.example.com/a#b.jpg?w=1"; "hash in path")]
    #[test_case("https://images.example.com/a.jpg?w=1&mark=a b.png#x"; "space after hash")]
    fn test_malformed(url: &str) {
        let err = CanonicalUrl::parse(url).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedUrl);
    }

    #[test_case("a[]", "a")]
    #[test_case("a[0]", "a")]
    #[test_case("a", "a")]
    #[test_case("[]", "[]")]
    #[test_case("a[", "a[")]
    fn test_flatten_key(key: &str, expected: &str) {
        assert_eq!(flatten_key(key), expected);
    }
}
