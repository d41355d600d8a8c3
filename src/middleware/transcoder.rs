use super::{Middleware, Next};
use crate::{
    http_client::{BareResponse, HttpClientError},
    request::Request,
};
use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};
use http::{
    HeaderMap, HeaderValue,
    header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE},
};
use log::trace;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::io::{self, Read};

const ACCEPTED_ENCODINGS: &str = "gzip, deflate";
const META_SNIFF_LENGTH: usize = 1024;

static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_.:\-]+)"#)
        .expect("valid regex")
});

/// A middleware decoding response bodies.
///
/// It removes content codings and re-encodes textual bodies into UTF-8.
#[derive(Debug, Default)]
pub struct Transcoder {}

impl Transcoder {
    /// Creates a transcoder.
    pub const fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Middleware for Transcoder {
    async fn handle(
        &self,
        request: &Request,
        next: Next<'_>,
    ) -> Result<BareResponse, HttpClientError> {
        let request = request.clone().set_default_header(
            ACCEPT_ENCODING,
            HeaderValue::from_static(ACCEPTED_ENCODINGS),
        );

        transcode(next.run(&request).await?)
    }
}

fn transcode(mut response: BareResponse) -> Result<BareResponse, HttpClientError> {
    response.body = match decompress(&response.headers, &response.body) {
        Ok(body) => body,
        Err(error) => {
            return Err(HttpClientError::Decode {
                message: error.to_string().into(),
                response: response.into(),
            });
        }
    };
    response.headers.remove(CONTENT_ENCODING);
    response.headers.remove(CONTENT_LENGTH);

    let (media_type, charset) = parse_content_type(&response.headers);

    if !media_type.as_deref().is_none_or(is_text) {
        return Ok(response);
    }

    let encoding = charset
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| Encoding::for_bom(&response.body).map(|(encoding, _)| encoding))
        .or_else(|| {
            media_type
                .as_deref()
                .is_none_or(is_html)
                .then(|| sniff_meta_charset(&response.body))
                .flatten()
        })
        .unwrap_or(UTF_8);

    trace!("decoding a body from {} as {}", response.url, encoding.name());

    let (text, _, _) = encoding.decode(&response.body);
    response.body = text.into_owned().into_bytes();

    if let Some(media_type) = media_type
        && let Ok(value) = HeaderValue::from_str(&format!("{media_type}; charset=utf-8"))
    {
        response.headers.insert(CONTENT_TYPE, value);
    }

    Ok(response)
}

fn decompress(headers: &HeaderMap, body: &[u8]) -> Result<Vec<u8>, io::Error> {
    let mut body = body.to_vec();

    if body.is_empty() {
        return Ok(body);
    }

    // Codings are listed in the order they were applied.
    for coding in content_codings(headers).iter().rev() {
        body = match coding.as_str() {
            "gzip" | "x-gzip" => read_all(MultiGzDecoder::new(body.as_slice()))?,
            "deflate" => read_all(ZlibDecoder::new(body.as_slice()))
                .or_else(|_| read_all(DeflateDecoder::new(body.as_slice())))?,
            "identity" => body,
            coding => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("unsupported content coding: {coding}"),
                ));
            }
        };
    }

    Ok(body)
}

fn read_all(mut reader: impl Read) -> Result<Vec<u8>, io::Error> {
    let mut buffer = vec![];
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}

fn content_codings(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(CONTENT_ENCODING)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|coding| coding.trim().to_ascii_lowercase())
        .filter(|coding| !coding.is_empty())
        .collect()
}

fn parse_content_type(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let Some(value) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return (None, None);
    };
    let mut parameters = value.split(';');
    let media_type = parameters
        .next()
        .map(|media_type| media_type.trim().to_ascii_lowercase())
        .filter(|media_type| !media_type.is_empty());
    let charset = parameters.find_map(|parameter| {
        let (name, value) = parameter.split_once('=')?;

        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_owned())
    });

    (media_type, charset)
}

fn is_text(media_type: &str) -> bool {
    media_type.starts_with("text/")
        || ["/xml", "+xml", "/json", "+json", "/javascript", "/ecmascript"]
            .iter()
            .any(|suffix| media_type.ends_with(suffix))
}

fn is_html(media_type: &str) -> bool {
    media_type == "text/html" || media_type == "application/xhtml+xml"
}

fn sniff_meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let captures = META_CHARSET.captures(&body[..body.len().min(META_SNIFF_LENGTH)])?;

    Encoding::for_label(captures.get(1)?.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{StubHttpClient, build_stub_response};
    use encoding_rs::{SHIFT_JIS, WINDOWS_1252};
    use flate2::{Compression, write::GzEncoder};
    use http::StatusCode;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use url::Url;

    fn build_response(headers: &[(&'static str, &'static str)], body: &[u8]) -> BareResponse {
        BareResponse::new(
            Url::parse("https://foo.com").unwrap(),
            StatusCode::OK,
            headers
                .iter()
                .map(|&(name, value)| {
                    (
                        http::HeaderName::from_static(name),
                        HeaderValue::from_static(value),
                    )
                })
                .collect(),
            body.to_vec(),
        )
    }

    fn gzip(body: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(vec![], Compression::default());
        encoder.write_all(body).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn pass_through_utf8() {
        let response = transcode(build_response(
            &[("content-type", "text/plain; charset=utf-8")],
            "héllo".as_bytes(),
        ))
        .unwrap();

        assert_eq!(response.body, "héllo".as_bytes());
    }

    #[test]
    fn decode_latin1() {
        let response = transcode(build_response(
            &[("content-type", "text/html; charset=ISO-8859-1")],
            b"caf\xe9",
        ))
        .unwrap();

        assert_eq!(String::from_utf8(response.body).unwrap(), "café");
        assert_eq!(
            response.headers[CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn decode_quoted_charset() {
        let (body, _, _) = SHIFT_JIS.encode("日本語");

        let response = transcode(BareResponse {
            headers: [(
                CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=\"Shift_JIS\""),
            )]
            .into_iter()
            .collect(),
            ..build_response(&[], &body)
        })
        .unwrap();

        assert_eq!(String::from_utf8(response.body).unwrap(), "日本語");
    }

    #[test]
    fn sniff_meta_charset_in_html() {
        let (body, _, _) =
            WINDOWS_1252.encode(r#"<html><head><meta charset="windows-1252"></head>ü</html>"#);

        let response = transcode(build_response(&[("content-type", "text/html")], &body)).unwrap();

        assert_eq!(
            String::from_utf8(response.body).unwrap(),
            r#"<html><head><meta charset="windows-1252"></head>ü</html>"#
        );
    }

    #[test]
    fn sniff_http_equiv_charset() {
        assert_eq!(
            sniff_meta_charset(
                br#"<meta http-equiv="Content-Type" content="text/html; charset=iso-8859-2">"#
            ),
            Encoding::for_label(b"iso-8859-2")
        );
    }

    #[test]
    fn strip_byte_order_mark() {
        let response = transcode(build_response(&[], b"\xef\xbb\xbffoo")).unwrap();

        assert_eq!(response.body, b"foo");
    }

    #[test]
    fn decompress_gzip() {
        let response = transcode(BareResponse {
            body: gzip(b"hello"),
            ..build_response(
                &[
                    ("content-encoding", "gzip"),
                    ("content-length", "25"),
                    ("content-type", "text/plain"),
                ],
                &[],
            )
        })
        .unwrap();

        assert_eq!(response.body, b"hello");
        assert!(!response.headers.contains_key(CONTENT_ENCODING));
        assert!(!response.headers.contains_key(CONTENT_LENGTH));
    }

    #[test]
    fn keep_empty_gzip_body() {
        let response = transcode(build_response(
            &[("content-encoding", "gzip"), ("content-type", "text/plain")],
            b"",
        ))
        .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.is_empty());
        assert_eq!(response.headers.get(CONTENT_ENCODING), None);
    }

    #[test]
    fn keep_empty_gzip_body_of_failed_response() {
        let response = transcode(BareResponse {
            status: StatusCode::NOT_FOUND,
            ..build_response(&[("content-encoding", "gzip")], b"")
        })
        .unwrap();

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(response.body.is_empty());
    }

    #[test]
    fn keep_binary_body() {
        let response = transcode(build_response(
            &[("content-type", "image/png")],
            b"\x89PNG\xff",
        ))
        .unwrap();

        assert_eq!(response.body, b"\x89PNG\xff");
        assert_eq!(response.headers[CONTENT_TYPE], "image/png");
    }

    #[test]
    fn fail_on_unknown_coding() {
        let result = transcode(build_response(&[("content-encoding", "br")], b"foo"));

        assert!(matches!(
            &result,
            Err(HttpClientError::Decode { response, .. }) if response.body == b"foo"
        ));
    }

    #[test]
    fn fail_on_broken_gzip() {
        assert!(matches!(
            transcode(build_response(&[("content-encoding", "gzip")], b"foo")),
            Err(HttpClientError::Decode { .. })
        ));
    }

    #[test]
    fn detect_text_media_types() {
        assert!(is_text("text/plain"));
        assert!(is_text("application/rss+xml"));
        assert!(is_text("application/json"));
        assert!(!is_text("image/png"));
    }

    #[tokio::test]
    async fn accept_encodings() {
        let url = Url::parse("https://foo.com").unwrap();
        let client = StubHttpClient::new(
            [build_stub_response(
                url.as_str(),
                StatusCode::OK,
                Default::default(),
                b"foo",
            )]
            .into_iter()
            .collect(),
        );
        let middleware: Vec<Box<dyn Middleware>> = vec![Box::new(Transcoder::new())];

        let response = Next::new(&middleware, &client)
            .run(&Request::new(url, Default::default()))
            .await
            .unwrap();

        assert_eq!(response.body, b"foo");
        assert_eq!(
            client.requests()[0].headers()[ACCEPT_ENCODING],
            ACCEPTED_ENCODINGS
        );
    }
}
