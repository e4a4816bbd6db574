use crate::{Field, FieldKind, Record};


/// A small crawl: warcinfo, request, HTTP response, and a bare resource.
pub(crate) const SAMPLE_WARC: &[u8] = b"\
WARC/1.0\r\n\
WARC-Type: warcinfo\r\n\
WARC-Date: 2025-01-02T03:04:05Z\r\n\
WARC-Record-ID: <urn:uuid:00000000-0000-0000-0000-000000000001>\r\n\
WARC-Filename: sample.warc\r\n\
Content-Type: application/warc-fields\r\n\
Content-Length: 23\r\n\
\r\n\
software: warcf-tests\r\n\
\r\n\
\r\n\
WARC/1.0\r\n\
WARC-Type: request\r\n\
WARC-Target-URI: http://example.com/\r\n\
WARC-Date: 2025-01-02T03:04:06Z\r\n\
WARC-Record-ID: <urn:uuid:00000000-0000-0000-0000-000000000002>\r\n\
Content-Type: application/http; msgtype=request\r\n\
Content-Length: 37\r\n\
\r\n\
GET / HTTP/1.1\r\n\
Host: example.com\r\n\
\r\n\
\r\n\
\r\n\
WARC/1.0\r\n\
WARC-Type: response\r\n\
WARC-Target-URI: http://example.com/\r\n\
WARC-Date: 2025-01-02T03:04:07Z\r\n\
WARC-Record-ID: <urn:uuid:00000000-0000-0000-0000-000000000003>\r\n\
WARC-Concurrent-To: <urn:uuid:00000000-0000-0000-0000-000000000002>\r\n\
Content-Type: application/http; msgtype=response\r\n\
Content-Length: 92\r\n\
\r\n\
HTTP/1.1 200 OK\r\n\
Content-Type: text/html; charset=utf-8\r\n\
Content-Length: 13\r\n\
\r\n\
<p>Hello!</p>\r\n\
\r\n\
WARC/1.0\r\n\
WARC-Type: resource\r\n\
WARC-Target-URI: file:///logo.png\r\n\
WARC-Date: 2025-01-02T03:04:08Z\r\n\
WARC-Record-ID: <urn:uuid:00000000-0000-0000-0000-000000000004>\r\n\
Content-Type: image/png\r\n\
Content-Length: 8\r\n\
\r\n\
\x89PNG\r\n\x1a\n\
\r\n\
\r\n\
";

pub(crate) fn record(fields: &[(FieldKind, &str)], content: &[u8]) -> Record {
    Record {
        fields: fields
            .iter()
            .map(|&(kind, value)| Field::new(kind, value))
            .collect(),
        content: content.to_vec(),
    }
}

#[test]
fn sample_lengths_are_consistent() {
    let records = crate::transcode::read_original(SAMPLE_WARC, crate::ContentMode::Materialize)
        .expect("sample should parse");
    assert_eq!(records.len(), 4);
    for record in &records {
        assert_eq!(record.content.len() as u64, record.content_length().unwrap());
    }
}
