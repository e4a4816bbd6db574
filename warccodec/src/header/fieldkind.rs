/// The registered WARC header fields.
///
/// Each variant's discriminant is its registry id, which is also the one-byte tag a field carries
/// in the [compact format](crate::transcode). The table is fixed: a name that does not appear
/// here cannot be represented, and [`from_name`](Self::from_name) is an exact, case-sensitive
/// match against the standard spelling.
///
/// Ids 10 and 13 are reserved and have no variant. Because those are the byte values of LF and
/// CR, no compact tag can ever be mistaken for a line terminator.
///
/// ```
/// # use warccodec::FieldKind;
/// assert_eq!(FieldKind::from_name("WARC-Target-URI"), Some(FieldKind::TargetURI));
/// assert_eq!(FieldKind::TargetURI.id(), 14);
/// assert_eq!(FieldKind::from_name("warc-target-uri"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum FieldKind {
    /// `WARC-Type`: the type of a record, such as `response` or `resource`.
    Type = 0,
    /// `WARC-Record-ID`: a globally unique identifier for a record.
    RecordId = 1,
    /// `WARC-Date`: the instant that record data capture of a record began.
    Date = 2,
    /// `Content-Length`: the number of octets in a record block.
    ///
    /// This is the authoritative size of the content following a record header.
    ContentLength = 3,
    /// `Content-Type`: the MIME type of a record's data block.
    ContentType = 4,
    /// `WARC-Concurrent-To`: the record ID of a record created in the same capture event.
    ConcurrentTo = 5,
    /// `WARC-Block-Digest`: a `labelled-digest` of a complete record block.
    BlockDigest = 6,
    /// `WARC-Payload-Digest`: a `labelled-digest` of a record's payload.
    PayloadDigest = 7,
    /// `WARC-IP-Address`: the IP address that was contacted to retrieve record content.
    IpAddress = 8,
    /// `WARC-Refers-To`: the record ID of a record for which this one holds additional content.
    RefersTo = 9,
    /// `WARC-Refers-To-Target-URI`: the target URI of the record referred to.
    RefersToTargetURI = 11,
    /// `WARC-Refers-To-Date`: the date of the record referred to.
    RefersToDate = 12,
    /// `WARC-Target-URI`: the original URI that provided the record content.
    TargetURI = 14,
    /// `WARC-Truncated`: the reason a record holds a truncated resource.
    Truncated = 15,
    /// `WARC-Warcinfo-ID`: the ID of the warcinfo record associated with this record.
    InfoID = 16,
    /// `WARC-Filename`: the name of the file containing a warcinfo record.
    Filename = 17,
    /// `WARC-Profile`: the kind of analysis applied to create a revisit record.
    Profile = 18,
    /// `WARC-Identified-Payload-Type`: the content-type discovered by inspecting a payload.
    IdentifiedPayloadType = 19,
    /// `WARC-Segment-Origin-ID`: the ID of the first record in a segmented series.
    SegmentOriginID = 20,
    /// `WARC-Segment-Number`: the ordering of this record in a segmented series.
    SegmentNumber = 21,
    /// `WARC-Segment-Total-Length`: total length of concatenated segmented content blocks.
    SegmentTotalLength = 22,
    /// `WARC-Protocol` (proposed extension).
    Protocol = 23,
    /// `WARC-Cipher-Suite` (proposed extension).
    CipherSuite = 24,
    /// `WARC-Page-ID` (proposed extension).
    PageID = 25,
    /// `WARC-JSON-Metadata` (proposed extension).
    JsonMetadata = 26,
    /// `WARC-Resource-Type` (proposed extension).
    ResourceType = 27,
}

impl FieldKind {
    /// The highest id in the registry.
    pub const MAX_ID: u8 = FieldKind::ResourceType as u8;

    /// The registry id of this field.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look up a field by registry id, returning `None` for reserved or unassigned ids.
    pub fn from_id(id: u8) -> Option<FieldKind> {
        Self::ALL.iter().copied().find(|kind| kind.id() == id)
    }
}

include!(concat!(env!("OUT_DIR"), "/field_kind_conversions.rs"));

/// Resolve a header field name to its registry id.
pub fn lookup_id(name: &str) -> Option<u8> {
    FieldKind::from_name(name).map(FieldKind::id)
}

/// Resolve a registry id to its field name, or `""` if the id is not registered.
pub fn lookup_name(id: u8) -> &'static str {
    FieldKind::from_id(id).map(FieldKind::name).unwrap_or("")
}
