use pdf_draw::objects::{
    IndirectObject, NamedResource, ObjId, ObjectAllocator, ResourceKind, Value,
};

#[test]
fn allocator_is_monotonic_and_unique() {
    let mut alloc = ObjectAllocator::new();
    let ids: Vec<ObjId> = (0..16).map(|_| alloc.next_object_id()).collect();
    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert_eq!(ids[0], ObjId(3));
    assert_eq!(alloc.max_id(), 18);
}

#[test]
fn pattern_names_are_per_allocator() {
    let mut a = ObjectAllocator::new();
    let mut b = ObjectAllocator::new();
    assert_eq!(a.next_pattern_name(), "P1");
    assert_eq!(a.next_pattern_name(), "P2");
    // A fresh allocator restarts the sequence; names are not process-wide.
    assert_eq!(b.next_pattern_name(), "P1");
}

#[test]
fn stream_length_matches_payload_bytes() {
    let payload = b"/Pattern cs\n/P1 scn".to_vec();
    let obj = IndirectObject::new(ObjId(7), vec![]).with_stream(payload.clone());
    assert_eq!(
        obj.properties.last(),
        Some(&("Length".to_string(), Value::Integer(payload.len() as i64)))
    );
    assert_eq!(obj.stream.as_deref(), Some(payload.as_slice()));
}

#[test]
fn resource_kind_names() {
    assert_eq!(ResourceKind::Pattern.as_str(), "Pattern");
    assert_eq!(ResourceKind::Font.as_str(), "Font");
}

#[test]
fn pattern_resource_constructor() {
    let res = NamedResource::pattern("P3", ObjId(9));
    assert_eq!(res.kind, ResourceKind::Pattern);
    assert_eq!(res.name, "P3");
    assert_eq!(res.id, ObjId(9));
}
