/// Object number of an indirect object. Generation numbers are always 0
/// for freshly written documents, so only the number is carried; the
/// serialized forms are `<id> 0 obj` and `<id> 0 R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub u32);

/// Property values of an indirect object, per PDF 32000-1:2008 Section 7.3.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    /// PDF name token (stored without the leading `/`).
    Name(String),
    Array(Vec<Value>),
    Reference(ObjId),
}

impl Value {
    pub fn name(s: &str) -> Self {
        Value::Name(s.to_string())
    }

    pub fn reference(id: ObjId) -> Self {
        Value::Reference(id)
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

/// Resource categories a resource dictionary can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Pattern,
    /// Placeholder: nothing in this crate produces or renders fonts yet.
    Font,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Pattern => "Pattern",
            ResourceKind::Font => "Font",
        }
    }
}

/// One entry of a resource dictionary: maps a short in-stream name to an
/// indirect object. Serializes as `/<kind> << /<name> <id> 0 R >>`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedResource {
    pub kind: ResourceKind,
    pub name: String,
    pub id: ObjId,
}

impl NamedResource {
    pub fn pattern(name: &str, id: ObjId) -> Self {
        NamedResource {
            kind: ResourceKind::Pattern,
            name: name.to_string(),
            id,
        }
    }
}

/// One unit of the PDF object graph.
///
/// An object without an id is inline (the trailer dictionary); everything
/// else is addressable and ends up in the xref table. Properties keep
/// insertion order so output is deterministic.
#[derive(Debug, Clone)]
pub struct IndirectObject {
    pub id: Option<ObjId>,
    pub type_tag: Option<String>,
    pub properties: Vec<(String, Value)>,
    pub resources: Vec<NamedResource>,
    pub stream: Option<Vec<u8>>,
}

impl IndirectObject {
    pub fn new(id: ObjId, properties: Vec<(&str, Value)>) -> Self {
        IndirectObject {
            id: Some(id),
            type_tag: None,
            properties: own_entries(properties),
            resources: Vec::new(),
            stream: None,
        }
    }

    pub fn typed(id: ObjId, type_tag: &str, properties: Vec<(&str, Value)>) -> Self {
        IndirectObject {
            id: Some(id),
            type_tag: Some(type_tag.to_string()),
            properties: own_entries(properties),
            resources: Vec::new(),
            stream: None,
        }
    }

    /// An inline object with no identity of its own (the trailer).
    pub fn inline(properties: Vec<(&str, Value)>) -> Self {
        IndirectObject {
            id: None,
            type_tag: None,
            properties: own_entries(properties),
            resources: Vec::new(),
            stream: None,
        }
    }

    pub fn with_resources(mut self, resources: Vec<NamedResource>) -> Self {
        self.resources = resources;
        self
    }

    /// Attach a raw content-stream payload. The mandatory `Length` property
    /// is appended here from the payload itself, so the declared length can
    /// never drift from the actual byte count.
    pub fn with_stream(mut self, data: Vec<u8>) -> Self {
        self.properties
            .push(("Length".to_string(), Value::Integer(data.len() as i64)));
        self.stream = Some(data);
        self
    }
}

fn own_entries(entries: Vec<(&str, Value)>) -> Vec<(String, Value)> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// The single source of object identifiers (and pattern names) for one
/// document. Ids 1 and 2 are reserved for the catalog and the page tree, so
/// the counter starts at 2 and pre-increments: the first id handed out is 3.
///
/// Pattern names are scoped to the owning document rather than shared
/// process-wide, so generated names are reproducible across runs.
#[derive(Debug)]
pub struct ObjectAllocator {
    count: u32,
    pattern_count: u32,
}

impl ObjectAllocator {
    pub fn new() -> Self {
        ObjectAllocator {
            count: 2,
            pattern_count: 0,
        }
    }

    /// Hand out the next object number. Monotonic, never reused.
    pub fn next_object_id(&mut self) -> ObjId {
        self.count += 1;
        ObjId(self.count)
    }

    /// Hand out the next tiling-pattern name: `P1`, `P2`, ...
    pub fn next_pattern_name(&mut self) -> String {
        self.pattern_count += 1;
        format!("P{}", self.pattern_count)
    }

    /// Highest object number handed out so far (2 when none were).
    pub fn max_id(&self) -> u32 {
        self.count
    }
}

impl Default for ObjectAllocator {
    fn default() -> Self {
        Self::new()
    }
}
