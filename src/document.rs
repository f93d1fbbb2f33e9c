use std::path::Path;

use log::debug;

use crate::error::{PdfError, Result};
use crate::graphics::Graphics;
use crate::objects::{IndirectObject, ObjId, ObjectAllocator, Value};
use crate::writer::PdfWriter;

const CATALOG_OBJ: ObjId = ObjId(1);
const PAGE_TREE_OBJ: ObjId = ObjId(2);

const PDF_VERSION: &str = "1.6";
const MIME_TYPE: &str = "application/pdf";

/// Page dimensions in points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A0: PageSize = PageSize::new(2383.94, 3370.39);
    pub const A1: PageSize = PageSize::new(1683.78, 2383.94);
    pub const A2: PageSize = PageSize::new(1190.55, 1683.78);
    pub const A3: PageSize = PageSize::new(841.89, 1190.55);
    pub const A4: PageSize = PageSize::new(595.28, 841.89);
    pub const A5: PageSize = PageSize::new(419.53, 595.28);
    pub const A6: PageSize = PageSize::new(297.64, 419.53);
    pub const A7: PageSize = PageSize::new(209.76, 297.64);
    pub const A8: PageSize = PageSize::new(147.40, 209.76);
    pub const A9: PageSize = PageSize::new(104.88, 147.40);
    pub const A10: PageSize = PageSize::new(73.70, 104.88);

    pub const fn new(width: f64, height: f64) -> Self {
        PageSize { width, height }
    }
}

/// One page: geometry plus a drawing canvas. The page's object id is
/// assigned when the page is created, so page ids interleave with any other
/// allocation happening between `new_page` calls.
pub struct PdfPage {
    id: ObjId,
    size: PageSize,
    graphics: Graphics,
}

impl PdfPage {
    fn new(id: ObjId, size: PageSize) -> Self {
        PdfPage {
            id,
            size,
            graphics: Graphics::new(),
        }
    }

    pub fn id(&self) -> ObjId {
        self.id
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn graphics(&self) -> &Graphics {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut Graphics {
        &mut self.graphics
    }

    /// Produce the page's indirect objects: the compiled canvas objects,
    /// then the content stream, the resource dictionary, and the page
    /// object itself, in that order.
    pub fn produce_objects(&self, alloc: &mut ObjectAllocator) -> Vec<IndirectObject> {
        let compiled = self.graphics.compile(alloc);

        let resources_id = alloc.next_object_id();
        let resources = IndirectObject::new(
            resources_id,
            vec![(
                "ProcSet",
                Value::array(vec![
                    Value::name("PDF"),
                    Value::name("Text"),
                    Value::name("ImageB"),
                    Value::name("ImageC"),
                    Value::name("ImageI"),
                ]),
            )],
        )
        .with_resources(compiled.resources);

        let content_id = alloc.next_object_id();
        let content =
            IndirectObject::new(content_id, vec![]).with_stream(compiled.content.into_bytes());

        let page = IndirectObject::typed(
            self.id,
            "Page",
            vec![
                ("Parent", Value::reference(PAGE_TREE_OBJ)),
                (
                    "MediaBox",
                    Value::array(vec![
                        Value::Integer(0),
                        Value::Integer(0),
                        Value::Real(self.size.width),
                        Value::Real(self.size.height),
                    ]),
                ),
                ("Contents", Value::reference(content_id)),
                ("Resources", Value::reference(resources_id)),
            ],
        );

        let mut objects = compiled.objects;
        objects.push(content);
        objects.push(resources);
        objects.push(page);
        objects
    }
}

/// The generated file bytes tagged with their MIME type, for handing to a
/// download or transfer sink.
#[derive(Debug, Clone)]
pub struct Blob {
    pub data: Vec<u8>,
    pub mime_type: &'static str,
}

/// High-level API for building and encoding a document.
///
/// The document owns the ordered page list and the allocator that is the
/// single source of object ids (and pattern names) for the whole graph.
pub struct PdfDocument {
    version: &'static str,
    pages: Vec<PdfPage>,
    allocator: ObjectAllocator,
}

impl PdfDocument {
    pub fn new() -> Self {
        PdfDocument {
            version: PDF_VERSION,
            pages: Vec::new(),
            allocator: ObjectAllocator::new(),
        }
    }

    pub fn version(&self) -> &str {
        self.version
    }

    pub fn pages(&self) -> &[PdfPage] {
        &self.pages
    }

    /// Append a new page and return it for drawing.
    pub fn new_page(&mut self, size: PageSize) -> &mut PdfPage {
        let id = self.allocator.next_object_id();
        let index = self.pages.len();
        self.pages.push(PdfPage::new(id, size));
        &mut self.pages[index]
    }

    /// Encode the document to a complete PDF byte buffer.
    ///
    /// Encoding allocates ids for content, resource, and pattern objects as
    /// it goes, so call this once per built document; a second call would
    /// produce a valid file with different object numbering.
    pub fn generate(&mut self) -> Result<Vec<u8>> {
        debug!("encoding document with {} page(s)", self.pages.len());

        let mut writer = PdfWriter::new(Vec::new());
        writer.write_header(self.version)?;

        let catalog = IndirectObject::typed(
            CATALOG_OBJ,
            "Catalog",
            vec![("Pages", Value::reference(PAGE_TREE_OBJ))],
        );
        writer.write_object(&catalog)?;

        let kids: Vec<Value> = self
            .pages
            .iter()
            .map(|page| Value::reference(page.id()))
            .collect();
        let page_tree = IndirectObject::typed(
            PAGE_TREE_OBJ,
            "Pages",
            vec![
                ("Count", Value::Integer(self.pages.len() as i64)),
                ("Kids", Value::Array(kids)),
            ],
        );
        writer.write_object(&page_tree)?;

        // Serialize each page's objects as they are produced; nothing but
        // the current object is buffered.
        for page in &self.pages {
            for object in page.produce_objects(&mut self.allocator) {
                writer.write_object(&object)?;
            }
        }

        writer.write_xref_and_trailer(self.allocator.max_id(), CATALOG_OBJ)?;

        let buffer = writer.into_inner();
        debug!("encoded {} bytes", buffer.len());
        Ok(buffer)
    }

    /// Encode and tag the buffer with the `application/pdf` MIME type.
    pub fn generate_blob(&mut self) -> Result<Blob> {
        Ok(Blob {
            data: self.generate()?,
            mime_type: MIME_TYPE,
        })
    }

    /// Encode and write the document to a file.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = self.generate()?;
        std::fs::write(path, bytes).map_err(|source| PdfError::Write {
            phase: "file sink",
            source,
        })
    }
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}
