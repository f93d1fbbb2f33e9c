use std::io::{self, Write};

use log::trace;

use crate::error::{PdfError, Result};
use crate::objects::{IndirectObject, ObjId, Value};

/// Low-level PDF writer. Serializes indirect objects to any `Write` target
/// while tracking byte offsets for the xref table.
///
/// Output is line oriented: every emitted line is terminated with `\n`, and
/// the running offset is advanced by exactly the bytes written, so recorded
/// xref offsets always match the produced stream.
pub struct PdfWriter<W: Write> {
    sink: W,
    offset: usize,
    offsets: Vec<(u32, usize)>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(sink: W) -> Self {
        PdfWriter {
            sink,
            offset: 0,
            offsets: Vec::new(),
        }
    }

    /// Write one line of raw bytes, tracking the byte offset.
    fn write_line_raw(&mut self, data: &[u8]) -> io::Result<()> {
        self.sink.write_all(data)?;
        self.sink.write_all(b"\n")?;
        self.offset += data.len() + 1;
        Ok(())
    }

    fn write_line(&mut self, s: &str) -> io::Result<()> {
        self.write_line_raw(s.as_bytes())
    }

    /// Write the version header and the binary marker line.
    pub fn write_header(&mut self, version: &str) -> Result<()> {
        self.write_line(&format!("%PDF-{}", version))
            .and_then(|_| {
                // Marker bytes >= 128 so transports treat the file as binary.
                self.write_line_raw(b"%\xff\xff\xff\xff")
            })
            .map_err(|source| PdfError::Write {
                phase: "header",
                source,
            })
    }

    /// Serialize one object. For addressable objects the current offset is
    /// recorded against the id immediately before the `<id> 0 obj` line.
    pub fn write_object(&mut self, obj: &IndirectObject) -> Result<()> {
        self.write_object_inner(obj).map_err(|source| match obj.id {
            Some(id) => PdfError::WriteObject { id: id.0, source },
            None => PdfError::Write {
                phase: "trailer",
                source,
            },
        })
    }

    fn write_object_inner(&mut self, obj: &IndirectObject) -> io::Result<()> {
        if let Some(id) = obj.id {
            trace!("object {} at offset {}", id.0, self.offset);
            self.offsets.push((id.0, self.offset));
            self.write_line(&format!("{} 0 obj", id.0))?;
        }
        self.write_line("<<")?;
        if let Some(tag) = &obj.type_tag {
            self.write_line(&format!("/Type /{}", tag))?;
        }
        for (key, value) in &obj.properties {
            self.write_line(&format!("/{} {}", key, render_value(value)))?;
        }
        for res in &obj.resources {
            self.write_line(&format!(
                "/{} << /{} {} 0 R >>",
                res.kind.as_str(),
                res.name,
                res.id.0
            ))?;
        }
        self.write_line(">>")?;
        if let Some(data) = &obj.stream {
            self.write_line("stream")?;
            self.write_line_raw(data)?;
            self.write_line("endstream")?;
        }
        if obj.id.is_some() {
            self.write_line("endobj")?;
        }
        Ok(())
    }

    /// Current byte offset in the output.
    pub fn current_offset(&self) -> usize {
        self.offset
    }

    /// Write the xref section, trailer, startxref, and %%EOF.
    ///
    /// The table covers objects 0..=max_id. Object 0 gets the fixed
    /// free-list entry; ids that were allocated but never written are
    /// skipped rather than zero-filled.
    pub fn write_xref_and_trailer(&mut self, max_id: u32, root: ObjId) -> Result<()> {
        let xref_offset = self.offset;

        self.xref_lines(max_id).map_err(|source| PdfError::Write {
            phase: "xref",
            source,
        })?;

        self.write_line("trailer").map_err(|source| PdfError::Write {
            phase: "trailer",
            source,
        })?;
        let trailer = IndirectObject::inline(vec![
            ("Size", Value::Integer(max_id as i64 + 1)),
            ("Root", Value::reference(root)),
        ]);
        self.write_object(&trailer)?;

        self.write_line("startxref")
            .and_then(|_| self.write_line(&xref_offset.to_string()))
            .and_then(|_| self.write_line("%%EOF"))
            .map_err(|source| PdfError::Write {
                phase: "startxref",
                source,
            })
    }

    fn xref_lines(&mut self, max_id: u32) -> io::Result<()> {
        self.write_line("xref")?;
        self.write_line(&format!("0 {}", max_id + 1))?;
        self.write_line("0000000000 65535 f")?;

        let mut entries = std::mem::take(&mut self.offsets);
        entries.sort_by_key(|&(id, _)| id);
        for (id, off) in &entries {
            debug_assert!(*id <= max_id);
            self.write_line(&format!("{:010} 00000 n", off))?;
        }
        self.offsets = entries;
        Ok(())
    }

    /// Return the inner sink, consuming this writer.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Boolean(b) => b.to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Real(f) => format_number(*f),
        Value::Name(name) => format!("/{}", name),
        Value::Reference(id) => format!("{} 0 R", id.0),
        Value::Array(items) => {
            let mut out = String::from("[");
            for item in items {
                out.push_str(&render_value(item));
                out.push(' ');
            }
            out.push(']');
            out
        }
    }
}

/// Format a number for object properties and content-stream operands:
/// no trailing zeros, no exponent, integral values without a decimal point.
pub fn format_number(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.6}", v);
        let s = s.trim_end_matches('0');
        let s = s.trim_end_matches('.');
        s.to_string()
    }
}
