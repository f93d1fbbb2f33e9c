use crate::objects::{IndirectObject, NamedResource, ObjectAllocator, Value};
use crate::writer::format_number;

/// RGB color with an alpha channel, each component in 0.0–1.0.
///
/// Alpha is carried through the model but never reaches the emitted
/// operators; see the crate docs before building on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Opaque color from RGB components.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color { r, g, b, a }
    }

    /// Grayscale color (r = g = b = level).
    pub fn gray(level: f64) -> Self {
        Color::rgb(level, level, level)
    }

    /// The space-separated RGB triple used by color operators.
    fn triple(&self) -> String {
        format!(
            "{} {} {}",
            format_number(self.r),
            format_number(self.g),
            format_number(self.b)
        )
    }
}

/// Stroke attributes: color and line width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    color: Color,
    width: f64,
    opacity: f64,
}

impl Pen {
    pub fn new(color: Color, width: f64) -> Self {
        Pen {
            color,
            width,
            opacity: 1.0,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Currently unused by the renderer (no transparency support).
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }
}

/// Uniform fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidColorBrush {
    color: Color,
    opacity: f64,
}

impl SolidColorBrush {
    pub fn new(color: Color) -> Self {
        SolidColorBrush {
            color,
            opacity: 1.0,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }
}

/// Fill that repeats a small tile of content across the painted region.
///
/// The tile owns its own drawing canvas; its `P<n>` resource name is
/// assigned from the document allocator when the brush is rendered, so
/// names are unique and reproducible within one document.
#[derive(Debug, Clone)]
pub struct TilingPatternBrush {
    width: f64,
    height: f64,
    opacity: f64,
    graphics: Graphics,
}

impl TilingPatternBrush {
    pub fn new(width: f64, height: f64) -> Self {
        TilingPatternBrush {
            width,
            height,
            opacity: 1.0,
            graphics: Graphics::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    /// The tile's own drawing canvas.
    pub fn graphics(&self) -> &Graphics {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut Graphics {
        &mut self.graphics
    }
}

/// The closed set of brush kinds. Renderers match this exhaustively, so an
/// unhandled kind is a compile error rather than silently empty output.
#[derive(Debug, Clone)]
pub enum Brush {
    Solid(SolidColorBrush),
    Tiling(TilingPatternBrush),
}

impl Brush {
    pub fn solid(color: Color) -> Self {
        Brush::Solid(SolidColorBrush::new(color))
    }
}

impl From<SolidColorBrush> for Brush {
    fn from(brush: SolidColorBrush) -> Self {
        Brush::Solid(brush)
    }
}

impl From<TilingPatternBrush> for Brush {
    fn from(brush: TilingPatternBrush) -> Self {
        Brush::Tiling(brush)
    }
}

/// One drawing command. Insertion order is paint order.
#[derive(Debug, Clone)]
pub enum DrawAction {
    Rectangle {
        pen: Option<Pen>,
        brush: Option<Brush>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// Output bundle of the content-stream compiler: operator text plus the
/// named resources and indirect objects the operators depend on.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub content: String,
    pub resources: Vec<NamedResource>,
    pub objects: Vec<IndirectObject>,
}

/// An ordered, append-only sequence of drawing actions.
#[derive(Debug, Clone, Default)]
pub struct Graphics {
    actions: Vec<DrawAction>,
}

impl Graphics {
    pub fn new() -> Self {
        Graphics {
            actions: Vec::new(),
        }
    }

    /// Append a rectangle, stroked with `pen` and/or filled with `brush`.
    ///
    /// With neither a pen nor a brush the action is a documented no-op: it
    /// contributes nothing to the compiled output. Coordinates and sizes are
    /// passed through unvalidated, matching the permissiveness of the
    /// underlying format.
    pub fn draw_rectangle(
        &mut self,
        pen: Option<Pen>,
        brush: Option<Brush>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) {
        self.actions.push(DrawAction::Rectangle {
            pen,
            brush,
            x,
            y,
            width,
            height,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Compile the action sequence into one content stream plus the
    /// resources and indirect objects it requires. Non-empty fragments are
    /// joined with newlines in insertion order; resources and objects are
    /// concatenated in encounter order and never deduplicated, so drawing
    /// the same pattern brush twice produces two independent pattern
    /// object sets.
    pub fn compile(&self, alloc: &mut ObjectAllocator) -> Rendered {
        let mut fragments = Vec::new();
        let mut resources = Vec::new();
        let mut objects = Vec::new();

        for action in &self.actions {
            if let Some(rendered) = render_action(action, alloc) {
                fragments.push(rendered.content);
                resources.extend(rendered.resources);
                objects.extend(rendered.objects);
            }
        }

        Rendered {
            content: fragments.join("\n"),
            resources,
            objects,
        }
    }
}

/// Render one action. `None` means the action paints nothing and owns no
/// objects; callers skip it.
fn render_action(action: &DrawAction, alloc: &mut ObjectAllocator) -> Option<Rendered> {
    match action {
        DrawAction::Rectangle {
            pen,
            brush,
            x,
            y,
            width,
            height,
        } => {
            if pen.is_none() && brush.is_none() {
                return None;
            }

            let mut lines = Vec::new();
            let mut resources = Vec::new();
            let mut objects = Vec::new();

            // Brush state first so pattern selection precedes the path.
            if let Some(brush) = brush {
                let rendered = render_brush(brush, alloc);
                lines.push(rendered.content);
                resources.extend(rendered.resources);
                objects.extend(rendered.objects);
            }
            if let Some(pen) = pen {
                lines.push(render_pen(pen));
            }

            lines.push(format!(
                "{} {} {} {} re",
                format_number(*x),
                format_number(*y),
                format_number(*width),
                format_number(*height)
            ));
            let paint = if pen.is_some() && brush.is_some() {
                "B"
            } else if brush.is_some() {
                "f"
            } else {
                "S"
            };
            lines.push(paint.to_string());

            Some(Rendered {
                content: lines.join("\n"),
                resources,
                objects,
            })
        }
    }
}

fn render_pen(pen: &Pen) -> String {
    format!("{} w\n{} RG", format_number(pen.width()), pen.color().triple())
}

fn render_brush(brush: &Brush, alloc: &mut ObjectAllocator) -> Rendered {
    match brush {
        Brush::Solid(solid) => Rendered {
            content: format!("{} rg", solid.color().triple()),
            resources: Vec::new(),
            objects: Vec::new(),
        },
        Brush::Tiling(tiling) => render_tiling_pattern(tiling, alloc),
    }
}

/// Compile a tiling brush: the nested tile canvas becomes the pattern
/// object's payload, its resources are wrapped in a pattern-resources
/// object, and the fill is selected by name through the Pattern colorspace.
fn render_tiling_pattern(brush: &TilingPatternBrush, alloc: &mut ObjectAllocator) -> Rendered {
    let tile = brush.graphics().compile(alloc);

    let resources_id = alloc.next_object_id();
    let pattern_resources =
        IndirectObject::new(resources_id, vec![]).with_resources(tile.resources);

    let pattern_id = alloc.next_object_id();
    let name = alloc.next_pattern_name();

    let pattern = IndirectObject::typed(
        pattern_id,
        "Pattern",
        vec![
            ("PatternType", Value::Integer(1)),
            ("PaintType", Value::Integer(1)),
            ("TilingType", Value::Integer(2)),
            (
                "BBox",
                Value::array(vec![
                    Value::Integer(0),
                    Value::Integer(0),
                    Value::Real(brush.width()),
                    Value::Real(brush.height()),
                ]),
            ),
            ("XStep", Value::Real(brush.width())),
            ("YStep", Value::Real(brush.height())),
            ("Resources", Value::reference(resources_id)),
        ],
    )
    .with_stream(tile.content.into_bytes());

    let content = format!("/Pattern cs\n/{} scn", name);

    let mut objects = tile.objects;
    objects.push(pattern_resources);
    objects.push(pattern);

    Rendered {
        content,
        resources: vec![NamedResource::pattern(&name, pattern_id)],
        objects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_without_pen_or_brush_is_skipped() {
        let mut alloc = ObjectAllocator::new();
        let mut g = Graphics::new();
        g.draw_rectangle(None, None, 10.0, 10.0, 50.0, 50.0);
        let rendered = g.compile(&mut alloc);
        assert_eq!(rendered.content, "");
        assert!(rendered.resources.is_empty());
        assert!(rendered.objects.is_empty());
        assert_eq!(alloc.max_id(), 2);
    }

    #[test]
    fn paint_operator_selection() {
        let mut alloc = ObjectAllocator::new();
        let pen = Pen::new(Color::rgb(1.0, 0.0, 0.0), 1.0);
        let brush = Brush::solid(Color::rgb(0.0, 1.0, 0.0));

        let mut both = Graphics::new();
        both.draw_rectangle(Some(pen), Some(brush.clone()), 0.0, 0.0, 1.0, 1.0);
        assert!(both.compile(&mut alloc).content.ends_with("\nB"));

        let mut fill_only = Graphics::new();
        fill_only.draw_rectangle(None, Some(brush), 0.0, 0.0, 1.0, 1.0);
        assert!(fill_only.compile(&mut alloc).content.ends_with("\nf"));

        let mut stroke_only = Graphics::new();
        stroke_only.draw_rectangle(Some(pen), None, 0.0, 0.0, 1.0, 1.0);
        assert!(stroke_only.compile(&mut alloc).content.ends_with("\nS"));
    }

    #[test]
    fn brush_operators_precede_pen_operators() {
        let mut alloc = ObjectAllocator::new();
        let mut g = Graphics::new();
        g.draw_rectangle(
            Some(Pen::new(Color::rgb(1.0, 0.0, 0.0), 2.0)),
            Some(Brush::solid(Color::rgb(0.0, 1.0, 0.0))),
            10.0,
            10.0,
            50.0,
            50.0,
        );
        let rendered = g.compile(&mut alloc);
        assert_eq!(
            rendered.content,
            "0 1 0 rg\n2 w\n1 0 0 RG\n10 10 50 50 re\nB"
        );
    }

    #[test]
    fn tiling_pattern_allocates_resources_then_pattern() {
        let mut alloc = ObjectAllocator::new();
        let mut brush = TilingPatternBrush::new(20.0, 20.0);
        brush
            .graphics_mut()
            .draw_rectangle(Some(Pen::new(Color::rgb(1.0, 0.0, 0.0), 1.0)), None, 0.0, 0.0, 10.0, 10.0);

        let mut g = Graphics::new();
        g.draw_rectangle(None, Some(Brush::Tiling(brush)), 0.0, 0.0, 100.0, 100.0);
        let rendered = g.compile(&mut alloc);

        assert!(rendered.content.starts_with("/Pattern cs\n/P1 scn\n"));
        assert_eq!(rendered.objects.len(), 2);
        // Pattern-resources object first, pattern object second.
        assert_eq!(rendered.objects[0].id, Some(crate::objects::ObjId(3)));
        assert_eq!(rendered.objects[1].id, Some(crate::objects::ObjId(4)));
        assert_eq!(rendered.resources.len(), 1);
        assert_eq!(rendered.resources[0].name, "P1");
        assert_eq!(rendered.resources[0].id, crate::objects::ObjId(4));
    }

    #[test]
    fn duplicate_brush_uses_are_not_coalesced() {
        let mut alloc = ObjectAllocator::new();
        let brush = TilingPatternBrush::new(8.0, 8.0);
        let mut g = Graphics::new();
        g.draw_rectangle(None, Some(Brush::Tiling(brush.clone())), 0.0, 0.0, 50.0, 50.0);
        g.draw_rectangle(None, Some(Brush::Tiling(brush)), 50.0, 0.0, 50.0, 50.0);
        let rendered = g.compile(&mut alloc);
        // Each use compiles its own pattern pair under its own name.
        assert_eq!(rendered.objects.len(), 4);
        assert_eq!(rendered.resources[0].name, "P1");
        assert_eq!(rendered.resources[1].name, "P2");
    }

    #[test]
    fn compile_is_pure_modulo_allocator() {
        let mut g = Graphics::new();
        g.draw_rectangle(
            Some(Pen::new(Color::rgb(0.0, 0.0, 1.0), 1.5)),
            Some(Brush::solid(Color::gray(0.5))),
            5.0,
            5.0,
            30.0,
            40.0,
        );
        let mut a1 = ObjectAllocator::new();
        let mut a2 = ObjectAllocator::new();
        assert_eq!(g.compile(&mut a1).content, g.compile(&mut a2).content);
    }
}
