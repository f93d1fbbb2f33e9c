//! Draws a solid rectangle and a tiling-pattern rectangle on an A4 page
//! and writes the result to `patterns.pdf`.

use pdf_draw::{Brush, Color, PageSize, Pen, PdfDocument, TilingPatternBrush};

fn main() -> pdf_draw::Result<()> {
    env_logger::init();

    let mut doc = PdfDocument::new();
    let page = doc.new_page(PageSize::A4);

    page.graphics_mut().draw_rectangle(
        Some(Pen::new(Color::rgb(1.0, 0.0, 0.0), 2.0)),
        Some(Brush::solid(Color::rgb(0.0, 1.0, 0.0))),
        10.0,
        10.0,
        50.0,
        50.0,
    );

    let mut brush = TilingPatternBrush::new(20.0, 20.0);
    brush.graphics_mut().draw_rectangle(
        Some(Pen::new(Color::rgb(1.0, 0.0, 0.0), 1.0)),
        None,
        0.0,
        0.0,
        10.0,
        10.0,
    );
    brush.graphics_mut().draw_rectangle(
        Some(Pen::new(Color::rgb(0.0, 1.0, 0.0), 1.0)),
        Some(Brush::solid(Color::rgb(0.0, 1.0, 1.0))),
        10.0,
        10.0,
        10.0,
        10.0,
    );
    page.graphics_mut().draw_rectangle(
        Some(Pen::new(Color::rgb(0.0, 0.0, 1.0), 1.0)),
        Some(Brush::Tiling(brush)),
        70.0,
        70.0,
        100.0,
        100.0,
    );

    doc.save("patterns.pdf")?;
    println!("wrote patterns.pdf");
    Ok(())
}
