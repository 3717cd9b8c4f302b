//! Equal-track tables with an optional bold header row.

use super::{header, LayoutContext};
use crate::element::{Align, Anchor, DrawableElement, Paragraph, TableCell, TableGrid};
use crate::geometry::{font, inches, remaining_height, Rect, CONTENT_WIDTH, MARGIN_LEFT};
use crate::types::TableSlide;
use log::warn;

/// Table dimensions as `(rows, cols)`, counting the header row.
///
/// Columns come from the headers, or from the first row when there are
/// no headers. `None` means there is nothing to draw.
pub fn dimensions(headers: &[String], rows: &[Vec<String>]) -> Option<(usize, usize)> {
    let cols = if headers.is_empty() {
        rows.first().map_or(0, Vec::len)
    } else {
        headers.len()
    };
    let row_count = rows.len() + usize::from(!headers.is_empty());

    if cols == 0 || row_count == 0 {
        None
    } else {
        Some((row_count, cols))
    }
}

fn cell(text: &str, align: Align, anchor: Anchor, bold: bool, ctx: &LayoutContext<'_>) -> TableCell {
    let mut paragraph = Paragraph::markup(&ctx.cap(text))
        .align(align)
        .size(font::BODY)
        .face(font::BODY_FACE);
    if bold {
        paragraph = paragraph.bold();
    }
    TableCell { paragraph, anchor }
}

pub fn layout(slide: &TableSlide, ctx: &LayoutContext<'_>) -> Vec<DrawableElement> {
    let (mut elements, body_top) = header(&slide.title, slide.subhead.as_deref(), ctx);

    let Some((row_count, cols)) = dimensions(&slide.headers, &slide.rows) else {
        warn!("Table slide '{}' has no usable headers or rows; skipping table", slide.title);
        return elements;
    };

    let top = body_top + inches(0.2);
    let height = remaining_height(top);
    let col_width = CONTENT_WIDTH / cols as i64;
    let row_height = height / row_count as i64;

    let mut grid_rows = Vec::with_capacity(row_count);
    if !slide.headers.is_empty() {
        grid_rows.push(
            slide
                .headers
                .iter()
                .map(|h| cell(h, Align::Center, Anchor::Middle, true, ctx))
                .collect(),
        );
    }

    for (idx, row) in slide.rows.iter().enumerate() {
        if row.len() > cols {
            warn!(
                "Table slide '{}': row {} has {} cells, dropping {} beyond {} columns",
                slide.title,
                idx,
                row.len(),
                row.len() - cols,
                cols
            );
        }
        let cells = (0..cols)
            .map(|c| {
                let text = row.get(c).map(String::as_str).unwrap_or("");
                cell(text, Align::Left, Anchor::Top, false, ctx)
            })
            .collect();
        grid_rows.push(cells);
    }

    let grid = TableGrid {
        column_widths: vec![col_width; cols],
        row_heights: vec![row_height; row_count],
        rows: grid_rows,
        header: !slide.headers.is_empty(),
    };
    elements.push(DrawableElement::table(
        Rect::new(MARGIN_LEFT, top, CONTENT_WIDTH, height),
        grid,
    ));

    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Content, Role};
    use crate::layout::testing::by_role;
    use crate::options::LayoutOptions;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn slide(headers: &[&str], rows: &[&[&str]]) -> TableSlide {
        TableSlide {
            title: "Numbers".into(),
            subhead: None,
            headers: strings(headers),
            rows: rows.iter().map(|r| strings(r)).collect(),
            notes: None,
        }
    }

    fn grid(elements: &[DrawableElement]) -> &TableGrid {
        match &by_role(elements, Role::Table)[0].content {
            Content::Table(grid) => grid,
            other => panic!("expected table, got {:?}", other),
        }
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(dimensions(&strings(&["a", "b"]), &[strings(&["1", "2"])]), Some((2, 2)));
        assert_eq!(dimensions(&[], &[strings(&["1", "2", "3"]), strings(&["4"])]), Some((2, 3)));
        assert_eq!(dimensions(&strings(&["a"]), &[]), Some((1, 1)));
        assert_eq!(dimensions(&[], &[]), None);
        assert_eq!(dimensions(&[], &[Vec::new()]), None);
    }

    #[test]
    fn test_header_and_body_cells() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let elements = layout(&slide(&["Name", "Score"], &[&["a", "1"], &["b", "2"]]), &ctx);
        let g = grid(&elements);

        assert_eq!(g.row_count(), 3);
        assert_eq!(g.column_count(), 2);
        assert!(g.header);
        assert!(g.rows[0][0].paragraph.bold);
        assert_eq!(g.rows[0][1].paragraph.align, Some(Align::Center));
        assert_eq!(g.rows[1][0].paragraph.align, Some(Align::Left));
        assert_eq!(g.column_widths[0] * 2, CONTENT_WIDTH);
    }

    #[test]
    fn test_ragged_rows_are_normalized() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let elements = layout(&slide(&["A", "B"], &[&["1"], &["1", "2", "3"]]), &ctx);
        let g = grid(&elements);

        assert!(g.rows.iter().all(|r| r.len() == 2));
        assert_eq!(g.rows[1][1].paragraph.text(), "");
        assert_eq!(g.rows[2][1].paragraph.text(), "2");
    }

    #[test]
    fn test_empty_table_draws_nothing() {
        let options = LayoutOptions::new();
        let ctx = LayoutContext::new(&options);
        let elements = layout(&slide(&[], &[]), &ctx);
        assert_eq!(elements.len(), 1);
        assert_eq!(by_role(&elements, Role::Table).len(), 0);
    }
}
