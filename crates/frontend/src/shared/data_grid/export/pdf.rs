//! Tabular PDF: A4 portrait, one table laid out across as many pages as
//! needed with the header row repeated on every page.
//!
//! Uses the standard Helvetica fonts (no embedding), so text is encoded as
//! WinAnsi and measured with the built-in metrics below.

use super::ExportTable;
use contracts::shared::data_grid::CellValue;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 40.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const FONT_SIZE: f32 = 10.0;
const LINE_HEIGHT: f32 = FONT_SIZE * 1.15;
const PADDING: f32 = 5.0;
/// Widest a column may ask for before its text wraps
const MAX_NATURAL_WIDTH: f32 = 180.0;

const HEADER_FILL: f32 = 100.0 / 255.0;
const GRID_LINE: f32 = 200.0 / 255.0;
const GRID_LINE_WIDTH: f32 = 0.3;
const BODY_TEXT: f32 = 80.0 / 255.0;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

/// Helvetica advance widths for ASCII 32..=126 (1/1000 em)
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
    278, 278, 584, 584, 584, 556, 1015, // ':' .. '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // '[' .. '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // '{' .. '~'
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

fn char_width(c: char, bold: bool) -> f32 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    let code = c as u32;
    let units = if (32..=126).contains(&code) {
        table[(code - 32) as usize]
    } else {
        556
    };
    units as f32
}

/// Rendered width of `text` in points
pub fn text_width(text: &str, bold: bool) -> f32 {
    text.chars().map(|c| char_width(c, bold)).sum::<f32>() * FONT_SIZE / 1000.0
}

/// WinAnsi bytes of `text`; characters outside the encoding become `?`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

fn push_char_wrapped(lines: &mut Vec<String>, line: &mut String, c: char, max_width: f32, bold: bool) {
    let mut candidate = line.clone();
    candidate.push(c);
    if !line.is_empty() && text_width(&candidate, bold) > max_width {
        lines.push(std::mem::take(line));
        line.push(c);
    } else {
        *line = candidate;
    }
}

/// Greedy word wrap; words wider than the column are split by character.
/// Always returns at least one line.
pub fn wrap_text(text: &str, max_width: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if text_width(&candidate, bold) <= max_width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if text_width(word, bold) <= max_width {
                line = word.to_string();
            } else {
                for c in word.chars() {
                    push_char_wrapped(&mut lines, &mut line, c, max_width, bold);
                }
            }
        }
        lines.push(line);
    }
    lines
}

/// Column widths filling the content width, proportional to the widest
/// text of each column
pub fn column_widths(table: &ExportTable) -> Vec<f32> {
    let natural: Vec<f32> = table
        .headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let body = table
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|value| text_width(&value.to_string(), false))
                .fold(0.0_f32, f32::max);
            text_width(header, true).max(body).min(MAX_NATURAL_WIDTH) + 2.0 * PADDING
        })
        .collect();

    let total: f32 = natural.iter().sum();
    if total <= 0.0 {
        return natural;
    }
    let scale = CONTENT_WIDTH / total;
    natural.iter().map(|w| w * scale).collect()
}

struct LaidOutCell {
    lines: Vec<String>,
    right: bool,
}

fn lay_out_row(texts: &[(String, bool)], widths: &[f32], bold: bool) -> (Vec<LaidOutCell>, f32) {
    let cells: Vec<LaidOutCell> = widths
        .iter()
        .enumerate()
        .map(|(col, width)| {
            let (text, right) = texts.get(col).cloned().unwrap_or_default();
            LaidOutCell {
                lines: wrap_text(&text, width - 2.0 * PADDING, bold),
                right,
            }
        })
        .collect();
    let line_count = cells.iter().map(|c| c.lines.len()).max().unwrap_or(1);
    let height = line_count as f32 * LINE_HEIGHT + 2.0 * PADDING;
    (cells, height)
}

struct PageCanvas<'a> {
    content: Content,
    widths: &'a [f32],
    y: f32,
    has_body: bool,
}

impl<'a> PageCanvas<'a> {
    fn new(widths: &'a [f32], header: &(Vec<LaidOutCell>, f32)) -> Self {
        let mut content = Content::new();
        content.set_line_width(GRID_LINE_WIDTH);
        content.set_stroke_gray(GRID_LINE);
        let mut canvas = Self {
            content,
            widths,
            y: PAGE_HEIGHT - MARGIN,
            has_body: false,
        };
        canvas.draw_row(&header.0, header.1, true);
        canvas
    }

    fn fits(&self, height: f32) -> bool {
        self.y - height >= MARGIN
    }

    fn draw_row(&mut self, cells: &[LaidOutCell], height: f32, header: bool) {
        let mut x = MARGIN;
        let bottom = self.y - height;
        for (cell, width) in cells.iter().zip(self.widths) {
            if header {
                self.content.set_fill_gray(HEADER_FILL);
                self.content.rect(x, bottom, *width, height);
                self.content.fill_nonzero();
            }
            self.content.rect(x, bottom, *width, height);
            self.content.stroke();

            self.content
                .set_fill_gray(if header { 1.0 } else { BODY_TEXT });
            for (i, line) in cell.lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let tx = if cell.right {
                    x + width - PADDING - text_width(line, header)
                } else {
                    x + PADDING
                };
                // baseline sits roughly 80% of the font size below the line top
                let ty = self.y - PADDING - i as f32 * LINE_HEIGHT - FONT_SIZE * 0.8;
                self.content
                    .begin_text()
                    .set_font(if header { BOLD } else { REGULAR }, FONT_SIZE)
                    .next_line(tx, ty)
                    .show(Str(&encode_win_ansi(line)))
                    .end_text();
            }
            x += width;
        }
        self.y = bottom;
        if !header {
            self.has_body = true;
        }
    }
}

fn cell_text(value: &CellValue) -> (String, bool) {
    let right = matches!(value, CellValue::Integer(_) | CellValue::Number(_));
    (value.to_string(), right)
}

/// Renders `table` and returns the PDF file bytes
pub fn write_pdf(table: &ExportTable) -> Vec<u8> {
    let widths = column_widths(table);
    let header_texts: Vec<(String, bool)> = table.headers.iter().map(|h| (h.clone(), false)).collect();
    let header = lay_out_row(&header_texts, &widths, true);

    let mut pages: Vec<Content> = Vec::new();
    let mut canvas = PageCanvas::new(&widths, &header);
    for row in &table.rows {
        let texts: Vec<(String, bool)> = row.iter().map(cell_text).collect();
        let (cells, height) = lay_out_row(&texts, &widths, false);
        if !canvas.fits(height) && canvas.has_body {
            pages.push(canvas.content);
            canvas = PageCanvas::new(&widths, &header);
        }
        canvas.draw_row(&cells, height, false);
    }
    pages.push(canvas.content);

    assemble(pages)
}

fn assemble(pages: Vec<Content>) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let tree_id = alloc.bump();
    let font_id = alloc.bump();
    let bold_id = alloc.bump();
    let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc.bump(), alloc.bump())).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page, _)| *page))
        .count(page_ids.len() as i32);

    for ((page_id, content_id), content) in page_ids.iter().zip(pages) {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(tree_id);
        page.contents(*content_id);
        page.resources()
            .fonts()
            .pair(REGULAR, font_id)
            .pair(BOLD, bold_id);
        page.finish();

        pdf.stream(*content_id, &content.finish());
    }

    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrences(haystack: &[u8], needle: &str) -> usize {
        haystack
            .windows(needle.len())
            .filter(|w| *w == needle.as_bytes())
            .count()
    }

    fn batch_table(count: usize) -> ExportTable {
        ExportTable {
            headers: vec!["BATCH_NO".to_string(), "QTY".to_string()],
            rows: (1..=count)
                .map(|i| vec![CellValue::Text(format!("B-{}", i)), CellValue::Integer(i as i64 * 10)])
                .collect(),
        }
    }

    #[test]
    fn test_all_rows_written_across_pages() {
        let bytes = write_pdf(&batch_table(37));
        assert!(bytes.starts_with(b"%PDF"));
        for i in 1..=37 {
            assert_eq!(occurrences(&bytes, &format!("(B-{}) Tj", i)), 1, "row {}", i);
        }
        // 34 rows fit under the header on the first page
        assert_eq!(occurrences(&bytes, "/Count 2"), 1);
        assert_eq!(occurrences(&bytes, "(BATCH_NO) Tj"), 2);
    }

    #[test]
    fn test_header_only_document() {
        let bytes = write_pdf(&batch_table(0));
        assert_eq!(occurrences(&bytes, "/Count 1"), 1);
        assert_eq!(occurrences(&bytes, "(QTY) Tj"), 1);
    }

    #[test]
    fn test_column_widths_fill_page() {
        let widths = column_widths(&batch_table(5));
        let total: f32 = widths.iter().sum();
        assert!((total - CONTENT_WIDTH).abs() < 0.01);
        assert!(column_widths(&ExportTable::default()).is_empty());
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("", 50.0, false), vec![String::new()]);
        assert_eq!(wrap_text("short", 100.0, false), vec!["short".to_string()]);

        let lines = wrap_text("Nagpur Hyderabad Sivakasi", 60.0, false);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| text_width(l, false) <= 60.0));

        let lines = wrap_text("L1-0000000000000000000001", 40.0, false);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "L1-0000000000000000000001");
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Qty (kg)"), b"Qty (kg)".to_vec());
        assert_eq!(encode_win_ansi("€5"), vec![0x80, b'5']);
        assert_eq!(encode_win_ansi("Склад"), b"?????".to_vec());
    }

    #[test]
    fn test_text_width() {
        // "0" is 556/1000 em
        assert!((text_width("00", false) - 11.12).abs() < 0.001);
        assert!(text_width("W", true) > text_width("i", true));
    }
}
