//! Text-to-document renderer
//!
//! Turns a catalog entry's title and body text into a small PDF that any
//! stock viewer can open. Pure and deterministic: the same inputs always
//! produce identical bytes.

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const BODY_LEADING: f32 = 14.0;
const MAX_LINE_CHARS: usize = 92;
const LINES_PER_PAGE: usize = 44;

/// Render `text` under a `title` heading as a single PDF document
pub fn render(title: &str, text: &str) -> Vec<u8> {
    let lines = wrap_lines(text);
    let pages: Vec<&[String]> = if lines.is_empty() {
        vec![&[]]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };

    // Object layout: 1 = catalog, 2 = page tree, 3 = font,
    // then (page, content) pairs.
    let mut objects: Vec<String> = Vec::new();

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, page_lines) in pages.iter().enumerate() {
        let content = page_content(if i == 0 { Some(title) } else { None }, page_lines);
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH,
            PAGE_HEIGHT,
            5 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    assemble(&objects)
}

/// Serialize numbered objects plus xref table and trailer
fn assemble(objects: &[String]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );
    out
}

/// Content stream for one page
fn page_content(title: Option<&str>, lines: &[String]) -> String {
    let mut ops = String::new();
    let mut body_top = PAGE_HEIGHT - MARGIN;

    if let Some(title) = title {
        ops.push_str(&format!(
            "BT\n/F1 16 Tf\n{} {} Td\n({}) Tj\nET\n",
            MARGIN,
            body_top,
            escape_text(title)
        ));
        body_top -= 30.0;
    }

    ops.push_str(&format!(
        "BT\n/F1 10 Tf\n{} {} Td\n{} TL\n",
        MARGIN, body_top, BODY_LEADING
    ));
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            ops.push_str("T*\n");
        }
        ops.push_str(&format!("({}) Tj\n", escape_text(line)));
    }
    ops.push_str("ET");
    ops
}

/// Escape characters with meaning inside a PDF string literal
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            c if c.is_ascii() && !c.is_control() => out.push(c),
            // Helvetica with the default encoding cannot show these anyway
            _ => out.push('?'),
        }
    }
    out
}

/// Split text into display lines, word-wrapping long ones
fn wrap_lines(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for raw in text.lines() {
        if raw.len() <= MAX_LINE_CHARS {
            out.push(raw.to_string());
            continue;
        }
        let mut current = String::new();
        for word in raw.split_whitespace() {
            if !current.is_empty() && current.len() + 1 + word.len() > MAX_LINE_CHARS {
                out.push(std::mem::take(&mut current));
            }
            // A single word longer than a line gets hard-split
            if word.len() > MAX_LINE_CHARS {
                let mut rest = word;
                while rest.len() > MAX_LINE_CHARS {
                    let mut cut = MAX_LINE_CHARS;
                    while !rest.is_char_boundary(cut) {
                        cut -= 1;
                    }
                    out.push(rest[..cut].to_string());
                    rest = &rest[cut..];
                }
                current = rest.to_string();
                continue;
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            out.push(current);
        }
    }
    out
}
