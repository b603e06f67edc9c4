//! Vertical scrollbar drawn as a one-column paragraph, plus the offset math
//! shared by the scrolling tables.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::{SB_ARROW, SB_THUMB, SB_TRACK};

/// First visible row so that `selected` stays inside a `viewport`-row window.
pub fn scroll_offset(selected: usize, total: usize, viewport: usize) -> usize {
    if viewport == 0 || total <= viewport {
        return 0;
    }
    let max_off = total - viewport;
    selected.saturating_sub(viewport - 1).min(max_off)
}

pub fn draw_scrollbar(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    total_rows: usize,
    viewport_rows: usize,
    offset: usize,
) {
    if area.height < 3 || total_rows <= viewport_rows {
        return;
    }
    let track = (area.height - 2) as usize;
    let total = total_rows.max(1);
    let view = viewport_rows.clamp(1, total);
    let max_off = total.saturating_sub(view);

    let thumb_len = (track * view).div_ceil(total).max(1).min(track);
    let thumb_top = if max_off == 0 {
        0
    } else {
        ((track - thumb_len) * offset.min(max_off) + max_off / 2) / max_off
    };

    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
    lines.push(Line::from(Span::styled("▲", Style::default().fg(SB_ARROW))));
    for i in 0..track {
        if i >= thumb_top && i < thumb_top + thumb_len {
            lines.push(Line::from(Span::styled("█", Style::default().fg(SB_THUMB))));
        } else {
            lines.push(Line::from(Span::styled("│", Style::default().fg(SB_TRACK))));
        }
    }
    lines.push(Line::from(Span::styled("▼", Style::default().fg(SB_ARROW))));
    f.render_widget(Paragraph::new(lines), area);
}
