use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

/// One key binding per line: keys on the left, what they do on the right.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
    block: Option<BlockWidget<'a>>,
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self {
            bindings,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        self.bindings.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);

fn binding_line<'a>((keys, desc): KeyBinding<'a>, key_width: usize) -> Line<'a> {
    let mut spans = vec![];
    let mut used = 0;
    for (i, key) in keys.iter().copied().enumerate() {
        if i > 0 {
            spans.push(Span::styled("/", KEY_SEPARATOR_STYLE));
            used += 1;
        }
        spans.push(Span::styled(key, KEY_STYLE));
        used += key.chars().count();
    }
    spans.push(Span::from(" ".repeat(key_width.saturating_sub(used) + 1)));
    spans.push(Span::styled(desc, DESCRIPTION_STYLE));
    Line::from(spans)
}

fn keys_width(keys: &[&str]) -> usize {
    keys.iter().map(|key| key.chars().count()).sum::<usize>() + keys.len().saturating_sub(1)
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let key_width = self
            .bindings
            .iter()
            .map(|(keys, _)| keys_width(keys))
            .max()
            .unwrap_or(0);
        for (binding, y) in self.bindings.iter().copied().zip(area.top()..area.bottom()) {
            binding_line(binding, key_width).render(Rect { y, height: 1, ..area }, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_line_aligns_descriptions() {
        let bindings: &[KeyBinding] = &[(&["e"], "end rally"), (&["u", "Bksp"], "undo shot")];
        let width = bindings.iter().map(|(keys, _)| keys_width(keys)).max().unwrap();
        assert_eq!(width, 6);
        assert_eq!(binding_line(bindings[0], width).to_string(), "e      end rally");
        assert_eq!(binding_line(bindings[1], width).to_string(), "u/Bksp undo shot");
    }
}
