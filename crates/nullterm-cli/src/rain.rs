use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Widget;

const GLYPHS: &[char] = &[
    '0', '1', 'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ',
    'ソ', 'Z', '$', '#',
];

#[derive(Debug, Clone, Copy)]
struct Streak {
    head: i32,
    len: u16,
    speed: u8,
}

/// Falling-glyph background for the welcome screen.
#[derive(Debug, Clone)]
pub struct MatrixRain {
    seed: u64,
    frame: u64,
    width: u16,
    height: u16,
    drops: Vec<Streak>,
    color: Color,
}

impl MatrixRain {
    pub fn new(seed: u64, color: Color) -> Self {
        Self {
            seed: seed.max(1),
            frame: 0,
            width: 0,
            height: 0,
            drops: Vec::new(),
            color,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn next(&mut self) -> u64 {
        // xorshift64
        let mut x = self.seed;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.seed = x;
        x
    }

    fn spawn(&mut self, height: u16) -> Streak {
        let height = i32::from(height.max(1));
        Streak {
            head: -((self.next() % height as u64) as i32),
            len: 4 + (self.next() % 12) as u16,
            speed: 1 + (self.next() % 3) as u8,
        }
    }

    /// Adapts to a new area (two cells per column) and moves every drop one step.
    pub fn tick(&mut self, area: Rect) {
        if area.width != self.width || area.height != self.height {
            self.width = area.width;
            self.height = area.height;
            let columns = usize::from(area.width / 2);
            self.drops.clear();
            for _ in 0..columns {
                let drop = self.spawn(area.height);
                self.drops.push(drop);
            }
        }
        self.frame += 1;
        let height = i32::from(self.height);
        for index in 0..self.drops.len() {
            let drop = self.drops[index];
            if self.frame % u64::from(drop.speed) != 0 {
                continue;
            }
            let head = drop.head + 1;
            let moved = if head - i32::from(drop.len) > height {
                self.spawn(self.height)
            } else {
                Streak { head, ..drop }
            };
            self.drops[index] = moved;
        }
    }

    fn glyph(&self, column: usize, row: i32) -> char {
        let mix = (column as u64)
            .wrapping_mul(31)
            .wrapping_add(row as u64)
            .wrapping_add(self.frame / 4);
        GLYPHS[(mix % GLYPHS.len() as u64) as usize]
    }

    #[cfg(test)]
    fn column_count(&self) -> usize {
        self.drops.len()
    }
}

impl Widget for &MatrixRain {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (column, drop) in self.drops.iter().enumerate() {
            let x = area.x + (column as u16) * 2;
            if x >= area.right() {
                break;
            }
            for offset in 0..i32::from(drop.len) {
                let row = drop.head - offset;
                if row < 0 || row >= i32::from(area.height) {
                    continue;
                }
                let style = if offset == 0 {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else if offset < i32::from(drop.len) / 2 {
                    Style::default().fg(self.color)
                } else {
                    Style::default().fg(self.color).add_modifier(Modifier::DIM)
                };
                let glyph = self.glyph(column, row);
                buf.set_string(x, area.y + row as u16, glyph.to_string(), style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn columns_follow_area_width() {
        let mut rain = MatrixRain::new(7, Color::Green);
        rain.tick(Rect::new(0, 0, 40, 10));
        assert_eq!(rain.column_count(), 20);
        rain.tick(Rect::new(0, 0, 10, 10));
        assert_eq!(rain.column_count(), 5);
    }

    #[test]
    fn same_seed_draws_same_frame() {
        let area = Rect::new(0, 0, 20, 8);
        let mut first = MatrixRain::new(42, Color::Green);
        let mut second = MatrixRain::new(42, Color::Green);
        let mut a = Buffer::empty(area);
        let mut b = Buffer::empty(area);
        for _ in 0..30 {
            first.tick(area);
            second.tick(area);
        }
        (&first).render(area, &mut a);
        (&second).render(area, &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn render_stays_inside_area() {
        let area = Rect::new(0, 0, 12, 4);
        let mut rain = MatrixRain::new(3, Color::Green);
        for _ in 0..100 {
            rain.tick(area);
            let mut buf = Buffer::empty(area);
            (&rain).render(area, &mut buf);
        }
    }
}
